pub mod entities;
pub mod keys;
pub mod tree;

pub use entities::*;
pub use keys::KeyPrefix;
pub use tree::{block_tree, state_update_leaf};
