pub mod coverage;
pub mod entities;

pub use coverage::check_coverage;
pub use entities::BlockTransactionCommitment;
