//! # Outbound Ports
//!
//! Collaborators the state manager consumes: the verified-state store and
//! the predicate plugins that define legal transitions.

use std::sync::Arc;

use async_trait::async_trait;
use shared_types::{Address, StateUpdate, Transaction, VerifiedStateUpdate, U256};

use crate::domain::StateManagerError;

/// Read access to state updates whose inclusion has been verified.
#[async_trait]
pub trait StateDb: Send + Sync {
    /// Every verified update intersecting `[start, end)`.
    async fn get_verified_state_updates(
        &self,
        start: U256,
        end: U256,
    ) -> Result<Vec<VerifiedStateUpdate>, StateManagerError>;
}

/// Transition logic for ranges owned by one predicate.
///
/// Treated as untrusted: it may be slow, fail, or disagree with itself.
#[async_trait]
pub trait PredicatePlugin: Send + Sync {
    /// Compute the update that results from applying `transaction` on top of
    /// `previous`, or fail if the transition is not authorized.
    async fn execute_state_transition(
        &self,
        previous: &StateUpdate,
        transaction: &Transaction,
        witness: &[u8],
    ) -> Result<StateUpdate, StateManagerError>;
}

/// Resolves predicate addresses to plugins.
#[async_trait]
pub trait PluginManager: Send + Sync {
    async fn get_plugin(
        &self,
        address: &Address,
    ) -> Result<Arc<dyn PredicatePlugin>, StateManagerError>;
}
