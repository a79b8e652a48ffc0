use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use shared_types::Address;
use tracing::info;

use crate::domain::StateManagerError;
use crate::ports::{PluginManager, PredicatePlugin};

/// Predicate plugins keyed by address, populated at startup.
#[derive(Default, Clone)]
pub struct PredicateRegistry {
    plugins: HashMap<Address, Arc<dyn PredicatePlugin>>,
}

impl PredicateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `plugin` for `address`, replacing any previous one.
    pub fn register(&mut self, address: Address, plugin: Arc<dyn PredicatePlugin>) -> &mut Self {
        info!(predicate = %hex::encode(address), "[pc-03] Registered predicate plugin");
        self.plugins.insert(address, plugin);
        self
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.plugins.contains_key(address)
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

#[async_trait]
impl PluginManager for PredicateRegistry {
    async fn get_plugin(
        &self,
        address: &Address,
    ) -> Result<Arc<dyn PredicatePlugin>, StateManagerError> {
        self.plugins
            .get(address)
            .cloned()
            .ok_or(StateManagerError::UnknownPredicate(*address))
    }
}
