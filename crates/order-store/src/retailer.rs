use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use common::RetailerId;
use domain::{RetailerRepository, Result};
use tokio::sync::RwLock;

/// In-memory retailer registry.
///
/// Only tracks which retailers exist; retailer profiles live elsewhere.
#[derive(Clone, Default)]
pub struct InMemoryRetailerRepository {
    retailers: Arc<RwLock<HashSet<RetailerId>>>,
}

impl InMemoryRetailerRepository {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry that already knows the given retailers.
    pub fn with_retailers(ids: impl IntoIterator<Item = RetailerId>) -> Self {
        Self {
            retailers: Arc::new(RwLock::new(ids.into_iter().collect())),
        }
    }

    /// Registers a retailer. Returns false if it was already known.
    pub async fn register(&self, id: RetailerId) -> bool {
        let inserted = self.retailers.write().await.insert(id);
        if inserted {
            tracing::debug!(retailer_id = %id, "retailer registered");
        }
        inserted
    }

    /// Returns the number of known retailers.
    pub async fn retailer_count(&self) -> usize {
        self.retailers.read().await.len()
    }
}

#[async_trait]
impl RetailerRepository for InMemoryRetailerRepository {
    async fn exists(&self, id: RetailerId) -> Result<bool> {
        Ok(self.retailers.read().await.contains(&id))
    }
}
