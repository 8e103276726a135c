//! In-memory trunk snapshot store
//!
//! Stands in for the configuration-management collaborator: snapshots are
//! installed whole and handed out as shared immutable values, so a snapshot
//! replaced mid-flight never affects calls already being rated against it.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use trunkrate_core::models::TrunkRatingConfig;
use trunkrate_core::traits::TrunkConfigProvider;
use trunkrate_core::AppResult;

/// Thread-safe in-memory store of trunk rating snapshots
#[derive(Default)]
pub struct MemoryTrunkStore {
    trunks: RwLock<HashMap<String, Arc<TrunkRatingConfig>>>,
}

impl MemoryTrunkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install or replace a trunk's snapshot
    pub fn install(&self, config: TrunkRatingConfig) {
        let mut trunks = self.trunks.write();
        trunks.insert(config.trunk_id.clone(), Arc::new(config));
    }

    /// Remove a trunk's snapshot, returning whether one existed
    pub fn remove(&self, trunk_id: &str) -> bool {
        self.trunks.write().remove(trunk_id).is_some()
    }

    /// Fetch a trunk's snapshot
    pub fn get(&self, trunk_id: &str) -> Option<Arc<TrunkRatingConfig>> {
        self.trunks.read().get(trunk_id).cloned()
    }

    /// Number of installed snapshots
    pub fn len(&self) -> usize {
        self.trunks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.trunks.read().is_empty()
    }
}

#[async_trait]
impl TrunkConfigProvider for MemoryTrunkStore {
    async fn trunk_snapshot(&self, trunk_id: &str) -> AppResult<Option<Arc<TrunkRatingConfig>>> {
        Ok(self.get(trunk_id))
    }
}
