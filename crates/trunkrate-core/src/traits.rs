//! Common traits for configuration collaborators
//!
//! The engine treats trunk configuration as read-only value objects; this
//! trait is the seam through which a host hands snapshots to the engine.

use crate::models::TrunkRatingConfig;
use crate::AppResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Read-only provider of trunk rating snapshots
#[async_trait]
pub trait TrunkConfigProvider: Send + Sync {
    /// Fetch the current snapshot for a trunk, if one is installed
    async fn trunk_snapshot(&self, trunk_id: &str) -> AppResult<Option<Arc<TrunkRatingConfig>>>;
}
