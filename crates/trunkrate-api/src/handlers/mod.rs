//! HTTP handlers for the rating API

pub mod margin;
pub mod rating;
pub mod trunks;

use std::sync::Arc;

use actix_web::web;
use trunkrate_engine::{MarginAggregator, RatingEngine};

use crate::store::MemoryTrunkStore;

/// Shared application state
///
/// The engine and aggregator are stateless; the store holds immutable
/// snapshots behind a lock, so the whole state is safe to share across
/// workers.
#[derive(Clone)]
pub struct AppState {
    pub engine: RatingEngine,
    pub aggregator: MarginAggregator,
    pub store: Arc<MemoryTrunkStore>,
}

impl AppState {
    pub fn new(engine: RatingEngine, aggregator: MarginAggregator, store: Arc<MemoryTrunkStore>) -> Self {
        Self {
            engine,
            aggregator,
            store,
        }
    }
}

/// Configure trunk snapshot and rating routes
pub fn configure_trunks(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/trunks/{trunk_id}")
            .route("/rating-config", web::put().to(trunks::put_trunk_config))
            .route("/rating-config", web::get().to(trunks::get_trunk_config))
            .route(
                "/rating-config",
                web::delete().to(trunks::delete_trunk_config),
            )
            .route("/rating/calls", web::post().to(rating::rate_call))
            .route("/rating/batch", web::post().to(rating::rate_batch)),
    );
}

/// Configure margin snapshot routes
pub fn configure_margin(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/margin")
            .route("/snapshot", web::post().to(margin::snapshot))
            .route("/projected", web::post().to(margin::projected)),
    );
}
