//! Trunk rating-config snapshot handlers
//!
//! The seam through which a configuration-management collaborator installs
//! immutable rating snapshots.

use actix_web::{web, HttpResponse};
use tracing::{info, instrument};
use trunkrate_core::models::TrunkRatingConfig;
use trunkrate_core::AppError;

use crate::dto::ApiResponse;
use crate::handlers::AppState;

/// Install or replace a trunk's rating snapshot
///
/// PUT /api/v1/trunks/{trunk_id}/rating-config
#[instrument(skip(state, body))]
pub async fn put_trunk_config(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<TrunkRatingConfig>,
) -> Result<HttpResponse, AppError> {
    let trunk_id = path.into_inner();
    let mut config = body.into_inner();

    if config.trunk_id.is_empty() {
        config.trunk_id = trunk_id.clone();
    } else if config.trunk_id != trunk_id {
        return Err(AppError::InvalidInput(format!(
            "trunk id mismatch: path {} vs body {}",
            trunk_id, config.trunk_id
        )));
    }

    // Reject malformed zone tables at install time, not rating time
    config.validate()?;

    info!(trunk_id = %trunk_id, zones = config.zones.len(), "Installing trunk rating snapshot");
    state.store.install(config);

    Ok(HttpResponse::NoContent().finish())
}

/// Fetch a trunk's installed snapshot
///
/// GET /api/v1/trunks/{trunk_id}/rating-config
#[instrument(skip(state))]
pub async fn get_trunk_config(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let trunk_id = path.into_inner();
    let config = state
        .store
        .get(&trunk_id)
        .ok_or(AppError::TrunkNotFound(trunk_id))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(config.as_ref())))
}

/// Remove a trunk's snapshot
///
/// DELETE /api/v1/trunks/{trunk_id}/rating-config
#[instrument(skip(state))]
pub async fn delete_trunk_config(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let trunk_id = path.into_inner();
    if !state.store.remove(&trunk_id) {
        return Err(AppError::TrunkNotFound(trunk_id));
    }

    info!(trunk_id = %trunk_id, "Removed trunk rating snapshot");
    Ok(HttpResponse::NoContent().finish())
}
