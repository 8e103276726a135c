//! Margin snapshot handlers

use actix_web::{web, HttpResponse};
use tracing::{instrument, warn};
use trunkrate_core::AppError;
use validator::Validate;

use crate::dto::{ApiResponse, MarginSnapshotRequest, ProjectedMarginRequest};
use crate::handlers::AppState;

/// Aggregate a closed set of rating results
///
/// POST /api/v1/margin/snapshot
#[instrument(skip(state, req))]
pub async fn snapshot(
    state: web::Data<AppState>,
    req: web::Json<MarginSnapshotRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Margin snapshot validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let snapshot = state.aggregator.snapshot_from_results(&req.results)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(snapshot)))
}

/// Project margin from a zone rate table and per-zone volumes
///
/// POST /api/v1/margin/projected
#[instrument(skip(state, req))]
pub async fn projected(
    state: web::Data<AppState>,
    req: web::Json<ProjectedMarginRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Margin projection validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let snapshot = state
        .aggregator
        .projected_snapshot(&req.zones, &req.volume_by_zone)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(snapshot)))
}
