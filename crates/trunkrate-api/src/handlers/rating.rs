//! Call rating handlers

use actix_web::{web, HttpResponse};
use tracing::{debug, instrument, warn};
use trunkrate_core::models::CallAttributes;
use trunkrate_core::traits::TrunkConfigProvider;
use trunkrate_core::AppError;
use validator::Validate;

use crate::dto::{ApiResponse, RateBatchRequest, RateCallRequest};
use crate::handlers::AppState;

/// Rate one call against a trunk's snapshot
///
/// POST /api/v1/trunks/{trunk_id}/rating/calls
#[instrument(skip(state, req))]
pub async fn rate_call(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<RateCallRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Rate call validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let trunk_id = path.into_inner();
    let config = state
        .store
        .trunk_snapshot(&trunk_id)
        .await?
        .ok_or(AppError::TrunkNotFound(trunk_id))?;

    let call: CallAttributes = req.into_inner().into();
    debug!(dialed = %call.dialed_number, zone = %call.zone, "Rating call");

    let result = state.engine.rate_call(&config, &call)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(result)))
}

/// Rate a batch of calls with partial-failure reporting
///
/// POST /api/v1/trunks/{trunk_id}/rating/batch
#[instrument(skip(state, req))]
pub async fn rate_batch(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<RateBatchRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Rate batch validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let trunk_id = path.into_inner();
    let config = state
        .store
        .trunk_snapshot(&trunk_id)
        .await?
        .ok_or(AppError::TrunkNotFound(trunk_id))?;

    let calls: Vec<CallAttributes> = req
        .into_inner()
        .calls
        .into_iter()
        .map(Into::into)
        .collect();

    let outcome = state.engine.rate_batch(&config, &calls);
    debug!(
        ok = outcome.results.len(),
        failed = outcome.failures.len(),
        "Batch rated"
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(outcome)))
}
