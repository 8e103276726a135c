//! Per-call rating orchestration
//!
//! Ties the matcher, resolver, and billing calculator together to rate one
//! call end to end, plus batch rating with partial-failure semantics.

use serde::Serialize;
use tracing::{debug, instrument, warn};
use trunkrate_core::config::RatingConfig;
use trunkrate_core::models::{CallAttributes, RatingResult, TrunkRatingConfig};
use trunkrate_core::{AppError, AppResult};

use crate::{billing, resolver};

/// The rating engine
///
/// Stateless over immutable configuration snapshots; one instance can be
/// shared freely across worker threads.
#[derive(Debug, Clone)]
pub struct RatingEngine {
    config: RatingConfig,
}

/// One failed call in a batch
///
/// Carries the error code and message rather than the error itself so the
/// outcome can be serialized into an API response.
#[derive(Debug, Clone, Serialize)]
pub struct RatingFailure {
    /// Position of the call in the submitted batch
    pub index: usize,
    /// Dialed number of the failed call
    pub dialed_number: String,
    /// Machine-readable error code
    pub error_code: &'static str,
    /// Human-readable message
    pub message: String,
}

/// Outcome of rating a batch: successes alongside isolated failures
#[derive(Debug, Clone, Serialize)]
pub struct BatchRatingOutcome {
    pub results: Vec<RatingResult>,
    pub failures: Vec<RatingFailure>,
}

impl Default for RatingEngine {
    fn default() -> Self {
        Self::new(RatingConfig::default())
    }
}

impl RatingEngine {
    /// Create an engine with the given rating configuration
    pub fn new(config: RatingConfig) -> Self {
        Self { config }
    }

    /// Rate one call against a trunk's configuration snapshot
    ///
    /// Customer and vendor rates are resolved independently against their
    /// own override sets, but share one billed duration so margin math
    /// stays consistent.
    #[instrument(skip(self, config), fields(trunk_id = %config.trunk_id, zone = %call.zone))]
    pub fn rate_call(
        &self,
        config: &TrunkRatingConfig,
        call: &CallAttributes,
    ) -> AppResult<RatingResult> {
        call.validate()?;

        let zone = config
            .zone(&call.zone)
            .ok_or_else(|| AppError::UnknownZone(call.zone.clone()))?;
        zone.validate()?;

        let base_customer = zone.is_active().then_some(zone.customer_rate);
        let base_vendor = zone.is_active().then_some(zone.vendor_rate);

        let customer = resolver::resolve(call, &config.customer_overrides, base_customer)?;
        let vendor = resolver::resolve(call, &config.vendor_overrides, base_vendor)?;

        // One billed duration shared by both sides
        let billed = billing::billed_seconds(
            call.raw_seconds,
            zone.billing_increment,
            zone.minimum_duration,
        )?;

        let scale = self.config.amount_scale;
        let revenue = billing::amount(billed, customer.rate, scale)?;
        let cost = billing::amount(billed, vendor.rate, scale)?;

        debug!(billed, %revenue, %cost, "Call rated");

        Ok(RatingResult {
            zone: zone.zone.clone(),
            applied_rate: customer.rate,
            rate_source: customer.source,
            vendor_rate: vendor.rate,
            vendor_rate_source: vendor.source,
            billed_seconds: billed,
            cost,
            revenue,
            profit: revenue - cost,
        })
    }

    /// Rate a batch of calls, isolating per-call failures
    ///
    /// A failed call never aborts the batch; it is reported alongside the
    /// successes.
    #[instrument(skip(self, config, calls), fields(trunk_id = %config.trunk_id, count = calls.len()))]
    pub fn rate_batch(
        &self,
        config: &TrunkRatingConfig,
        calls: &[CallAttributes],
    ) -> BatchRatingOutcome {
        let mut results = Vec::with_capacity(calls.len());
        let mut failures = Vec::new();

        for (index, call) in calls.iter().enumerate() {
            match self.rate_call(config, call) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!(index, dialed = %call.dialed_number, error = %e, "Call failed to rate");
                    failures.push(RatingFailure {
                        index,
                        dialed_number: call.dialed_number.clone(),
                        error_code: e.error_code(),
                        message: e.to_string(),
                    });
                }
            }
        }

        BatchRatingOutcome { results, failures }
    }
}
