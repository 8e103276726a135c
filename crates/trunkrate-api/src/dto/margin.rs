//! Margin snapshot request DTOs

use serde::Deserialize;
use trunkrate_core::models::{RateZone, RatingResult, ZoneVolume};
use validator::Validate;

/// Historical aggregation over a closed set of rating results
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MarginSnapshotRequest {
    #[validate(length(min = 1))]
    pub results: Vec<RatingResult>,
}

/// Forward-looking "what-if" margin projection
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProjectedMarginRequest {
    /// Zone rate table to project against
    #[validate(length(min = 1))]
    pub zones: Vec<RateZone>,

    /// Projected volume per zone, in minutes
    #[validate(length(min = 1))]
    pub volume_by_zone: Vec<ZoneVolume>,
}
