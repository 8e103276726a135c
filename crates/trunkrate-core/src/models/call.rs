//! Call rating request and result models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AppError, AppResult};

/// A rating request for one call
///
/// The zone code is assumed to be classified upstream; this engine does
/// not map dialed numbers to zones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallAttributes {
    /// Dialed number (E.164 or national digits; punctuation tolerated)
    pub dialed_number: String,

    /// OCN of the calling carrier, when known
    #[serde(default)]
    pub calling_ocn: Option<String>,

    /// LATA of the calling number, when known
    #[serde(default)]
    pub calling_lata: Option<String>,

    /// Carrier identification code, when present
    #[serde(default)]
    pub cic: Option<String>,

    /// Raw call duration in seconds
    pub raw_seconds: i32,

    /// Pre-classified zone code
    pub zone: String,
}

impl CallAttributes {
    /// Validate the request before rating
    pub fn validate(&self) -> AppResult<()> {
        if self.raw_seconds < 0 {
            return Err(AppError::InvalidDuration(i64::from(self.raw_seconds)));
        }
        if self.zone.trim().is_empty() {
            return Err(AppError::InvalidInput("zone code must not be empty".into()));
        }
        Ok(())
    }
}

/// Where an applied rate came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateSource {
    /// Zone base rate
    Base,
    /// Static per-traffic-class override
    StaticOverride {
        traffic_class: super::TrafficClass,
    },
    /// Dynamic pattern rule, identified by rule id
    DynamicOverride { rule_id: String },
}

/// Output of rating one call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingResult {
    /// Zone the call was rated in
    pub zone: String,

    /// Customer-side rate per minute actually applied
    pub applied_rate: Decimal,

    /// Provenance of the customer-side rate
    pub rate_source: RateSource,

    /// Vendor-side rate per minute actually applied
    pub vendor_rate: Decimal,

    /// Provenance of the vendor-side rate
    pub vendor_rate_source: RateSource,

    /// Billable seconds, shared by both sides
    pub billed_seconds: i32,

    /// Vendor-side amount
    pub cost: Decimal,

    /// Customer-side amount
    pub revenue: Decimal,

    /// revenue - cost
    pub profit: Decimal,
}
