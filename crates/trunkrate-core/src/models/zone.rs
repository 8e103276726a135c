//! Rate zone model
//!
//! A rate zone is a traffic classification (domestic, international,
//! toll-free, ...) with its own customer and vendor per-minute rates and
//! duration rounding parameters.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AppError, AppResult};

/// Rate zone entity
///
/// One entry in a trunk's zone rate table. The customer rate is what the
/// trunk owner bills the customer per minute; the vendor rate is what the
/// upstream carrier bills the trunk owner. Both sides share the zone's
/// billing increment and minimum duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateZone {
    /// Zone code (unique within a trunk, e.g. "DOM", "INTL", "TF")
    pub zone: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Customer-side rate per minute (revenue)
    pub customer_rate: Decimal,

    /// Vendor-side rate per minute (cost)
    pub vendor_rate: Decimal,

    /// Billing increment in seconds (e.g. 6 or 60)
    pub billing_increment: i32,

    /// Minimum billable duration in seconds
    #[serde(default)]
    pub minimum_duration: i32,

    /// When this zone's rates become effective (None = always)
    #[serde(default)]
    pub effective_from: Option<DateTime<Utc>>,

    /// Whether the zone is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl RateZone {
    /// Validate structural invariants
    pub fn validate(&self) -> AppResult<()> {
        if self.zone.trim().is_empty() {
            return Err(AppError::InvalidInput("zone code must not be empty".into()));
        }
        if self.customer_rate.is_sign_negative() {
            return Err(AppError::InvalidRate(format!(
                "zone {} has negative customer rate {}",
                self.zone, self.customer_rate
            )));
        }
        if self.vendor_rate.is_sign_negative() {
            return Err(AppError::InvalidRate(format!(
                "zone {} has negative vendor rate {}",
                self.zone, self.vendor_rate
            )));
        }
        if self.billing_increment <= 0 {
            return Err(AppError::InvalidInput(format!(
                "zone {} billing increment must be positive, got {}",
                self.zone, self.billing_increment
            )));
        }
        if self.minimum_duration < 0 {
            return Err(AppError::InvalidInput(format!(
                "zone {} minimum duration must not be negative, got {}",
                self.zone, self.minimum_duration
            )));
        }
        Ok(())
    }

    /// Check whether the zone currently contributes a base rate
    pub fn is_active(&self) -> bool {
        self.enabled && self.effective_from.map_or(true, |from| Utc::now() >= from)
    }
}

impl Default for RateZone {
    fn default() -> Self {
        Self {
            zone: String::new(),
            description: String::new(),
            customer_rate: Decimal::ZERO,
            vendor_rate: Decimal::ZERO,
            billing_increment: 6,
            minimum_duration: 0,
            effective_from: None,
            enabled: true,
        }
    }
}
