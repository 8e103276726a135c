//! Margin analytics models
//!
//! Aggregates of rating results (or projected volumes) grouped by zone,
//! rolled up into a portfolio snapshot for dashboards.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Margin health classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarginStatus {
    Healthy,
    Warning,
    Critical,
}

impl fmt::Display for MarginStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarginStatus::Healthy => write!(f, "HEALTHY"),
            MarginStatus::Warning => write!(f, "WARNING"),
            MarginStatus::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Per-zone margin rollup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneMargin {
    /// Zone code
    pub zone: String,

    /// Billed volume in minutes
    pub volume_minutes: Decimal,

    /// Customer-side amount
    pub revenue: Decimal,

    /// Vendor-side amount
    pub cost: Decimal,

    /// revenue - cost
    pub profit: Decimal,

    /// profit / revenue * 100, or 0 when revenue is 0
    pub margin_percent: Decimal,

    /// Health classification against configured thresholds
    pub status: MarginStatus,
}

/// Portfolio-level margin snapshot
///
/// Portfolio fields are always derived from the per-zone list, never
/// accumulated independently, so they cannot drift from the zones shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginSnapshot {
    /// Per-zone rollups, in input order
    pub zones: Vec<ZoneMargin>,

    pub total_revenue: Decimal,
    pub total_cost: Decimal,
    pub total_profit: Decimal,
    pub overall_margin_percent: Decimal,

    /// Number of zones with positive profit
    pub profitable_zone_count: usize,

    /// Total number of zones in the snapshot
    pub total_zone_count: usize,

    /// Zone codes classified CRITICAL, in input order
    pub risk_zones: Vec<String>,
}

/// Projected traffic volume for one zone (what-if margin views)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneVolume {
    /// Zone code
    pub zone: String,

    /// Projected volume in minutes
    pub minutes: Decimal,
}
