//! Trunk rating configuration snapshot

use serde::{Deserialize, Serialize};

use super::{OverrideSet, RateZone};
use crate::AppResult;

/// Immutable rating configuration for one trunk
///
/// A snapshot is built by the configuration-management collaborator and
/// passed read-only into every rating call; the engine never mutates it.
/// Customer-facing and vendor-facing overrides are independent sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrunkRatingConfig {
    /// Trunk identifier
    pub trunk_id: String,

    /// Zone rate table
    pub zones: Vec<RateZone>,

    /// Overrides applied to the customer-side (revenue) rate
    #[serde(default)]
    pub customer_overrides: OverrideSet,

    /// Overrides applied to the vendor-side (cost) rate
    #[serde(default)]
    pub vendor_overrides: OverrideSet,
}

impl TrunkRatingConfig {
    /// Look up a zone by code
    pub fn zone(&self, code: &str) -> Option<&RateZone> {
        self.zones.iter().find(|z| z.zone == code)
    }

    /// Validate every zone in the table
    pub fn validate(&self) -> AppResult<()> {
        for zone in &self.zones {
            zone.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zone_lookup() {
        let config = TrunkRatingConfig {
            trunk_id: "trunk-001".to_string(),
            zones: vec![
                RateZone {
                    zone: "DOM".to_string(),
                    customer_rate: dec!(0.0095),
                    vendor_rate: dec!(0.0045),
                    ..Default::default()
                },
                RateZone {
                    zone: "INTL".to_string(),
                    customer_rate: dec!(0.085),
                    vendor_rate: dec!(0.042),
                    ..Default::default()
                },
            ],
            customer_overrides: OverrideSet::default(),
            vendor_overrides: OverrideSet::default(),
        };

        assert_eq!(config.zone("INTL").unwrap().customer_rate, dec!(0.085));
        assert!(config.zone("MOBILE").is_none());
    }
}
