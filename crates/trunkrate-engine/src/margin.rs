//! Margin aggregation
//!
//! Folds rating results (or projected per-zone volumes) into a portfolio
//! margin snapshot. Aggregation only runs over a closed, fully-materialized
//! set of results; an empty set is an error, never a silent zero snapshot.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::instrument;
use trunkrate_core::config::MarginThresholds;
use trunkrate_core::models::{
    MarginSnapshot, MarginStatus, RateZone, RatingResult, ZoneMargin, ZoneVolume,
};
use trunkrate_core::{AppError, AppResult};

use crate::constants::MARGIN_PERCENT_SCALE;

/// Margin aggregator with configured health thresholds
#[derive(Debug, Clone)]
pub struct MarginAggregator {
    thresholds: MarginThresholds,
}

impl Default for MarginAggregator {
    fn default() -> Self {
        Self::new(MarginThresholds::default())
    }
}

impl MarginAggregator {
    pub fn new(thresholds: MarginThresholds) -> Self {
        Self { thresholds }
    }

    /// Classify a margin percentage against the configured thresholds
    pub fn classify(&self, margin_percent: Decimal) -> MarginStatus {
        if margin_percent < self.thresholds.critical_below {
            MarginStatus::Critical
        } else if margin_percent < self.thresholds.warning_below {
            MarginStatus::Warning
        } else {
            MarginStatus::Healthy
        }
    }

    /// Aggregate a closed set of rating results into a snapshot
    ///
    /// Results are grouped by zone in first-seen order, so the snapshot's
    /// zone (and risk-zone) ordering is deterministic for display.
    #[instrument(skip(self, results), fields(count = results.len()))]
    pub fn snapshot_from_results(&self, results: &[RatingResult]) -> AppResult<MarginSnapshot> {
        if results.is_empty() {
            return Err(AppError::EmptyAggregation(
                "no rating results to aggregate".to_string(),
            ));
        }

        // Group by zone, preserving first-seen order
        let mut order: Vec<String> = Vec::new();
        let mut grouped: std::collections::HashMap<String, (Decimal, Decimal, Decimal)> =
            std::collections::HashMap::new();

        for result in results {
            let entry = grouped
                .entry(result.zone.clone())
                .or_insert_with(|| {
                    order.push(result.zone.clone());
                    (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
                });
            entry.0 += Decimal::from(result.billed_seconds);
            entry.1 += result.revenue;
            entry.2 += result.cost;
        }

        let zones = order
            .into_iter()
            .map(|zone| {
                let (billed_seconds, revenue, cost) = grouped[&zone];
                let volume_minutes = (billed_seconds / Decimal::from(60))
                    .round_dp_with_strategy(MARGIN_PERCENT_SCALE, RoundingStrategy::MidpointAwayFromZero);
                self.zone_margin(zone, volume_minutes, revenue, cost)
            })
            .collect();

        Ok(self.roll_up(zones))
    }

    /// Forward-looking "what-if" snapshot from a zone rate table and
    /// projected volumes
    ///
    /// Revenue and cost are `minutes x rate`; volume entries keep their
    /// input order. An unknown zone code is an error, not a skipped row.
    #[instrument(skip(self, zones, volume_by_zone), fields(count = volume_by_zone.len()))]
    pub fn projected_snapshot(
        &self,
        zones: &[RateZone],
        volume_by_zone: &[ZoneVolume],
    ) -> AppResult<MarginSnapshot> {
        if volume_by_zone.is_empty() {
            return Err(AppError::EmptyAggregation(
                "no zone volumes to project".to_string(),
            ));
        }

        let per_zone = volume_by_zone
            .iter()
            .map(|volume| {
                if volume.minutes.is_sign_negative() {
                    return Err(AppError::InvalidInput(format!(
                        "zone {} has negative projected volume {}",
                        volume.zone, volume.minutes
                    )));
                }
                let zone = zones
                    .iter()
                    .find(|z| z.zone == volume.zone)
                    .ok_or_else(|| AppError::UnknownZone(volume.zone.clone()))?;
                zone.validate()?;

                let revenue = (volume.minutes * zone.customer_rate)
                    .round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero);
                let cost = (volume.minutes * zone.vendor_rate)
                    .round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero);

                Ok(self.zone_margin(zone.zone.clone(), volume.minutes, revenue, cost))
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(self.roll_up(per_zone))
    }

    fn zone_margin(
        &self,
        zone: String,
        volume_minutes: Decimal,
        revenue: Decimal,
        cost: Decimal,
    ) -> ZoneMargin {
        let profit = revenue - cost;
        let margin_percent = if revenue > Decimal::ZERO {
            (profit / revenue * Decimal::from(100)).round_dp_with_strategy(
                MARGIN_PERCENT_SCALE,
                RoundingStrategy::MidpointAwayFromZero,
            )
        } else {
            Decimal::ZERO
        };

        ZoneMargin {
            zone,
            volume_minutes,
            revenue,
            cost,
            profit,
            margin_percent,
            status: self.classify(margin_percent),
        }
    }

    /// Derive portfolio totals from the per-zone list
    ///
    /// Totals are sums over the zone list only; they are never accumulated
    /// separately, so they cannot drift from the zones shown.
    fn roll_up(&self, zones: Vec<ZoneMargin>) -> MarginSnapshot {
        let total_revenue: Decimal = zones.iter().map(|z| z.revenue).sum();
        let total_cost: Decimal = zones.iter().map(|z| z.cost).sum();
        let total_profit = total_revenue - total_cost;

        let overall_margin_percent = if total_revenue > Decimal::ZERO {
            (total_profit / total_revenue * Decimal::from(100)).round_dp_with_strategy(
                MARGIN_PERCENT_SCALE,
                RoundingStrategy::MidpointAwayFromZero,
            )
        } else {
            Decimal::ZERO
        };

        let profitable_zone_count = zones.iter().filter(|z| z.profit > Decimal::ZERO).count();
        let risk_zones = zones
            .iter()
            .filter(|z| z.status == MarginStatus::Critical)
            .map(|z| z.zone.clone())
            .collect();

        MarginSnapshot {
            total_zone_count: zones.len(),
            zones,
            total_revenue,
            total_cost,
            total_profit,
            overall_margin_percent,
            profitable_zone_count,
            risk_zones,
        }
    }
}
