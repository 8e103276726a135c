//! Override resolution
//!
//! Selects the single effective rate for one side of a call (customer or
//! vendor): dynamic rules first, then the static override for the call's
//! traffic class, then the zone base rate.

use rust_decimal::Decimal;
use tracing::{debug, warn};
use trunkrate_core::models::{CallAttributes, OverrideSet, RateSource, TrafficClass};
use trunkrate_core::{AppError, AppResult};

use crate::matcher;

/// A resolved rate with its provenance
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRate {
    pub rate: Decimal,
    pub source: RateSource,
}

/// Resolve the effective rate for a call against one override set
///
/// `base_rate` is the zone base rate, or `None` when the zone contributes
/// no base rate (disabled or not yet effective). Precedence:
///
/// 1. enabled dynamic rules whose pattern matches, ordered by priority
///    ascending, then specificity descending, then rule id ascending;
///    the winning rate is clamped to `[0, max_override]`
/// 2. the enabled static override for the call's traffic class
/// 3. the base rate
///
/// Rules with invalid patterns are skipped with a warning so one bad rule
/// cannot break rating for any call. With no base rate and no override,
/// resolution fails with `NoApplicableRate` rather than zero-rating.
pub fn resolve(
    call: &CallAttributes,
    overrides: &OverrideSet,
    base_rate: Option<Decimal>,
) -> AppResult<ResolvedRate> {
    // (priority, -specificity, id) minimized over matching enabled rules
    let mut best: Option<(&trunkrate_core::models::DynamicOverrideRule, u32)> = None;

    for rule in overrides.dynamic_rules.iter().filter(|r| r.enabled) {
        let specificity = match matcher::match_rule(rule, call) {
            Ok(Some(s)) => s,
            Ok(None) => continue,
            Err(e) => {
                warn!(rule_id = %rule.id, error = %e, "Skipping override rule with invalid pattern");
                continue;
            }
        };

        let better = match best {
            None => true,
            Some((current, current_spec)) => (rule.priority, std::cmp::Reverse(specificity), &rule.id)
                < (current.priority, std::cmp::Reverse(current_spec), &current.id),
        };
        if better {
            best = Some((rule, specificity));
        }
    }

    if let Some((rule, specificity)) = best {
        let rate = rule.max_override.clamp(rule.override_rate);
        debug!(
            rule_id = %rule.id,
            priority = rule.priority,
            specificity,
            %rate,
            "Dynamic override selected"
        );
        return Ok(ResolvedRate {
            rate,
            source: RateSource::DynamicOverride {
                rule_id: rule.id.clone(),
            },
        });
    }

    if let Some((class, static_override)) = select_static(call, overrides) {
        if static_override.override_rate.is_sign_negative() {
            return Err(AppError::InvalidRate(format!(
                "static {} override rate {} is negative",
                class, static_override.override_rate
            )));
        }
        debug!(traffic_class = %class, rate = %static_override.override_rate, "Static override selected");
        return Ok(ResolvedRate {
            rate: static_override.override_rate,
            source: RateSource::StaticOverride {
                traffic_class: class,
            },
        });
    }

    match base_rate {
        Some(rate) => Ok(ResolvedRate {
            rate,
            source: RateSource::Base,
        }),
        None => Err(AppError::NoApplicableRate(call.zone.clone())),
    }
}

/// Select the static override applicable to a call
///
/// A call carrying a CIC prefers an enabled CIC override; otherwise the
/// traffic class follows the zone code (DOM or INTL).
fn select_static<'a>(
    call: &CallAttributes,
    overrides: &'a OverrideSet,
) -> Option<(TrafficClass, &'a trunkrate_core::models::StaticOverride)> {
    if call.cic.is_some() {
        if let Some(o) = overrides.static_for(TrafficClass::Cic) {
            return Some((TrafficClass::Cic, o));
        }
    }
    let class = TrafficClass::from_zone(&call.zone);
    overrides.static_for(class).map(|o| (class, o))
}
