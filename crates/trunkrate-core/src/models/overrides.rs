//! Override configuration models
//!
//! A trunk can override its zone base rates two ways: static per-traffic-class
//! rates, and prioritized pattern-based dynamic rules. Both are read-only
//! value objects to the rating engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Traffic class for static overrides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrafficClass {
    /// Domestic traffic
    Dom,
    /// International traffic
    Intl,
    /// Carrier-identified traffic (call carries a CIC)
    Cic,
}

impl fmt::Display for TrafficClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrafficClass::Dom => write!(f, "DOM"),
            TrafficClass::Intl => write!(f, "INTL"),
            TrafficClass::Cic => write!(f, "CIC"),
        }
    }
}

impl TrafficClass {
    /// Parse from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "DOM" | "DOMESTIC" => Some(TrafficClass::Dom),
            "INTL" | "INTERNATIONAL" => Some(TrafficClass::Intl),
            "CIC" => Some(TrafficClass::Cic),
            _ => None,
        }
    }

    /// Classify a zone code into DOM or INTL
    ///
    /// CIC is never derived from a zone; it applies only when the call
    /// itself carries a carrier identification code.
    pub fn from_zone(zone: &str) -> Self {
        match zone.to_uppercase().as_str() {
            "INTL" | "INTERNATIONAL" => TrafficClass::Intl,
            _ => TrafficClass::Dom,
        }
    }
}

/// Static override: a toggleable fixed rate per traffic class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticOverride {
    /// Traffic class this override applies to
    pub traffic_class: TrafficClass,

    /// Whether the override is active
    pub enabled: bool,

    /// Fixed rate per minute replacing the zone base rate
    pub override_rate: Decimal,
}

/// Pattern type of a dynamic override rule
///
/// Modeled as a sum type so adding a pattern kind is a compile-time-checked
/// change; every matcher must handle every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleType {
    /// 6-digit area-code + exchange prefix of the national number
    #[serde(rename = "NPANxx")]
    NpaNxx,
    /// OCN and/or LATA of the calling carrier ("OCN", "/LATA", "OCN/LATA")
    #[serde(rename = "OCN_LATA")]
    OcnLata,
    /// Arbitrary-length digit prefix of the dialed number
    Prefix,
    /// Exact carrier identification code
    #[serde(rename = "CIC")]
    Cic,
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleType::NpaNxx => write!(f, "NPANxx"),
            RuleType::OcnLata => write!(f, "OCN_LATA"),
            RuleType::Prefix => write!(f, "Prefix"),
            RuleType::Cic => write!(f, "CIC"),
        }
    }
}

/// Upper clamp for a dynamic rule's rate
///
/// `Cap(0)` means "force free". No-cap is the explicit `Unbounded` variant;
/// it is never implied by an absent field, so editing a cap can never
/// silently remove it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaxOverride {
    /// No upper clamp (must be explicit in configuration)
    Unbounded,
    /// Clamp the applied rate to this value
    #[serde(untagged)]
    Cap(Decimal),
}

impl MaxOverride {
    /// Clamp a rate into `[0, cap]` (or just `[0, ∞)` when unbounded)
    pub fn clamp(&self, rate: Decimal) -> Decimal {
        let floored = rate.max(Decimal::ZERO);
        match self {
            MaxOverride::Unbounded => floored,
            MaxOverride::Cap(cap) => floored.min(*cap),
        }
    }
}

/// Dynamic override rule: a pattern-based rate with priority ordering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynamicOverrideRule {
    /// Unique rule identifier
    pub id: String,

    /// Pattern type
    #[serde(rename = "type")]
    pub rule_type: RuleType,

    /// Pattern string; semantics depend on `rule_type`
    pub pattern: String,

    /// Rate per minute to apply when the rule matches
    pub override_rate: Decimal,

    /// Upper clamp applied at resolution time, never at storage time
    pub max_override: MaxOverride,

    /// Evaluation priority (lower = evaluated first)
    pub priority: i32,

    /// Whether the rule participates in matching
    pub enabled: bool,

    /// Optional operator note
    #[serde(default)]
    pub description: Option<String>,
}

/// One side's override configuration (customer-facing or vendor-facing)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverrideSet {
    /// Static per-traffic-class overrides
    #[serde(default)]
    pub static_overrides: Vec<StaticOverride>,

    /// Pattern-based dynamic rules
    #[serde(default)]
    pub dynamic_rules: Vec<DynamicOverrideRule>,
}

impl OverrideSet {
    /// Find the enabled static override for a traffic class, if any
    pub fn static_for(&self, class: TrafficClass) -> Option<&StaticOverride> {
        self.static_overrides
            .iter()
            .find(|o| o.enabled && o.traffic_class == class)
    }
}
