//! Domain models for TrunkRate
//!
//! This module contains all the core domain models used throughout the engine.

pub mod call;
pub mod margin;
pub mod overrides;
pub mod trunk;
pub mod zone;

pub use call::{CallAttributes, RateSource, RatingResult};
pub use margin::{MarginSnapshot, MarginStatus, ZoneMargin, ZoneVolume};
pub use overrides::{
    DynamicOverrideRule, MaxOverride, OverrideSet, RuleType, StaticOverride, TrafficClass,
};
pub use trunk::TrunkRatingConfig;
pub use zone::RateZone;
