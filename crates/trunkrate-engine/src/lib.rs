//! Call-rating and override-resolution engine
//!
//! This crate contains the pure rating logic for TrunkRate: pattern
//! matching, override resolution, duration/amount calculation, per-call
//! rating, and margin aggregation.
//!
//! # Architecture
//!
//! The engine is a stateless computation over immutable configuration
//! snapshots:
//! - `matcher` - classifies a dialed number against a rule's pattern
//! - `resolver` - selects the single applicable override for a call
//! - `billing` - raw seconds to billed seconds and monetary amounts
//! - `engine` - per-call orchestration and batch rating
//! - `margin` - portfolio margin rollups (historical and projected)
//!
//! No operation blocks on I/O and no shared mutable state exists between
//! calls, so rating requests can run on parallel workers freely.

pub mod billing;
pub mod engine;
pub mod margin;
pub mod matcher;
pub mod resolver;

pub use engine::{BatchRatingOutcome, RatingEngine, RatingFailure};
pub use margin::MarginAggregator;

/// Engine constants
pub mod constants {
    /// Specificity of an exact CIC match; above any realistic digit-prefix
    /// length so carrier identity always wins a priority tie against one.
    pub const CIC_SPECIFICITY: u32 = 100;

    /// Specificity weight per present OCN/LATA segment; carrier identity
    /// outranks digit prefixes of equal length.
    pub const OCN_LATA_SEGMENT_WEIGHT: u32 = 10;

    /// Digits in an NPANxx pattern (area code + exchange)
    pub const NPANXX_LEN: usize = 6;

    /// Default decimal places for per-call monetary amounts
    pub const DEFAULT_AMOUNT_SCALE: u32 = 4;

    /// Decimal places for margin percentages
    pub const MARGIN_PERCENT_SCALE: u32 = 2;
}
