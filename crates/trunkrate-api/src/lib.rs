//! API layer for TrunkRate
//!
//! HTTP handlers exposing the rating engine: trunk snapshot management,
//! per-call and batch rating, and margin snapshots.

#![forbid(unsafe_code)]

pub mod dto;
pub mod handlers;
pub mod store;

pub use dto::ApiResponse;
pub use handlers::{configure_margin, configure_trunks, AppState};
pub use store::MemoryTrunkStore;
