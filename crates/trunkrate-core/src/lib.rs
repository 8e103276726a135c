//! TrunkRate Core Library
//!
//! This crate provides the foundational types, traits, and error handling
//! for the TrunkRate call-rating engine. It includes:
//!
//! - Domain models (RateZone, override rules, CallAttributes, RatingResult, margin types)
//! - The `TrunkConfigProvider` trait for configuration-management collaborators
//! - Unified error handling with HTTP response mapping
//! - Application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod traits;

pub use config::AppConfig;
pub use error::AppError;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
