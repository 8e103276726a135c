//! Unified error handling for TrunkRate
//!
//! This module provides a single error type covering every failure mode of
//! the rating engine and its HTTP host, with automatic response mapping.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Main application error type
///
/// All errors in the application should be converted to this type.
/// It implements `ResponseError` for automatic HTTP response generation.
///
/// Per-call rating errors (`UnknownZone`, `NoApplicableRate`, `InvalidRate`,
/// `InvalidDuration`) are fatal for that single call only; batch rating
/// isolates them and continues. `InvalidPattern` is softer still: the
/// offending rule is skipped and rating proceeds with the remaining rules.
#[derive(Error, Debug)]
pub enum AppError {
    // ==================== Rating Errors ====================
    #[error("Invalid pattern on rule {rule_id}: {reason}")]
    InvalidPattern { rule_id: String, reason: String },

    #[error("Unknown zone: {0}")]
    UnknownZone(String),

    #[error("No applicable rate for zone {0}: no base rate and no override matched")]
    NoApplicableRate(String),

    #[error("Invalid rate: {0}")]
    InvalidRate(String),

    #[error("Invalid duration: {0} seconds")]
    InvalidDuration(i64),

    // ==================== Aggregation Errors ====================
    #[error("Cannot aggregate margin: {0}")]
    EmptyAggregation(String),

    // ==================== Configuration Errors ====================
    #[error("Trunk not found: {0}")]
    TrunkNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // ==================== Validation Errors ====================
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ==================== Resource Errors ====================
    #[error("Not found: {0}")]
    NotFound(String),

    // ==================== Internal Errors ====================
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            AppError::Validation(_)
            | AppError::InvalidInput(_)
            | AppError::InvalidRate(_)
            | AppError::InvalidDuration(_)
            | AppError::InvalidPattern { .. } => StatusCode::BAD_REQUEST,

            // 404 Not Found
            AppError::UnknownZone(_) | AppError::TrunkNotFound(_) | AppError::NotFound(_) => {
                StatusCode::NOT_FOUND
            }

            // 422 Unprocessable Entity
            AppError::NoApplicableRate(_) | AppError::EmptyAggregation(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }

            // 500 Internal Server Error
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidPattern { .. } => "invalid_pattern",
            AppError::UnknownZone(_) => "unknown_zone",
            AppError::NoApplicableRate(_) => "no_applicable_rate",
            AppError::InvalidRate(_) => "invalid_rate",
            AppError::InvalidDuration(_) => "invalid_duration",
            AppError::EmptyAggregation(_) => "empty_aggregation",
            AppError::TrunkNotFound(_) => "trunk_not_found",
            AppError::Config(_) => "config_error",
            AppError::Validation(_) => "validation_error",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::NotFound(_) => "not_found",
            AppError::Internal(_) => "internal_error",
            AppError::Serialization(_) => "serialization_error",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        AppError::status_code(self)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = json!({
            "error": self.error_code(),
            "message": self.to_string(),
            "status": status.as_u16(),
        });

        HttpResponse::build(status).json(body)
    }
}

// ==================== From implementations ====================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::UnknownZone("DOM".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::NoApplicableRate("INTL".to_string()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::InvalidDuration(-5).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidPattern {
                rule_id: "override-001".to_string(),
                reason: "empty pattern".to_string()
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::NoApplicableRate("TF".to_string()).error_code(),
            "no_applicable_rate"
        );
        assert_eq!(
            AppError::EmptyAggregation("no results".to_string()).error_code(),
            "empty_aggregation"
        );
    }
}
