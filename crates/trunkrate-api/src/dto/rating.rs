//! Rating request DTOs

use serde::{Deserialize, Serialize};
use trunkrate_core::models::CallAttributes;
use validator::Validate;

/// Request body for rating a single call
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RateCallRequest {
    /// Dialed number (E.164 or national digits)
    #[validate(length(min = 1))]
    pub dialed_number: String,

    /// OCN of the calling carrier, when known
    #[serde(default)]
    pub calling_ocn: Option<String>,

    /// LATA of the calling number, when known
    #[serde(default)]
    pub calling_lata: Option<String>,

    /// Carrier identification code, when present
    #[serde(default)]
    pub cic: Option<String>,

    /// Raw call duration in seconds
    #[validate(range(min = 0))]
    pub raw_seconds: i32,

    /// Pre-classified zone code
    #[validate(length(min = 1))]
    pub zone: String,
}

impl From<RateCallRequest> for CallAttributes {
    fn from(req: RateCallRequest) -> Self {
        CallAttributes {
            dialed_number: req.dialed_number,
            calling_ocn: req.calling_ocn,
            calling_lata: req.calling_lata,
            cic: req.cic,
            raw_seconds: req.raw_seconds,
            zone: req.zone,
        }
    }
}

/// Request body for rating a batch of calls
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RateBatchRequest {
    #[validate(length(min = 1), nested)]
    pub calls: Vec<RateCallRequest>,
}
