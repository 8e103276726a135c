//! Data Transfer Objects (DTOs) for API requests and responses

pub mod common;
pub mod margin;
pub mod rating;

pub use common::*;
pub use margin::*;
pub use rating::*;
