//! Error handling for the gateway.

pub mod domain;
pub mod error_code;

pub use domain::GatewayError;
pub use error_code::ErrorCode;
