//! Backend test support utilities
//!
//! Shared helpers for the gateway's unit and integration tests. Currently
//! this is the unified logging initialization.

pub mod logging;
