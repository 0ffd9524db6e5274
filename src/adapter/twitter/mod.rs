//! X (Twitter) Integration
//!
//! X API v2 との連携

pub mod client;
pub mod models;
