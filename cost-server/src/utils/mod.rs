//! Utilities
//!
//! - [`ApiJson`] - JSON extractor with envelope errors
//! - [`logger`] - tracing setup

pub mod json;
pub mod logger;

pub use json::ApiJson;

// Error types live in shared so the engine and the server agree on codes
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
