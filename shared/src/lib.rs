//! Shared types for the freight cost workspace
//!
//! Wire types used by both `cost-engine` and `cost-server`: the unified
//! error system, the API response envelope and the domain models
//! (routes, lines, attributes, tiers, calculation inputs and results).

pub mod error;
pub mod models;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiErrorBody, ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
