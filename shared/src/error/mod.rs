//! Unified error system
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized numeric error codes
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with code, message and details
//! - [`ApiResponse`]: The `{ success, result?, error? }` envelope
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Shipment errors (dimensions, weight limits)
//! - 2xxx: Route and shipping line errors
//! - 3xxx: Tariff input errors (amounts, rates, tiers)
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::with_message(ErrorCode::InvalidDimensions, "length must be positive")
//!     .with_detail("field", "lengthCm");
//!
//! let response = ApiResponse::<()>::error(&err);
//! assert!(!response.success);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiErrorBody, ApiResponse, AppError, AppResult};
