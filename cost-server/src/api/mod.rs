//! API routes
//!
//! - [`health`] - liveness
//! - [`calculate`] - freight cost on shipping lines
//! - [`import_tax`] - Brazilian import charges
//! - [`legacy_freight`] - freight cost on legacy routes
//! - [`catalog`] - rate table reference data

pub mod calculate;
pub mod catalog;
pub mod health;
pub mod import_tax;
pub mod legacy_freight;

use axum::http::Uri;

use crate::utils::AppError;

/// Fallback for unknown paths, answered in the API envelope
pub async fn not_found(uri: Uri) -> AppError {
    AppError::not_found(format!("route {}", uri.path()))
}
