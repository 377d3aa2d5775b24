//! Data models
//!
//! Shared between the calculation engines, the HTTP server and the
//! frontend (via API). Wire format is camelCase JSON.

pub mod calculation;
pub mod import_tax;
pub mod line;
pub mod route;

// Re-exports
pub use calculation::*;
pub use import_tax::*;
pub use line::*;
pub use route::*;

use serde::{Deserialize, Serialize};

/// Delivery time window in days
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryEstimate {
    pub min_days: u16,
    pub max_days: u16,
}

impl DeliveryEstimate {
    pub const fn new(min_days: u16, max_days: u16) -> Self {
        Self { min_days, max_days }
    }
}

impl std::fmt::Display for DeliveryEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{} days", self.min_days, self.max_days)
    }
}
