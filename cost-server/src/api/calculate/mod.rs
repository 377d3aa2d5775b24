//! Freight cost API (shipping lines)
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/calculate-cost | POST | price a shipment on one line |
//! | /api/calculate-cost/compare | POST | price a shipment on every line |

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub use handler::{CalculateCostRequest, CompareRequest, CompareResponse, RatesPatch};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/calculate-cost", post(handler::calculate))
        .route("/api/calculate-cost/compare", post(handler::compare))
}
