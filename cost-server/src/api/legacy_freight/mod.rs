//! Legacy freight API (kg routes, VIP levels)
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/legacy-freight | POST | price a parcel on one route |
//! | /api/legacy-freight/compare | POST | price a parcel on every route |

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub use handler::LegacyFreightRequest;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/legacy-freight", post(handler::calculate))
        .route("/api/legacy-freight/compare", post(handler::compare))
}
