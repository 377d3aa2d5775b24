//! Reference data API
//!
//! Read-only views of the loaded rate tables for building forms.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub use handler::{RoutesCatalog, ShippingLinesCatalog};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/shipping-lines", get(handler::shipping_lines))
        .route("/api/routes", get(handler::routes))
}
