//! Import tax API

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub use handler::ImportTaxRequest;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/import-tax", post(handler::calculate))
}
