use axum::extract::State;
use cost_engine::InsurancePolicy;
use serde::Serialize;
use shared::models::{ProductAttribute, ServiceTier, ShippingLine, ShippingRoute, VipTier};

use crate::core::ServerState;
use crate::utils::ApiResponse;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingLinesCatalog {
    pub lines: Vec<ShippingLine>,
    pub attributes: Vec<ProductAttribute>,
    pub service_tiers: Vec<ServiceTier>,
    pub insurance: InsurancePolicy,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutesCatalog {
    pub routes: Vec<ShippingRoute>,
    pub vip_tiers: Vec<VipTier>,
    pub insurance: InsurancePolicy,
}

/// GET /api/shipping-lines - lines, attributes and service tiers
pub async fn shipping_lines(State(state): State<ServerState>) -> ApiResponse<ShippingLinesCatalog> {
    let tables = &state.tables;
    ApiResponse::success(ShippingLinesCatalog {
        lines: tables.lines.clone(),
        attributes: tables.attributes.clone(),
        service_tiers: tables.service_tiers.clone(),
        insurance: tables.line_insurance,
    })
}

/// GET /api/routes - legacy routes and the VIP fee table
pub async fn routes(State(state): State<ServerState>) -> ApiResponse<RoutesCatalog> {
    let tables = &state.tables;
    ApiResponse::success(RoutesCatalog {
        routes: tables.routes.clone(),
        vip_tiers: tables.vip_tiers.clone(),
        insurance: tables.legacy_insurance,
    })
}
