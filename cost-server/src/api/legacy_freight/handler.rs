use axum::extract::State;
use cost_engine::legacy_freight::{calculate_legacy_freight, quote_all_routes};
use serde::Deserialize;
use shared::models::{LegacyFreightInput, LegacyFreightResult, RouteQuote};

use crate::core::ServerState;
use crate::utils::{ApiJson, ApiResponse, AppError, AppResult};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyFreightRequest {
    pub product_price_cny: f64,
    pub weight_kg: f64,
    #[serde(default)]
    pub length_cm: f64,
    #[serde(default)]
    pub width_cm: f64,
    #[serde(default)]
    pub height_cm: f64,
    /// Required by the single-route endpoint, ignored by compare
    pub route_id: Option<String>,
    #[serde(default)]
    pub vip_level: u8,
    #[serde(default)]
    pub include_insurance: bool,
    pub cny_to_brl: Option<f64>,
}

impl LegacyFreightRequest {
    fn into_input(self, state: &ServerState) -> LegacyFreightInput {
        LegacyFreightInput {
            product_price_cny: self.product_price_cny,
            weight_kg: self.weight_kg,
            length_cm: self.length_cm,
            width_cm: self.width_cm,
            height_cm: self.height_cm,
            route_id: self.route_id.unwrap_or_default(),
            vip_level: self.vip_level,
            include_insurance: self.include_insurance,
            cny_to_brl: self.cny_to_brl.unwrap_or(state.config.default_cny_to_brl),
        }
    }
}

/// POST /api/legacy-freight - price a parcel on one route
pub async fn calculate(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<LegacyFreightRequest>,
) -> AppResult<ApiResponse<LegacyFreightResult>> {
    if payload.route_id.as_deref().is_none_or(|id| id.trim().is_empty()) {
        return Err(AppError::validation("routeId is required").with_detail("field", "routeId"));
    }
    let input = payload.into_input(&state);
    let result = calculate_legacy_freight(&state.tables, &input)?;
    Ok(ApiResponse::success(result))
}

/// POST /api/legacy-freight/compare - price a parcel on every route
pub async fn compare(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<LegacyFreightRequest>,
) -> AppResult<ApiResponse<Vec<RouteQuote>>> {
    let input = payload.into_input(&state);
    Ok(ApiResponse::success(quote_all_routes(&state.tables, &input)))
}
