use axum::extract::State;
use cost_engine::import_tax::{calculate_import_cost, validate_import_input};
use serde::Deserialize;
use shared::models::{ImportCalculationResult, ImportCostInput};

use crate::core::ServerState;
use crate::utils::{ApiJson, ApiResponse, AppResult};

/// POST /api/import-tax body; the CNY→BRL rate defaults from configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportTaxRequest {
    pub product_price_cny: f64,
    pub shipping_cny: f64,
    pub exchange_rate_cny_to_brl: Option<f64>,
    #[serde(default)]
    pub service_fee_percent: f64,
    pub product_value_usd: f64,
    #[serde(default)]
    pub is_remessa_conforme: bool,
}

/// POST /api/import-tax - Brazilian import charges on a parcel
pub async fn calculate(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<ImportTaxRequest>,
) -> AppResult<ApiResponse<ImportCalculationResult>> {
    let input = ImportCostInput {
        product_price_cny: payload.product_price_cny,
        shipping_cny: payload.shipping_cny,
        exchange_rate_cny_to_brl: payload
            .exchange_rate_cny_to_brl
            .unwrap_or(state.config.default_cny_to_brl),
        service_fee_percent: payload.service_fee_percent,
        product_value_usd: payload.product_value_usd,
        is_remessa_conforme: payload.is_remessa_conforme,
    };
    validate_import_input(&input)?;
    Ok(ApiResponse::success(calculate_import_cost(&input)))
}
