//! Freight cost API Handlers

use axum::extract::State;
use cost_engine::line_freight;
use serde::{Deserialize, Serialize};
use shared::models::{CalculationResult, ExchangeRates, FreightInput, LineQuote};

use crate::core::ServerState;
use crate::utils::{ApiJson, ApiResponse, AppError, AppResult, ErrorCode};

/// Tier used when a request names neither a rate nor a tier
const DEFAULT_SERVICE_TIER: &str = "none";

/// Exchange rates a request may partially supply
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatesPatch {
    pub usd_to_cny: Option<f64>,
    pub cny_to_brl: Option<f64>,
}

/// POST /api/calculate-cost body
///
/// Rates default from configuration; the service fee comes from
/// `serviceFeeRate`, else from `serviceTierId`, else from the default tier.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateCostRequest {
    pub product_price_cny: f64,
    pub weight_grams: f64,
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
    pub shipping_line_id: String,
    pub service_fee_rate: Option<f64>,
    pub service_tier_id: Option<String>,
    #[serde(default)]
    pub include_insurance: bool,
    #[serde(default)]
    pub product_attribute_ids: Vec<String>,
    #[serde(default)]
    pub exchange_rates: RatesPatch,
}

/// POST /api/calculate-cost/compare body: a shipment without a line
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    pub product_price_cny: f64,
    pub weight_grams: f64,
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
    pub service_fee_rate: Option<f64>,
    pub service_tier_id: Option<String>,
    #[serde(default)]
    pub include_insurance: bool,
    #[serde(default)]
    pub product_attribute_ids: Vec<String>,
    #[serde(default)]
    pub exchange_rates: RatesPatch,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResponse {
    /// Lines accepting every declared attribute
    pub eligible_line_ids: Vec<String>,
    pub quotes: Vec<LineQuote>,
}

impl From<CompareRequest> for CalculateCostRequest {
    fn from(req: CompareRequest) -> Self {
        Self {
            product_price_cny: req.product_price_cny,
            weight_grams: req.weight_grams,
            length_cm: req.length_cm,
            width_cm: req.width_cm,
            height_cm: req.height_cm,
            shipping_line_id: String::new(),
            service_fee_rate: req.service_fee_rate,
            service_tier_id: req.service_tier_id,
            include_insurance: req.include_insurance,
            product_attribute_ids: req.product_attribute_ids,
            exchange_rates: req.exchange_rates,
        }
    }
}

fn resolve_service_fee_rate(
    state: &ServerState,
    rate: Option<f64>,
    tier_id: Option<&str>,
) -> AppResult<f64> {
    if let Some(rate) = rate {
        return Ok(rate);
    }
    let tier_id = tier_id.unwrap_or(DEFAULT_SERVICE_TIER);
    match state.tables.service_tier(tier_id) {
        Some(tier) => Ok(tier.rate),
        None => Err(AppError::with_message(
            ErrorCode::InvalidServiceFee,
            format!("service tier '{}' not found", tier_id),
        )
        .with_detail("serviceTierId", tier_id)),
    }
}

fn into_input(state: &ServerState, req: CalculateCostRequest) -> AppResult<FreightInput> {
    let service_fee_rate =
        resolve_service_fee_rate(state, req.service_fee_rate, req.service_tier_id.as_deref())?;
    Ok(FreightInput {
        product_price_cny: req.product_price_cny,
        weight_grams: req.weight_grams,
        length_cm: req.length_cm,
        width_cm: req.width_cm,
        height_cm: req.height_cm,
        shipping_line_id: req.shipping_line_id,
        service_fee_rate,
        include_insurance: req.include_insurance,
        product_attribute_ids: req.product_attribute_ids,
        exchange_rates: ExchangeRates {
            usd_to_cny: req
                .exchange_rates
                .usd_to_cny
                .unwrap_or(state.config.default_usd_to_cny),
            cny_to_brl: req
                .exchange_rates
                .cny_to_brl
                .unwrap_or(state.config.default_cny_to_brl),
        },
    })
}

/// POST /api/calculate-cost - price a shipment on one line
pub async fn calculate(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<CalculateCostRequest>,
) -> AppResult<ApiResponse<CalculationResult>> {
    let input = into_input(&state, payload)?;
    let result = line_freight::calculate_freight(&state.tables, &input)?;
    Ok(ApiResponse::success(result))
}

/// POST /api/calculate-cost/compare - price a shipment on every line
pub async fn compare(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<CompareRequest>,
) -> AppResult<ApiResponse<CompareResponse>> {
    let input = into_input(&state, payload.into())?;
    let eligible_line_ids =
        line_freight::eligible_lines(&state.tables, &input.product_attribute_ids)
            .into_iter()
            .map(|line| line.id.clone())
            .collect();
    let quotes = line_freight::quote_all_lines(&state.tables, &input);
    Ok(ApiResponse::success(CompareResponse {
        eligible_line_ids,
        quotes,
    }))
}
