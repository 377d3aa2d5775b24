//! Freight Calculation Models
//!
//! Inputs and results of both freight engines. Results are transient:
//! computed, returned, displayed and discarded.

use serde::{Deserialize, Serialize};

use super::{DeliveryEstimate, ProductAttribute};
use crate::error::ApiErrorBody;

/// Exchange rates supplied by the caller
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRates {
    /// CNY per 1 USD
    pub usd_to_cny: f64,
    /// BRL per 1 CNY
    pub cny_to_brl: f64,
}

/// Package dimensions in centimetres
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
}

impl Dimensions {
    pub const fn new(length_cm: f64, width_cm: f64, height_cm: f64) -> Self {
        Self {
            length_cm,
            width_cm,
            height_cm,
        }
    }
}

/// Unit a weight figure is expressed in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Grams,
    Kilograms,
}

/// Actual vs volumetric weight and the figure the carrier bills
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeightAnalysis {
    pub unit: WeightUnit,
    pub actual_weight: f64,
    pub volumetric_weight: f64,
    pub chargeable_weight: f64,
    pub was_volumetric: bool,
}

/// Cost breakdown in a single currency
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub product: f64,
    pub freight: f64,
    pub insurance: f64,
    pub service_fee: f64,
    pub total: f64,
}

/// Insurance coverage report
///
/// When product + freight exceeds the insurable ceiling the excess is
/// reported in `uncovered_amount_*` so the caller can warn the user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceCoverage {
    pub included: bool,
    /// Product + freight (CNY)
    pub insured_value_cny: f64,
    /// Part of the insured value actually covered (CNY)
    pub covered_value_cny: f64,
    pub uncovered_amount_cny: f64,
    pub uncovered_amount_brl: f64,
    /// Whether the ceiling was hit
    pub capped: bool,
}

// =============================================================================
// Current engine (gram based, shipping lines)
// =============================================================================

/// Input of the current freight engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FreightInput {
    pub product_price_cny: f64,
    pub weight_grams: f64,
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
    pub shipping_line_id: String,
    /// Fraction of product + freight, in [0, 1]
    pub service_fee_rate: f64,
    #[serde(default)]
    pub include_insurance: bool,
    #[serde(default)]
    pub product_attribute_ids: Vec<String>,
    pub exchange_rates: ExchangeRates,
}

impl FreightInput {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.length_cm, self.width_cm, self.height_cm)
    }
}

/// Metadata attached to a current-engine result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalculationMetadata {
    pub shipping_line_id: String,
    pub shipping_line_label: String,
    pub delivery: DeliveryEstimate,
    pub exchange_rates: ExchangeRates,
    pub service_fee_rate: f64,
    /// Freight before conversion (USD)
    pub freight_usd: f64,
}

/// Result of the current freight engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub weight: WeightAnalysis,
    pub cny: CostBreakdown,
    pub brl: CostBreakdown,
    pub insurance: InsuranceCoverage,
    pub metadata: CalculationMetadata,
}

/// One line of a multi-line comparison
///
/// Exactly one of `result` / `error` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineQuote {
    pub line_id: String,
    pub label: String,
    pub delivery: DeliveryEstimate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<CalculationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,
    /// Attributes the line refuses (empty when compatible)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicts: Vec<ProductAttribute>,
}

// =============================================================================
// Legacy engine (kg based, routes, VIP levels)
// =============================================================================

/// Input of the legacy freight engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LegacyFreightInput {
    pub product_price_cny: f64,
    pub weight_kg: f64,
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
    pub route_id: String,
    /// 0 (no level) to 5
    #[serde(default)]
    pub vip_level: u8,
    #[serde(default)]
    pub include_insurance: bool,
    /// BRL per 1 CNY
    pub cny_to_brl: f64,
}

impl LegacyFreightInput {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.length_cm, self.width_cm, self.height_cm)
    }
}

/// Result of the legacy freight engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LegacyFreightResult {
    pub route_id: String,
    pub route_name: String,
    pub delivery: DeliveryEstimate,
    pub weight: WeightAnalysis,
    /// Weight actually billed after the route minimum (kg)
    pub billed_weight_kg: f64,
    pub vip_level: u8,
    pub service_fee_percent: f64,
    pub cny_to_brl: f64,
    pub cny: CostBreakdown,
    pub brl: CostBreakdown,
}

/// One route of a multi-route comparison
///
/// Exactly one of `result` / `error` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteQuote {
    pub route_id: String,
    pub route_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<LegacyFreightResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freight_input_defaults() {
        let json = r#"{
            "productPriceCny": 120,
            "weightGrams": 800,
            "lengthCm": 30,
            "widthCm": 20,
            "heightCm": 10,
            "shippingLineId": "jd-standard",
            "serviceFeeRate": 0.05,
            "exchangeRates": { "usdToCny": 7.2, "cnyToBrl": 0.78 }
        }"#;
        let input: FreightInput = serde_json::from_str(json).unwrap();
        assert!(!input.include_insurance);
        assert!(input.product_attribute_ids.is_empty());
        assert_eq!(input.dimensions(), Dimensions::new(30.0, 20.0, 10.0));
    }

    #[test]
    fn test_weight_unit_serialize() {
        assert_eq!(
            serde_json::to_string(&WeightUnit::Grams).unwrap(),
            "\"grams\""
        );
    }

    #[test]
    fn test_line_quote_skips_empty_fields() {
        let quote = LineQuote {
            line_id: "jd-economy".to_string(),
            label: "Economy".to_string(),
            delivery: DeliveryEstimate::new(25, 40),
            result: None,
            error: None,
            conflicts: vec![],
        };
        let json = serde_json::to_value(&quote).unwrap();
        assert!(json.get("result").is_none());
        assert!(json.get("conflicts").is_none());
        assert_eq!(json["delivery"]["minDays"], 25);
    }
}
