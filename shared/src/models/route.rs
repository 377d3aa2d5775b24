//! Legacy Shipping Route Model
//!
//! Routes of the kg-based freight engine. Prices are CNY amounts billed
//! per weight step.

use serde::{Deserialize, Serialize};

use super::DeliveryEstimate;

/// How a route decides the weight it bills
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PricingType {
    /// Greater of actual and volumetric weight
    Volumetric,
    /// Actual weight only
    PureWeight,
}

/// Shipping route entity (legacy engine)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShippingRoute {
    pub id: String,
    pub name: String,
    pub delivery: DeliveryEstimate,
    pub pricing_type: PricingType,
    /// Price of the first `increment` (CNY)
    pub first_weight: f64,
    /// Price of every further `increment`, partial steps billed whole (CNY)
    pub second_weight: f64,
    /// Billing step (kg), always > 0
    pub increment: f64,
    /// Minimum chargeable weight (kg)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_weight: Option<f64>,
    /// Hard weight ceiling (kg)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_weight: Option<f64>,
}

/// VIP level to service fee percentage (legacy engine)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VipTier {
    /// 0 (no level) to 5
    pub level: u8,
    /// Percentage, e.g. 5.0 = 5%
    pub service_fee_percent: f64,
}
