//! Shipping Line Model
//!
//! Lines of the gram-based freight engine. Each line refuses a set of
//! product attributes and prices weight in USD brackets.

use serde::{Deserialize, Serialize};

use super::DeliveryEstimate;

/// Product attribute a shipment may declare (battery, liquid, ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductAttribute {
    pub id: String,
    pub name: String,
}

/// Shipping line entity (current engine)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShippingLine {
    pub id: String,
    pub label: String,
    pub delivery: DeliveryEstimate,
    /// Attribute ids this line refuses to carry
    #[serde(default)]
    pub restricted_attributes: Vec<String>,
    /// Weight covered by the first bracket (g)
    pub first_weight_grams: f64,
    /// Price of the first bracket (USD)
    pub first_weight_usd: f64,
    /// Size of every further bracket (g), always > 0
    pub additional_weight_grams: f64,
    /// Price of every further bracket (USD)
    pub additional_weight_usd: f64,
    /// Hard weight ceiling (g)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_weight_grams: Option<f64>,
}

impl ShippingLine {
    /// Declared attribute ids this line refuses, in declaration order
    pub fn conflicting_attributes<'a>(&self, declared: &'a [String]) -> Vec<&'a String> {
        declared
            .iter()
            .filter(|id| self.restricted_attributes.contains(id))
            .collect()
    }

    /// Whether the line accepts every declared attribute
    pub fn accepts(&self, declared: &[String]) -> bool {
        self.conflicting_attributes(declared).is_empty()
    }
}

/// Named service fee tier offered to the user (Sem nível, Gold, ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTier {
    pub id: String,
    pub name: String,
    /// Fraction of product + freight, in [0, 1]
    pub rate: f64,
}
