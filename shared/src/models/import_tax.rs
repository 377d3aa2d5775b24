//! Import Tax Models
//!
//! Brazilian customs charges for an imported parcel.

use serde::{Deserialize, Serialize};

/// Input of the import tax calculator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImportCostInput {
    pub product_price_cny: f64,
    pub shipping_cny: f64,
    /// BRL per 1 CNY
    pub exchange_rate_cny_to_brl: f64,
    /// Agent service fee, percentage (5.0 = 5%)
    #[serde(default)]
    pub service_fee_percent: f64,
    /// Declared value used for the de minimis check (USD)
    pub product_value_usd: f64,
    /// Bought through a platform certified under Remessa Conforme
    #[serde(default)]
    pub is_remessa_conforme: bool,
}

/// Customs regime applied to a parcel
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TaxRegime {
    /// Remessa Conforme parcel at or under the USD threshold: no import duty
    RemessaConformeExempt,
    /// Import duty applies, ICMS cascades on top of it
    Standard,
}

/// Tax rates applied to a calculation, as fractions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaxRates {
    pub iof: f64,
    pub import_duty: f64,
    pub icms: f64,
}

/// Result of the import tax calculator (amounts in BRL)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImportCalculationResult {
    pub product_brl: f64,
    pub shipping_brl: f64,
    pub service_fee_brl: f64,
    /// Product + shipping + service fee (CIF basis)
    pub subtotal: f64,
    pub iof: f64,
    pub import_duty: f64,
    pub icms: f64,
    /// IOF + import duty + ICMS
    pub total_taxes: f64,
    pub total: f64,
    pub tax_regime: TaxRegime,
    /// Total taxes over subtotal, percentage
    pub effective_tax_percent: f64,
    pub rates: TaxRates,
}
