//! Import Tax Calculator
//!
//! Brazilian federal and state charges on a cross-border parcel.
//!
//! ```text
//! subtotal = product + shipping + service fee        (BRL)
//! IOF      = subtotal × 0.38%                        (always)
//! duty     = subtotal × 60%                          (0 when exempt)
//! ICMS     = (subtotal + duty) × 17%                 (cascades over duty)
//! total    = subtotal + IOF + duty + ICMS
//! ```
//!
//! A parcel is exempt from import duty when it was bought through a
//! Remessa Conforme platform and its declared value is at most USD 50.

use rust_decimal::prelude::*;
use shared::models::{ImportCalculationResult, ImportCostInput, TaxRates, TaxRegime};

use crate::error::CalcResult;
use crate::money::{
    MAX_AMOUNT, MAX_RATE, convert, require_amount, require_rate, to_decimal, to_f64,
};

/// IOF on the currency exchange (0.38%)
pub const IOF_RATE: Decimal = Decimal::from_parts(38, 0, 0, false, 4);

/// Federal import duty (60%)
pub const IMPORT_DUTY_RATE: Decimal = Decimal::from_parts(60, 0, 0, false, 2);

/// State ICMS (17%)
pub const ICMS_RATE: Decimal = Decimal::from_parts(17, 0, 0, false, 2);

/// Remessa Conforme de minimis threshold (USD, inclusive)
pub const REMESSA_CONFORME_THRESHOLD_USD: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Reject values the calculator cannot price
pub fn validate_import_input(input: &ImportCostInput) -> CalcResult<()> {
    require_amount(input.product_price_cny, "productPriceCny")?;
    require_amount(input.shipping_cny, "shippingCny")?;
    require_rate(input.exchange_rate_cny_to_brl, "exchangeRateCnyToBrl")?;
    require_amount(input.service_fee_percent, "serviceFeePercent")?;
    require_amount(input.product_value_usd, "productValueUsd")?;
    Ok(())
}

/// Regime a parcel is taxed under
///
/// Only a declared value that is a real number at or under the threshold
/// qualifies; anything else is taxed in full.
pub fn tax_regime(input: &ImportCostInput) -> TaxRegime {
    let within_threshold = Decimal::from_f64(input.product_value_usd)
        .is_some_and(|value| value <= REMESSA_CONFORME_THRESHOLD_USD);
    if input.is_remessa_conforme && within_threshold {
        TaxRegime::RemessaConformeExempt
    } else {
        TaxRegime::Standard
    }
}

/// Compute import charges
///
/// Total function: inputs are assumed to have passed
/// [`validate_import_input`]. Anything outside the validated ranges is
/// clamped into them, NaN counting as zero.
pub fn calculate_import_cost(input: &ImportCostInput) -> ImportCalculationResult {
    let rate = clamped(input.exchange_rate_cny_to_brl, MAX_RATE);
    let product_cny = clamped(input.product_price_cny, MAX_AMOUNT);
    let shipping_cny = clamped(input.shipping_cny, MAX_AMOUNT);
    let fee_percent = clamped(input.service_fee_percent, MAX_AMOUNT);

    let product = convert(product_cny, rate);
    let shipping = convert(shipping_cny, rate);
    let service_fee_cny = (product_cny + shipping_cny) * fee_percent / Decimal::ONE_HUNDRED;
    let service_fee = convert(service_fee_cny, rate);
    let subtotal = product + shipping + service_fee;

    let regime = tax_regime(input);
    let iof = subtotal * IOF_RATE;
    let (import_duty, duty_rate) = match regime {
        TaxRegime::RemessaConformeExempt => (Decimal::ZERO, Decimal::ZERO),
        TaxRegime::Standard => (subtotal * IMPORT_DUTY_RATE, IMPORT_DUTY_RATE),
    };
    let icms = (subtotal + import_duty) * ICMS_RATE;

    let total_taxes = iof + import_duty + icms;
    let total = subtotal + total_taxes;
    let effective_tax_percent = if subtotal.is_zero() {
        Decimal::ZERO
    } else {
        total_taxes / subtotal * Decimal::ONE_HUNDRED
    };

    tracing::debug!(
        ?regime,
        subtotal = %subtotal,
        total = %total,
        "Import cost calculated"
    );

    ImportCalculationResult {
        product_brl: to_f64(product),
        shipping_brl: to_f64(shipping),
        service_fee_brl: to_f64(service_fee),
        subtotal: to_f64(subtotal),
        iof: to_f64(iof),
        import_duty: to_f64(import_duty),
        icms: to_f64(icms),
        total_taxes: to_f64(total_taxes),
        total: to_f64(total),
        tax_regime: regime,
        effective_tax_percent: to_f64(effective_tax_percent),
        rates: TaxRates {
            iof: IOF_RATE.to_f64().unwrap_or_default(),
            import_duty: duty_rate.to_f64().unwrap_or_default(),
            icms: ICMS_RATE.to_f64().unwrap_or_default(),
        },
    }
}

fn clamped(value: f64, max: f64) -> Decimal {
    to_decimal(value).clamp(Decimal::ZERO, to_decimal(max))
}
