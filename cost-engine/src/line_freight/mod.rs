//! Current Freight Calculator
//!
//! Gram based engine over [`ShippingLine`]s. Lines price weight in USD
//! brackets, refuse some product attributes, and insure product + freight
//! up to a ceiling.
//!
//! # Calculation order
//!
//! ```text
//! line → attribute conflicts → dimensions / weight → amounts and rates
//!   → chargeable grams → max check → freight (USD → CNY)
//!   → insurance (capped) → service fee → CNY and BRL breakdowns
//! ```
//!
//! Attribute conflicts are reported before any arithmetic so the caller
//! can tell the user which attributes to drop or which line to pick.

use rust_decimal::prelude::*;
use shared::error::{ApiErrorBody, AppError};
use shared::models::{
    CalculationMetadata, CalculationResult, CostBreakdown, FreightInput, InsuranceCoverage,
    LineQuote, ProductAttribute, ShippingLine, WeightUnit,
};

use crate::error::{CalcError, CalcResult};
use crate::money::{
    GRAM_DECIMAL_PLACES, ceil_steps, checked_add, checked_mul, convert, require_amount,
    require_positive, require_rate, round_to, to_decimal, to_f64, within_amount,
};
use crate::tables::{InsurancePolicy, RateTables};
use crate::weight;


/// Freight (USD) of a chargeable weight on a line
///
/// The first bracket covers up to `first_weight_grams`; every further
/// bracket, partial brackets counted whole, adds `additional_weight_usd`.
pub fn line_freight_usd(line: &ShippingLine, chargeable_grams: Decimal) -> CalcResult<Decimal> {
    let steps = ceil_steps(
        chargeable_grams - to_decimal(line.first_weight_grams),
        to_decimal(line.additional_weight_grams),
    );
    let extra = checked_mul(steps, to_decimal(line.additional_weight_usd), "freightUsd")?;
    checked_add(to_decimal(line.first_weight_usd), extra, "freightUsd")
}

/// Insurance premium and coverage at full precision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coverage {
    pub premium: Decimal,
    pub insured_value: Decimal,
    pub covered_value: Decimal,
    pub uncovered: Decimal,
    pub capped: bool,
}

/// Insure `insured_value` (CNY) under `policy`
///
/// Above the ceiling only the ceiling is covered; the excess is reported
/// as uncovered.
pub fn insurance_coverage(policy: &InsurancePolicy, insured_value: Decimal) -> Coverage {
    let (covered_value, capped) = match policy.max_insured_value_cny.map(to_decimal) {
        Some(cap) if insured_value > cap => (cap, true),
        _ => (insured_value, false),
    };
    Coverage {
        premium: covered_value * to_decimal(policy.rate),
        insured_value,
        covered_value,
        uncovered: insured_value - covered_value,
        capped,
    }
}

/// Declared attributes the line refuses, resolved to display names
fn conflicts(
    tables: &RateTables,
    line: &ShippingLine,
    declared: &[String],
) -> Vec<ProductAttribute> {
    line.conflicting_attributes(declared)
        .into_iter()
        .map(|id| tables.attribute_or_raw(id))
        .collect()
}

/// Run the current calculation
pub fn calculate_freight(
    tables: &RateTables,
    input: &FreightInput,
) -> CalcResult<CalculationResult> {
    let line = tables
        .line(&input.shipping_line_id)
        .ok_or_else(|| CalcError::UnknownShippingLine(input.shipping_line_id.clone()))?;

    let conflicts = conflicts(tables, line, &input.product_attribute_ids);
    if !conflicts.is_empty() {
        return Err(CalcError::IncompatibleShippingLine {
            line_id: line.id.clone(),
            conflicts,
        });
    }

    require_positive(input.length_cm, "lengthCm")?;
    require_positive(input.width_cm, "widthCm")?;
    require_positive(input.height_cm, "heightCm")?;
    let actual_grams = require_positive(input.weight_grams, "weightGrams")?;

    let product = require_amount(input.product_price_cny, "productPriceCny")?;
    let usd_to_cny = require_rate(input.exchange_rates.usd_to_cny, "usdToCny")?;
    let cny_to_brl = require_rate(input.exchange_rates.cny_to_brl, "cnyToBrl")?;
    if !input.service_fee_rate.is_finite() || !(0.0..=1.0).contains(&input.service_fee_rate) {
        return Err(CalcError::InvalidServiceFee(input.service_fee_rate));
    }

    let resolved = weight::resolve(&input.dimensions(), actual_grams, WeightUnit::Grams);
    if let Some(max) = line.max_weight_grams
        && resolved.chargeable > to_decimal(max)
    {
        return Err(CalcError::RouteWeightExceeded {
            route_id: line.id.clone(),
            chargeable_weight: round_to(resolved.chargeable, GRAM_DECIMAL_PLACES),
            max_weight: max,
            unit: "g",
        });
    }

    let freight_usd = line_freight_usd(line, resolved.chargeable)?;
    let freight = checked_mul(freight_usd, usd_to_cny, "freightCny")?;
    let freight = within_amount(freight, "freightCny")?;

    let coverage = input
        .include_insurance
        .then(|| insurance_coverage(&tables.line_insurance, product + freight));
    if let Some(c) = &coverage
        && c.capped
    {
        tracing::warn!(
            line = %line.id,
            insured_value_cny = %c.insured_value,
            uncovered_cny = %c.uncovered,
            "Insured value above the coverage ceiling"
        );
    }
    let insurance = coverage.map(|c| c.premium).unwrap_or(Decimal::ZERO);

    let service_fee = (product + freight) * to_decimal(input.service_fee_rate);
    let total = product + freight + insurance + service_fee;

    let breakdown = |fx: Decimal| CostBreakdown {
        product: to_f64(convert(product, fx)),
        freight: to_f64(convert(freight, fx)),
        insurance: to_f64(convert(insurance, fx)),
        service_fee: to_f64(convert(service_fee, fx)),
        total: to_f64(convert(total, fx)),
    };
    let cny = breakdown(Decimal::ONE);
    let brl = breakdown(cny_to_brl);

    let insurance = match coverage {
        Some(c) => InsuranceCoverage {
            included: true,
            insured_value_cny: to_f64(c.insured_value),
            covered_value_cny: to_f64(c.covered_value),
            uncovered_amount_cny: to_f64(c.uncovered),
            uncovered_amount_brl: to_f64(convert(c.uncovered, cny_to_brl)),
            capped: c.capped,
        },
        None => InsuranceCoverage::default(),
    };

    tracing::debug!(
        line = %line.id,
        chargeable_g = %resolved.chargeable,
        was_volumetric = resolved.was_volumetric,
        freight_usd = %freight_usd,
        total_cny = cny.total,
        "Freight calculated"
    );

    Ok(CalculationResult {
        weight: resolved.to_analysis(),
        cny,
        brl,
        insurance,
        metadata: CalculationMetadata {
            shipping_line_id: line.id.clone(),
            shipping_line_label: line.label.clone(),
            delivery: line.delivery,
            exchange_rates: input.exchange_rates,
            service_fee_rate: input.service_fee_rate,
            freight_usd: to_f64(freight_usd),
        },
    })
}

/// Lines that accept every declared attribute
pub fn eligible_lines<'a>(
    tables: &'a RateTables,
    attribute_ids: &[String],
) -> Vec<&'a ShippingLine> {
    tables
        .lines
        .iter()
        .filter(|line| line.accepts(attribute_ids))
        .collect()
}

/// Price the same shipment on every line
///
/// Incompatible lines carry their conflicting attributes; every line
/// succeeds or fails on its own.
pub fn quote_all_lines(tables: &RateTables, input: &FreightInput) -> Vec<LineQuote> {
    tables
        .lines
        .iter()
        .map(|line| {
            let per_line = FreightInput {
                shipping_line_id: line.id.clone(),
                ..input.clone()
            };
            let (result, error) = match calculate_freight(tables, &per_line) {
                Ok(result) => (Some(result), None),
                Err(e) => (None, Some(ApiErrorBody::from(AppError::from(e)))),
            };
            LineQuote {
                line_id: line.id.clone(),
                label: line.label.clone(),
                delivery: line.delivery,
                result,
                error,
                conflicts: conflicts(tables, line, &input.product_attribute_ids),
            }
        })
        .collect()
}
