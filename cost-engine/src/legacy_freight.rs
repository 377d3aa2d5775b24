//! Legacy Freight Calculator
//!
//! kg based engine over named [`ShippingRoute`]s. A route bills its first
//! weight step at `first_weight` and every further step, partial steps
//! counted whole, at `second_weight`.
//!
//! # Calculation order
//!
//! ```text
//! validate input → route → chargeable weight (kg) → min clamp / max check
//!   → freight → insurance (product × rate) → service fee (VIP %)
//!   → totals in CNY and BRL
//! ```

use rust_decimal::prelude::*;
use shared::error::{ApiErrorBody, AppError};
use shared::models::{
    CostBreakdown, LegacyFreightInput, LegacyFreightResult, PricingType, RouteQuote,
    ShippingRoute, WeightUnit,
};

use crate::error::{CalcError, CalcResult};
use crate::money::{
    KG_DECIMAL_PLACES, ceil_steps, checked_add, checked_mul, convert, require_amount,
    require_measure, require_positive, require_rate, round_to, to_decimal, to_f64, within_amount,
};
use crate::tables::{MAX_VIP_LEVEL, RateTables};
use crate::weight::{self, ResolvedWeight};

/// Billed weight and freight of a route, at full precision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteCharge {
    /// Chargeable weight after the route minimum (kg)
    pub billed_weight: Decimal,
    /// Freight (CNY)
    pub freight: Decimal,
}

/// Bill a chargeable weight on a route
///
/// Weights under `min_weight` are billed as `min_weight`; weights above
/// `max_weight` are not representable on the route. Freight above the
/// largest priceable amount is `AmountOverflow`.
pub fn route_charge(route: &ShippingRoute, chargeable_kg: Decimal) -> CalcResult<RouteCharge> {
    if let Some(max) = route.max_weight
        && chargeable_kg > to_decimal(max)
    {
        return Err(CalcError::RouteWeightExceeded {
            route_id: route.id.clone(),
            chargeable_weight: round_to(chargeable_kg, KG_DECIMAL_PLACES),
            max_weight: max,
            unit: "kg",
        });
    }

    let billed_weight = match route.min_weight {
        Some(min) => chargeable_kg.max(to_decimal(min)),
        None => chargeable_kg,
    };

    let increment = to_decimal(route.increment);
    let extra_steps = ceil_steps(billed_weight - increment, increment);
    let extra = checked_mul(extra_steps, to_decimal(route.second_weight), "freight")?;
    let freight = checked_add(to_decimal(route.first_weight), extra, "freight")?;
    let freight = within_amount(freight, "freight")?;

    Ok(RouteCharge {
        billed_weight,
        freight,
    })
}

/// Freight (CNY) of a chargeable weight on a route
pub fn compute_route_freight(route: &ShippingRoute, chargeable_weight_kg: f64) -> CalcResult<f64> {
    route_charge(route, to_decimal(chargeable_weight_kg)).map(|c| to_f64(c.freight))
}

fn validate(input: &LegacyFreightInput) -> CalcResult<(Decimal, Decimal, Decimal)> {
    let product = require_amount(input.product_price_cny, "productPriceCny")?;
    let rate = require_rate(input.cny_to_brl, "cnyToBrl")?;

    let weight = require_positive(input.weight_kg, "weightKg")?;
    // Unknown dimensions may be left at zero; the weight alone is billed then
    require_measure(input.length_cm, "lengthCm")?;
    require_measure(input.width_cm, "widthCm")?;
    require_measure(input.height_cm, "heightCm")?;

    Ok((product, weight, rate))
}

/// Run the legacy calculation
pub fn calculate_legacy_freight(
    tables: &RateTables,
    input: &LegacyFreightInput,
) -> CalcResult<LegacyFreightResult> {
    let (product, actual_kg, rate) = validate(input)?;

    if input.vip_level > MAX_VIP_LEVEL {
        return Err(CalcError::InvalidVipLevel(input.vip_level));
    }
    let fee_percent = tables
        .vip_fee_percent(input.vip_level)
        .ok_or(CalcError::InvalidVipLevel(input.vip_level))?;

    let route = tables
        .route(&input.route_id)
        .ok_or_else(|| CalcError::UnknownRoute(input.route_id.clone()))?;

    let resolved: ResolvedWeight = {
        let r = weight::resolve(&input.dimensions(), actual_kg, WeightUnit::Kilograms);
        match route.pricing_type {
            PricingType::Volumetric => r,
            PricingType::PureWeight => r.actual_only(),
        }
    };

    let charge = route_charge(route, resolved.chargeable)?;

    let insurance = if input.include_insurance {
        product * to_decimal(tables.legacy_insurance.rate)
    } else {
        Decimal::ZERO
    };
    let service_fee =
        (product + charge.freight) * to_decimal(fee_percent) / Decimal::ONE_HUNDRED;
    let total = product + charge.freight + insurance + service_fee;

    let breakdown = |fx: Decimal| CostBreakdown {
        product: to_f64(convert(product, fx)),
        freight: to_f64(convert(charge.freight, fx)),
        insurance: to_f64(convert(insurance, fx)),
        service_fee: to_f64(convert(service_fee, fx)),
        total: to_f64(convert(total, fx)),
    };
    let cny = breakdown(Decimal::ONE);
    let brl = breakdown(rate);

    tracing::debug!(
        route = %route.id,
        chargeable_kg = %resolved.chargeable,
        billed_kg = %charge.billed_weight,
        total_cny = cny.total,
        "Legacy freight calculated"
    );

    Ok(LegacyFreightResult {
        route_id: route.id.clone(),
        route_name: route.name.clone(),
        delivery: route.delivery,
        weight: resolved.to_analysis(),
        billed_weight_kg: round_to(charge.billed_weight, KG_DECIMAL_PLACES),
        vip_level: input.vip_level,
        service_fee_percent: fee_percent,
        cny_to_brl: input.cny_to_brl,
        cny,
        brl,
    })
}

/// Price the same parcel on every route
///
/// Each route succeeds or fails on its own, so one oversize route does
/// not hide the others.
pub fn quote_all_routes(tables: &RateTables, input: &LegacyFreightInput) -> Vec<RouteQuote> {
    tables
        .routes
        .iter()
        .map(|route| {
            let per_route = LegacyFreightInput {
                route_id: route.id.clone(),
                ..input.clone()
            };
            let (result, error) = match calculate_legacy_freight(tables, &per_route) {
                Ok(result) => (Some(result), None),
                Err(e) => (None, Some(ApiErrorBody::from(AppError::from(e)))),
            };
            RouteQuote {
                route_id: route.id.clone(),
                route_name: route.name.clone(),
                result,
                error,
            }
        })
        .collect()
}
