//! Rate Tables
//!
//! Static reference data for every engine: legacy routes and VIP levels,
//! shipping lines, product attributes, service fee tiers and insurance
//! policies.
//!
//! Tables are built once at startup (built-in defaults or a JSON document),
//! validated, and then only ever read. Callers share them by reference.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use shared::models::{
    DeliveryEstimate, PricingType, ProductAttribute, ServiceTier, ShippingLine, ShippingRoute,
    VipTier,
};

use crate::error::{CalcError, CalcResult};
use crate::money::{to_decimal, to_f64};

/// Highest legacy VIP level
pub const MAX_VIP_LEVEL: u8 = 5;

/// Insurance terms of an engine
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsurancePolicy {
    /// Premium as a fraction of the insured value
    pub rate: f64,
    /// Insurable ceiling per shipment (CNY); `None` means uncapped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_insured_value_cny: Option<f64>,
}

impl InsurancePolicy {
    /// Largest premium the policy can charge
    pub fn max_premium_cny(&self) -> Option<f64> {
        self.max_insured_value_cny
            .map(|cap| to_f64(to_decimal(cap) * to_decimal(self.rate)))
    }
}

/// Immutable reference data shared by all calculations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RateTables {
    pub routes: Vec<ShippingRoute>,
    pub vip_tiers: Vec<VipTier>,
    pub lines: Vec<ShippingLine>,
    pub attributes: Vec<ProductAttribute>,
    pub service_tiers: Vec<ServiceTier>,
    /// Legacy engine: premium on product price, no ceiling
    pub legacy_insurance: InsurancePolicy,
    /// Current engine: premium on product + freight, capped
    pub line_insurance: InsurancePolicy,
}

impl RateTables {
    /// Parse and validate a JSON rate table document
    pub fn from_json_str(json: &str) -> CalcResult<Self> {
        let tables: RateTables = serde_json::from_str(json)
            .map_err(|e| CalcError::InvalidRateTable(format!("malformed JSON: {}", e)))?;
        tables.validate()?;
        Ok(tables)
    }

    // ========== Lookups ==========

    pub fn route(&self, id: &str) -> Option<&ShippingRoute> {
        self.routes.iter().find(|r| r.id == id)
    }

    pub fn line(&self, id: &str) -> Option<&ShippingLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    pub fn attribute(&self, id: &str) -> Option<&ProductAttribute> {
        self.attributes.iter().find(|a| a.id == id)
    }

    /// Attribute for an id, named after the id itself when unknown
    pub fn attribute_or_raw(&self, id: &str) -> ProductAttribute {
        self.attribute(id).cloned().unwrap_or_else(|| ProductAttribute {
            id: id.to_string(),
            name: id.to_string(),
        })
    }

    pub fn service_tier(&self, id: &str) -> Option<&ServiceTier> {
        self.service_tiers.iter().find(|t| t.id == id)
    }

    /// Service fee percentage of a legacy VIP level
    pub fn vip_fee_percent(&self, level: u8) -> Option<f64> {
        self.vip_tiers
            .iter()
            .find(|t| t.level == level)
            .map(|t| t.service_fee_percent)
    }

    // ========== Validation ==========

    /// Check every invariant the engines rely on
    pub fn validate(&self) -> CalcResult<()> {
        unique_ids("route", self.routes.iter().map(|r| r.id.as_str()))?;
        unique_ids("line", self.lines.iter().map(|l| l.id.as_str()))?;
        unique_ids("attribute", self.attributes.iter().map(|a| a.id.as_str()))?;
        unique_ids("service tier", self.service_tiers.iter().map(|t| t.id.as_str()))?;

        for route in &self.routes {
            validate_route(route)?;
        }
        for line in &self.lines {
            validate_line(line)?;
        }

        for level in 0..=MAX_VIP_LEVEL {
            match self.vip_fee_percent(level) {
                Some(pct) if pct.is_finite() && (0.0..=100.0).contains(&pct) => {}
                Some(pct) => {
                    return Err(invalid(format!(
                        "VIP level {} fee {} is outside 0-100%",
                        level, pct
                    )));
                }
                None => return Err(invalid(format!("VIP level {} has no fee", level))),
            }
        }
        if let Some(tier) = self.vip_tiers.iter().find(|t| t.level > MAX_VIP_LEVEL) {
            return Err(invalid(format!("VIP level {} is above {}", tier.level, MAX_VIP_LEVEL)));
        }

        for tier in &self.service_tiers {
            if !tier.rate.is_finite() || !(0.0..=1.0).contains(&tier.rate) {
                return Err(invalid(format!(
                    "service tier '{}' rate {} is outside [0, 1]",
                    tier.id, tier.rate
                )));
            }
        }

        validate_policy("legacyInsurance", &self.legacy_insurance)?;
        validate_policy("lineInsurance", &self.line_insurance)?;
        Ok(())
    }

    // ========== Built-in defaults ==========

    /// Built-in tables shipped with the engine
    pub fn builtin() -> Self {
        Self {
            routes: builtin_routes(),
            vip_tiers: [6.0, 5.5, 5.0, 4.5, 4.0, 3.0]
                .into_iter()
                .zip(0u8..)
                .map(|(service_fee_percent, level)| VipTier {
                    level,
                    service_fee_percent,
                })
                .collect(),
            lines: builtin_lines(),
            attributes: [
                ("battery", "Battery"),
                ("liquid", "Liquid"),
                ("powder", "Powder"),
                ("magnetic", "Magnetic"),
                ("brand", "Branded goods"),
                ("food", "Food"),
                ("cosmetics", "Cosmetics"),
                ("sharp", "Sharp objects"),
            ]
            .into_iter()
            .map(|(id, name)| ProductAttribute {
                id: id.to_string(),
                name: name.to_string(),
            })
            .collect(),
            service_tiers: [
                ("none", "Sem nível", 0.05),
                ("gold", "Gold", 0.045),
                ("platinum", "Platinum", 0.04),
                ("diamond", "Diamond", 0.035),
                ("vip", "VIP", 0.03),
                ("merchant", "Merchant", 0.02),
            ]
            .into_iter()
            .map(|(id, name, rate)| ServiceTier {
                id: id.to_string(),
                name: name.to_string(),
                rate,
            })
            .collect(),
            legacy_insurance: InsurancePolicy {
                rate: 0.03,
                max_insured_value_cny: None,
            },
            line_insurance: InsurancePolicy {
                rate: 0.03,
                max_insured_value_cny: Some(3000.0),
            },
        }
    }
}

impl Default for RateTables {
    fn default() -> Self {
        Self::builtin()
    }
}

fn invalid(msg: String) -> CalcError {
    CalcError::InvalidRateTable(msg)
}

fn unique_ids<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> CalcResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(invalid(format!("{} with empty id", kind)));
        }
        if !seen.insert(id) {
            return Err(invalid(format!("duplicate {} id '{}'", kind, id)));
        }
    }
    Ok(())
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn validate_route(route: &ShippingRoute) -> CalcResult<()> {
    if !non_negative(route.first_weight) || !non_negative(route.second_weight) {
        return Err(invalid(format!("route '{}' has a negative price", route.id)));
    }
    if !positive(route.increment) {
        return Err(invalid(format!(
            "route '{}' increment must be > 0, got {}",
            route.id, route.increment
        )));
    }
    if let Some(min) = route.min_weight
        && !non_negative(min)
    {
        return Err(invalid(format!("route '{}' min weight {} is invalid", route.id, min)));
    }
    if let Some(max) = route.max_weight
        && !positive(max)
    {
        return Err(invalid(format!("route '{}' max weight {} is invalid", route.id, max)));
    }
    if let (Some(min), Some(max)) = (route.min_weight, route.max_weight)
        && min > max
    {
        return Err(invalid(format!(
            "route '{}' min weight {} is above max weight {}",
            route.id, min, max
        )));
    }
    validate_delivery(&route.id, &route.delivery)
}

fn validate_line(line: &ShippingLine) -> CalcResult<()> {
    if !non_negative(line.first_weight_usd) || !non_negative(line.additional_weight_usd) {
        return Err(invalid(format!("line '{}' has a negative price", line.id)));
    }
    if !non_negative(line.first_weight_grams) {
        return Err(invalid(format!(
            "line '{}' first bracket {} is invalid",
            line.id, line.first_weight_grams
        )));
    }
    if !positive(line.additional_weight_grams) {
        return Err(invalid(format!(
            "line '{}' additional bracket must be > 0, got {}",
            line.id, line.additional_weight_grams
        )));
    }
    if let Some(max) = line.max_weight_grams
        && !positive(max)
    {
        return Err(invalid(format!("line '{}' max weight {} is invalid", line.id, max)));
    }
    validate_delivery(&line.id, &line.delivery)
}

fn validate_delivery(id: &str, delivery: &DeliveryEstimate) -> CalcResult<()> {
    if delivery.min_days > delivery.max_days {
        return Err(invalid(format!(
            "'{}' delivery window {} is inverted",
            id, delivery
        )));
    }
    Ok(())
}

fn validate_policy(name: &str, policy: &InsurancePolicy) -> CalcResult<()> {
    if !policy.rate.is_finite() || !(0.0..=1.0).contains(&policy.rate) {
        return Err(invalid(format!("{} rate {} is outside [0, 1]", name, policy.rate)));
    }
    if let Some(cap) = policy.max_insured_value_cny
        && !positive(cap)
    {
        return Err(invalid(format!("{} ceiling {} is invalid", name, cap)));
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn route(
    id: &str,
    name: &str,
    delivery: (u16, u16),
    pricing_type: PricingType,
    first_weight: f64,
    second_weight: f64,
    increment: f64,
    min_weight: Option<f64>,
    max_weight: Option<f64>,
) -> ShippingRoute {
    ShippingRoute {
        id: id.to_string(),
        name: name.to_string(),
        delivery: DeliveryEstimate::new(delivery.0, delivery.1),
        pricing_type,
        first_weight,
        second_weight,
        increment,
        min_weight,
        max_weight,
    }
}

fn builtin_routes() -> Vec<ShippingRoute> {
    use PricingType::{PureWeight, Volumetric};
    vec![
        route("ems", "EMS", (12, 25), Volumetric, 180.0, 50.0, 0.5, None, Some(30.0)),
        route("sal", "China Post SAL", (30, 60), PureWeight, 110.0, 65.0, 1.0, None, Some(20.0)),
        route("dhl", "DHL Express", (5, 10), Volumetric, 260.0, 70.0, 0.5, None, Some(70.0)),
        route("fj-br-exp", "FJ-BR-EXP", (15, 30), Volumetric, 120.0, 45.0, 0.5, None, Some(3.0)),
        route(
            "br-line",
            "BR Line (tax included)",
            (20, 35),
            PureWeight,
            62.0,
            12.0,
            0.1,
            Some(0.5),
            Some(10.0),
        ),
    ]
}

fn line(
    id: &str,
    label: &str,
    delivery: (u16, u16),
    restricted: &[&str],
    first_weight_usd: f64,
    additional_weight_usd: f64,
    max_weight_grams: f64,
) -> ShippingLine {
    ShippingLine {
        id: id.to_string(),
        label: label.to_string(),
        delivery: DeliveryEstimate::new(delivery.0, delivery.1),
        restricted_attributes: restricted.iter().map(|s| s.to_string()).collect(),
        first_weight_grams: 500.0,
        first_weight_usd,
        additional_weight_grams: 500.0,
        additional_weight_usd,
        max_weight_grams: Some(max_weight_grams),
    }
}

fn builtin_lines() -> Vec<ShippingLine> {
    vec![
        line(
            "jd-standard",
            "JD Express Standard",
            (12, 20),
            &["battery", "liquid", "powder", "magnetic", "sharp"],
            9.8,
            4.2,
            30_000.0,
        ),
        line(
            "jd-sensitive",
            "JD Express Sensitive",
            (15, 25),
            &["magnetic", "sharp"],
            12.5,
            5.6,
            20_000.0,
        ),
        line(
            "jd-brand",
            "JD Express Brand",
            (15, 25),
            &["battery", "liquid", "powder", "food", "sharp"],
            11.0,
            4.9,
            20_000.0,
        ),
        line(
            "jd-economy",
            "JD Express Economy",
            (25, 40),
            &[
                "battery", "liquid", "powder", "magnetic", "brand", "food", "cosmetics", "sharp",
            ],
            7.4,
            3.1,
            10_000.0,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_are_valid() {
        let tables = RateTables::builtin();
        assert!(tables.validate().is_ok());
        assert_eq!(tables.vip_tiers.len(), 6);
        assert_eq!(tables.service_tiers[0].name, "Sem nível");
        assert_eq!(tables.line_insurance.max_premium_cny(), Some(90.0));
        assert_eq!(tables.legacy_insurance.max_premium_cny(), None);
    }

    #[test]
    fn test_builtin_restrictions_reference_known_attributes() {
        let tables = RateTables::builtin();
        for line in &tables.lines {
            for id in &line.restricted_attributes {
                assert!(tables.attribute(id).is_some(), "unknown attribute {}", id);
            }
        }
    }

    #[test]
    fn test_lookups() {
        let tables = RateTables::builtin();
        assert_eq!(tables.route("ems").unwrap().name, "EMS");
        assert!(tables.route("ups").is_none());
        assert_eq!(tables.line("jd-brand").unwrap().label, "JD Express Brand");
        assert_eq!(tables.vip_fee_percent(0), Some(6.0));
        assert_eq!(tables.vip_fee_percent(5), Some(3.0));
        assert_eq!(tables.vip_fee_percent(6), None);
        assert_eq!(tables.service_tier("diamond").unwrap().rate, 0.035);
        assert_eq!(tables.attribute_or_raw("battery").name, "Battery");
        assert_eq!(tables.attribute_or_raw("glass").name, "glass");
    }

    #[test]
    fn test_json_round_trip_preserves_tables() {
        let tables = RateTables::builtin();
        let json = serde_json::to_string(&tables).unwrap();
        let parsed = RateTables::from_json_str(&json).unwrap();
        assert_eq!(parsed, tables);
    }

    #[test]
    fn test_zero_increment_rejected() {
        let mut tables = RateTables::builtin();
        tables.routes[0].increment = 0.0;
        let err = tables.validate().unwrap_err();
        assert!(matches!(err, CalcError::InvalidRateTable(msg) if msg.contains("increment")));
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut tables = RateTables::builtin();
        tables.lines[1].additional_weight_usd = -1.0;
        assert!(tables.validate().is_err());
    }

    #[test]
    fn test_min_above_max_rejected() {
        let mut tables = RateTables::builtin();
        tables.routes[4].min_weight = Some(12.0);
        assert!(tables.validate().is_err());
    }

    #[test]
    fn test_duplicate_line_rejected() {
        let mut tables = RateTables::builtin();
        let copy = tables.lines[0].clone();
        tables.lines.push(copy);
        let err = tables.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate line id 'jd-standard'"));
    }

    #[test]
    fn test_missing_vip_level_rejected() {
        let mut tables = RateTables::builtin();
        tables.vip_tiers.retain(|t| t.level != 3);
        assert!(tables.validate().is_err());
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = RateTables::from_json_str("{ \"routes\": 42 }").unwrap_err();
        assert!(matches!(err, CalcError::InvalidRateTable(_)));
    }
}
