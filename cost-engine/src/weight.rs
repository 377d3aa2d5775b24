//! Volumetric / chargeable weight resolution
//!
//! Carriers bill the greater of the actual weight and the volumetric
//! weight: `L × W × H × 1000 / 8000` grams, i.e. 8000 cm³ per kg.

use rust_decimal::prelude::*;
use shared::models::{Dimensions, WeightAnalysis, WeightUnit};

use crate::money::{GRAM_DECIMAL_PLACES, KG_DECIMAL_PLACES, round_to, to_decimal};

/// cm³ per kg used by the volumetric formula
pub const VOLUMETRIC_DIVISOR: Decimal = Decimal::from_parts(8000, 0, 0, false, 0);

const GRAMS_PER_KG: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Weight figures at full precision, before rounding for display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedWeight {
    pub unit: WeightUnit,
    pub actual: Decimal,
    pub volumetric: Decimal,
    pub chargeable: Decimal,
    pub was_volumetric: bool,
}

impl ResolvedWeight {
    /// Bill actual weight only, keeping the volumetric figure for display
    pub fn actual_only(mut self) -> Self {
        self.chargeable = self.actual;
        self.was_volumetric = false;
        self
    }

    /// Rounded view for results
    pub fn to_analysis(&self) -> WeightAnalysis {
        let places = match self.unit {
            WeightUnit::Grams => GRAM_DECIMAL_PLACES,
            WeightUnit::Kilograms => KG_DECIMAL_PLACES,
        };
        WeightAnalysis {
            unit: self.unit,
            actual_weight: round_to(self.actual, places),
            volumetric_weight: round_to(self.volumetric, places),
            chargeable_weight: round_to(self.chargeable, places),
            was_volumetric: self.was_volumetric,
        }
    }
}

/// Volumetric weight in `unit`
///
/// A zero (or negative) dimension yields zero. Volumes past `Decimal`'s
/// range saturate, so the result is never smaller than the true figure.
pub fn volumetric_weight(dims: &Dimensions, unit: WeightUnit) -> Decimal {
    let volume_cm3 = to_decimal(dims.length_cm)
        .saturating_mul(to_decimal(dims.width_cm))
        .saturating_mul(to_decimal(dims.height_cm));
    if volume_cm3 <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let grams = volume_cm3.saturating_mul(GRAMS_PER_KG) / VOLUMETRIC_DIVISOR;
    match unit {
        WeightUnit::Grams => grams,
        WeightUnit::Kilograms => grams / GRAMS_PER_KG,
    }
}

/// Resolve the weight a carrier bills against, at full precision
pub fn resolve(dims: &Dimensions, actual: Decimal, unit: WeightUnit) -> ResolvedWeight {
    let volumetric = volumetric_weight(dims, unit);
    let was_volumetric = volumetric > actual;
    ResolvedWeight {
        unit,
        actual,
        volumetric,
        chargeable: if was_volumetric { volumetric } else { actual },
        was_volumetric,
    }
}

/// Resolve chargeable weight
///
/// `actual_weight` and every figure of the result are in `unit`.
/// Never fails: a zero dimension falls back to the actual weight.
pub fn resolve_chargeable_weight(
    dims: &Dimensions,
    actual_weight: f64,
    unit: WeightUnit,
) -> WeightAnalysis {
    resolve(dims, to_decimal(actual_weight), unit).to_analysis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actual_governs_small_box() {
        // 10 × 10 × 10 = 1000 cm³ → 125 g
        let dims = Dimensions::new(10.0, 10.0, 10.0);
        let w = resolve_chargeable_weight(&dims, 300.0, WeightUnit::Grams);
        assert_eq!(w.volumetric_weight, 125.0);
        assert_eq!(w.chargeable_weight, 300.0);
        assert!(!w.was_volumetric);
    }

    #[test]
    fn test_volumetric_governs_light_bulky_box() {
        // 40 × 30 × 20 = 24000 cm³ → 3000 g
        let dims = Dimensions::new(40.0, 30.0, 20.0);
        let w = resolve_chargeable_weight(&dims, 1200.0, WeightUnit::Grams);
        assert_eq!(w.volumetric_weight, 3000.0);
        assert_eq!(w.chargeable_weight, 3000.0);
        assert!(w.was_volumetric);
    }

    #[test]
    fn test_tie_is_not_volumetric() {
        let dims = Dimensions::new(20.0, 10.0, 4.0);
        let w = resolve_chargeable_weight(&dims, 100.0, WeightUnit::Grams);
        assert_eq!(w.volumetric_weight, 100.0);
        assert_eq!(w.chargeable_weight, 100.0);
        assert!(!w.was_volumetric);
    }

    #[test]
    fn test_zero_dimension_falls_back_to_actual() {
        let dims = Dimensions::new(0.0, 50.0, 50.0);
        let w = resolve_chargeable_weight(&dims, 2.0, WeightUnit::Kilograms);
        assert_eq!(w.volumetric_weight, 0.0);
        assert_eq!(w.chargeable_weight, 2.0);
        assert!(!w.was_volumetric);
    }

    #[test]
    fn test_kilograms_scale() {
        // 30 × 20 × 10 = 6000 cm³ → 0.75 kg
        let dims = Dimensions::new(30.0, 20.0, 10.0);
        let w = resolve_chargeable_weight(&dims, 0.5, WeightUnit::Kilograms);
        assert_eq!(w.volumetric_weight, 0.75);
        assert_eq!(w.chargeable_weight, 0.75);
        assert!(w.was_volumetric);
    }

    #[test]
    fn test_chargeable_is_max_across_grid() {
        for l in [0.0, 5.0, 12.5, 30.0, 60.0] {
            for h in [1.0, 8.0, 25.0] {
                for actual in [50.0, 400.0, 2500.0, 9000.0] {
                    let dims = Dimensions::new(l, 20.0, h);
                    let w = resolve_chargeable_weight(&dims, actual, WeightUnit::Grams);
                    let volumetric = l * 20.0 * h * 1000.0 / 8000.0;
                    if volumetric <= actual {
                        assert_eq!(w.chargeable_weight, actual);
                        assert!(!w.was_volumetric);
                    } else {
                        assert_eq!(w.chargeable_weight, w.volumetric_weight);
                        assert!(w.was_volumetric);
                    }
                }
            }
        }
    }

    #[test]
    fn test_oversized_box_saturates_instead_of_failing() {
        let dims = Dimensions::new(1e10, 1e10, 1e10);
        let w = resolve_chargeable_weight(&dims, 500.0, WeightUnit::Grams);
        assert!(w.was_volumetric);
        assert!(w.chargeable_weight > 1e20);
    }

    #[test]
    fn test_actual_only_keeps_volumetric_for_display() {
        let dims = Dimensions::new(40.0, 30.0, 20.0);
        let resolved = resolve(&dims, to_decimal(1.2), WeightUnit::Kilograms).actual_only();
        let w = resolved.to_analysis();
        assert_eq!(w.volumetric_weight, 3.0);
        assert_eq!(w.chargeable_weight, 1.2);
        assert!(!w.was_volumetric);
    }
}
