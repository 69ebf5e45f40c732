//! Rule-evaluation primitives shared by every protocol: threshold tables,
//! weight-based dose rules, and the two fluid formulas used across
//! protocols. Per-protocol coefficients and cutoffs are `const` data in the
//! protocol modules; nothing here holds mutable state.

use pediq_core::models::dose::{Dose, Route, Unit};

/// One band of a [`ThresholdTable`]: the inclusive lower bound and the
/// value the band maps to.
#[derive(Debug, Clone, Copy)]
pub struct Band<T: 'static> {
    pub lower: f64,
    pub value: T,
}

/// Ordered threshold lookup over ascending, non-overlapping bands.
///
/// Intervals are closed below and open above; the lookup is total over the
/// reals and saturates at both ends: values below the first bound map to
/// the first band, values above the last bound map to the last. A value
/// exactly on a bound lands in the band whose lower bound it equals.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdTable<T: 'static> {
    bands: &'static [Band<T>],
}

impl<T> ThresholdTable<T> {
    /// Bounds must be strictly ascending and the table non-empty.
    pub const fn new(bands: &'static [Band<T>]) -> Self {
        Self { bands }
    }

    pub fn classify(&self, value: f64) -> &T {
        debug_assert!(!self.bands.is_empty());
        debug_assert!(self.bands.windows(2).all(|w| w[0].lower < w[1].lower));

        let mut current = &self.bands[0].value;
        for band in self.bands {
            if value >= band.lower {
                current = &band.value;
            } else {
                break;
            }
        }
        current
    }
}

/// A weight-proportional dose: `round(clamp(per_kg × weight, min, max))`.
///
/// Rules are plain configuration data; protocols declare them as module
/// `const`s rather than spelling the arithmetic at call sites.
#[derive(Debug, Clone, Copy)]
pub struct DoseRule {
    pub label: &'static str,
    pub per_kg: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub decimals: u8,
    pub unit: Unit,
    pub route: Option<Route>,
}

impl DoseRule {
    /// Compute the dose for a weight. Callers validate weight > 0 at the
    /// input boundary before any rule runs.
    pub fn apply(&self, weight_kg: f64) -> Dose {
        debug_assert!(weight_kg > 0.0);
        let mut amount = self.per_kg * weight_kg;
        if let Some(max) = self.max {
            amount = amount.min(max);
        }
        if let Some(min) = self.min {
            amount = amount.max(min);
        }
        Dose {
            label: self.label.to_string(),
            amount: round_to(amount, self.decimals),
            unit: self.unit,
            route: self.route,
            note: None,
        }
    }

    pub fn apply_noting(&self, weight_kg: f64, note: &str) -> Dose {
        let mut dose = self.apply(weight_kg);
        dose.note = Some(note.to_string());
        dose
    }
}

/// Round to a fixed number of decimal places, half away from zero.
pub fn round_to(value: f64, decimals: u8) -> f64 {
    let factor = 10f64.powi(i32::from(decimals));
    (value * factor).round() / factor
}

/// Holliday–Segar daily maintenance fluid volume.
pub fn maintenance_ml_per_day(weight_kg: f64) -> f64 {
    debug_assert!(weight_kg > 0.0);
    if weight_kg <= 10.0 {
        100.0 * weight_kg
    } else if weight_kg <= 20.0 {
        1000.0 + 50.0 * (weight_kg - 10.0)
    } else {
        1500.0 + 20.0 * (weight_kg - 20.0)
    }
}

/// Mosteller body surface area.
pub fn body_surface_area_m2(weight_kg: f64, height_cm: f64) -> f64 {
    debug_assert!(weight_kg > 0.0 && height_cm > 0.0);
    ((weight_kg * height_cm) / 3600.0).sqrt()
}
