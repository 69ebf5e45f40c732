use pediq_core::error::InvalidInput;
use pediq_core::input::ClinicalInput;
use pediq_core::models::dose::{Dose, Route, Unit};
use pediq_core::models::evaluation::Evaluation;
use pediq_core::models::severity::Severity;

use crate::rules::DoseRule;
use crate::schema::{finding, required_number, weight_kg, FieldSpec};
use crate::Protocol;

/// Sepsis and septic shock: first-hour bundle with age-banded empiric
/// antibiotics. Hypotension is a late sign; perfusion findings drive the
/// tier.
pub struct Sepsis;

const RINGER_BOLUS: DoseRule = DoseRule {
    label: "Ringer lactate bolus",
    per_kg: 20.0,
    min: None,
    max: None,
    decimals: 0,
    unit: Unit::Ml,
    route: Some(Route::Intravenous),
};

const AMPICILLIN: DoseRule = DoseRule {
    label: "Ampicillin",
    per_kg: 50.0,
    min: None,
    max: None,
    decimals: 0,
    unit: Unit::Mg,
    route: Some(Route::Intravenous),
};

const GENTAMICIN: DoseRule = DoseRule {
    label: "Gentamicin",
    per_kg: 4.0,
    min: None,
    max: None,
    decimals: 1,
    unit: Unit::Mg,
    route: Some(Route::Intravenous),
};

const CEFTRIAXONE: DoseRule = DoseRule {
    label: "Ceftriaxone",
    per_kg: 50.0,
    min: None,
    max: Some(2000.0),
    decimals: 0,
    unit: Unit::Mg,
    route: Some(Route::Intravenous),
};

impl Protocol for Sepsis {
    fn id(&self) -> &str {
        "sepsis"
    }

    fn name(&self) -> &str {
        "Sepsis and Septic Shock"
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: std::sync::LazyLock<Vec<FieldSpec>> = std::sync::LazyLock::new(|| {
            vec![
                weight_kg(),
                required_number("age_months", "Age").with_unit("months").range(0.0, 240.0),
                finding("hypotension", "Hypotension for age"),
                finding("altered_mental_state", "Altered mental state"),
                finding("abnormal_perfusion", "Capillary refill > 2 s or mottled skin"),
                finding("tachycardia", "Tachycardia for age"),
            ]
        });
        &FIELDS
    }

    fn evaluate(&self, input: &ClinicalInput) -> Result<Evaluation, InvalidInput> {
        let weight = input.weight_kg()?;
        let age_months = input.number("age_months")?;
        let hypotension = input.flag("hypotension")?;
        let altered = input.flag("altered_mental_state")?;
        let perfusion = input.flag("abnormal_perfusion")?;
        let tachycardia = input.flag("tachycardia")?;

        let mut result = Evaluation::for_protocol(self.id());

        if hypotension || altered {
            result.classify("Septic shock", Severity::Critical);
        } else if perfusion && tachycardia {
            result.classify("Severe sepsis", Severity::Severe);
        } else {
            result.classify("Sepsis", Severity::Severe);
        }

        result.recommend("First-hour bundle: access, cultures, antibiotics, fluids, lactate");
        result.dose_line(
            RINGER_BOLUS.apply_noting(weight, "over <= 20 min, reassess after each bolus, up to 3x"),
        );

        if age_months < 1.0 {
            result.dose_line(AMPICILLIN.apply_noting(weight, "every 6 h"));
            result.dose_line(GENTAMICIN.apply_noting(weight, "once daily"));
        } else {
            result.dose_line(CEFTRIAXONE.apply(weight));
        }

        if hypotension || altered {
            result.dose_line(
                Dose::new("Epinephrine infusion", 0.05, Unit::McgPerKgPerMin)
                    .via(Route::Intravenous)
                    .noting("if fluid-refractory, titrate; peripheral start acceptable"),
            );
            result.recommend("Intensive care; arterial and central access once stabilized");
        }

        result.recommend("Blood cultures before antibiotics when this causes no delay");
        result.recommend("Watch for hepatomegaly and rales during volume expansion");
        result.recommend("Target urine output >= 1 mL/kg/h and normal lactate");

        result.observe("Hypotension is a late sign in children; do not wait for it");
        Ok(result)
    }
}
