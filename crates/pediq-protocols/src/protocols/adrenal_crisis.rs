use pediq_core::error::InvalidInput;
use pediq_core::input::ClinicalInput;
use pediq_core::models::dose::{Dose, Route, Unit};
use pediq_core::models::evaluation::Evaluation;
use pediq_core::models::severity::Severity;

use crate::rules::{body_surface_area_m2, round_to, Band, DoseRule, ThresholdTable};
use crate::schema::{finding, optional_number, required_number, weight_kg, FieldSpec};
use crate::Protocol;

/// Adrenal crisis. Hydrocortisone is surface-area dosed when a height is
/// available; otherwise the age-banded fallback applies.
pub struct AdrenalCrisis;

const HYDROCORTISONE_MG_PER_M2: f64 = 50.0;
const HYDROCORTISONE_MAX_MG: f64 = 100.0;

/// Fallback hydrocortisone bolus (mg) by age band (years), used when no
/// height is recorded.
const HYDROCORTISONE_BY_AGE: ThresholdTable<f64> = ThresholdTable::new(&[
    Band { lower: 0.0, value: 25.0 },
    Band { lower: 3.0, value: 50.0 },
    Band { lower: 12.0, value: 100.0 },
]);

const SALINE_BOLUS: DoseRule = DoseRule {
    label: "0.9% saline bolus",
    per_kg: 20.0,
    min: None,
    max: None,
    decimals: 0,
    unit: Unit::Ml,
    route: Some(Route::Intravenous),
};

const DEXTROSE_10: DoseRule = DoseRule {
    label: "Dextrose 10%",
    per_kg: 2.0,
    min: None,
    max: Some(100.0),
    decimals: 0,
    unit: Unit::Ml,
    route: Some(Route::Intravenous),
};

impl Protocol for AdrenalCrisis {
    fn id(&self) -> &str {
        "adrenal_crisis"
    }

    fn name(&self) -> &str {
        "Adrenal Crisis"
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: std::sync::LazyLock<Vec<FieldSpec>> = std::sync::LazyLock::new(|| {
            vec![
                weight_kg(),
                required_number("age_years", "Age").with_unit("years").range(0.0, 21.0),
                optional_number("height_cm", "Height").with_unit("cm").range(30.0, 220.0),
                finding("hypoglycemia", "Documented hypoglycemia"),
            ]
        });
        &FIELDS
    }

    fn evaluate(&self, input: &ClinicalInput) -> Result<Evaluation, InvalidInput> {
        let weight = input.weight_kg()?;
        let age_years = input.number("age_years")?;
        let height = input.number_opt("height_cm")?;
        let hypoglycemia = input.flag("hypoglycemia")?;

        let mut result = Evaluation::for_protocol(self.id());
        result.classify("Adrenal crisis", Severity::Critical);

        let (bolus, note) = match height {
            Some(height_cm) => {
                let bsa = body_surface_area_m2(weight, height_cm);
                let dose = (HYDROCORTISONE_MG_PER_M2 * bsa).min(HYDROCORTISONE_MAX_MG);
                (round_to(dose, 0), format!("50 mg/m\u{b2}, BSA {bsa:.2} m\u{b2}"))
            }
            None => {
                let dose = *HYDROCORTISONE_BY_AGE.classify(age_years);
                (dose, "age-banded dose (no height recorded)".to_string())
            }
        };
        result.dose_line(
            Dose::new("Hydrocortisone bolus", bolus, Unit::Mg)
                .via(Route::Intravenous)
                .noting(note),
        );

        result.dose_line(SALINE_BOLUS.apply_noting(weight, "over the first hour"));
        if hypoglycemia {
            result.dose_line(DEXTROSE_10.apply(weight));
        }

        result.recommend("Continue hydrocortisone 50 mg/m\u{b2}/day divided every 6 h");
        result.recommend("Do not wait for confirmatory labs to treat");
        result.recommend("Draw cortisol and ACTH before the bolus when the line allows");

        result.observe("Mineralocorticoid is unnecessary while hydrocortisone is at stress doses");
        Ok(result)
    }
}
