use pediq_core::error::InvalidInput;
use pediq_core::input::ClinicalInput;
use pediq_core::models::dose::{Route, Unit};
use pediq_core::models::evaluation::Evaluation;
use pediq_core::models::severity::Severity;

use crate::rules::DoseRule;
use crate::schema::{finding, required_number, weight_kg, FieldSpec};
use crate::Protocol;

/// Fever without an apparent source. Risk stratification is by age band
/// and appearance; the youngest infants always get the full workup.
pub struct FeverWithoutSource;

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

impl Protocol for FeverWithoutSource {
    fn id(&self) -> &str {
        "fever_without_source"
    }

    fn name(&self) -> &str {
        "Fever Without Source"
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: std::sync::LazyLock<Vec<FieldSpec>> = std::sync::LazyLock::new(|| {
            vec![
                weight_kg(),
                required_number("age_months", "Age").with_unit("months").range(0.0, 240.0),
                required_number("temperature_c", "Temperature").with_unit("\u{b0}C").range(34.0, 43.0),
                finding("toxic_appearance", "Toxic appearance"),
                finding("fully_immunized", "Immunization schedule complete for age"),
            ]
        });
        &FIELDS
    }

    fn evaluate(&self, input: &ClinicalInput) -> Result<Evaluation, InvalidInput> {
        let weight = input.weight_kg()?;
        let age_months = input.number("age_months")?;
        let temperature = input.number("temperature_c")?;
        let toxic = input.flag("toxic_appearance")?;
        let immunized = input.flag("fully_immunized")?;

        let mut result = Evaluation::for_protocol(self.id());

        if toxic || age_months < 1.0 {
            result.classify("High risk", Severity::Severe);
            result.recommend("Admit; full sepsis workup including lumbar puncture");
            result.recommend("Blood, urine, and CSF cultures before antibiotics");
            if age_months < 1.0 {
                result.dose_line(AMPICILLIN.apply_noting(weight, "every 6 h"));
                result.dose_line(GENTAMICIN.apply_noting(weight, "once daily"));
            } else {
                result.dose_line(CEFTRIAXONE.apply(weight));
            }
        } else if age_months < 3.0 {
            result.classify("Intermediate risk", Severity::Moderate);
            result.recommend("Urinalysis, urine culture, blood count, and blood culture");
            result.dose_line(
                CEFTRIAXONE.apply_noting(weight, "single dose while cultures are pending"),
            );
            result.recommend("Reassess within 24 h; admit if any result is abnormal");
        } else if temperature >= 39.0 && !immunized {
            result.classify("Intermediate risk", Severity::Moderate);
            result.recommend("Urinalysis and blood count; chest radiograph if leukocytosis");
            result.recommend("Reassess within 24-48 h");
        } else {
            result.classify("Low risk", Severity::Mild);
            result.recommend("Antipyretics and home observation");
            result.recommend("Return if fever persists beyond 48 h or appearance worsens");
        }

        result.observe("Most fevers without source in immunized children over 3 months are viral");
        Ok(result)
    }
}
