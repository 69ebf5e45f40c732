use pediq_core::error::InvalidInput;
use pediq_core::input::ClinicalInput;
use pediq_core::models::dose::{Route, Unit};
use pediq_core::models::evaluation::Evaluation;
use pediq_core::models::severity::Severity;

use crate::rules::DoseRule;
use crate::schema::{finding, required_number, weight_kg, FieldSpec};
use crate::Protocol;

/// Urinary tract infection. Route of therapy follows age and oral
/// tolerance; the culture is collected before the first dose, always.
pub struct Uti;

const CEPHALEXIN: DoseRule = DoseRule {
    label: "Cephalexin",
    per_kg: 25.0,
    min: None,
    max: Some(500.0),
    decimals: 0,
    unit: Unit::Mg,
    route: Some(Route::Oral),
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

impl Protocol for Uti {
    fn id(&self) -> &str {
        "uti"
    }

    fn name(&self) -> &str {
        "Urinary Tract Infection"
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: std::sync::LazyLock<Vec<FieldSpec>> = std::sync::LazyLock::new(|| {
            vec![
                weight_kg(),
                required_number("age_months", "Age").with_unit("months").range(0.0, 240.0),
                finding("toxic_appearance", "Toxic appearance"),
                finding("vomiting", "Vomiting or unable to tolerate oral intake"),
            ]
        });
        &FIELDS
    }

    fn evaluate(&self, input: &ClinicalInput) -> Result<Evaluation, InvalidInput> {
        let weight = input.weight_kg()?;
        let age_months = input.number("age_months")?;
        let toxic = input.flag("toxic_appearance")?;
        let vomiting = input.flag("vomiting")?;

        let mut result = Evaluation::for_protocol(self.id());

        result.recommend("Urine culture by catheter or suprapubic aspiration before antibiotics");

        if age_months < 2.0 || toxic {
            result.classify("Febrile UTI, high risk", Severity::Severe);
            if age_months < 1.0 {
                result.dose_line(AMPICILLIN.apply_noting(weight, "every 6 h"));
                result.dose_line(GENTAMICIN.apply_noting(weight, "once daily"));
            } else {
                result.dose_line(CEFTRIAXONE.apply_noting(weight, "once daily"));
            }
            result.recommend("Admit; blood culture and consider lumbar puncture under 1 month");
        } else if vomiting {
            result.classify("Febrile UTI, oral route not tolerated", Severity::Moderate);
            result.dose_line(CEFTRIAXONE.apply_noting(weight, "once daily until tolerating oral"));
            result.recommend("Switch to oral therapy once afebrile and tolerating intake");
        } else {
            result.classify("Febrile UTI, outpatient", Severity::Mild);
            result.dose_line(CEPHALEXIN.apply_noting(weight, "every 6 h for 7 days"));
            result.recommend("Reassess in 48 h with culture result; adjust to sensitivity");
        }

        result.recommend("Renal and bladder ultrasound after the first febrile UTI under 2 years");
        result.observe("A bag specimen is acceptable only to exclude infection, never to confirm it");
        Ok(result)
    }
}
