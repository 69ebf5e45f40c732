use pediq_core::error::InvalidInput;
use pediq_core::input::ClinicalInput;
use pediq_core::models::dose::{Dose, Route, Unit};
use pediq_core::models::evaluation::Evaluation;
use pediq_core::models::severity::Severity;

use crate::rules::DoseRule;
use crate::schema::{finding, required_number, weight_kg, FieldSpec};
use crate::Protocol;

/// Hypoglycemia. The route follows the sensorium: oral carbohydrate while
/// the child protects the airway, IV dextrose once it cannot.
pub struct Hypoglycemia;

const DEXTROSE_10_BOLUS: DoseRule = DoseRule {
    label: "Dextrose 10%",
    per_kg: 2.0,
    min: None,
    max: Some(100.0),
    decimals: 0,
    unit: Unit::Ml,
    route: Some(Route::Intravenous),
};

const ORAL_CARBOHYDRATE: DoseRule = DoseRule {
    label: "Fast carbohydrate",
    per_kg: 0.3,
    min: None,
    max: Some(15.0),
    decimals: 1,
    unit: Unit::G,
    route: Some(Route::Oral),
};

impl Protocol for Hypoglycemia {
    fn id(&self) -> &str {
        "hypoglycemia"
    }

    fn name(&self) -> &str {
        "Hypoglycemia"
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: std::sync::LazyLock<Vec<FieldSpec>> = std::sync::LazyLock::new(|| {
            vec![
                weight_kg(),
                required_number("glucose_mg_dl", "Capillary or serum glucose")
                    .with_unit("mg/dL")
                    .range(0.0, 500.0),
                finding("unconscious", "Unconscious or seizing"),
                finding("iv_access", "IV access available"),
            ]
        });
        &FIELDS
    }

    fn evaluate(&self, input: &ClinicalInput) -> Result<Evaluation, InvalidInput> {
        let weight = input.weight_kg()?;
        let glucose = input.number("glucose_mg_dl")?;
        let unconscious = input.flag("unconscious")?;
        let iv_access = input.flag("iv_access")?;

        let mut result = Evaluation::for_protocol(self.id());

        if glucose >= 60.0 && !unconscious {
            result.classification = Some("Normoglycemia".to_string());
            result.observe("Glucose at or above 60 mg/dL; investigate other causes of symptoms");
            return Ok(result);
        }

        if unconscious || glucose < 45.0 {
            let severity = if unconscious { Severity::Severe } else { Severity::Moderate };
            let label = if unconscious {
                "Severe hypoglycemia (neuroglycopenia)"
            } else {
                "Symptomatic hypoglycemia"
            };
            result.classify(label, severity);

            if iv_access || !unconscious {
                result.dose_line(DEXTROSE_10_BOLUS.apply_noting(weight, "slow IV push"));
            }
            if unconscious && !iv_access {
                let glucagon = if weight < 25.0 { 0.5 } else { 1.0 };
                result.dose_line(
                    Dose::new("Glucagon", glucagon, Unit::Mg)
                        .via(Route::Intramuscular)
                        .noting("while obtaining access"),
                );
            }
            result.recommend("Recheck glucose in 15 min; repeat bolus if still below 60 mg/dL");
            result.recommend("Follow with dextrose-containing maintenance fluids");
        } else {
            result.classify("Mild hypoglycemia", Severity::Mild);
            result.dose_line(ORAL_CARBOHYDRATE.apply_noting(weight, "juice or glucose gel"));
            result.recommend("Recheck glucose in 15 min; repeat carbohydrate if below 60 mg/dL");
            result.recommend("Offer a complex-carbohydrate snack once corrected");
        }

        result.observe("Draw a critical sample before correction when the cause is unknown");
        Ok(result)
    }
}
