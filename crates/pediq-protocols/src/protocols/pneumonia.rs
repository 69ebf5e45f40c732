use pediq_core::error::InvalidInput;
use pediq_core::input::ClinicalInput;
use pediq_core::models::dose::{Route, Unit};
use pediq_core::models::evaluation::Evaluation;
use pediq_core::models::severity::Severity;

use crate::rules::{Band, DoseRule, ThresholdTable};
use crate::schema::{finding, optional_number, required_number, weight_kg, FieldSpec};
use crate::Protocol;

/// Community-acquired pneumonia. Tachypnea is read against the WHO
/// age-banded cutoffs; danger signs short-circuit to severe.
pub struct Pneumonia;

/// WHO tachypnea cutoff (breaths/min) by age band (months).
const TACHYPNEA_CUTOFF: ThresholdTable<f64> = ThresholdTable::new(&[
    Band { lower: 0.0, value: 60.0 },
    Band { lower: 2.0, value: 50.0 },
    Band { lower: 12.0, value: 40.0 },
    Band { lower: 60.0, value: 30.0 },
]);

const AMOXICILLIN: DoseRule = DoseRule {
    label: "Amoxicillin",
    per_kg: 45.0,
    min: None,
    max: Some(1000.0),
    decimals: 0,
    unit: Unit::Mg,
    route: Some(Route::Oral),
};

const AMPICILLIN: DoseRule = DoseRule {
    label: "Ampicillin",
    per_kg: 50.0,
    min: None,
    max: Some(2000.0),
    decimals: 0,
    unit: Unit::Mg,
    route: Some(Route::Intravenous),
};

impl Protocol for Pneumonia {
    fn id(&self) -> &str {
        "pneumonia"
    }

    fn name(&self) -> &str {
        "Community-Acquired Pneumonia"
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: std::sync::LazyLock<Vec<FieldSpec>> = std::sync::LazyLock::new(|| {
            vec![
                weight_kg(),
                required_number("age_months", "Age").with_unit("months").range(0.0, 240.0),
                optional_number("respiratory_rate", "Respiratory rate")
                    .with_unit("rpm")
                    .range(5.0, 150.0),
                optional_number("spo2", "Oxygen saturation in room air")
                    .with_unit("%")
                    .range(50.0, 100.0),
                finding("retractions", "Chest retractions"),
                finding("grunting", "Grunting"),
                finding("cyanosis", "Central cyanosis"),
                finding("unable_to_drink", "Unable to drink or breastfeed"),
            ]
        });
        &FIELDS
    }

    fn evaluate(&self, input: &ClinicalInput) -> Result<Evaluation, InvalidInput> {
        let weight = input.weight_kg()?;
        let age_months = input.number("age_months")?;
        let rr = input.number_opt("respiratory_rate")?;
        let spo2 = input.number_opt("spo2")?;
        let retractions = input.flag("retractions")?;
        let grunting = input.flag("grunting")?;
        let cyanosis = input.flag("cyanosis")?;
        let unable_to_drink = input.flag("unable_to_drink")?;

        let cutoff = *TACHYPNEA_CUTOFF.classify(age_months);
        let tachypnea = rr.is_some_and(|r| r > cutoff);

        let severity = if cyanosis || grunting || unable_to_drink || spo2.is_some_and(|s| s < 90.0)
        {
            Severity::Severe
        } else if tachypnea && retractions {
            Severity::Moderate
        } else {
            Severity::Mild
        };

        let mut result = Evaluation::for_protocol(self.id());
        let label = match severity {
            Severity::Severe => "Severe pneumonia",
            Severity::Moderate => "Pneumonia with lower chest indrawing",
            _ => "Non-severe pneumonia",
        };
        result.classify(label, severity);

        match severity {
            Severity::Severe => {
                result.dose_line(AMPICILLIN.apply_noting(weight, "every 6 h"));
                result.recommend("Oxygen to keep saturation >= 92%");
                result.recommend("Admit; blood culture before the first dose");
            }
            Severity::Moderate => {
                result.dose_line(AMOXICILLIN.apply_noting(weight, "every 12 h for 7 days"));
                result.recommend("Observe the first dose and feeding before discharge decision");
                result.recommend("Reassess in 48 h; admit if indrawing persists");
            }
            _ => {
                result.dose_line(AMOXICILLIN.apply_noting(weight, "every 12 h for 7 days"));
                result.recommend("Home treatment; return if breathing worsens or fever persists beyond 48-72 h");
            }
        }

        if tachypnea {
            result.observe(format!(
                "Tachypnea for age: cutoff {cutoff:.0} rpm at {age_months:.0} months"
            ));
        }
        result.observe("Radiograph is not required for non-severe outpatient pneumonia");
        Ok(result)
    }
}
