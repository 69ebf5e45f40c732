use pediq_core::error::InvalidInput;
use pediq_core::input::ClinicalInput;
use pediq_core::models::dose::{Route, Unit};
use pediq_core::models::evaluation::Evaluation;
use pediq_core::models::severity::Severity;

use crate::rules::{Band, DoseRule, ThresholdTable};
use crate::schema::{required_number, weight_kg, FieldSpec};
use crate::Protocol;

/// Croup graded by the Westley score: five component sub-scores summed to
/// 0-17, then banded (<= 2 mild, 3-7 moderate, >= 8 severe).
pub struct Croup;

const SEVERITY_BANDS: ThresholdTable<Severity> = ThresholdTable::new(&[
    Band { lower: 0.0, value: Severity::Mild },
    Band { lower: 3.0, value: Severity::Moderate },
    Band { lower: 8.0, value: Severity::Severe },
]);

const DEXAMETHASONE: DoseRule = DoseRule {
    label: "Dexamethasone",
    per_kg: 0.6,
    min: None,
    max: Some(16.0),
    decimals: 1,
    unit: Unit::Mg,
    route: Some(Route::Oral),
};

const EPINEPHRINE_NEB: DoseRule = DoseRule {
    label: "Epinephrine (1 mg/mL), undiluted",
    per_kg: 0.5,
    min: None,
    max: Some(5.0),
    decimals: 1,
    unit: Unit::Ml,
    route: Some(Route::Nebulized),
};

impl Protocol for Croup {
    fn id(&self) -> &str {
        "croup"
    }

    fn name(&self) -> &str {
        "Croup (Westley)"
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: std::sync::LazyLock<Vec<FieldSpec>> = std::sync::LazyLock::new(|| {
            vec![
                weight_kg(),
                required_number("stridor", "Stridor (0 none, 1 agitated, 2 at rest)")
                    .range(0.0, 2.0),
                required_number("retractions", "Retractions (0-3)").range(0.0, 3.0),
                required_number("air_entry", "Air entry (0 normal, 1 decreased, 2 marked)")
                    .range(0.0, 2.0),
                required_number("cyanosis", "Cyanosis (0 none, 4 agitated, 5 at rest)")
                    .range(0.0, 5.0),
                required_number("consciousness", "Consciousness (0 normal, 5 altered)")
                    .range(0.0, 5.0),
            ]
        });
        &FIELDS
    }

    fn evaluate(&self, input: &ClinicalInput) -> Result<Evaluation, InvalidInput> {
        let weight = input.weight_kg()?;
        let score = input.number("stridor")?
            + input.number("retractions")?
            + input.number("air_entry")?
            + input.number("cyanosis")?
            + input.number("consciousness")?;

        let severity = *SEVERITY_BANDS.classify(score);

        let mut result = Evaluation::for_protocol(self.id());
        result.score = Some(score);
        let label = match severity {
            Severity::Severe => "Severe croup",
            Severity::Moderate => "Moderate croup",
            _ => "Mild croup",
        };
        result.classify(label, severity);

        result.dose_line(DEXAMETHASONE.apply_noting(weight, "single dose, PO or IM"));
        if severity >= Severity::Moderate {
            result.dose_line(EPINEPHRINE_NEB.apply(weight));
            result.recommend("Observe at least 2 h after nebulized epinephrine for rebound");
        }

        result.recommend("Keep the child calm on the caregiver's lap; avoid unnecessary procedures");
        if severity >= Severity::Severe {
            result.recommend("Admit; anticipate airway management if obstruction progresses");
        } else {
            result.recommend("Discharge once stridor at rest resolves and intake is adequate");
        }

        result.observe(format!("Westley score: {score:.0}/17"));
        Ok(result)
    }
}
