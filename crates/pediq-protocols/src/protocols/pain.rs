use pediq_core::error::InvalidInput;
use pediq_core::input::ClinicalInput;
use pediq_core::models::dose::{Route, Unit};
use pediq_core::models::evaluation::Evaluation;
use pediq_core::models::severity::Severity;

use crate::rules::{Band, DoseRule, ThresholdTable};
use crate::schema::{required_number, weight_kg, FieldSpec};
use crate::Protocol;

/// Acute pain, tiered by a 0-10 score. The ladder is additive: each tier
/// keeps the options below it.
pub struct AcutePain;

const SEVERITY_BANDS: ThresholdTable<Severity> = ThresholdTable::new(&[
    Band { lower: 0.0, value: Severity::Mild },
    Band { lower: 4.0, value: Severity::Moderate },
    Band { lower: 7.0, value: Severity::Severe },
]);

const DIPYRONE: DoseRule = DoseRule {
    label: "Dipyrone",
    per_kg: 20.0,
    min: None,
    max: Some(1000.0),
    decimals: 0,
    unit: Unit::Mg,
    route: Some(Route::Oral),
};

const PARACETAMOL: DoseRule = DoseRule {
    label: "Paracetamol",
    per_kg: 15.0,
    min: None,
    max: Some(750.0),
    decimals: 0,
    unit: Unit::Mg,
    route: Some(Route::Oral),
};

const IBUPROFEN: DoseRule = DoseRule {
    label: "Ibuprofen",
    per_kg: 10.0,
    min: None,
    max: Some(400.0),
    decimals: 0,
    unit: Unit::Mg,
    route: Some(Route::Oral),
};

const TRAMADOL: DoseRule = DoseRule {
    label: "Tramadol",
    per_kg: 1.0,
    min: None,
    max: Some(100.0),
    decimals: 0,
    unit: Unit::Mg,
    route: Some(Route::Intravenous),
};

const MORPHINE: DoseRule = DoseRule {
    label: "Morphine",
    per_kg: 0.1,
    min: None,
    max: Some(10.0),
    decimals: 2,
    unit: Unit::Mg,
    route: Some(Route::Intravenous),
};

impl Protocol for AcutePain {
    fn id(&self) -> &str {
        "pain"
    }

    fn name(&self) -> &str {
        "Acute Pain"
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: std::sync::LazyLock<Vec<FieldSpec>> = std::sync::LazyLock::new(|| {
            vec![
                weight_kg(),
                required_number("pain_score", "Pain score (0-10)").range(0.0, 10.0),
            ]
        });
        &FIELDS
    }

    fn evaluate(&self, input: &ClinicalInput) -> Result<Evaluation, InvalidInput> {
        let weight = input.weight_kg()?;
        let score = input.number("pain_score")?;

        let mut result = Evaluation::for_protocol(self.id());
        result.score = Some(score);

        if score == 0.0 {
            result.classification = Some("No pain".to_string());
            result.observe("Score zero; reassess with any procedure or change");
            return Ok(result);
        }

        let severity = *SEVERITY_BANDS.classify(score);
        let label = match severity {
            Severity::Severe => "Severe pain",
            Severity::Moderate => "Moderate pain",
            _ => "Mild pain",
        };
        result.classify(label, severity);

        if severity >= Severity::Severe {
            result.dose_line(MORPHINE.apply_noting(weight, "titrate slowly, monitor respiration"));
        }
        if severity >= Severity::Moderate {
            result.dose_line(IBUPROFEN.apply_noting(weight, "every 8 h"));
            if severity == Severity::Moderate {
                result.dose_line(TRAMADOL.apply_noting(weight, "if simple analgesics insufficient"));
            }
        }
        result.dose_line(DIPYRONE.apply_noting(weight, "every 6 h"));
        result.dose_line(PARACETAMOL.apply_noting(weight, "every 6 h, alternative to dipyrone"));

        result.recommend("Reassess the score 30-60 min after each dose");
        if severity >= Severity::Severe {
            result.recommend("Treat the cause in parallel; escalate if two morphine titrations fail");
        }

        result.observe("Non-pharmacological measures (positioning, distraction, sucrose in infants) alongside drugs");
        Ok(result)
    }
}
