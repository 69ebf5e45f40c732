use pediq_core::error::InvalidInput;
use pediq_core::input::ClinicalInput;
use pediq_core::models::dose::{Route, Unit};
use pediq_core::models::evaluation::Evaluation;
use pediq_core::models::severity::Severity;

use crate::rules::{Band, DoseRule, ThresholdTable};
use crate::schema::{finding, required_number, weight_kg, FieldSpec};
use crate::Protocol;

/// Traumatic brain injury graded by the Glasgow total. The age-expected
/// score is reported for reference only: a total below 9 is severe at any
/// age.
pub struct Tbi;

/// Age-expected Glasgow total by age band (months).
const EXPECTED_GCS: ThresholdTable<f64> = ThresholdTable::new(&[
    Band { lower: 0.0, value: 9.0 },
    Band { lower: 6.0, value: 11.0 },
    Band { lower: 12.0, value: 12.0 },
    Band { lower: 24.0, value: 13.0 },
    Band { lower: 60.0, value: 15.0 },
]);

const HYPERTONIC_SALINE: DoseRule = DoseRule {
    label: "Hypertonic saline 3%",
    per_kg: 5.0,
    min: None,
    max: Some(250.0),
    decimals: 0,
    unit: Unit::Ml,
    route: Some(Route::Intravenous),
};

impl Protocol for Tbi {
    fn id(&self) -> &str {
        "tbi"
    }

    fn name(&self) -> &str {
        "Traumatic Brain Injury"
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: std::sync::LazyLock<Vec<FieldSpec>> = std::sync::LazyLock::new(|| {
            vec![
                weight_kg(),
                required_number("age_months", "Age").with_unit("months").range(0.0, 240.0),
                required_number("glasgow_total", "Glasgow Coma Scale total").range(3.0, 15.0),
                finding("herniation_signs", "Herniation signs (unilateral pupil, Cushing triad)"),
                finding("vomiting", "Repeated vomiting"),
                finding("loss_of_consciousness", "Loss of consciousness at the scene"),
            ]
        });
        &FIELDS
    }

    fn evaluate(&self, input: &ClinicalInput) -> Result<Evaluation, InvalidInput> {
        let weight = input.weight_kg()?;
        let age_months = input.number("age_months")?;
        let glasgow = input.number("glasgow_total")?;
        let herniation = input.flag("herniation_signs")?;
        let vomiting = input.flag("vomiting")?;
        let loc = input.flag("loss_of_consciousness")?;

        let severity = if glasgow < 9.0 {
            Severity::Severe
        } else if glasgow < 13.0 {
            Severity::Moderate
        } else {
            Severity::Mild
        };

        let mut result = Evaluation::for_protocol(self.id());
        result.score = Some(glasgow);
        let label = match severity {
            Severity::Severe => "Severe traumatic brain injury",
            Severity::Moderate => "Moderate traumatic brain injury",
            _ => "Mild traumatic brain injury",
        };
        result.classify(label, severity);

        match severity {
            Severity::Severe => {
                result.recommend("Secure the airway: rapid sequence intubation for Glasgow < 9");
                result.recommend("Immediate head CT and neurosurgical consultation");
                result.recommend("Head of bed 30\u{b0}, midline; avoid hypoxia, hypotension, hyperthermia");
                if herniation {
                    result.dose_line(
                        HYPERTONIC_SALINE.apply_noting(weight, "herniation signs, infuse over 10 min"),
                    );
                    result.recommend("Brief hyperventilation only while preparing definitive care");
                }
            }
            Severity::Moderate => {
                result.recommend("Head CT and in-hospital observation");
                result.recommend("Repeat neurological checks every 30 min until improving");
            }
            _ => {
                if vomiting || loc {
                    result.recommend("Observe 6 h; CT if vomiting persists or examination changes");
                } else {
                    result.recommend("Observation at home with written return precautions");
                }
            }
        }

        let expected = *EXPECTED_GCS.classify(age_months);
        result.observe(format!(
            "Age-expected Glasgow total at {age_months:.0} months: {expected:.0} (reference only)"
        ));
        Ok(result)
    }
}
