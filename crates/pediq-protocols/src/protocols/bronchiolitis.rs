use pediq_core::error::InvalidInput;
use pediq_core::input::ClinicalInput;
use pediq_core::models::evaluation::Evaluation;
use pediq_core::models::severity::Severity;

use crate::schema::{finding, optional_number, required_number, FieldSpec};
use crate::Protocol;

/// Bronchiolitis. Supportive care only: the module exists to grade
/// severity and keep bronchodilators and steroids out of the plan.
pub struct Bronchiolitis;

impl Protocol for Bronchiolitis {
    fn id(&self) -> &str {
        "bronchiolitis"
    }

    fn name(&self) -> &str {
        "Bronchiolitis"
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: std::sync::LazyLock<Vec<FieldSpec>> = std::sync::LazyLock::new(|| {
            vec![
                required_number("age_months", "Age").with_unit("months").range(0.0, 24.0),
                optional_number("spo2", "Oxygen saturation in room air")
                    .with_unit("%")
                    .range(50.0, 100.0),
                optional_number("respiratory_rate", "Respiratory rate")
                    .with_unit("rpm")
                    .range(10.0, 150.0),
                finding("apnea", "Apnea episodes"),
                finding("grunting", "Grunting"),
                finding("feeding_difficulty", "Feeding below half of usual intake"),
            ]
        });
        &FIELDS
    }

    fn evaluate(&self, input: &ClinicalInput) -> Result<Evaluation, InvalidInput> {
        let age_months = input.number("age_months")?;
        let spo2 = input.number_opt("spo2")?;
        let rr = input.number_opt("respiratory_rate")?;
        let apnea = input.flag("apnea")?;
        let grunting = input.flag("grunting")?;
        let feeding = input.flag("feeding_difficulty")?;

        let severity = if apnea || grunting || spo2.is_some_and(|s| s < 90.0) {
            Severity::Severe
        } else if feeding || spo2.is_some_and(|s| s <= 92.0) || rr.is_some_and(|r| r > 60.0) {
            Severity::Moderate
        } else {
            Severity::Mild
        };

        let mut result = Evaluation::for_protocol(self.id());
        let label = match severity {
            Severity::Severe => "Severe bronchiolitis",
            Severity::Moderate => "Moderate bronchiolitis",
            _ => "Mild bronchiolitis",
        };
        result.classify(label, severity);

        result.recommend("Nasal suction before feeds and on arrival");
        match severity {
            Severity::Severe => {
                result.recommend("Oxygen to keep saturation >= 90-92%");
                result.recommend("Nasogastric or IV hydration; admit");
                result.recommend("Consider high-flow nasal cannula if work of breathing persists");
            }
            Severity::Moderate => {
                result.recommend("Observe feeding in the unit; supplement by nasogastric route if needed");
                result.recommend("Admit if saturation or intake do not improve");
            }
            _ => {
                result.recommend("Home care with small frequent feeds");
                result.recommend("Return if breathing effort increases or feeding falls below half");
            }
        }

        result.observe("Bronchodilators, corticosteroids, and antibiotics are not indicated");
        if age_months < 3.0 {
            result.observe("Age under 3 months: higher risk of apnea, lower admission threshold");
        }

        Ok(result)
    }
}
