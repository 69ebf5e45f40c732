use pediq_core::error::InvalidInput;
use pediq_core::input::ClinicalInput;
use pediq_core::models::dose::{Dose, Route, Unit};
use pediq_core::models::evaluation::Evaluation;
use pediq_core::models::severity::Severity;

use crate::rules::DoseRule;
use crate::schema::{finding, optional_number, weight_kg, FieldSpec};
use crate::Protocol;

/// Acute asthma exacerbation. Cascading severity checks in fixed order:
/// failure signs, then hypoxemia/effort, then borderline saturation.
pub struct Asthma;

const SALBUTAMOL_NEB: DoseRule = DoseRule {
    label: "Salbutamol",
    per_kg: 0.15,
    min: Some(2.5),
    max: Some(5.0),
    decimals: 1,
    unit: Unit::Mg,
    route: Some(Route::Nebulized),
};

const PREDNISOLONE: DoseRule = DoseRule {
    label: "Prednisolone",
    per_kg: 2.0,
    min: None,
    max: Some(40.0),
    decimals: 0,
    unit: Unit::Mg,
    route: Some(Route::Oral),
};

const MAGNESIUM_SULFATE: DoseRule = DoseRule {
    label: "Magnesium sulfate",
    per_kg: 50.0,
    min: None,
    max: Some(2000.0),
    decimals: 0,
    unit: Unit::Mg,
    route: Some(Route::Intravenous),
};

impl Protocol for Asthma {
    fn id(&self) -> &str {
        "asthma"
    }

    fn name(&self) -> &str {
        "Acute Asthma Exacerbation"
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: std::sync::LazyLock<Vec<FieldSpec>> = std::sync::LazyLock::new(|| {
            vec![
                weight_kg(),
                optional_number("spo2", "Oxygen saturation in room air")
                    .with_unit("%")
                    .range(50.0, 100.0),
                finding("silent_chest", "Silent chest"),
                finding("cyanosis", "Cyanosis"),
                finding("drowsiness", "Drowsiness or confusion"),
                finding("accessory_muscle_use", "Accessory muscle use"),
                finding("single_word_speech", "Speaks in single words"),
            ]
        });
        &FIELDS
    }

    fn evaluate(&self, input: &ClinicalInput) -> Result<Evaluation, InvalidInput> {
        let weight = input.weight_kg()?;
        let spo2 = input.number_opt("spo2")?;
        let silent_chest = input.flag("silent_chest")?;
        let cyanosis = input.flag("cyanosis")?;
        let drowsiness = input.flag("drowsiness")?;
        let accessory = input.flag("accessory_muscle_use")?;
        let single_words = input.flag("single_word_speech")?;

        let severity = if silent_chest || cyanosis || drowsiness {
            Severity::Critical
        } else if spo2.is_some_and(|s| s < 90.0) || (accessory && single_words) {
            Severity::Severe
        } else if spo2.is_some_and(|s| s <= 94.0) || accessory {
            Severity::Moderate
        } else {
            Severity::Mild
        };

        let mut result = Evaluation::for_protocol(self.id());
        let label = match severity {
            Severity::Critical => "Imminent respiratory failure",
            Severity::Severe => "Severe exacerbation",
            Severity::Moderate => "Moderate exacerbation",
            _ => "Mild exacerbation",
        };
        result.classify(label, severity);

        result.dose_line(SALBUTAMOL_NEB.apply_noting(weight, "repeat every 20 min, 3 doses"));
        result.dose_line(PREDNISOLONE.apply(weight));

        if severity >= Severity::Severe {
            let ipratropium = if weight < 20.0 { 250.0 } else { 500.0 };
            result.dose_line(
                Dose::new("Ipratropium bromide", ipratropium, Unit::Mcg)
                    .via(Route::Nebulized)
                    .noting("with the first 3 salbutamol doses"),
            );
            result.dose_line(MAGNESIUM_SULFATE.apply_noting(weight, "infuse over 20 min"));
        }

        result.recommend("Titrate oxygen to saturation >= 94%");
        match severity {
            Severity::Critical => {
                result.recommend("Prepare for ventilatory support; intensive care admission");
            }
            Severity::Severe => result.recommend("Admit; reassess after the first hour"),
            Severity::Moderate => {
                result.recommend("Observe and reassess 1 h after the third salbutamol dose");
            }
            _ => result.recommend("Reassess after the first salbutamol cycle; likely ambulatory"),
        }

        result.observe("Agitation may indicate hypoxemia before desaturation appears");
        Ok(result)
    }
}
