use pediq_core::error::InvalidInput;
use pediq_core::input::ClinicalInput;
use pediq_core::models::dose::{Dose, Route, Unit};
use pediq_core::models::evaluation::Evaluation;
use pediq_core::models::severity::Severity;

use crate::rules::DoseRule;
use crate::schema::{finding, required_number, weight_kg, FieldSpec};
use crate::Protocol;

/// Streptococcal pharyngitis probability by a modified Centor count:
/// four clinical findings plus one point under age 15.
pub struct Pharyngitis;

const AMOXICILLIN: DoseRule = DoseRule {
    label: "Amoxicillin",
    per_kg: 50.0,
    min: None,
    max: Some(1000.0),
    decimals: 0,
    unit: Unit::Mg,
    route: Some(Route::Oral),
};

/// Benzathine penicillin is dosed by a single weight cutoff, not per kg.
const PENICILLIN_CUTOFF_KG: f64 = 27.0;

impl Protocol for Pharyngitis {
    fn id(&self) -> &str {
        "pharyngitis"
    }

    fn name(&self) -> &str {
        "Streptococcal Pharyngitis (Centor)"
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: std::sync::LazyLock<Vec<FieldSpec>> = std::sync::LazyLock::new(|| {
            vec![
                weight_kg(),
                required_number("age_years", "Age").with_unit("years").range(0.0, 21.0),
                finding("fever_history", "Fever in the last 24 h"),
                finding("no_cough", "Absence of cough"),
                finding("tender_nodes", "Tender anterior cervical nodes"),
                finding("tonsillar_exudate", "Tonsillar swelling or exudate"),
            ]
        });
        &FIELDS
    }

    fn evaluate(&self, input: &ClinicalInput) -> Result<Evaluation, InvalidInput> {
        let weight = input.weight_kg()?;
        let age_years = input.number("age_years")?;

        let mut points = 0.0;
        for id in ["fever_history", "no_cough", "tender_nodes", "tonsillar_exudate"] {
            if input.flag(id)? {
                points += 1.0;
            }
        }
        if age_years < 15.0 {
            points += 1.0;
        }

        let mut result = Evaluation::for_protocol(self.id());
        result.score = Some(points);

        if points >= 4.0 {
            result.classify("High probability of streptococcal pharyngitis", Severity::Moderate);
            result.dose_line(AMOXICILLIN.apply_noting(weight, "once daily for 10 days"));
            let penicillin = if weight < PENICILLIN_CUTOFF_KG { 600_000.0 } else { 1_200_000.0 };
            result.dose_line(
                Dose::new("Benzathine penicillin (alternative)", penicillin, Unit::Units)
                    .via(Route::Intramuscular)
                    .noting("single dose"),
            );
            result.recommend("Treat empirically or confirm with rapid antigen test");
        } else if points >= 2.0 {
            result.classify("Intermediate probability", Severity::Mild);
            result.recommend("Rapid antigen test or throat culture before antibiotics");
            result.recommend("Symptomatic treatment while awaiting result");
        } else {
            result.classify("Low probability", Severity::Mild);
            result.recommend("No testing, no antibiotics; symptomatic treatment");
        }

        result.recommend("Analgesia and hydration regardless of etiology");
        result.observe(format!("Centor points: {points:.0}/5"));
        result.observe("Scarlatiniform rash or palatal petechiae raise the probability independently");
        Ok(result)
    }
}
