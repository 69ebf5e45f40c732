use pediq_core::error::InvalidInput;
use pediq_core::input::ClinicalInput;
use pediq_core::models::dose::{Dose, Route, Unit};
use pediq_core::models::evaluation::Evaluation;
use pediq_core::models::severity::Severity;

use crate::rules::{maintenance_ml_per_day, DoseRule};
use crate::schema::{finding, weight_kg, FieldSpec};
use crate::Protocol;

/// Pediatric Appendicitis Score: eight weighted findings, 10 points total.
/// >= 6 high probability, 4-5 equivocal, <= 3 low probability.
pub struct Appendicitis;

/// Finding id and its point weight.
const ITEMS: &[(&str, f64)] = &[
    ("pain_migration", 1.0),
    ("anorexia", 1.0),
    ("nausea_vomiting", 1.0),
    ("rlq_tenderness", 2.0),
    ("cough_hop_tenderness", 2.0),
    ("fever", 1.0),
    ("leukocytosis", 1.0),
    ("neutrophilia", 1.0),
];

const CEFOXITIN: DoseRule = DoseRule {
    label: "Cefoxitin (pre-operative)",
    per_kg: 40.0,
    min: None,
    max: Some(2000.0),
    decimals: 0,
    unit: Unit::Mg,
    route: Some(Route::Intravenous),
};

impl Protocol for Appendicitis {
    fn id(&self) -> &str {
        "appendicitis"
    }

    fn name(&self) -> &str {
        "Appendicitis (Pediatric Appendicitis Score)"
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: std::sync::LazyLock<Vec<FieldSpec>> = std::sync::LazyLock::new(|| {
            let mut fields = vec![weight_kg()];
            let labels = [
                "Migration of pain to the right lower quadrant",
                "Anorexia",
                "Nausea or vomiting",
                "Right lower quadrant tenderness",
                "Pain with cough, percussion, or hopping",
                "Fever >= 38 \u{b0}C",
                "Leukocytosis > 10,000/mm\u{b3}",
                "Neutrophilia",
            ];
            for ((id, _), label) in ITEMS.iter().zip(labels) {
                fields.push(finding(id, label));
            }
            fields
        });
        &FIELDS
    }

    fn evaluate(&self, input: &ClinicalInput) -> Result<Evaluation, InvalidInput> {
        let weight = input.weight_kg()?;

        let mut points = 0.0;
        for (id, weight_points) in ITEMS {
            if input.flag(id)? {
                points += weight_points;
            }
        }

        let mut result = Evaluation::for_protocol(self.id());
        result.score = Some(points);

        if points >= 6.0 {
            result.classify("High probability of appendicitis", Severity::Severe);
            result.recommend("Surgical consultation now");
            result.recommend("Nothing by mouth");
            result.dose_line(
                Dose::new(
                    "Maintenance fluids",
                    maintenance_ml_per_day(weight),
                    Unit::MlPerDay,
                )
                .via(Route::Intravenous),
            );
            result.dose_line(CEFOXITIN.apply(weight));
        } else if points >= 4.0 {
            result.classify("Equivocal", Severity::Moderate);
            result.recommend("Abdominal ultrasound");
            result.recommend("Serial abdominal examinations; keep nothing by mouth");
            result.recommend("Reassess score in 4-6 h");
        } else {
            result.classify("Low probability of appendicitis", Severity::Mild);
            result.recommend("Discharge with analgesia if examination is reassuring");
            result.recommend("Return immediately if pain localizes, worsens, or fever develops");
        }

        result.observe(format!("Pediatric Appendicitis Score: {points:.0}/10"));
        Ok(result)
    }
}
