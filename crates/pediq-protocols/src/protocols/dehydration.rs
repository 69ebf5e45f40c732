use pediq_core::error::InvalidInput;
use pediq_core::input::ClinicalInput;
use pediq_core::models::dose::{Dose, Route, Unit};
use pediq_core::models::evaluation::Evaluation;
use pediq_core::models::severity::Severity;

use crate::rules::{maintenance_ml_per_day, round_to, Band, DoseRule, ThresholdTable};
use crate::schema::{finding, weight_kg, FieldSpec};
use crate::Protocol;

/// Dehydration graded by a count of clinical signs, with the fluid plan
/// derived from the tier: deficit 50/100/150 mL/kg plus Holliday-Segar
/// maintenance.
pub struct Dehydration;

const SIGNS: &[(&str, &str)] = &[
    ("lethargy", "Lethargy or irritability"),
    ("sunken_eyes", "Sunken eyes"),
    ("dry_mucosa", "Dry mucous membranes"),
    ("reduced_turgor", "Reduced skin turgor"),
    ("absent_tears", "Absent tears"),
    ("slow_capillary_refill", "Capillary refill >= 3 s"),
    ("oliguria", "Oliguria"),
];

const SEVERITY_BANDS: ThresholdTable<Severity> = ThresholdTable::new(&[
    Band { lower: 0.0, value: Severity::Mild },
    Band { lower: 3.0, value: Severity::Moderate },
    Band { lower: 6.0, value: Severity::Severe },
]);

/// Estimated deficit in mL per kg, by tier.
const DEFICIT_ML_PER_KG: [(Severity, f64); 3] = [
    (Severity::Mild, 50.0),
    (Severity::Moderate, 100.0),
    (Severity::Severe, 150.0),
];

const RINGER_BOLUS: DoseRule = DoseRule {
    label: "Ringer lactate bolus",
    per_kg: 20.0,
    min: None,
    max: None,
    decimals: 0,
    unit: Unit::Ml,
    route: Some(Route::Intravenous),
};

impl Protocol for Dehydration {
    fn id(&self) -> &str {
        "dehydration"
    }

    fn name(&self) -> &str {
        "Dehydration"
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: std::sync::LazyLock<Vec<FieldSpec>> = std::sync::LazyLock::new(|| {
            let mut fields = vec![weight_kg()];
            for (id, label) in SIGNS {
                fields.push(finding(id, label));
            }
            fields
        });
        &FIELDS
    }

    fn evaluate(&self, input: &ClinicalInput) -> Result<Evaluation, InvalidInput> {
        let weight = input.weight_kg()?;

        let mut signs = 0usize;
        for (id, _) in SIGNS {
            if input.flag(id)? {
                signs += 1;
            }
        }

        let severity = *SEVERITY_BANDS.classify(signs as f64);
        let deficit_per_kg = DEFICIT_ML_PER_KG
            .iter()
            .find(|(tier, _)| *tier == severity)
            .map(|(_, ml)| *ml)
            .unwrap_or(50.0);

        let deficit = round_to(deficit_per_kg * weight, 0);
        let maintenance = round_to(maintenance_ml_per_day(weight), 0);

        let mut result = Evaluation::for_protocol(self.id());
        result.score = Some(signs as f64);
        let label = match severity {
            Severity::Severe => "Severe dehydration",
            Severity::Moderate => "Moderate dehydration",
            _ => "Mild dehydration",
        };
        result.classify(label, severity);

        if severity == Severity::Severe {
            result.dose_line(
                RINGER_BOLUS.apply_noting(weight, "rapid, repeat up to 3x until perfusion recovers"),
            );
        }

        let deficit_dose = Dose::new("Estimated deficit", deficit, Unit::Ml);
        match severity {
            Severity::Severe => {
                result.dose_line(deficit_dose.via(Route::Intravenous).noting("after boluses"));
            }
            Severity::Moderate => {
                result.dose_line(
                    deficit_dose.via(Route::Oral).noting("ORS under observation, reassess hourly"),
                );
            }
            _ => {
                result.dose_line(
                    deficit_dose.via(Route::Oral).noting("ORS over 4 h, small frequent volumes"),
                );
            }
        }
        result.dose_line(Dose::new("Maintenance (Holliday-Segar)", maintenance, Unit::MlPerDay));

        result.recommend("Replace ongoing losses in addition to deficit and maintenance");
        result.recommend("Keep feeding; do not fast the child");
        match severity {
            Severity::Severe => result.recommend("Admit; reassess perfusion after each bolus"),
            Severity::Moderate => result.recommend("Observe until tolerating oral intake"),
            _ => result.recommend("Home plan with return instructions"),
        }

        result.observe(format!("Clinical signs present: {signs}/7"));
        if severity != Severity::Severe {
            result.observe("Move up one tier if vomiting prevents oral rehydration");
        }

        Ok(result)
    }
}
