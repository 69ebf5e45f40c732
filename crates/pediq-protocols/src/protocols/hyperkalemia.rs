use pediq_core::error::InvalidInput;
use pediq_core::input::ClinicalInput;
use pediq_core::models::dose::{Dose, Route, Unit};
use pediq_core::models::evaluation::Evaluation;
use pediq_core::models::severity::Severity;

use crate::rules::DoseRule;
use crate::schema::{finding, required_number, weight_kg, FieldSpec};
use crate::Protocol;

/// Hyperkalemia. Membrane stabilization comes first when the ECG is
/// involved; shift therapy follows; elimination is the slow lane.
pub struct Hyperkalemia;

const CALCIUM_GLUCONATE: DoseRule = DoseRule {
    label: "Calcium gluconate 10%",
    per_kg: 0.5,
    min: None,
    max: Some(20.0),
    decimals: 1,
    unit: Unit::Ml,
    route: Some(Route::Intravenous),
};

const INSULIN: DoseRule = DoseRule {
    label: "Regular insulin",
    per_kg: 0.1,
    min: None,
    max: Some(10.0),
    decimals: 1,
    unit: Unit::Units,
    route: Some(Route::Intravenous),
};

const DEXTROSE: DoseRule = DoseRule {
    label: "Dextrose",
    per_kg: 0.5,
    min: None,
    max: Some(25.0),
    decimals: 1,
    unit: Unit::G,
    route: Some(Route::Intravenous),
};

const RESIN: DoseRule = DoseRule {
    label: "Calcium polystyrene sulfonate",
    per_kg: 1.0,
    min: None,
    max: Some(30.0),
    decimals: 0,
    unit: Unit::G,
    route: Some(Route::Oral),
};

impl Protocol for Hyperkalemia {
    fn id(&self) -> &str {
        "hyperkalemia"
    }

    fn name(&self) -> &str {
        "Hyperkalemia"
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: std::sync::LazyLock<Vec<FieldSpec>> = std::sync::LazyLock::new(|| {
            vec![
                weight_kg(),
                required_number("potassium_meq_l", "Serum potassium")
                    .with_unit("mEq/L")
                    .range(1.0, 12.0),
                finding("ecg_changes", "ECG changes (peaked T, wide QRS, arrhythmia)"),
            ]
        });
        &FIELDS
    }

    fn evaluate(&self, input: &ClinicalInput) -> Result<Evaluation, InvalidInput> {
        let weight = input.weight_kg()?;
        let potassium = input.number("potassium_meq_l")?;
        let ecg = input.flag("ecg_changes")?;

        let mut result = Evaluation::for_protocol(self.id());

        if potassium < 5.5 {
            result.classification = Some("No hyperkalemia".to_string());
            result.observe("Potassium below 5.5 mEq/L; repeat if hemolysis is suspected");
            return Ok(result);
        }

        if potassium >= 7.0 || ecg {
            result.classify("Severe hyperkalemia", Severity::Severe);
            result.dose_line(CALCIUM_GLUCONATE.apply_noting(weight, "over 5 min, with ECG monitoring"));
            result.dose_line(INSULIN.apply_noting(weight, "with dextrose, over 30 min"));
            result.dose_line(DEXTROSE.apply(weight));
            let salbutamol = if weight < 25.0 { 2.5 } else { 5.0 };
            result.dose_line(
                Dose::new("Salbutamol", salbutamol, Unit::Mg).via(Route::Nebulized),
            );
            result.recommend("Continuous ECG monitoring; recheck potassium in 1 h");
            result.recommend("Dialysis if refractory or anuric");
        } else if potassium >= 6.0 {
            result.classify("Moderate hyperkalemia", Severity::Moderate);
            result.dose_line(INSULIN.apply_noting(weight, "with dextrose, over 30 min"));
            result.dose_line(DEXTROSE.apply(weight));
            result.dose_line(RESIN.apply(weight));
            result.recommend("12-lead ECG now; recheck potassium in 2 h");
        } else {
            result.classify("Mild hyperkalemia", Severity::Mild);
            result.dose_line(RESIN.apply(weight));
            result.recommend("Stop potassium intake and potassium-sparing drugs");
            result.recommend("Recheck potassium in 4-6 h");
        }

        result.observe("Calcium stabilizes the myocardium but does not lower potassium");
        Ok(result)
    }
}
