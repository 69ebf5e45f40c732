use pediq_core::error::InvalidInput;
use pediq_core::input::ClinicalInput;
use pediq_core::models::dose::{Route, Unit};
use pediq_core::models::evaluation::Evaluation;
use pediq_core::models::severity::Severity;

use crate::rules::DoseRule;
use crate::schema::{finding, weight_kg, FieldSpec};
use crate::Protocol;

/// Cardiopulmonary arrest drug and energy doses. The rhythm decides the
/// branch: defibrillation and amiodarone only apply to shockable rhythms.
pub struct CardiacArrest;

const EPINEPHRINE_IV: DoseRule = DoseRule {
    label: "Epinephrine (0.1 mg/mL)",
    per_kg: 0.01,
    min: None,
    max: Some(1.0),
    decimals: 2,
    unit: Unit::Mg,
    route: Some(Route::Intravenous),
};

const EPINEPHRINE_VOLUME: DoseRule = DoseRule {
    label: "Epinephrine volume (0.1 mg/mL)",
    per_kg: 0.1,
    min: None,
    max: Some(10.0),
    decimals: 1,
    unit: Unit::Ml,
    route: Some(Route::Intravenous),
};

const FIRST_SHOCK: DoseRule = DoseRule {
    label: "First shock",
    per_kg: 2.0,
    min: None,
    max: Some(200.0),
    decimals: 0,
    unit: Unit::Joules,
    route: None,
};

const SUBSEQUENT_SHOCKS: DoseRule = DoseRule {
    label: "Subsequent shocks",
    per_kg: 4.0,
    min: None,
    max: Some(200.0),
    decimals: 0,
    unit: Unit::Joules,
    route: None,
};

const AMIODARONE: DoseRule = DoseRule {
    label: "Amiodarone",
    per_kg: 5.0,
    min: None,
    max: Some(300.0),
    decimals: 0,
    unit: Unit::Mg,
    route: Some(Route::Intravenous),
};

impl Protocol for CardiacArrest {
    fn id(&self) -> &str {
        "cardiac_arrest"
    }

    fn name(&self) -> &str {
        "Cardiopulmonary Arrest"
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: std::sync::LazyLock<Vec<FieldSpec>> = std::sync::LazyLock::new(|| {
            vec![
                weight_kg(),
                finding("shockable_rhythm", "Shockable rhythm (VF or pulseless VT)"),
            ]
        });
        &FIELDS
    }

    fn evaluate(&self, input: &ClinicalInput) -> Result<Evaluation, InvalidInput> {
        let weight = input.weight_kg()?;
        let shockable = input.flag("shockable_rhythm")?;

        let mut result = Evaluation::for_protocol(self.id());
        let label = if shockable {
            "Shockable rhythm"
        } else {
            "Non-shockable rhythm"
        };
        result.classify(label, Severity::Critical);

        result.recommend("Compressions 100-120/min, depth one third of the chest");
        result.recommend("Rhythm check every 2 min; minimize interruptions");

        if shockable {
            result.dose_line(FIRST_SHOCK.apply(weight));
            result.dose_line(SUBSEQUENT_SHOCKS.apply(weight));
        }

        result.dose_line(
            EPINEPHRINE_IV.apply_noting(weight, "every 3-5 min"),
        );
        result.dose_line(EPINEPHRINE_VOLUME.apply_noting(weight, "same dose expressed as volume"));

        if shockable {
            result.dose_line(AMIODARONE.apply_noting(weight, "after the third shock"));
        }

        result.recommend("Search reversible causes: hypoxia, hypovolemia, H+, hypo/hyperkalemia, hypothermia, tension pneumothorax, tamponade, toxins, thrombosis");
        result.observe("Intraosseous access is equivalent to IV for every drug");
        Ok(result)
    }
}
