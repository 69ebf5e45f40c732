use pediq_core::error::InvalidInput;
use pediq_core::input::ClinicalInput;
use pediq_core::models::dose::{Dose, Route, Unit};
use pediq_core::models::evaluation::Evaluation;
use pediq_core::models::severity::Severity;

use crate::rules::{round_to, DoseRule};
use crate::schema::{finding, weight_kg, FieldSpec};
use crate::Protocol;

/// Dengue staged into the Brazilian Ministry of Health groups A-D.
/// Cascade order matters: shock first, then warning signs, then bleeding
/// or risk conditions.
pub struct Dengue;

const ORAL_HYDRATION_ML_PER_KG_DAY: f64 = 60.0;

const GROUP_C_INFUSION: DoseRule = DoseRule {
    label: "Ringer lactate",
    per_kg: 10.0,
    min: None,
    max: None,
    decimals: 0,
    unit: Unit::Ml,
    route: Some(Route::Intravenous),
};

const GROUP_D_BOLUS: DoseRule = DoseRule {
    label: "Ringer lactate",
    per_kg: 20.0,
    min: None,
    max: None,
    decimals: 0,
    unit: Unit::Ml,
    route: Some(Route::Intravenous),
};

impl Protocol for Dengue {
    fn id(&self) -> &str {
        "dengue"
    }

    fn name(&self) -> &str {
        "Dengue (Groups A-D)"
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: std::sync::LazyLock<Vec<FieldSpec>> = std::sync::LazyLock::new(|| {
            vec![
                weight_kg(),
                finding("shock", "Shock: hypotension, narrow pulse pressure, cold extremities"),
                finding("abdominal_pain", "Persistent abdominal pain"),
                finding("persistent_vomiting", "Persistent vomiting"),
                finding("lethargy", "Lethargy or irritability"),
                finding("hepatomegaly", "Painful hepatomegaly"),
                finding("mucosal_bleeding", "Spontaneous mucosal bleeding"),
                finding("risk_condition", "Risk condition (infant, chronic disease)"),
            ]
        });
        &FIELDS
    }

    fn evaluate(&self, input: &ClinicalInput) -> Result<Evaluation, InvalidInput> {
        let weight = input.weight_kg()?;
        let shock = input.flag("shock")?;
        let warning_sign = input.flag("abdominal_pain")?
            || input.flag("persistent_vomiting")?
            || input.flag("lethargy")?
            || input.flag("hepatomegaly")?;
        let bleeding = input.flag("mucosal_bleeding")?;
        let risk = input.flag("risk_condition")?;

        let mut result = Evaluation::for_protocol(self.id());

        if shock {
            result.classify("Group D \u{2014} shock", Severity::Critical);
            result.dose_line(GROUP_D_BOLUS.apply_noting(weight, "in 20 min, repeat as needed"));
            result.recommend("Intensive care; reassess perfusion after each bolus");
            result.recommend("Hematocrit before and after each expansion");
        } else if warning_sign {
            result.classify("Group C \u{2014} warning signs", Severity::Severe);
            result.dose_line(GROUP_C_INFUSION.apply_noting(weight, "in 1 h, repeat up to 3x"));
            result.recommend("Admit; reassess after each infusion stage");
            result.recommend("Hematocrit after each stage guides de-escalation");
        } else if bleeding || risk {
            result.classify("Group B \u{2014} bleeding or risk condition", Severity::Moderate);
            let oral = round_to(ORAL_HYDRATION_ML_PER_KG_DAY * weight, 0);
            result.dose_line(
                Dose::new("Oral hydration", oral, Unit::MlPerDay)
                    .noting("one third as oral rehydration salts"),
            );
            result.recommend("CBC before disposition; stay in the unit until result");
        } else {
            result.classify("Group A \u{2014} uncomplicated", Severity::Mild);
            let oral = round_to(ORAL_HYDRATION_ML_PER_KG_DAY * weight, 0);
            result.dose_line(
                Dose::new("Oral hydration", oral, Unit::MlPerDay)
                    .noting("one third as oral rehydration salts"),
            );
            result.recommend("Outpatient care with daily reassessment until 48 h afebrile");
        }

        result.recommend("Antipyresis with paracetamol or dipyrone only");
        result.observe("NSAIDs and salicylates are contraindicated");
        result.observe("Plasma leakage risk peaks at defervescence (days 3-6)");
        Ok(result)
    }
}
