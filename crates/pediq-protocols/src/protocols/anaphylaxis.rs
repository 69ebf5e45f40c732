use pediq_core::error::InvalidInput;
use pediq_core::input::ClinicalInput;
use pediq_core::models::dose::{Dose, Route, Unit};
use pediq_core::models::evaluation::Evaluation;
use pediq_core::models::severity::Severity;

use crate::rules::DoseRule;
use crate::schema::{finding, weight_kg, FieldSpec};
use crate::Protocol;

/// Anaphylaxis: epinephrine-first management. IM epinephrine for every
/// case; shock adds volume expansion and a continuous infusion.
pub struct Anaphylaxis;

const EPINEPHRINE_IM: DoseRule = DoseRule {
    label: "Epinephrine (1 mg/mL)",
    per_kg: 0.01,
    min: None,
    max: Some(0.5),
    decimals: 2,
    unit: Unit::Mg,
    route: Some(Route::Intramuscular),
};

const SALINE_BOLUS: DoseRule = DoseRule {
    label: "0.9% saline bolus",
    per_kg: 20.0,
    min: None,
    max: None,
    decimals: 0,
    unit: Unit::Ml,
    route: Some(Route::Intravenous),
};

const DIPHENHYDRAMINE: DoseRule = DoseRule {
    label: "Diphenhydramine",
    per_kg: 1.0,
    min: None,
    max: Some(50.0),
    decimals: 0,
    unit: Unit::Mg,
    route: Some(Route::Intravenous),
};

const PREDNISOLONE: DoseRule = DoseRule {
    label: "Prednisolone",
    per_kg: 1.0,
    min: None,
    max: Some(40.0),
    decimals: 0,
    unit: Unit::Mg,
    route: Some(Route::Oral),
};

const SALBUTAMOL_NEB: DoseRule = DoseRule {
    label: "Salbutamol",
    per_kg: 0.15,
    min: Some(2.5),
    max: Some(5.0),
    decimals: 1,
    unit: Unit::Mg,
    route: Some(Route::Nebulized),
};

impl Protocol for Anaphylaxis {
    fn id(&self) -> &str {
        "anaphylaxis"
    }

    fn name(&self) -> &str {
        "Anaphylaxis"
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: std::sync::LazyLock<Vec<FieldSpec>> = std::sync::LazyLock::new(|| {
            vec![
                weight_kg(),
                finding("hypotension", "Hypotension or poor perfusion"),
                finding("wheeze", "Wheeze or bronchospasm"),
            ]
        });
        &FIELDS
    }

    fn evaluate(&self, input: &ClinicalInput) -> Result<Evaluation, InvalidInput> {
        let weight = input.weight_kg()?;
        let hypotension = input.flag("hypotension")?;
        let wheeze = input.flag("wheeze")?;

        let mut result = Evaluation::for_protocol(self.id());
        if hypotension {
            result.classify("Anaphylaxis with shock", Severity::Critical);
        } else {
            result.classify("Anaphylaxis", Severity::Severe);
        }

        result.dose_line(
            EPINEPHRINE_IM.apply_noting(weight, "anterolateral thigh, repeat every 5-15 min"),
        );

        if hypotension {
            result.dose_line(SALINE_BOLUS.apply_noting(weight, "repeat as needed"));
            result.dose_line(
                Dose::new("Epinephrine infusion", 0.1, Unit::McgPerKgPerMin)
                    .via(Route::Intravenous)
                    .noting("if refractory to IM doses, titrate to response"),
            );
        }

        result.dose_line(DIPHENHYDRAMINE.apply(weight));
        result.dose_line(PREDNISOLONE.apply(weight));
        if wheeze {
            result.dose_line(SALBUTAMOL_NEB.apply(weight));
        }

        result.recommend("Place supine with legs elevated; avoid sudden standing");
        result.recommend("High-flow oxygen and continuous monitoring");
        if hypotension {
            result.recommend("Admit to intensive care for at least 24 h");
        } else {
            result.recommend("Observe for at least 4 h (biphasic reaction)");
            result.recommend("Discharge with epinephrine auto-injector and allergy referral");
        }

        result.observe("Antihistamines and corticosteroids never substitute for epinephrine");
        Ok(result)
    }
}
