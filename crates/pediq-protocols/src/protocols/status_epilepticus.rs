use pediq_core::error::InvalidInput;
use pediq_core::input::ClinicalInput;
use pediq_core::models::dose::{Route, Unit};
use pediq_core::models::evaluation::Evaluation;
use pediq_core::models::severity::Severity;

use crate::rules::DoseRule;
use crate::schema::{finding, optional_number, weight_kg, FieldSpec};
use crate::Protocol;

/// Status epilepticus. The timeline is the protocol: benzodiazepine at
/// 5 minutes, a second at 10, phenytoin at 15, intensive care at 25.
pub struct StatusEpilepticus;

const DIAZEPAM_IV: DoseRule = DoseRule {
    label: "Diazepam",
    per_kg: 0.3,
    min: None,
    max: Some(10.0),
    decimals: 1,
    unit: Unit::Mg,
    route: Some(Route::Intravenous),
};

const MIDAZOLAM_IM: DoseRule = DoseRule {
    label: "Midazolam",
    per_kg: 0.2,
    min: None,
    max: Some(10.0),
    decimals: 1,
    unit: Unit::Mg,
    route: Some(Route::Intramuscular),
};

const PHENYTOIN: DoseRule = DoseRule {
    label: "Phenytoin",
    per_kg: 20.0,
    min: None,
    max: Some(1000.0),
    decimals: 0,
    unit: Unit::Mg,
    route: Some(Route::Intravenous),
};

impl Protocol for StatusEpilepticus {
    fn id(&self) -> &str {
        "status_epilepticus"
    }

    fn name(&self) -> &str {
        "Status Epilepticus"
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: std::sync::LazyLock<Vec<FieldSpec>> = std::sync::LazyLock::new(|| {
            vec![
                weight_kg(),
                optional_number("benzodiazepine_doses_given", "Benzodiazepine doses already given")
                    .range(0.0, 5.0),
                finding("iv_access", "IV access available"),
            ]
        });
        &FIELDS
    }

    fn evaluate(&self, input: &ClinicalInput) -> Result<Evaluation, InvalidInput> {
        let weight = input.weight_kg()?;
        let prior_doses = input.number_opt("benzodiazepine_doses_given")?.unwrap_or(0.0);
        let iv_access = input.flag("iv_access")?;

        let refractory = prior_doses >= 2.0;

        let mut result = Evaluation::for_protocol(self.id());
        if refractory {
            result.classify("Refractory status epilepticus", Severity::Critical);
        } else {
            result.classify("Status epilepticus", Severity::Severe);
        }

        if refractory {
            result.dose_line(PHENYTOIN.apply_noting(weight, "over 20 min, max 1 mg/kg/min, on a monitor"));
            result.recommend("Intensive care now; prepare midazolam infusion if seizures persist");
        } else if iv_access {
            result.dose_line(DIAZEPAM_IV.apply_noting(weight, "slow push; repeat once after 5 min"));
        } else {
            result.dose_line(MIDAZOLAM_IM.apply_noting(weight, "IM or buccal; repeat once after 5 min"));
            result.recommend("Obtain IV access during the first benzodiazepine dose");
        }

        result.recommend("Airway, oxygen, lateral position; check glucose immediately");
        if !refractory {
            result.recommend("After the second benzodiazepine dose, move to phenytoin without waiting");
        }
        result.recommend("Treat hypoglycemia and fever in parallel");

        result.observe("Timeline: 0-5 min ABC and glucose, 5 min benzodiazepine, 10 min second dose, 15 min phenytoin, 25 min intensive care");
        Ok(result)
    }
}
