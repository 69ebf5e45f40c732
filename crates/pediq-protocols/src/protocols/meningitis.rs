use pediq_core::error::InvalidInput;
use pediq_core::input::ClinicalInput;
use pediq_core::models::dose::{Route, Unit};
use pediq_core::models::evaluation::Evaluation;
use pediq_core::models::severity::Severity;

use crate::rules::DoseRule;
use crate::schema::{finding, required_number, weight_kg, FieldSpec};
use crate::Protocol;

/// Suspected bacterial meningitis. Antibiotics are chosen by age band;
/// purpura or shock escalates the whole plan.
pub struct Meningitis;

const CEFTRIAXONE: DoseRule = DoseRule {
    label: "Ceftriaxone",
    per_kg: 50.0,
    min: None,
    max: Some(2000.0),
    decimals: 0,
    unit: Unit::Mg,
    route: Some(Route::Intravenous),
};

const AMPICILLIN: DoseRule = DoseRule {
    label: "Ampicillin",
    per_kg: 100.0,
    min: None,
    max: None,
    decimals: 0,
    unit: Unit::Mg,
    route: Some(Route::Intravenous),
};

const CEFOTAXIME: DoseRule = DoseRule {
    label: "Cefotaxime",
    per_kg: 50.0,
    min: None,
    max: None,
    decimals: 0,
    unit: Unit::Mg,
    route: Some(Route::Intravenous),
};

const DEXAMETHASONE: DoseRule = DoseRule {
    label: "Dexamethasone",
    per_kg: 0.15,
    min: None,
    max: Some(10.0),
    decimals: 2,
    unit: Unit::Mg,
    route: Some(Route::Intravenous),
};

const RINGER_BOLUS: DoseRule = DoseRule {
    label: "Ringer lactate bolus",
    per_kg: 20.0,
    min: None,
    max: None,
    decimals: 0,
    unit: Unit::Ml,
    route: Some(Route::Intravenous),
};

impl Protocol for Meningitis {
    fn id(&self) -> &str {
        "meningitis"
    }

    fn name(&self) -> &str {
        "Bacterial Meningitis"
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: std::sync::LazyLock<Vec<FieldSpec>> = std::sync::LazyLock::new(|| {
            vec![
                weight_kg(),
                required_number("age_months", "Age").with_unit("months").range(0.0, 240.0),
                finding("purpura", "Petechiae or purpura"),
                finding("shock", "Shock signs"),
                finding("raised_icp", "Signs of raised intracranial pressure"),
            ]
        });
        &FIELDS
    }

    fn evaluate(&self, input: &ClinicalInput) -> Result<Evaluation, InvalidInput> {
        let weight = input.weight_kg()?;
        let age_months = input.number("age_months")?;
        let purpura = input.flag("purpura")?;
        let shock = input.flag("shock")?;
        let raised_icp = input.flag("raised_icp")?;

        let mut result = Evaluation::for_protocol(self.id());
        if purpura || shock {
            result.classify("Meningococcemia pattern", Severity::Critical);
        } else {
            result.classify("Suspected bacterial meningitis", Severity::Severe);
        }

        if shock {
            result.dose_line(RINGER_BOLUS.apply_noting(weight, "repeat until perfusion recovers"));
        }

        if age_months < 1.0 {
            result.dose_line(AMPICILLIN.apply_noting(weight, "every 6 h"));
            result.dose_line(CEFOTAXIME.apply_noting(weight, "every 6 h"));
        } else {
            result.dose_line(CEFTRIAXONE.apply_noting(weight, "every 12 h"));
            result.dose_line(
                DEXAMETHASONE.apply_noting(weight, "every 6 h for 2 days, with or before the first antibiotic dose"),
            );
        }

        result.recommend("Blood cultures before antibiotics; never delay antibiotics for the lumbar puncture");
        if raised_icp {
            result.recommend("Defer lumbar puncture: raised intracranial pressure signs present");
        } else {
            result.recommend("Lumbar puncture once stable");
        }
        result.recommend("Droplet isolation for the first 24 h of therapy");
        result.recommend("Admit; neurological checks every 2 h in the first day");

        result.observe("Chemoprophylaxis for household contacts if meningococcus is confirmed");
        Ok(result)
    }
}
