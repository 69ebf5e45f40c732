use pediq_core::error::InvalidInput;
use pediq_core::input::ClinicalInput;
use pediq_core::models::dose::{Dose, Route, Unit};
use pediq_core::models::evaluation::Evaluation;

use crate::rules::{round_to, Band, DoseRule, ThresholdTable};
use crate::schema::{finding, required_number, weight_kg, FieldSpec};
use crate::Protocol;

/// Rapid sequence intubation: tube sizing plus the standard drug sequence.
/// Above age 1 the size is formula-based; below it comes from a fixed
/// table.
pub struct RapidSequenceIntubation;

/// (cuffed, uncuffed) internal diameter in mm for infants under 1 year.
const INFANT_TUBE: ThresholdTable<(f64, f64)> = ThresholdTable::new(&[
    Band { lower: 0.0, value: (3.0, 3.5) },
    Band { lower: 0.5, value: (3.5, 4.0) },
]);

const ATROPINE: DoseRule = DoseRule {
    label: "Atropine",
    per_kg: 0.02,
    min: None,
    max: Some(0.5),
    decimals: 2,
    unit: Unit::Mg,
    route: Some(Route::Intravenous),
};

const FENTANYL: DoseRule = DoseRule {
    label: "Fentanyl",
    per_kg: 1.0,
    min: None,
    max: Some(100.0),
    decimals: 0,
    unit: Unit::Mcg,
    route: Some(Route::Intravenous),
};

const KETAMINE: DoseRule = DoseRule {
    label: "Ketamine",
    per_kg: 2.0,
    min: None,
    max: Some(150.0),
    decimals: 0,
    unit: Unit::Mg,
    route: Some(Route::Intravenous),
};

const ROCURONIUM: DoseRule = DoseRule {
    label: "Rocuronium",
    per_kg: 1.2,
    min: None,
    max: Some(100.0),
    decimals: 1,
    unit: Unit::Mg,
    route: Some(Route::Intravenous),
};

impl Protocol for RapidSequenceIntubation {
    fn id(&self) -> &str {
        "rsi"
    }

    fn name(&self) -> &str {
        "Rapid Sequence Intubation"
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: std::sync::LazyLock<Vec<FieldSpec>> = std::sync::LazyLock::new(|| {
            vec![
                weight_kg(),
                required_number("age_years", "Age").with_unit("years").range(0.0, 21.0),
                finding("cuffed_tube", "Cuffed tube selected"),
            ]
        });
        &FIELDS
    }

    fn evaluate(&self, input: &ClinicalInput) -> Result<Evaluation, InvalidInput> {
        let weight = input.weight_kg()?;
        let age_years = input.number("age_years")?;
        let cuffed = input.flag("cuffed_tube")?;

        let size = if age_years >= 1.0 {
            let raw = if cuffed { age_years / 4.0 + 3.5 } else { age_years / 4.0 + 4.0 };
            // Half-millimeter tube increments.
            (raw.clamp(3.0, 8.0) * 2.0).round() / 2.0
        } else {
            let (cuffed_size, uncuffed_size) = *INFANT_TUBE.classify(age_years);
            if cuffed { cuffed_size } else { uncuffed_size }
        };
        let depth = round_to(size * 3.0, 1);

        let mut result = Evaluation::for_protocol(self.id());
        result.classification = Some(if cuffed {
            "Cuffed tube plan".to_string()
        } else {
            "Uncuffed tube plan".to_string()
        });

        result.dose_line(Dose::new("Tracheal tube internal diameter", size, Unit::Mm));
        result.dose_line(
            Dose::new("Insertion depth at the lip", depth, Unit::Cm).noting("3x internal diameter"),
        );

        if age_years < 1.0 {
            result.dose_line(ATROPINE.apply_noting(weight, "premedication under 1 year"));
        }
        result.dose_line(FENTANYL.apply_noting(weight, "slow push, 2-3 min before induction"));
        result.dose_line(KETAMINE.apply(weight));
        result.dose_line(ROCURONIUM.apply(weight));

        result.recommend("Preoxygenate 3 min; prepare suction and one-size-smaller tube");
        result.recommend("Confirm placement with capnography and bilateral auscultation");
        result.observe("Ketamine is the induction default; adjust for hemodynamics or status epilepticus");
        Ok(result)
    }
}
