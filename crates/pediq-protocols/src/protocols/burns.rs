use pediq_core::error::InvalidInput;
use pediq_core::input::ClinicalInput;
use pediq_core::models::dose::{Dose, Route, Unit};
use pediq_core::models::evaluation::Evaluation;
use pediq_core::models::severity::Severity;

use crate::rules::{maintenance_ml_per_day, round_to};
use crate::schema::{finding, required_number, weight_kg, FieldSpec};
use crate::Protocol;

/// Burns: Parkland fluid plan (pediatric coefficient 3 mL/kg/%TBSA) on top
/// of Holliday-Segar maintenance, for burns of 10% TBSA or more.
pub struct Burns;

const PARKLAND_ML_PER_KG_PER_TBSA: f64 = 3.0;

impl Protocol for Burns {
    fn id(&self) -> &str {
        "burns"
    }

    fn name(&self) -> &str {
        "Burns (Parkland)"
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: std::sync::LazyLock<Vec<FieldSpec>> = std::sync::LazyLock::new(|| {
            vec![
                weight_kg(),
                required_number("tbsa_percent", "Burned body surface area")
                    .with_unit("%")
                    .range(0.0, 100.0),
                finding("inhalation_injury", "Suspected inhalation injury"),
            ]
        });
        &FIELDS
    }

    fn evaluate(&self, input: &ClinicalInput) -> Result<Evaluation, InvalidInput> {
        let weight = input.weight_kg()?;
        let tbsa = input.number("tbsa_percent")?;
        let inhalation = input.flag("inhalation_injury")?;

        let mut result = Evaluation::for_protocol(self.id());
        let severity = if tbsa > 20.0 || inhalation {
            Severity::Critical
        } else if tbsa > 10.0 {
            Severity::Severe
        } else if tbsa >= 5.0 {
            Severity::Moderate
        } else {
            Severity::Mild
        };
        let label = match severity {
            Severity::Critical => "Major burn with critical features",
            Severity::Severe => "Major burn",
            Severity::Moderate => "Moderate burn",
            _ => "Minor burn",
        };
        result.classify(label, severity);

        if inhalation {
            result.recommend("Early airway assessment; low threshold for intubation");
        }

        if tbsa >= 10.0 {
            let parkland = round_to(PARKLAND_ML_PER_KG_PER_TBSA * weight * tbsa, 0);
            let first_eight_hours = round_to(parkland / 2.0, 0);
            result.dose_line(
                Dose::new("Ringer lactate, first 24 h (Parkland)", parkland, Unit::Ml)
                    .via(Route::Intravenous)
                    .noting("counted from the time of the burn"),
            );
            result.dose_line(
                Dose::new("Of which in the first 8 h", first_eight_hours, Unit::Ml)
                    .via(Route::Intravenous),
            );
            result.dose_line(
                Dose::new("Maintenance fluids", maintenance_ml_per_day(weight), Unit::MlPerDay)
                    .via(Route::Intravenous)
                    .noting("in addition to Parkland volume"),
            );
            result.recommend("Titrate fluids to urine output >= 1 mL/kg/h");
        } else {
            result.recommend("Oral hydration; formal fluid resuscitation not required below 10% TBSA");
        }

        result.recommend("Analgesia before any wound handling");
        result.recommend("Clean with running water; cover with non-adherent dressing");
        if severity >= Severity::Severe {
            result.recommend("Refer to a burn center");
        }

        result.observe("Exclude burns of face, hands, feet, genitalia, and circumferential burns");
        Ok(result)
    }
}
