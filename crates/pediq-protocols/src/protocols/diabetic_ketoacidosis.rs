use pediq_core::error::InvalidInput;
use pediq_core::input::ClinicalInput;
use pediq_core::models::dose::{Dose, Route, Unit};
use pediq_core::models::evaluation::Evaluation;
use pediq_core::models::severity::Severity;

use crate::rules::{maintenance_ml_per_day, round_to, DoseRule};
use crate::schema::{finding, optional_number, required_number, weight_kg, FieldSpec};
use crate::Protocol;

/// Diabetic ketoacidosis: biochemical severity grading, the insulin
/// infusion, and the 48-hour rehydration plan.
pub struct DiabeticKetoacidosis;

/// Standard infusion dilution: 50 U regular insulin in 50 mL saline, so
/// the pump rate in mL/h equals the dose in U/h.
pub const DILUTION_ML_PER_UNIT: f64 = 1.0;

const DEFAULT_INSULIN_RATE: f64 = 0.05;

const INITIAL_SALINE: DoseRule = DoseRule {
    label: "0.9% saline, first hour",
    per_kg: 10.0,
    min: None,
    max: None,
    decimals: 0,
    unit: Unit::Ml,
    route: Some(Route::Intravenous),
};

const SHOCK_SALINE: DoseRule = DoseRule {
    label: "0.9% saline, first hour",
    per_kg: 20.0,
    min: None,
    max: None,
    decimals: 0,
    unit: Unit::Ml,
    route: Some(Route::Intravenous),
};

impl Protocol for DiabeticKetoacidosis {
    fn id(&self) -> &str {
        "diabetic_ketoacidosis"
    }

    fn name(&self) -> &str {
        "Diabetic Ketoacidosis"
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: std::sync::LazyLock<Vec<FieldSpec>> = std::sync::LazyLock::new(|| {
            vec![
                weight_kg(),
                required_number("ph", "Venous pH").range(6.5, 7.8),
                optional_number("bicarbonate", "Bicarbonate")
                    .with_unit("mEq/L")
                    .range(0.0, 40.0),
                optional_number("glucose_mg_dl", "Glucose")
                    .with_unit("mg/dL")
                    .range(0.0, 2000.0),
                optional_number("insulin_rate", "Insulin infusion rate")
                    .with_unit("U/kg/h")
                    .range(0.05, 0.1),
                finding("shock", "Shock or severely compromised perfusion"),
            ]
        });
        &FIELDS
    }

    fn evaluate(&self, input: &ClinicalInput) -> Result<Evaluation, InvalidInput> {
        let weight = input.weight_kg()?;
        let ph = input.number("ph")?;
        let bicarbonate = input.number_opt("bicarbonate")?;
        let glucose = input.number_opt("glucose_mg_dl")?;
        let rate = input.number_opt("insulin_rate")?.unwrap_or(DEFAULT_INSULIN_RATE);
        let shock = input.flag("shock")?;

        let mut result = Evaluation::for_protocol(self.id());

        let in_dka = ph < 7.3 || bicarbonate.is_some_and(|b| b < 15.0);
        if !in_dka {
            result.classification = Some("Ketoacidosis criteria not met".to_string());
            result.observe("pH >= 7.3 and bicarbonate >= 15 mEq/L: treat as hyperglycemia without acidosis");
            result.observe("Reassess gases if the clinical picture worsens");
            return Ok(result);
        }

        let severity = if ph < 7.1 || bicarbonate.is_some_and(|b| b < 5.0) {
            Severity::Severe
        } else if ph < 7.2 || bicarbonate.is_some_and(|b| b < 10.0) {
            Severity::Moderate
        } else {
            Severity::Mild
        };
        let label = match severity {
            Severity::Severe => "Severe ketoacidosis",
            Severity::Moderate => "Moderate ketoacidosis",
            _ => "Mild ketoacidosis",
        };
        result.classify(label, severity);

        let initial = if shock { SHOCK_SALINE } else { INITIAL_SALINE };
        result.dose_line(initial.apply(weight));

        let insulin_per_hour = round_to(rate * weight, 2);
        let pump_rate = round_to(insulin_per_hour * DILUTION_ML_PER_UNIT, 2);
        result.dose_line(
            Dose::new("Regular insulin infusion", insulin_per_hour, Unit::UnitsPerHour)
                .via(Route::Intravenous)
                .noting(format!("{rate} U/kg/h, start after the first hour of fluids")),
        );
        result.dose_line(
            Dose::new("Pump rate (50 U in 50 mL)", pump_rate, Unit::MlPerHour)
                .via(Route::Intravenous),
        );

        let deficit_per_kg = match severity {
            Severity::Severe => 100.0,
            Severity::Moderate => 70.0,
            _ => 50.0,
        };
        let deficit = deficit_per_kg * weight;
        let rehydration_per_hour =
            round_to((deficit + 2.0 * maintenance_ml_per_day(weight)) / 48.0, 0);
        result.dose_line(
            Dose::new("Rehydration rate over 48 h", rehydration_per_hour, Unit::MlPerHour)
                .via(Route::Intravenous)
                .noting("deficit plus maintenance, evenly over 48 h"),
        );

        result.recommend("Never bolus insulin; expected glucose fall <= 100 mg/dL per hour");
        result.recommend("Potassium replacement once urine output confirmed and K < 5.5 mEq/L");
        if glucose.is_some_and(|g| g < 250.0) {
            result.recommend("Add 5% dextrose to fluids now (glucose below 250 mg/dL)");
        } else {
            result.recommend("Add 5% dextrose to fluids when glucose falls below 250 mg/dL");
        }
        result.recommend("Hourly glucose and neurological checks; gases every 2-4 h");

        result.observe("Headache, vomiting, or falling consciousness during treatment: treat as cerebral edema, do not wait for imaging");
        Ok(result)
    }
}
