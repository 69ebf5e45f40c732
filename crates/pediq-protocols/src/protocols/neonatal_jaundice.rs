use pediq_core::error::InvalidInput;
use pediq_core::input::ClinicalInput;
use pediq_core::models::evaluation::Evaluation;
use pediq_core::models::severity::Severity;

use crate::rules::{Band, ThresholdTable};
use crate::schema::{required_number, FieldSpec};
use crate::Protocol;

/// Neonatal jaundice: total bilirubin against age-in-hours treatment
/// thresholds. Jaundice visible in the first 24 hours is pathological
/// whatever the level.
pub struct NeonatalJaundice;

/// Phototherapy threshold (mg/dL) by postnatal age band (hours).
const PHOTOTHERAPY: ThresholdTable<f64> = ThresholdTable::new(&[
    Band { lower: 0.0, value: 10.0 },
    Band { lower: 24.0, value: 12.0 },
    Band { lower: 48.0, value: 15.0 },
    Band { lower: 72.0, value: 18.0 },
]);

/// Exchange transfusion threshold (mg/dL) by postnatal age band (hours).
const EXCHANGE: ThresholdTable<f64> = ThresholdTable::new(&[
    Band { lower: 0.0, value: 17.0 },
    Band { lower: 24.0, value: 19.0 },
    Band { lower: 48.0, value: 22.0 },
    Band { lower: 72.0, value: 25.0 },
]);

/// Bilirubin level at which jaundice becomes clinically visible.
const VISIBLE_MG_DL: f64 = 5.0;

impl Protocol for NeonatalJaundice {
    fn id(&self) -> &str {
        "neonatal_jaundice"
    }

    fn name(&self) -> &str {
        "Neonatal Jaundice"
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: std::sync::LazyLock<Vec<FieldSpec>> = std::sync::LazyLock::new(|| {
            vec![
                required_number("age_hours", "Postnatal age").with_unit("h").range(0.0, 672.0),
                required_number("bilirubin_mg_dl", "Total bilirubin")
                    .with_unit("mg/dL")
                    .range(0.0, 40.0),
            ]
        });
        &FIELDS
    }

    fn evaluate(&self, input: &ClinicalInput) -> Result<Evaluation, InvalidInput> {
        let age_hours = input.number("age_hours")?;
        let bilirubin = input.number("bilirubin_mg_dl")?;

        let photo_limit = *PHOTOTHERAPY.classify(age_hours);
        let exchange_limit = *EXCHANGE.classify(age_hours);

        let mut result = Evaluation::for_protocol(self.id());

        if bilirubin >= exchange_limit {
            result.classify("Exchange transfusion level", Severity::Critical);
            result.recommend("Prepare exchange transfusion now");
            result.recommend("Intensive phototherapy while preparing");
            result.recommend("IV immunoglobulin if isoimmune hemolysis is confirmed");
        } else if age_hours < 24.0 && bilirubin >= VISIBLE_MG_DL {
            result.classify("Jaundice in the first 24 h (pathological)", Severity::Severe);
            result.recommend("Start phototherapy");
            result.recommend("Hemolysis workup: blood type, Coombs, reticulocytes, smear");
        } else if bilirubin >= photo_limit {
            result.classify("Phototherapy level", Severity::Moderate);
            result.recommend("Start phototherapy; recheck bilirubin in 6-12 h");
            result.recommend("Keep breastfeeding; supplement only if intake is inadequate");
        } else {
            result.classify("Below treatment threshold", Severity::Mild);
            result.recommend("No phototherapy; recheck in 24 h if jaundice progresses");
        }

        result.observe(format!(
            "Thresholds at {age_hours:.0} h: phototherapy {photo_limit:.0} mg/dL, exchange {exchange_limit:.0} mg/dL"
        ));
        Ok(result)
    }
}
