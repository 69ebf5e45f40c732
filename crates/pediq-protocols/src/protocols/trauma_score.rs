use pediq_core::error::InvalidInput;
use pediq_core::input::ClinicalInput;
use pediq_core::models::evaluation::Evaluation;
use pediq_core::models::severity::Severity;

use crate::rules::{round_to, Band, ThresholdTable};
use crate::schema::{required_number, FieldSpec};
use crate::Protocol;

/// Revised Trauma Score: Glasgow, systolic pressure, and respiratory rate
/// each coded 0-4, summed for triage and weighted for the survival-
/// correlated score.
pub struct TraumaScore;

const GCS_CODE: ThresholdTable<f64> = ThresholdTable::new(&[
    Band { lower: 3.0, value: 0.0 },
    Band { lower: 4.0, value: 1.0 },
    Band { lower: 6.0, value: 2.0 },
    Band { lower: 9.0, value: 3.0 },
    Band { lower: 13.0, value: 4.0 },
]);

const SBP_CODE: ThresholdTable<f64> = ThresholdTable::new(&[
    Band { lower: 0.0, value: 0.0 },
    Band { lower: 1.0, value: 1.0 },
    Band { lower: 50.0, value: 2.0 },
    Band { lower: 76.0, value: 3.0 },
    Band { lower: 90.0, value: 4.0 },
]);

/// Respiratory rate codes peak in the 10-29 band and fall again above it,
/// so this one is not a monotone table.
fn respiratory_code(rate: f64) -> f64 {
    if rate <= 0.0 {
        0.0
    } else if rate < 6.0 {
        1.0
    } else if rate < 10.0 {
        2.0
    } else if rate < 30.0 {
        4.0
    } else {
        3.0
    }
}

const GCS_WEIGHT: f64 = 0.9368;
const SBP_WEIGHT: f64 = 0.7326;
const RR_WEIGHT: f64 = 0.2908;

impl Protocol for TraumaScore {
    fn id(&self) -> &str {
        "trauma_score"
    }

    fn name(&self) -> &str {
        "Revised Trauma Score"
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: std::sync::LazyLock<Vec<FieldSpec>> = std::sync::LazyLock::new(|| {
            vec![
                required_number("glasgow_total", "Glasgow Coma Scale total").range(3.0, 15.0),
                required_number("systolic_bp", "Systolic blood pressure")
                    .with_unit("mmHg")
                    .range(0.0, 300.0),
                required_number("respiratory_rate", "Respiratory rate")
                    .with_unit("rpm")
                    .range(0.0, 150.0),
            ]
        });
        &FIELDS
    }

    fn evaluate(&self, input: &ClinicalInput) -> Result<Evaluation, InvalidInput> {
        let glasgow = input.number("glasgow_total")?;
        let sbp = input.number("systolic_bp")?;
        let rr = input.number("respiratory_rate")?;

        let gcs_code = *GCS_CODE.classify(glasgow);
        let sbp_code = *SBP_CODE.classify(sbp);
        let rr_code = respiratory_code(rr);

        let triage_sum = gcs_code + sbp_code + rr_code;
        let weighted =
            round_to(GCS_WEIGHT * gcs_code + SBP_WEIGHT * sbp_code + RR_WEIGHT * rr_code, 4);

        let severity = if triage_sum <= 10.0 {
            Severity::Severe
        } else if triage_sum <= 11.0 {
            Severity::Moderate
        } else {
            Severity::Mild
        };

        let mut result = Evaluation::for_protocol(self.id());
        result.score = Some(weighted);
        let label = match severity {
            Severity::Severe => "High-risk trauma",
            Severity::Moderate => "Intermediate-risk trauma",
            _ => "Low physiologic risk",
        };
        result.classify(label, severity);

        if severity >= Severity::Moderate {
            result.recommend("Transfer to a trauma center");
        } else {
            result.recommend("Standard trauma evaluation; triage score alone does not rule out injury");
        }
        result.recommend("Recalculate after every intervention; a falling score is an alarm");

        result.observe(format!(
            "Coded values: GCS {gcs_code:.0}, SBP {sbp_code:.0}, RR {rr_code:.0} (triage sum {triage_sum:.0}/12)"
        ));
        result.observe(format!("Weighted RTS: {weighted}"));
        Ok(result)
    }
}
