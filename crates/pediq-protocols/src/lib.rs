//! pediq-protocols
//!
//! Clinical protocol calculators for pediatric decision support. Each
//! protocol is pure data and arithmetic (a field schema plus threshold
//! tables and dose rules) behind one `Protocol` trait; the registry maps
//! protocol ids to implementations. No I/O, no shared mutable state: every
//! evaluation builds its result fresh from the input record.

pub mod error;
pub mod protocols;
pub mod rules;
pub mod schema;

use pediq_core::error::InvalidInput;
use pediq_core::input::{ClinicalInput, Value};
use pediq_core::models::evaluation::Evaluation;

use error::ProtocolError;
use schema::{FieldKind, FieldSpec};

/// Trait implemented by each clinical protocol calculator.
pub trait Protocol: Send + Sync {
    /// Unique identifier for this protocol (e.g., "anaphylaxis", "croup").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "Anaphylaxis", "Croup (Westley)").
    fn name(&self) -> &str;

    /// The input fields this protocol reads.
    fn fields(&self) -> &[FieldSpec];

    /// Evaluate one input record into a result snapshot. Callers are
    /// expected to run [`Protocol::validate`] first; accessors still fail
    /// on malformed fields so no arithmetic runs on a bad record.
    fn evaluate(&self, input: &ClinicalInput) -> Result<Evaluation, InvalidInput>;

    /// Validate an input record against this protocol's field schema.
    fn validate(&self, input: &ClinicalInput) -> Vec<InvalidInput> {
        let mut errors = Vec::new();
        for spec in self.fields() {
            match (input.get(&spec.id), spec.kind) {
                (None, _) => {
                    if spec.required {
                        errors.push(InvalidInput::missing(&spec.id));
                    }
                }
                (Some(Value::Number(n)), FieldKind::Number) => {
                    if spec.positive && *n <= 0.0 {
                        errors.push(InvalidInput::not_positive(&spec.id, *n));
                    } else if let (Some(min), Some(max)) = (spec.min, spec.max)
                        && (*n < min || *n > max)
                    {
                        errors.push(InvalidInput::out_of_range(&spec.id, *n, min, max));
                    }
                }
                (Some(Value::Boolean(_)), FieldKind::Boolean) => {}
                (Some(Value::Text(_)), FieldKind::Text) => {}
                (Some(_), FieldKind::Number) => {
                    errors.push(InvalidInput::not_a_number(&spec.id));
                }
                (Some(_), FieldKind::Boolean) => {
                    errors.push(InvalidInput::not_a_boolean(&spec.id));
                }
                (Some(_), FieldKind::Text) => {
                    errors.push(InvalidInput::not_text(&spec.id));
                }
            }
        }
        errors
    }
}

/// Return all registered protocols.
pub fn all_protocols() -> Vec<Box<dyn Protocol>> {
    vec![
        Box::new(protocols::adrenal_crisis::AdrenalCrisis),
        Box::new(protocols::anaphylaxis::Anaphylaxis),
        Box::new(protocols::appendicitis::Appendicitis),
        Box::new(protocols::asthma::Asthma),
        Box::new(protocols::bronchiolitis::Bronchiolitis),
        Box::new(protocols::burns::Burns),
        Box::new(protocols::cardiac_arrest::CardiacArrest),
        Box::new(protocols::croup::Croup),
        Box::new(protocols::dehydration::Dehydration),
        Box::new(protocols::dengue::Dengue),
        Box::new(protocols::diabetic_ketoacidosis::DiabeticKetoacidosis),
        Box::new(protocols::fever_without_source::FeverWithoutSource),
        Box::new(protocols::hyperkalemia::Hyperkalemia),
        Box::new(protocols::hypoglycemia::Hypoglycemia),
        Box::new(protocols::meningitis::Meningitis),
        Box::new(protocols::neonatal_jaundice::NeonatalJaundice),
        Box::new(protocols::pain::AcutePain),
        Box::new(protocols::pharyngitis::Pharyngitis),
        Box::new(protocols::pneumonia::Pneumonia),
        Box::new(protocols::rsi::RapidSequenceIntubation),
        Box::new(protocols::sepsis::Sepsis),
        Box::new(protocols::status_epilepticus::StatusEpilepticus),
        Box::new(protocols::tbi::Tbi),
        Box::new(protocols::trauma_score::TraumaScore),
        Box::new(protocols::uti::Uti),
    ]
}

/// Look up a protocol by id.
pub fn get_protocol(id: &str) -> Option<Box<dyn Protocol>> {
    all_protocols().into_iter().find(|p| p.id() == id)
}

/// Validate and evaluate in one call: the facade used by the HTTP layer.
/// The first schema violation is surfaced; nothing is computed on invalid
/// input.
pub fn evaluate(id: &str, input: &ClinicalInput) -> Result<Evaluation, ProtocolError> {
    let protocol =
        get_protocol(id).ok_or_else(|| ProtocolError::UnknownProtocol(id.to_string()))?;
    if let Some(error) = protocol.validate(input).into_iter().next() {
        return Err(error.into());
    }
    protocol.evaluate(input).map_err(ProtocolError::from)
}
