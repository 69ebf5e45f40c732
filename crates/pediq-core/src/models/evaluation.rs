use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::dose::Dose;
use crate::models::severity::Severity;

/// The aggregate result of one protocol evaluation.
///
/// Constructed fresh per call and never mutated after return. The order of
/// `recommendations` is part of the contract: primary intervention first,
/// then tier-conditional adjuncts, then monitoring, then disposition;
/// clinicians read top to bottom by priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Evaluation {
    pub protocol_id: String,
    /// Display grouping, e.g. "Group C — warning signs" or "High probability".
    pub classification: Option<String>,
    pub severity: Option<Severity>,
    /// Numeric score for point-sum protocols (Westley, appendicitis, RTS).
    pub score: Option<f64>,
    pub doses: Vec<Dose>,
    pub recommendations: Vec<String>,
    pub observations: Vec<String>,
}

impl Evaluation {
    pub fn for_protocol(protocol_id: &str) -> Self {
        Self {
            protocol_id: protocol_id.to_string(),
            classification: None,
            severity: None,
            score: None,
            doses: Vec::new(),
            recommendations: Vec::new(),
            observations: Vec::new(),
        }
    }

    pub fn classify(&mut self, label: impl Into<String>, severity: Severity) {
        self.classification = Some(label.into());
        self.severity = Some(severity);
    }

    /// Record a dose and its recommendation line in one step, keeping the
    /// dose list and the reading order in sync.
    pub fn dose_line(&mut self, dose: Dose) {
        self.recommendations.push(dose.to_string());
        self.doses.push(dose);
    }

    pub fn recommend(&mut self, text: impl Into<String>) {
        self.recommendations.push(text.into());
    }

    pub fn observe(&mut self, text: impl Into<String>) {
        self.observations.push(text.into());
    }
}
