use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The type of value a protocol input field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FieldKind {
    Number,
    Boolean,
    Text,
}

/// Declares one input field of a protocol: its type, whether it is
/// required, and the valid range when one applies. Drives boundary
/// validation and the schema payload served to the client.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldSpec {
    pub id: String,
    pub label: String,
    pub kind: FieldKind,
    pub unit: Option<String>,
    pub required: bool,
    /// Must be strictly greater than zero (weights, rates).
    pub positive: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl FieldSpec {
    fn new(id: &str, label: &str, kind: FieldKind, required: bool) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind,
            unit: None,
            required,
            positive: false,
            min: None,
            max: None,
        }
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }
}

/// Patient weight in kilograms; required and strictly positive.
pub fn weight_kg() -> FieldSpec {
    let mut spec = FieldSpec::new("weight_kg", "Weight", FieldKind::Number, true);
    spec.positive = true;
    spec.with_unit("kg")
}

pub fn required_number(id: &str, label: &str) -> FieldSpec {
    FieldSpec::new(id, label, FieldKind::Number, true)
}

pub fn optional_number(id: &str, label: &str) -> FieldSpec {
    FieldSpec::new(id, label, FieldKind::Number, false)
}

/// Optional boolean clinical finding; absent means not present.
pub fn finding(id: &str, label: &str) -> FieldSpec {
    FieldSpec::new(id, label, FieldKind::Boolean, false)
}
