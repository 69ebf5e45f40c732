use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::InvalidInput;

/// A single clinical input value. Deserialized untagged, so a JSON body of
/// plain numbers, booleans, and strings maps directly onto it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Boolean(bool),
    Text(String),
}

/// The flat input record for one calculation: field id → value.
///
/// Immutable for the duration of an evaluation. Accessors return
/// [`InvalidInput`] rather than guessing, so a calculator fails before any
/// arithmetic runs on a bad record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(transparent)]
pub struct ClinicalInput(BTreeMap<String, Value>);

impl ClinicalInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.0.insert(field.into(), value);
    }

    pub fn with_number(mut self, field: &str, value: f64) -> Self {
        self.set(field, Value::Number(value));
        self
    }

    pub fn with_flag(mut self, field: &str, value: bool) -> Self {
        self.set(field, Value::Boolean(value));
        self
    }

    pub fn with_text(mut self, field: &str, value: &str) -> Self {
        self.set(field, Value::Text(value.to_string()));
        self
    }

    /// Required numeric field.
    pub fn number(&self, field: &str) -> Result<f64, InvalidInput> {
        match self.get(field) {
            None => Err(InvalidInput::missing(field)),
            Some(Value::Number(n)) => Ok(*n),
            Some(_) => Err(InvalidInput::not_a_number(field)),
        }
    }

    /// Optional numeric field; present-but-non-numeric is still an error.
    pub fn number_opt(&self, field: &str) -> Result<Option<f64>, InvalidInput> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::Number(n)) => Ok(Some(*n)),
            Some(_) => Err(InvalidInput::not_a_number(field)),
        }
    }

    /// Required numeric field that must be strictly positive.
    pub fn positive_number(&self, field: &str) -> Result<f64, InvalidInput> {
        let value = self.number(field)?;
        if value <= 0.0 {
            return Err(InvalidInput::not_positive(field, value));
        }
        Ok(value)
    }

    /// Patient weight in kilograms. Every weight-based dose goes through
    /// this, so a non-positive weight fails before any dose is computed.
    pub fn weight_kg(&self) -> Result<f64, InvalidInput> {
        self.positive_number("weight_kg")
    }

    /// Boolean clinical finding. Absent means the finding is not present.
    pub fn flag(&self, field: &str) -> Result<bool, InvalidInput> {
        match self.get(field) {
            None => Ok(false),
            Some(Value::Boolean(b)) => Ok(*b),
            Some(_) => Err(InvalidInput::not_a_boolean(field)),
        }
    }

    /// Required text field.
    pub fn text(&self, field: &str) -> Result<&str, InvalidInput> {
        match self.get(field) {
            None => Err(InvalidInput::missing(field)),
            Some(Value::Text(s)) => Ok(s.as_str()),
            Some(_) => Err(InvalidInput::not_text(field)),
        }
    }

    pub fn text_opt(&self, field: &str) -> Result<Option<&str>, InvalidInput> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::Text(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(InvalidInput::not_text(field)),
        }
    }
}
