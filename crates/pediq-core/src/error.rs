use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// A clinical input that cannot be evaluated: a required field is missing,
/// has the wrong type, or is outside its physiologically valid range.
///
/// Calculations never proceed past the first invalid field; a partial
/// result on bad input is worse than no result.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct InvalidInput {
    pub field: String,
    pub message: String,
}

impl InvalidInput {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn missing(field: &str) -> Self {
        Self::new(field, format!("required field '{field}' is missing"))
    }

    pub fn not_a_number(field: &str) -> Self {
        Self::new(field, format!("field '{field}' must be a number"))
    }

    pub fn not_a_boolean(field: &str) -> Self {
        Self::new(field, format!("field '{field}' must be true or false"))
    }

    pub fn not_text(field: &str) -> Self {
        Self::new(field, format!("field '{field}' must be text"))
    }

    pub fn not_positive(field: &str, value: f64) -> Self {
        Self::new(
            field,
            format!("{field} must be greater than zero (got {value})"),
        )
    }

    pub fn out_of_range(field: &str, value: f64, min: f64, max: f64) -> Self {
        Self::new(
            field,
            format!("{field} value {value} is outside range [{min}, {max}]"),
        )
    }
}
