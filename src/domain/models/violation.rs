use serde::Serialize;

use super::value::{inspect, Value};

/// One failed constraint for one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Field (and lookup key) that failed
    pub field: String,
    /// Name of the failed constraint, e.g. `is_not_empty`
    pub constraint: String,
    /// Human-readable failure, already naming the field
    pub message: String,
    /// Value the field held when the constraint ran; `None` if the key was absent
    pub value: Option<Value>,
}

impl Violation {
    pub fn new(
        field: impl Into<String>,
        constraint: impl Into<String>,
        message: impl Into<String>,
        value: Option<Value>,
    ) -> Self {
        Self {
            field: field.into(),
            constraint: constraint.into(),
            message: message.into(),
            value,
        }
    }

    pub fn rendered_value(&self) -> String {
        inspect(self.value.as_ref())
    }
}
