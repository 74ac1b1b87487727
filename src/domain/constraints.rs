//! Field constraints.
//!
//! A constraint is a predicate over a field's (possibly absent) value plus the
//! message shown when it fails. The validator only talks to the [`Constraint`]
//! trait, so new kinds of checks are added by implementing it.

use regex::Regex;
use std::fmt;
use std::sync::Arc;

use super::models::Value;

/// Capability every field constraint implements.
pub trait Constraint: Send + Sync + fmt::Debug {
    /// Stable snake_case identifier, e.g. `min_length`.
    fn name(&self) -> &str;

    /// Whether `value` satisfies the constraint. `None` means the key was absent.
    fn check(&self, value: Option<&Value>) -> bool;

    /// Failure message for `field`. The message names the field.
    fn message(&self, field: &str) -> String;
}

/// Value must be a string.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsString;

impl Constraint for IsString {
    fn name(&self) -> &str {
        "is_string"
    }

    fn check(&self, value: Option<&Value>) -> bool {
        matches!(value, Some(Value::Str(_)))
    }

    fn message(&self, field: &str) -> String {
        format!("{field} must be a string")
    }
}

/// Value must be present and not the empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsNotEmpty;

impl Constraint for IsNotEmpty {
    fn name(&self) -> &str {
        "is_not_empty"
    }

    fn check(&self, value: Option<&Value>) -> bool {
        match value {
            None => false,
            Some(Value::Str(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }

    fn message(&self, field: &str) -> String {
        format!("{field} should not be empty")
    }
}

/// Value must be present.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsDefined;

impl Constraint for IsDefined {
    fn name(&self) -> &str {
        "is_defined"
    }

    fn check(&self, value: Option<&Value>) -> bool {
        value.is_some()
    }

    fn message(&self, field: &str) -> String {
        format!("{field} should not be null or undefined")
    }
}

/// String of at least `n` characters.
#[derive(Debug, Clone, Copy)]
pub struct MinLength(pub usize);

impl Constraint for MinLength {
    fn name(&self) -> &str {
        "min_length"
    }

    fn check(&self, value: Option<&Value>) -> bool {
        value
            .and_then(Value::as_str)
            .is_some_and(|s| s.chars().count() >= self.0)
    }

    fn message(&self, field: &str) -> String {
        format!("{field} must be longer than or equal to {} characters", self.0)
    }
}

/// String of at most `n` characters.
#[derive(Debug, Clone, Copy)]
pub struct MaxLength(pub usize);

impl Constraint for MaxLength {
    fn name(&self) -> &str {
        "max_length"
    }

    fn check(&self, value: Option<&Value>) -> bool {
        value
            .and_then(Value::as_str)
            .is_some_and(|s| s.chars().count() <= self.0)
    }

    fn message(&self, field: &str) -> String {
        format!("{field} must be shorter than or equal to {} characters", self.0)
    }
}

/// Whole number. A `Float` with no fractional part counts; NaN does not.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsInt;

impl Constraint for IsInt {
    fn name(&self) -> &str {
        "is_int"
    }

    fn check(&self, value: Option<&Value>) -> bool {
        match value {
            Some(Value::Int(_)) => true,
            Some(Value::Float(n)) => n.is_finite() && n.fract() == 0.0,
            _ => false,
        }
    }

    fn message(&self, field: &str) -> String {
        format!("{field} must be an integer number")
    }
}

/// Finite number.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsNumber;

impl Constraint for IsNumber {
    fn name(&self) -> &str {
        "is_number"
    }

    fn check(&self, value: Option<&Value>) -> bool {
        value.and_then(Value::as_f64).is_some_and(f64::is_finite)
    }

    fn message(&self, field: &str) -> String {
        format!("{field} must be a number conforming to the specified constraints")
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IsBoolean;

impl Constraint for IsBoolean {
    fn name(&self) -> &str {
        "is_boolean"
    }

    fn check(&self, value: Option<&Value>) -> bool {
        matches!(value, Some(Value::Bool(_)))
    }

    fn message(&self, field: &str) -> String {
        format!("{field} must be a boolean value")
    }
}

/// Number no smaller than the bound.
#[derive(Debug, Clone, Copy)]
pub struct Min(pub f64);

impl Constraint for Min {
    fn name(&self) -> &str {
        "min"
    }

    fn check(&self, value: Option<&Value>) -> bool {
        value.and_then(Value::as_f64).is_some_and(|n| n >= self.0)
    }

    fn message(&self, field: &str) -> String {
        format!("{field} must not be less than {}", self.0)
    }
}

/// Number no larger than the bound.
#[derive(Debug, Clone, Copy)]
pub struct Max(pub f64);

impl Constraint for Max {
    fn name(&self) -> &str {
        "max"
    }

    fn check(&self, value: Option<&Value>) -> bool {
        value.and_then(Value::as_f64).is_some_and(|n| n <= self.0)
    }

    fn message(&self, field: &str) -> String {
        format!("{field} must not be greater than {}", self.0)
    }
}

/// Value equal to one of an allowed set.
#[derive(Debug, Clone)]
pub struct IsIn(pub Vec<Value>);

impl IsIn {
    pub fn strings<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(allowed.into_iter().map(|s| Value::Str(s.into())).collect())
    }
}

impl Constraint for IsIn {
    fn name(&self) -> &str {
        "is_in"
    }

    fn check(&self, value: Option<&Value>) -> bool {
        value.is_some_and(|v| self.0.contains(v))
    }

    fn message(&self, field: &str) -> String {
        let allowed = self
            .0
            .iter()
            .map(|v| v.as_str().map_or_else(|| v.inspect(), str::to_string))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{field} must be one of the following values: {allowed}")
    }
}

/// String containing a substring.
#[derive(Debug, Clone)]
pub struct Contains(pub String);

impl Constraint for Contains {
    fn name(&self) -> &str {
        "contains"
    }

    fn check(&self, value: Option<&Value>) -> bool {
        value
            .and_then(Value::as_str)
            .is_some_and(|s| s.contains(self.0.as_str()))
    }

    fn message(&self, field: &str) -> String {
        format!("{field} must contain a {} string", self.0)
    }
}

/// String matching a regular expression.
#[derive(Debug, Clone)]
pub struct Matches(pub Regex);

impl Matches {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Self)
    }
}

impl Constraint for Matches {
    fn name(&self) -> &str {
        "matches"
    }

    fn check(&self, value: Option<&Value>) -> bool {
        value
            .and_then(Value::as_str)
            .is_some_and(|s| self.0.is_match(s))
    }

    fn message(&self, field: &str) -> String {
        format!("{field} must match /{}/ regular expression", self.0.as_str())
    }
}

/// Applies an inner constraint to every element of a list.
///
/// A value that is not a list is checked directly.
#[derive(Debug, Clone)]
pub struct Each(pub Arc<dyn Constraint>);

impl Each {
    pub fn new(inner: impl Constraint + 'static) -> Self {
        Self(Arc::new(inner))
    }
}

impl Constraint for Each {
    fn name(&self) -> &str {
        self.0.name()
    }

    fn check(&self, value: Option<&Value>) -> bool {
        match value {
            Some(Value::List(items)) => items.iter().all(|item| self.0.check(Some(item))),
            other => self.0.check(other),
        }
    }

    fn message(&self, field: &str) -> String {
        format!("each value in {}", self.0.message(field))
    }
}

type Predicate = dyn Fn(Option<&Value>) -> bool + Send + Sync;

/// Caller-supplied predicate; the message is appended to the field name.
#[derive(Clone)]
pub struct Custom {
    name: String,
    message: String,
    predicate: Arc<Predicate>,
}

impl Custom {
    pub fn new<F>(name: impl Into<String>, message: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(Option<&Value>) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            message: message.into(),
            predicate: Arc::new(predicate),
        }
    }
}

impl fmt::Debug for Custom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Custom")
            .field("name", &self.name)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl Constraint for Custom {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, value: Option<&Value>) -> bool {
        (self.predicate)(value)
    }

    fn message(&self, field: &str) -> String {
        format!("{field} {}", self.message)
    }
}
