use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use super::value::Value;
use crate::domain::constraints::Constraint;
use crate::domain::errors::{CoercionError, ExtractError};

type CoercionFn = dyn Fn(Value) -> Result<Value, CoercionError> + Send + Sync;

/// Named field-level transform applied to a raw value before validation.
#[derive(Clone)]
pub struct Coercion {
    name: String,
    func: Arc<CoercionFn>,
}

impl Coercion {
    /// Inline transform, interchangeable with the named helpers in
    /// [`crate::services::coercion`].
    pub fn custom<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(Value) -> Result<Value, CoercionError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, value: Value) -> Result<Value, CoercionError> {
        (self.func)(value)
    }
}

impl fmt::Debug for Coercion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Coercion").field(&self.name).finish()
    }
}

/// Declaration of one schema field.
///
/// The name is both the lookup key into the merged mapping and the label used
/// in error output.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: String,
    optional: bool,
    coercions: Vec<Coercion>,
    constraints: Vec<Arc<dyn Constraint>>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: false,
            coercions: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Skip all constraints when the key is absent.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Append a coercion; coercions run in declaration order.
    #[must_use]
    pub fn coerce(mut self, coercion: Coercion) -> Self {
        self.coercions.push(coercion);
        self
    }

    /// Append an inline coercion.
    #[must_use]
    pub fn transform<F>(self, name: impl Into<String>, func: F) -> Self
    where
        F: Fn(Value) -> Result<Value, CoercionError> + Send + Sync + 'static,
    {
        self.coerce(Coercion::custom(name, func))
    }

    /// Append a constraint; constraints run in declaration order.
    #[must_use]
    pub fn constraint(mut self, constraint: impl Constraint + 'static) -> Self {
        self.constraints.push(Arc::new(constraint));
        self
    }

    #[must_use]
    pub fn shared_constraint(mut self, constraint: Arc<dyn Constraint>) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn coercions(&self) -> &[Coercion] {
        &self.coercions
    }

    pub fn constraints(&self) -> &[Arc<dyn Constraint>] {
        &self.constraints
    }
}

/// Ordered set of field declarations describing a target configuration.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field. Redeclaring a name replaces the earlier declaration in place.
    #[must_use]
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.push(spec);
        self
    }

    pub fn push(&mut self, spec: FieldSpec) {
        match self.fields.iter_mut().find(|f| f.name == spec.name) {
            Some(existing) => *existing = spec,
            None => self.fields.push(spec),
        }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One field of a bound candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundField {
    pub name: String,
    pub value: Option<Value>,
}

/// Schema fields populated from the merged mapping, in declaration order.
///
/// Returned to the caller once validation passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CandidateObject {
    fields: Vec<BoundField>,
}

impl CandidateObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: Option<Value>) {
        let name = name.into();
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => field.value = value,
            None => self.fields.push(BoundField { name, value }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .and_then(|f| f.value.as_ref())
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn fields(&self) -> &[BoundField] {
        &self.fields
    }

    /// Typed read of a required field.
    pub fn extract<T: FromValue>(&self, name: &str) -> Result<T, ExtractError> {
        self.extract_optional(name)?
            .ok_or_else(|| ExtractError::Missing {
                field: name.to_string(),
            })
    }

    /// Typed read of a field that may be absent.
    pub fn extract_optional<T: FromValue>(&self, name: &str) -> Result<Option<T>, ExtractError> {
        let Some(value) = self.get(name) else {
            return Ok(None);
        };
        T::from_value(value)
            .map(Some)
            .ok_or_else(|| ExtractError::WrongType {
                field: name.to_string(),
                expected: T::EXPECTED,
                found: value.inspect(),
            })
    }
}

/// Conversion from a coerced [`Value`] into a concrete Rust type.
pub trait FromValue: Sized {
    /// Description used when the conversion fails.
    const EXPECTED: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
    const EXPECTED: &'static str = "any value";

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "string";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "number";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl FromValue for i64 {
    const EXPECTED: &'static str = "integer";

    #[allow(clippy::cast_possible_truncation)]
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(n) => Some(*n),
            Value::Float(n) if n.is_finite() && n.fract() == 0.0 => Some(*n as Self),
            _ => None,
        }
    }
}

macro_rules! from_value_via_i64 {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                const EXPECTED: &'static str = stringify!($ty);

                fn from_value(value: &Value) -> Option<Self> {
                    i64::from_value(value).and_then(|n| <$ty>::try_from(n).ok())
                }
            }
        )*
    };
}

from_value_via_i64!(i32, u16, u32, u64, usize);

impl<T: FromValue> FromValue for Vec<T> {
    const EXPECTED: &'static str = "list";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_list()?.iter().map(T::from_value).collect()
    }
}
