//! Schema binder: shapes the merged mapping into a candidate object.

use crate::domain::errors::CoercionError;
use crate::domain::models::{CandidateObject, FieldSpec, MergedMapping, Schema, Value};

/// Bind every schema field, stopping at the first coercion failure.
///
/// The binder performs no validation; it only looks values up and runs each
/// field's coercions in order.
pub fn bind(merged: &MergedMapping, schema: &Schema) -> Result<CandidateObject, CoercionError> {
    let mut candidate = CandidateObject::new();
    for spec in schema.fields() {
        let value = bind_field(merged, spec)?;
        candidate.set(spec.name(), value);
    }
    Ok(candidate)
}

/// Value for one field: `None` when the key is absent, otherwise the raw string
/// fed through each coercion in turn.
pub fn bind_field(merged: &MergedMapping, spec: &FieldSpec) -> Result<Option<Value>, CoercionError> {
    let Some(raw) = merged.get(spec.name()) else {
        return Ok(None);
    };

    spec.coercions()
        .iter()
        .try_fold(Value::from(raw), |value, coercion| coercion.apply(value))
        .map(Some)
        .map_err(|err| err.for_field(spec.name()))
}
