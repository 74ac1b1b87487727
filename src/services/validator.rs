//! Validator: runs every constraint and collects every violation.

use crate::domain::models::{CandidateObject, FieldSpec, Schema, Violation};

/// Check all fields of `candidate` against `schema`.
///
/// Fields are visited in declaration order and each field's constraints in
/// declaration order. Nothing short-circuits: a field can contribute several
/// violations and every failing field is reported.
pub fn validate(candidate: &CandidateObject, schema: &Schema) -> Vec<Violation> {
    validate_fields(candidate, schema.fields())
}

/// [`validate`] over an explicit subset of field declarations.
pub fn validate_fields<'a>(
    candidate: &CandidateObject,
    fields: impl IntoIterator<Item = &'a FieldSpec>,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    for spec in fields {
        let value = candidate.get(spec.name());
        if value.is_none() && spec.is_optional() {
            continue;
        }

        for constraint in spec.constraints() {
            if !constraint.check(value) {
                violations.push(Violation::new(
                    spec.name(),
                    constraint.name(),
                    constraint.message(spec.name()),
                    value.cloned(),
                ));
            }
        }
    }

    violations
}
