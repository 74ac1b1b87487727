pub mod field;
pub mod mapping;
pub mod value;
pub mod violation;

pub use field::{BoundField, CandidateObject, Coercion, FieldSpec, FromValue, Schema};
pub use mapping::{Layer, MergedMapping, RawMapping, DEFAULT_FILE, LOCAL_FILE, PRIMARY_FILE};
pub use value::{inspect, Value};
pub use violation::Violation;
