//! Schema/validation engine.
//!
//! Shapes are plain runtime data, so validation does not depend on any
//! static model type. Validated values are `serde_json::Value`s that can be
//! deserialized into the typed models afterwards.

mod shape;
mod validate;

pub use shape::{ObjectShape, PrimitiveKind, PrimitiveShape, Shape, describe_value};
pub use validate::{ValidationMode, Validator, validate, validate_parameters};
