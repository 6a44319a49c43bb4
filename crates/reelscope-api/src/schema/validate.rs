//! Shape validation with default substitution and passthrough.

use serde_json::{Map, Number, Value};

use super::shape::{ObjectShape, PrimitiveKind, PrimitiveShape, Shape, describe_value};
use crate::error::ValidationError;
use crate::registry::ParameterSpec;

/// How wrong-typed present values are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// Reject wrong-typed values.
    #[default]
    Strict,
    /// Pass wrong-typed values through unchanged.
    Lenient,
}

/// Validates JSON values against [`Shape`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    mode: ValidationMode,
}

impl Validator {
    /// Creates a validator with the given mode.
    #[must_use]
    pub const fn new(mode: ValidationMode) -> Self {
        Self { mode }
    }

    /// Validation mode.
    #[must_use]
    pub const fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Validates a present value.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first offending location.
    pub fn validate(&self, shape: &Shape, value: &Value) -> Result<Value, ValidationError> {
        self.check(shape, value, "$")
    }

    /// Validates a possibly absent value; `None` models an undefined input.
    ///
    /// Absent values resolve to the declared default, or to `None` for
    /// `unknown` shapes.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the value is absent with no default,
    /// or when it fails its shape.
    pub fn resolve(
        &self,
        shape: &Shape,
        value: Option<&Value>,
    ) -> Result<Option<Value>, ValidationError> {
        self.resolve_at(shape, value, "$")
    }

    /// Validates supplied parameters against their specs.
    ///
    /// Defaults are applied to absent parameters. Supplied entries without a
    /// matching spec are kept unchanged.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when a required parameter is missing or a
    /// value fails its shape.
    pub fn validate_parameters<'a, I>(
        &self,
        specs: I,
        supplied: &Map<String, Value>,
    ) -> Result<Map<String, Value>, ValidationError>
    where
        I: IntoIterator<Item = &'a ParameterSpec>,
    {
        let mut resolved = Map::new();
        for spec in specs {
            let path = format!("{}.{}", spec.location.as_str(), spec.name);
            let value = supplied.get(&spec.name);
            let outcome = match self.resolve_at(&spec.shape, value, &path) {
                Ok(outcome) => outcome,
                // Missing optional parameters simply stay unset.
                Err(_) if value.is_none() && !spec.is_required() => None,
                Err(e) => return Err(e),
            };
            match outcome {
                Some(v) => {
                    resolved.insert(spec.name.clone(), v);
                }
                None if spec.is_required() => {
                    return Err(ValidationError::new(
                        path,
                        spec.shape.describe(),
                        describe_value(None),
                    ));
                }
                None => {}
            }
        }
        for (name, value) in supplied {
            if !resolved.contains_key(name) {
                resolved.insert(name.clone(), value.clone());
            }
        }
        Ok(resolved)
    }

    fn resolve_at(
        &self,
        shape: &Shape,
        value: Option<&Value>,
        path: &str,
    ) -> Result<Option<Value>, ValidationError> {
        if let Some(v) = value {
            return self.check(shape, v, path).map(Some);
        }
        match shape {
            Shape::Primitive(PrimitiveShape {
                default: Some(d), ..
            }) => Ok(Some(d.clone())),
            Shape::Primitive(PrimitiveShape {
                kind: PrimitiveKind::Unknown,
                ..
            }) => Ok(None),
            _ => Err(ValidationError::new(
                path,
                shape.describe(),
                describe_value(None),
            )),
        }
    }

    fn check(&self, shape: &Shape, value: &Value, path: &str) -> Result<Value, ValidationError> {
        match shape {
            Shape::Primitive(p) => self.check_primitive(&p.kind, value, path),
            Shape::Object(o) => self.check_object(o, shape, value, path),
            Shape::Array(element) => {
                let Some(items) = value.as_array() else {
                    return self.mismatch(shape, value, path);
                };
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.check(element, item, &format!("{path}[{i}]")))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Array)
            }
        }
    }

    fn check_primitive(
        &self,
        kind: &PrimitiveKind,
        value: &Value,
        path: &str,
    ) -> Result<Value, ValidationError> {
        let accepted = match (kind, value) {
            (PrimitiveKind::Unknown, _)
            | (PrimitiveKind::String, Value::String(_))
            | (PrimitiveKind::Number, Value::Number(_))
            | (PrimitiveKind::Boolean, Value::Bool(_)) => Some(value.clone()),
            (PrimitiveKind::Integer, Value::Number(n)) => coerce_integer(n).map(Value::Number),
            (PrimitiveKind::Enum(options), Value::String(s)) if options.contains(s) => {
                Some(value.clone())
            }
            _ => None,
        };
        match accepted {
            Some(v) => Ok(v),
            None => self.mismatch(
                &Shape::Primitive(PrimitiveShape {
                    kind: kind.clone(),
                    default: None,
                }),
                value,
                path,
            ),
        }
    }

    fn check_object(
        &self,
        object: &ObjectShape,
        shape: &Shape,
        value: &Value,
        path: &str,
    ) -> Result<Value, ValidationError> {
        let Some(input) = value.as_object() else {
            return self.mismatch(shape, value, path);
        };

        let mut output = Map::new();
        for (name, field) in &object.fields {
            let field_path = format!("{path}.{name}");
            let present = input.get(name);
            if present.is_none() && object.partial {
                continue;
            }
            if let Some(v) = self.resolve_at(field, present, &field_path)? {
                output.insert(name.clone(), v);
            }
        }

        if object.passthrough {
            for (name, v) in input {
                if !output.contains_key(name) && !object.fields.iter().any(|(f, _)| f == name) {
                    output.insert(name.clone(), v.clone());
                }
            }
        }

        Ok(Value::Object(output))
    }

    fn mismatch(&self, shape: &Shape, value: &Value, path: &str) -> Result<Value, ValidationError> {
        match self.mode {
            ValidationMode::Lenient => {
                tracing::trace!(path, expected = %shape.describe(), "Passing through mismatched value");
                Ok(value.clone())
            }
            ValidationMode::Strict => Err(ValidationError::new(
                path,
                shape.describe(),
                describe_value(Some(value)),
            )),
        }
    }
}

/// Accepts integral numbers, coercing whole-valued floats (`3.0` -> `3`).
#[allow(
    clippy::as_conversions,
    clippy::cast_possible_truncation,
    clippy::float_cmp
)]
fn coerce_integer(n: &Number) -> Option<Number> {
    if n.is_i64() || n.is_u64() {
        return Some(n.clone());
    }
    let f = n.as_f64()?;
    // Bounds keep the cast below exact.
    let in_range = f.is_finite() && f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0;
    in_range.then(|| Number::from(f as i64))
}

/// Validates `value` against `shape` in strict mode.
///
/// # Errors
///
/// Returns a [`ValidationError`] naming the first offending location.
pub fn validate(shape: &Shape, value: &Value) -> Result<Value, ValidationError> {
    Validator::default().validate(shape, value)
}

/// Validates supplied parameters in strict mode.
///
/// # Errors
///
/// Returns a [`ValidationError`] when a required parameter is missing or a
/// value fails its shape.
pub fn validate_parameters<'a, I>(
    specs: I,
    supplied: &Map<String, Value>,
) -> Result<Map<String, Value>, ValidationError>
where
    I: IntoIterator<Item = &'a ParameterSpec>,
{
    Validator::default().validate_parameters(specs, supplied)
}
