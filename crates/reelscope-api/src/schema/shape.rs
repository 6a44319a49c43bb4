//! Runtime shape descriptions for parameters and response bodies.

use serde_json::Value;

/// Primitive value kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// Any JSON string.
    String,
    /// Any JSON number.
    Number,
    /// A whole number. Whole-valued floats are coerced.
    Integer,
    /// `true` or `false`.
    Boolean,
    /// Anything, including absence.
    Unknown,
    /// A string literal out of a fixed set.
    Enum(Vec<String>),
}

/// Primitive shape with an optional default.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveShape {
    /// Value kind.
    pub kind: PrimitiveKind,
    /// Substituted when the value is absent.
    pub default: Option<Value>,
}

/// Object shape with ordered fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectShape {
    /// Declared fields in declaration order.
    pub fields: Vec<(String, Shape)>,
    /// Declared fields may be absent.
    pub partial: bool,
    /// Undeclared fields are kept verbatim.
    pub passthrough: bool,
}

/// Structural description of a JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A single scalar.
    Primitive(PrimitiveShape),
    /// An object with named fields.
    Object(ObjectShape),
    /// A homogeneous array.
    Array(Box<Shape>),
}

impl Shape {
    const fn primitive(kind: PrimitiveKind) -> Self {
        Self::Primitive(PrimitiveShape {
            kind,
            default: None,
        })
    }

    /// String shape.
    #[must_use]
    pub const fn string() -> Self {
        Self::primitive(PrimitiveKind::String)
    }

    /// Number shape.
    #[must_use]
    pub const fn number() -> Self {
        Self::primitive(PrimitiveKind::Number)
    }

    /// Integer shape.
    #[must_use]
    pub const fn integer() -> Self {
        Self::primitive(PrimitiveKind::Integer)
    }

    /// Boolean shape.
    #[must_use]
    pub const fn boolean() -> Self {
        Self::primitive(PrimitiveKind::Boolean)
    }

    /// Shape that accepts any value.
    #[must_use]
    pub const fn unknown() -> Self {
        Self::primitive(PrimitiveKind::Unknown)
    }

    /// String literal out of `options`.
    #[must_use]
    pub fn one_of<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::primitive(PrimitiveKind::Enum(
            options.into_iter().map(Into::into).collect(),
        ))
    }

    /// Strict object shape (no partial, no passthrough).
    #[must_use]
    pub fn object<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, Self)>,
        S: Into<String>,
    {
        Self::Object(ObjectShape {
            fields: fields
                .into_iter()
                .map(|(name, shape)| (name.into(), shape))
                .collect(),
            partial: false,
            passthrough: false,
        })
    }

    /// Array of `element`.
    #[must_use]
    pub fn array(element: Self) -> Self {
        Self::Array(Box::new(element))
    }

    /// Sets the default of a primitive shape. No-op on other shapes.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        if let Self::Primitive(ref mut p) = self {
            p.default = Some(value.into());
        }
        self
    }

    /// Marks every field of an object shape as optional. No-op on other shapes.
    #[must_use]
    pub fn partial(mut self) -> Self {
        if let Self::Object(ref mut o) = self {
            o.partial = true;
        }
        self
    }

    /// Keeps undeclared fields of an object shape. No-op on other shapes.
    #[must_use]
    pub fn passthrough(mut self) -> Self {
        if let Self::Object(ref mut o) = self {
            o.passthrough = true;
        }
        self
    }

    /// Declared default, if any.
    #[must_use]
    pub const fn default_value(&self) -> Option<&Value> {
        match self {
            Self::Primitive(p) => p.default.as_ref(),
            Self::Object(_) | Self::Array(_) => None,
        }
    }

    /// Human-readable description used in validation errors.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Primitive(p) => match &p.kind {
                PrimitiveKind::String => String::from("string"),
                PrimitiveKind::Number => String::from("number"),
                PrimitiveKind::Integer => String::from("integer"),
                PrimitiveKind::Boolean => String::from("boolean"),
                PrimitiveKind::Unknown => String::from("unknown"),
                PrimitiveKind::Enum(options) => format!("one of {options:?}"),
            },
            Self::Object(_) => String::from("object"),
            Self::Array(element) => format!("array of {}", element.describe()),
        }
    }
}

/// Describes a concrete JSON value (or its absence) for error messages.
#[must_use]
pub fn describe_value(value: Option<&Value>) -> String {
    match value {
        None => String::from("nothing"),
        Some(Value::Null) => String::from("null"),
        Some(Value::Bool(b)) => format!("boolean {b}"),
        Some(Value::Number(n)) => format!("number {n}"),
        Some(Value::String(s)) => format!("{s:?}"),
        Some(Value::Array(_)) => String::from("array"),
        Some(Value::Object(_)) => String::from("object"),
    }
}
