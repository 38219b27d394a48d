//! Runtime type classification for JSON values.
//!
//! `ValueType` is the reflection facility behind [`Pattern::instance_of`]:
//! every value classifies into exactly one concrete type, and `Integer` and
//! `Float` are recognized subtypes of `Number`.
//!
//! [`Pattern::instance_of`]: crate::pattern::Pattern::instance_of

use serde_json::Value;
use std::fmt;

/// Runtime type of a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// The `null` value
    Null,
    /// Boolean values
    Bool,
    /// Numbers representable as `i64` or `u64`
    Integer,
    /// Any other finite number
    Float,
    /// Either an integer or a float
    Number,
    /// Text values
    String,
    /// Sequences
    Array,
    /// Mappings
    Object,
}

impl ValueType {
    /// Classify a value into its most specific runtime type.
    ///
    /// Numbers classify as [`ValueType::Integer`] when `serde_json` can
    /// represent them as `i64` or `u64`, otherwise as [`ValueType::Float`].
    /// [`ValueType::Number`] is never returned here; it only appears as an
    /// expected type in `InstanceOf` checks.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    Self::Integer
                } else {
                    Self::Float
                }
            }
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Whether a value of this concrete type is accepted where `expected`
    /// is required, directly or via the subtype relation.
    pub fn is_instance_of(self, expected: ValueType) -> bool {
        self == expected
            || (expected == ValueType::Number
                && matches!(self, ValueType::Integer | ValueType::Float))
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        };
        f.write_str(name)
    }
}
