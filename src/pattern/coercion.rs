//! Implicit coercion of bare values into patterns.
//!
//! Any place a pattern is expected accepts a bare value: scalars become
//! [`Pattern::Literal`], an object becomes a lenient structural mapping of
//! recursively coerced values, and an array becomes a positional structural
//! sequence. Every builder routes through the single [`from_value`] step, so
//! the coercion rule lives in exactly one place.

use crate::pattern::Pattern;
use serde_json::Value;

/// Coerce a bare value into the pattern it implies.
pub fn from_value(value: Value) -> Pattern {
    match value {
        Value::Object(map) => Pattern::Mapping {
            entries: map
                .into_iter()
                .map(|(key, field)| (key, from_value(field)))
                .collect(),
            strict: false,
        },
        Value::Array(items) => Pattern::Sequence(items.into_iter().map(from_value).collect()),
        scalar => Pattern::Literal(scalar),
    }
}

impl From<Value> for Pattern {
    fn from(value: Value) -> Self {
        from_value(value)
    }
}

impl From<&str> for Pattern {
    fn from(value: &str) -> Self {
        Pattern::Literal(Value::from(value))
    }
}

impl From<String> for Pattern {
    fn from(value: String) -> Self {
        Pattern::Literal(Value::from(value))
    }
}

impl From<bool> for Pattern {
    fn from(value: bool) -> Self {
        Pattern::Literal(Value::from(value))
    }
}

impl From<i32> for Pattern {
    fn from(value: i32) -> Self {
        Pattern::Literal(Value::from(value))
    }
}

impl From<i64> for Pattern {
    fn from(value: i64) -> Self {
        Pattern::Literal(Value::from(value))
    }
}

impl From<u64> for Pattern {
    fn from(value: u64) -> Self {
        Pattern::Literal(Value::from(value))
    }
}

impl From<f64> for Pattern {
    fn from(value: f64) -> Self {
        Pattern::Literal(Value::from(value))
    }
}

impl From<Vec<Pattern>> for Pattern {
    fn from(items: Vec<Pattern>) -> Self {
        Pattern::Sequence(items)
    }
}
