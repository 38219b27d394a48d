//! Native ordering between JSON scalar values.
//!
//! Backs the inclusive range check of [`Pattern::between`]. Numbers compare
//! numerically across integer and float representations, strings compare
//! lexicographically, booleans as `false < true`. Values of different kinds
//! are incomparable, which surfaces as a plain match failure.
//!
//! [`Pattern::between`]: crate::pattern::Pattern::between

use serde_json::{Number, Value};
use std::cmp::Ordering;

/// Compare two values under their native ordering.
///
/// Returns `None` when the values are of incomparable kinds.
pub fn value_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => number_cmp(a, b),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Compare numbers exactly when both fit the same integer representation,
/// falling back to `f64` otherwise.
fn number_cmp(a: &Number, b: &Number) -> Option<Ordering> {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return Some(x.cmp(&y));
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return Some(x.cmp(&y));
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.partial_cmp(&y),
        _ => None,
    }
}

/// `low <= value <= high` with inclusive bounds.
///
/// Incomparable kinds are never in range.
pub fn in_range(value: &Value, low: &Value, high: &Value) -> bool {
    matches!(value_cmp(low, value), Some(Ordering::Less | Ordering::Equal))
        && matches!(value_cmp(value, high), Some(Ordering::Less | Ordering::Equal))
}
