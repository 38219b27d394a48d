//! Recursive evaluation of patterns against values.
//!
//! The evaluator walks the pattern tree depth-first against the value tree,
//! threading a [`MatchContext`] by mutable reference. Every node is evaluated
//! through [`eval`], which guarantees the rollback discipline: a failed path
//! leaves the context exactly as it found it, so captures from failed And
//! branches, non-selected Or branches and Xor losers can never leak into the
//! final result.
//!
//! Recursion depth equals pattern nesting depth and is bounded only by the
//! host call stack; there is no explicit depth guard.

use crate::context::MatchContext;
use crate::error::{MatchError, Result};
use crate::pattern::types::ValueType;
use crate::pattern::{ordering, Pattern};
use crate::result::MatchResult;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::trace;

/// Match a value against a pattern with lenient mapping semantics.
///
/// Returns a [`MatchResult`] carrying the committed captures on success. An
/// `Err` is a fault (a user matcher error or a sequence pattern applied to a
/// non-sequence value), never an ordinary mismatch.
///
/// # Examples
///
/// ```
/// use apm_rs::{matches, Pattern};
/// use serde_json::json;
///
/// # fn main() -> apm_rs::Result<()> {
/// let pattern = Pattern::mapping([("foo", 1)]);
/// assert!(matches(&json!({"foo": 1, "bar": 2}), &pattern)?.matched());
/// # Ok(())
/// # }
/// ```
pub fn matches(value: &Value, pattern: &Pattern) -> Result<MatchResult> {
    matches_with(value, pattern, false)
}

/// Match with strict mapping semantics as the invocation-wide default:
/// every lenient mapping node rejects value keys not declared in the
/// pattern. Explicitly strict nodes are unaffected.
pub fn matches_strict(value: &Value, pattern: &Pattern) -> Result<MatchResult> {
    matches_with(value, pattern, true)
}

fn matches_with(value: &Value, pattern: &Pattern, strict: bool) -> Result<MatchResult> {
    let mut ctx = MatchContext::new(strict);
    let matched = eval(pattern, value, &mut ctx)?;
    trace!(%pattern, strict, matched, "evaluated pattern");
    Ok(MatchResult::new(matched, ctx.into_captures()))
}

/// Evaluate one node against a value.
///
/// Contract: on `Ok(false)` the context is restored to its state on entry;
/// on `Ok(true)` every capture bound along the successful path stays
/// committed. Faults propagate without touching the rollback.
pub(crate) fn eval(pattern: &Pattern, value: &Value, ctx: &mut MatchContext) -> Result<bool> {
    let mark = ctx.snapshot();
    let matched = eval_node(pattern, value, ctx)?;
    if !matched {
        ctx.restore(mark);
    }
    Ok(matched)
}

fn eval_node(pattern: &Pattern, value: &Value, ctx: &mut MatchContext) -> Result<bool> {
    match pattern {
        Pattern::Wildcard => Ok(true),
        Pattern::Literal(expected) => Ok(value == expected),
        Pattern::InstanceOf(types) => {
            let actual = ValueType::of(value);
            Ok(types.iter().any(|t| actual.is_instance_of(*t)))
        }
        Pattern::Check(predicate) => Ok(predicate.test(value)),
        Pattern::Regex {
            regex, bind_groups, ..
        } => Ok(eval_regex(regex, *bind_groups, value, ctx)),
        Pattern::Between { low, high } => Ok(ordering::in_range(value, low, high)),
        Pattern::OneOf(candidates) => Ok(candidates.iter().any(|c| c == value)),
        Pattern::Capture { inner, name } => {
            if !eval(inner, value, ctx)? {
                return Ok(false);
            }
            ctx.bind(name.as_ref(), value.clone());
            Ok(true)
        }
        Pattern::Mapping { entries, strict } => eval_mapping(entries, *strict, value, ctx),
        Pattern::Sequence(items) => eval_sequence(items, value, ctx),
        Pattern::Each(inner) => {
            let mut cursor = as_array(value)?.iter();
            Ok(drain_tail(inner, 0, &mut cursor, ctx)?.is_some())
        }
        Pattern::Remaining { inner, at_least } => {
            // A bare Remaining outside a sequence pattern behaves like Each
            // with a minimum element count.
            let mut cursor = as_array(value)?.iter();
            Ok(drain_tail(inner, *at_least, &mut cursor, ctx)?.is_some())
        }
        Pattern::And(left, right) => {
            if !eval(left, value, ctx)? {
                return Ok(false);
            }
            eval(right, value, ctx)
        }
        Pattern::Or(left, right) => {
            if eval(left, value, ctx)? {
                return Ok(true);
            }
            eval(right, value, ctx)
        }
        Pattern::Xor(left, right) => eval_xor(left, right, value, ctx),
        Pattern::Custom(node) => node.pattern_match(value, ctx),
    }
}

/// Both branches are always evaluated: exclusivity requires knowing both
/// outcomes. Each runs against an isolated fork and only the single winner's
/// captures are committed.
fn eval_xor(
    left: &Pattern,
    right: &Pattern,
    value: &Value,
    ctx: &mut MatchContext,
) -> Result<bool> {
    let mut left_ctx = ctx.fork();
    let left_matched = eval(left, value, &mut left_ctx)?;
    let mut right_ctx = ctx.fork();
    let right_matched = eval(right, value, &mut right_ctx)?;

    match (left_matched, right_matched) {
        (true, false) => {
            ctx.commit(left_ctx);
            Ok(true)
        }
        (false, true) => {
            ctx.commit(right_ctx);
            Ok(true)
        }
        _ => Ok(false),
    }
}

fn eval_regex(regex: &Regex, bind_groups: bool, value: &Value, ctx: &mut MatchContext) -> bool {
    let text = match value.as_str() {
        Some(text) => text,
        None => return false,
    };
    let has_named_groups = regex.capture_names().flatten().next().is_some();
    if !(bind_groups && has_named_groups) {
        return regex.is_match(text);
    }
    match regex.captures(text) {
        Some(groups) => {
            for name in regex.capture_names().flatten() {
                if let Some(group) = groups.name(name) {
                    ctx.bind(name, Value::String(group.as_str().to_string()));
                }
            }
            true
        }
        None => false,
    }
}

/// Every key declared in the pattern must be present and match; strict mode
/// additionally rejects undeclared value keys. Strictness is decided per
/// node: the node's own flag, or the invocation-wide default for lenient
/// nodes. A non-object value is an ordinary type mismatch.
fn eval_mapping(
    entries: &BTreeMap<String, Pattern>,
    node_strict: bool,
    value: &Value,
    ctx: &mut MatchContext,
) -> Result<bool> {
    let object = match value.as_object() {
        Some(object) => object,
        None => return Ok(false),
    };
    if (node_strict || ctx.is_strict()) && object.keys().any(|k| !entries.contains_key(k)) {
        return Ok(false);
    }
    for (key, sub_pattern) in entries {
        match object.get(key) {
            Some(field) => {
                if !eval(sub_pattern, field, ctx)? {
                    return Ok(false);
                }
            }
            None => return Ok(false),
        }
    }
    Ok(true)
}

/// The unbounded tail of a sequence pattern: a `Remaining` node, possibly
/// wrapped in `Capture` layers that bind the consumed elements.
struct TailSpec<'a> {
    /// Capture names to bind the consumed tail under, outermost first
    names: Vec<&'a str>,
    inner: &'a Pattern,
    at_least: usize,
}

/// Split a sequence pattern into its fixed prefix and, when the final
/// element is `Remaining` (under any number of `Capture` wrappers), the tail
/// spec. A `Remaining` anywhere else is not recognized as a tail and will be
/// evaluated against a single element like any other node.
fn split_tail(items: &[Pattern]) -> (&[Pattern], Option<TailSpec<'_>>) {
    let Some((last, prefix)) = items.split_last() else {
        return (items, None);
    };
    let mut names = Vec::new();
    let mut node = last;
    loop {
        match node {
            Pattern::Capture { inner, name } => {
                names.push(name.as_ref());
                node = inner;
            }
            Pattern::Remaining { inner, at_least } => {
                return (
                    prefix,
                    Some(TailSpec {
                        names,
                        inner,
                        at_least: *at_least,
                    }),
                );
            }
            _ => return (items, None),
        }
    }
}

/// Pull elements from a single forward cursor: one per fixed prefix
/// position, then either exact exhaustion (checked with one extra pull) or
/// tail consumption. The cursor is never re-read.
fn eval_sequence(items: &[Pattern], value: &Value, ctx: &mut MatchContext) -> Result<bool> {
    let mut cursor = as_array(value)?.iter();
    let (prefix, tail) = split_tail(items);

    for sub_pattern in prefix {
        match cursor.next() {
            Some(element) => {
                if !eval(sub_pattern, element, ctx)? {
                    return Ok(false);
                }
            }
            None => return Ok(false),
        }
    }

    match tail {
        Some(spec) => {
            let consumed = match drain_tail(spec.inner, spec.at_least, &mut cursor, ctx)? {
                Some(consumed) => consumed,
                None => return Ok(false),
            };
            let tail_value = Value::Array(consumed);
            for name in &spec.names {
                ctx.bind(*name, tail_value.clone());
            }
            Ok(true)
        }
        None => Ok(cursor.next().is_none()),
    }
}

/// Drain the cursor to exhaustion, matching every residual element against
/// `inner`. Returns the consumed elements, or `None` when an element fails
/// or fewer than `at_least` remain.
fn drain_tail(
    inner: &Pattern,
    at_least: usize,
    cursor: &mut std::slice::Iter<'_, Value>,
    ctx: &mut MatchContext,
) -> Result<Option<Vec<Value>>> {
    let mut consumed = Vec::new();
    for element in cursor {
        if !eval(inner, element, ctx)? {
            return Ok(None);
        }
        consumed.push(element.clone());
    }
    if consumed.len() < at_least {
        return Ok(None);
    }
    Ok(Some(consumed))
}

fn as_array(value: &Value) -> Result<&Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| MatchError::not_a_sequence(ValueType::of(value)))
}
