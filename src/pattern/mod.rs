//! Pattern representation and builders.
//!
//! A [`Pattern`] is an immutable tree of tagged nodes describing an
//! acceptance criterion for a value. Trees are built once through the
//! constructors here (or the implicit coercions in [`coercion`]) and reused
//! across any number of match invocations; the evaluator never mutates them.

pub mod coercion;
pub mod custom;
pub mod ordering;
pub mod types;

pub use custom::CustomMatch;
pub use types::ValueType;

use crate::error::{MatchError, Result};
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor};
use std::sync::Arc;

/// User-supplied predicate wrapped for use in [`Pattern::Check`].
#[derive(Clone)]
pub struct Predicate(Arc<dyn Fn(&Value) -> bool + Send + Sync>);

impl Predicate {
    pub(crate) fn new(f: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Apply the predicate. A panic inside the closure propagates to the
    /// caller of the top-level match, uncaught.
    pub fn test(&self, value: &Value) -> bool {
        (self.0)(value)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(<fn>)")
    }
}

/// Immutable tree of tagged nodes describing an acceptance criterion.
///
/// Build trees with the constructors (`Pattern::literal`,
/// `Pattern::capture`, ...) and combine them with [`and_`](Pattern::and_) /
/// [`or_`](Pattern::or_) / [`xor_`](Pattern::xor_) or the `&` / `|` / `^`
/// operators, then evaluate with [`matches`](crate::matches).
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Succeeds iff the value equals the literal by native equality.
    Literal(Value),

    /// Succeeds iff the value's runtime type matches any listed type,
    /// directly or via the `Integer`/`Float` ⊆ `Number` subtype relation.
    InstanceOf(Vec<ValueType>),

    /// Succeeds iff the user predicate returns true.
    Check(Predicate),

    /// Succeeds iff the compiled expression matches the entire string value.
    Regex {
        /// The compiled, fully anchored expression
        regex: Regex,
        /// The source the pattern was built from, for display
        source: Arc<str>,
        /// Whether named capture groups bind as captures on success
        bind_groups: bool,
    },

    /// Succeeds iff `low <= value <= high` under the value's native
    /// ordering, bounds inclusive.
    Between {
        /// Inclusive lower bound
        low: Value,
        /// Inclusive upper bound
        high: Value,
    },

    /// Succeeds iff the value equals any candidate by native equality.
    OneOf(Vec<Value>),

    /// Evaluates the inner pattern and, on success, binds the matched
    /// sub-value under the given name.
    Capture {
        /// Pattern the value must satisfy
        inner: Box<Pattern>,
        /// Capture name to bind on success
        name: Arc<str>,
    },

    /// Structural mapping match: every declared key must be present and its
    /// value must match recursively. Strict mode additionally rejects value
    /// keys not declared in the pattern.
    Mapping {
        /// Per-key sub-patterns
        entries: BTreeMap<String, Pattern>,
        /// Whether undeclared value keys fail the node
        strict: bool,
    },

    /// Positional sequence match over a single forward cursor. A trailing
    /// [`Pattern::Remaining`] element consumes the unbounded tail; without
    /// one the value must have exactly as many elements as the pattern.
    Sequence(Vec<Pattern>),

    /// Succeeds iff every element of the sequence value matches the inner
    /// pattern.
    Each(Box<Pattern>),

    /// Tail element of a sequence pattern: consumes every element from its
    /// position to exhaustion, requiring at least `at_least` of them, each
    /// matching the inner pattern.
    Remaining {
        /// Pattern every residual element must satisfy
        inner: Box<Pattern>,
        /// Minimum number of residual elements
        at_least: usize,
    },

    /// Conjunction: short-circuits on left failure; the right operand sees
    /// and may overwrite the left operand's captures.
    And(Box<Pattern>, Box<Pattern>),

    /// Disjunction: short-circuits on left success; only the selected
    /// branch's captures survive.
    Or(Box<Pattern>, Box<Pattern>),

    /// Exclusive or: both branches are always evaluated; succeeds iff
    /// exactly one of them does, committing only the winner's captures.
    Xor(Box<Pattern>, Box<Pattern>),

    /// Always succeeds.
    Wildcard,

    /// User-defined node implementing [`CustomMatch`].
    Custom(Arc<dyn CustomMatch>),
}

impl Pattern {
    /// Pattern matching a value by native equality.
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    /// Pattern matching any value of the listed runtime types.
    pub fn instance_of(types: impl IntoIterator<Item = ValueType>) -> Self {
        Self::InstanceOf(types.into_iter().collect())
    }

    /// Pattern delegating the decision to a user predicate.
    pub fn check(predicate: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Self::Check(Predicate::new(predicate))
    }

    /// Full-string regex pattern. Named capture groups bind as captures.
    ///
    /// The source is anchored to span the entire string: the value matches
    /// only when the whole of it is consumed. Append `.*` to accept an
    /// arbitrary suffix.
    pub fn regex(source: &str) -> Result<Self> {
        Self::regex_with_flags(source, "")
    }

    /// Full-string regex pattern with inline flags (e.g. `"i"` for
    /// case-insensitive, `"is"` to also let `.` match newlines).
    pub fn regex_with_flags(source: &str, flags: &str) -> Result<Self> {
        let anchored = if flags.is_empty() {
            format!(r"\A(?:{source})\z")
        } else {
            format!(r"\A(?{flags}:{source})\z")
        };
        let regex =
            Regex::new(&anchored).map_err(|e| MatchError::invalid_regex(source, e))?;
        Ok(Self::Regex {
            regex,
            source: Arc::from(source),
            bind_groups: true,
        })
    }

    /// For a [`Pattern::Regex`] node, disable binding of named capture
    /// groups. No effect on other node kinds.
    pub fn without_group_bindings(mut self) -> Self {
        if let Self::Regex { bind_groups, .. } = &mut self {
            *bind_groups = false;
        }
        self
    }

    /// Pattern matching values within an inclusive range.
    pub fn between(low: impl Into<Value>, high: impl Into<Value>) -> Self {
        Self::Between {
            low: low.into(),
            high: high.into(),
        }
    }

    /// Pattern matching any of the candidate values.
    pub fn one_of<V: Into<Value>>(candidates: impl IntoIterator<Item = V>) -> Self {
        Self::OneOf(candidates.into_iter().map(Into::into).collect())
    }

    /// Bind the sub-value matched by `inner` under `name`.
    pub fn capture(inner: impl Into<Pattern>, name: impl Into<Arc<str>>) -> Self {
        Self::Capture {
            inner: Box::new(inner.into()),
            name: name.into(),
        }
    }

    /// Lenient structural mapping pattern: undeclared value keys are
    /// ignored.
    pub fn mapping<K, P>(entries: impl IntoIterator<Item = (K, P)>) -> Self
    where
        K: Into<String>,
        P: Into<Pattern>,
    {
        Self::Mapping {
            entries: entries
                .into_iter()
                .map(|(k, p)| (k.into(), p.into()))
                .collect(),
            strict: false,
        }
    }

    /// Strict structural mapping pattern: the value's key set must equal the
    /// pattern's exactly. Strictness belongs to this node only and does not
    /// propagate into nested mapping sub-patterns.
    pub fn strict<K, P>(entries: impl IntoIterator<Item = (K, P)>) -> Self
    where
        K: Into<String>,
        P: Into<Pattern>,
    {
        Self::Mapping {
            entries: entries
                .into_iter()
                .map(|(k, p)| (k.into(), p.into()))
                .collect(),
            strict: true,
        }
    }

    /// Positional structural sequence pattern.
    pub fn sequence<P: Into<Pattern>>(items: impl IntoIterator<Item = P>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Pattern requiring every element of a sequence to match `inner`.
    pub fn each(inner: impl Into<Pattern>) -> Self {
        Self::Each(Box::new(inner.into()))
    }

    /// Unbounded-tail element for sequence patterns: consumes all residual
    /// elements, requiring at least `at_least` of them, each matching
    /// `inner`. Only meaningful as the final element of a sequence pattern.
    pub fn remaining(inner: impl Into<Pattern>, at_least: usize) -> Self {
        Self::Remaining {
            inner: Box::new(inner.into()),
            at_least,
        }
    }

    /// Pattern accepting any value.
    pub fn wildcard() -> Self {
        Self::Wildcard
    }

    /// Embed a user-defined node.
    pub fn custom(node: impl CustomMatch + 'static) -> Self {
        Self::Custom(Arc::new(node))
    }

    /// Conjunction of `self` and `other` (also available as `&`).
    pub fn and_(self, other: impl Into<Pattern>) -> Self {
        Self::And(Box::new(self), Box::new(other.into()))
    }

    /// Disjunction of `self` and `other` (also available as `|`).
    pub fn or_(self, other: impl Into<Pattern>) -> Self {
        Self::Or(Box::new(self), Box::new(other.into()))
    }

    /// Exclusive-or of `self` and `other` (also available as `^`).
    pub fn xor_(self, other: impl Into<Pattern>) -> Self {
        Self::Xor(Box::new(self), Box::new(other.into()))
    }
}

impl BitAnd for Pattern {
    type Output = Pattern;

    fn bitand(self, rhs: Pattern) -> Pattern {
        self.and_(rhs)
    }
}

impl BitOr for Pattern {
    type Output = Pattern;

    fn bitor(self, rhs: Pattern) -> Pattern {
        self.or_(rhs)
    }
}

impl BitXor for Pattern {
    type Output = Pattern;

    fn bitxor(self, rhs: Pattern) -> Pattern {
        self.xor_(rhs)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::InstanceOf(types) => {
                let names: Vec<String> = types.iter().map(ToString::to_string).collect();
                write!(f, "instance of [{}]", names.join(", "))
            }
            Self::Check(_) => f.write_str("check(<fn>)"),
            Self::Regex { source, .. } => write!(f, "regex /{source}/"),
            Self::Between { low, high } => write!(f, "between {low} and {high}"),
            Self::OneOf(candidates) => {
                let items: Vec<String> = candidates.iter().map(ToString::to_string).collect();
                write!(f, "one of [{}]", items.join(", "))
            }
            Self::Capture { inner, name } => write!(f, "({inner} as {name})"),
            Self::Mapping { entries, strict } => {
                if *strict {
                    f.write_str("strict ")?;
                }
                let fields: Vec<String> = entries
                    .iter()
                    .map(|(k, p)| format!("{k:?}: {p}"))
                    .collect();
                write!(f, "{{{}}}", fields.join(", "))
            }
            Self::Sequence(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            Self::Each(inner) => write!(f, "each {inner}"),
            Self::Remaining { inner, at_least } => {
                write!(f, "remaining {inner} (at least {at_least})")
            }
            Self::And(left, right) => write!(f, "({left} AND {right})"),
            Self::Or(left, right) => write!(f, "({left} OR {right})"),
            Self::Xor(left, right) => write!(f, "({left} XOR {right})"),
            Self::Wildcard => f.write_str("_"),
            Self::Custom(node) => f.write_str(&node.describe()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_pattern_is_send_sync() {
        assert_send_sync::<Pattern>();
    }

    #[test]
    fn test_invalid_regex_is_a_construction_error() {
        let err = Pattern::regex("[unclosed").unwrap_err();
        assert!(matches!(err, MatchError::InvalidRegex { .. }));
    }

    #[test]
    fn test_regex_flags() {
        let pattern = Pattern::regex_with_flags("hello", "i").unwrap();
        if let Pattern::Regex { regex, .. } = &pattern {
            assert!(regex.is_match("HELLO"));
            assert!(!regex.is_match("HELLO THERE"));
        } else {
            panic!("expected a regex node");
        }
    }

    #[test]
    fn test_display() {
        let pattern = Pattern::literal(1).and_(Pattern::wildcard());
        assert_eq!(pattern.to_string(), "(1 AND _)");

        let pattern = Pattern::capture(Pattern::between(0, 9), "digit");
        assert_eq!(pattern.to_string(), "(between 0 and 9 as digit)");

        let pattern = Pattern::strict([("a", Pattern::one_of([1, 2]))]);
        assert_eq!(pattern.to_string(), "strict {\"a\": one of [1, 2]}");

        let pattern = Pattern::sequence([
            Pattern::literal(1),
            Pattern::remaining(Pattern::wildcard(), 2),
        ]);
        assert_eq!(pattern.to_string(), "[1, remaining _ (at least 2)]");
    }

    #[test]
    fn test_operator_sugar_builds_combinators() {
        let both = Pattern::literal(1) & Pattern::instance_of([ValueType::Integer]);
        assert!(matches!(both, Pattern::And(_, _)));

        let either = Pattern::literal(1) | Pattern::literal(2);
        assert!(matches!(either, Pattern::Or(_, _)));

        let exclusive = Pattern::between(0, 1) ^ Pattern::between(1, 2);
        assert!(matches!(exclusive, Pattern::Xor(_, _)));
    }

    #[test]
    fn test_builders_coerce_bare_values() {
        let pattern = Pattern::mapping([("id", 7)]);
        if let Pattern::Mapping { entries, strict } = &pattern {
            assert!(!strict);
            assert!(matches!(entries["id"], Pattern::Literal(_)));
        } else {
            panic!("expected a mapping node");
        }

        let pattern = Pattern::capture(json!({"a": 1}), "obj");
        if let Pattern::Capture { inner, .. } = &pattern {
            assert!(matches!(**inner, Pattern::Mapping { .. }));
        } else {
            panic!("expected a capture node");
        }
    }
}
