//! Integration tests for the failure/fault distinction.
//!
//! Ordinary mismatches are silent (`matched == false`); faults from user
//! matchers, malformed regexes and sequence patterns over non-sequences
//! must reach the caller unmodified.

use apm_rs::{matches, CustomMatch, MatchContext, MatchError, Pattern, ValueType};
use serde_json::{json, Value};

#[test]
fn test_type_mismatches_are_silent_failures() {
    assert!(!matches(&json!(1), &Pattern::literal("1")).unwrap().matched());
    assert!(!matches(&json!("x"), &Pattern::between(0, 9)).unwrap().matched());
    assert!(!matches(&json!(3), &Pattern::mapping([("k", 1)])).unwrap().matched());
    assert!(!matches(&json!(3), &Pattern::regex(".*").unwrap()).unwrap().matched());
}

#[test]
fn test_malformed_regex_is_reported_at_construction() {
    let err = Pattern::regex("(unclosed").unwrap_err();
    match err {
        MatchError::InvalidRegex { pattern, .. } => assert_eq!(pattern, "(unclosed"),
        other => panic!("unexpected error: {other:?}"),
    }

    let err = Pattern::regex_with_flags("ok", "no-such-flag").unwrap_err();
    assert!(matches!(err, MatchError::InvalidRegex { .. }));
}

#[test]
fn test_sequence_pattern_over_non_sequence_faults() {
    let pattern = Pattern::sequence([Pattern::wildcard()]);
    let err = matches(&json!({"a": 1}), &pattern).unwrap_err();
    assert_eq!(err, MatchError::not_a_sequence(ValueType::Object));

    let err = matches(&json!(1.5), &Pattern::each(Pattern::wildcard())).unwrap_err();
    assert_eq!(err, MatchError::not_a_sequence(ValueType::Float));

    let err = matches(&json!(null), &Pattern::remaining(Pattern::wildcard(), 0)).unwrap_err();
    assert_eq!(err, MatchError::not_a_sequence(ValueType::Null));
}

#[test]
fn test_fault_propagates_through_combinators() {
    // a fault is never converted into a plain failure, even where a
    // combinator could otherwise still succeed
    let faulting = Pattern::each(Pattern::wildcard());
    let pattern = Pattern::wildcard().and_(faulting.clone());
    assert!(matches(&json!(1), &pattern).is_err());

    let pattern = faulting.or_(Pattern::wildcard());
    assert!(matches(&json!(1), &pattern).is_err());
}

#[derive(Debug)]
struct FailingMatcher;

impl CustomMatch for FailingMatcher {
    fn pattern_match(&self, _value: &Value, _ctx: &mut MatchContext) -> apm_rs::Result<bool> {
        Err(MatchError::custom("backend unavailable"))
    }

    fn describe(&self) -> String {
        "failing".to_string()
    }
}

#[test]
fn test_custom_matcher_errors_propagate_unmodified() {
    let pattern = Pattern::custom(FailingMatcher);
    let err = matches(&json!(1), &pattern).unwrap_err();
    assert_eq!(err, MatchError::custom("backend unavailable"));

    // nested inside structure, still propagates
    let pattern = Pattern::mapping([("field", Pattern::custom(FailingMatcher))]);
    let err = matches(&json!({"field": 1}), &pattern).unwrap_err();
    assert_eq!(err, MatchError::custom("backend unavailable"));
}

#[derive(Debug)]
struct RangeMatcher {
    max: i64,
}

impl CustomMatch for RangeMatcher {
    fn pattern_match(&self, value: &Value, ctx: &mut MatchContext) -> apm_rs::Result<bool> {
        match value.as_i64() {
            Some(n) if n <= self.max => {
                ctx.bind("checked", value.clone());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[test]
fn test_custom_matcher_participates_in_rollback() {
    // the custom node's capture is discarded when a sibling fails
    let pattern = Pattern::mapping([
        ("n", Pattern::custom(RangeMatcher { max: 10 })),
        ("tag", Pattern::literal("expected")),
    ]);
    let result = matches(&json!({"n": 5, "tag": "other"}), &pattern).unwrap();
    assert!(!result.matched());
    assert!(result.captures().is_empty());

    let result = matches(&json!({"n": 5, "tag": "expected"}), &pattern).unwrap();
    assert!(result.matched());
    assert_eq!(result.capture("checked").unwrap(), &json!(5));
}

#[test]
fn test_capture_lookup_miss_is_distinct() {
    let result = matches(&json!(1), &Pattern::wildcard()).unwrap();
    assert!(result.matched());
    let err = result.capture("never_bound").unwrap_err();
    assert_eq!(err, MatchError::no_such_capture("never_bound"));

    let failed = matches(&json!(1), &Pattern::literal(2)).unwrap();
    assert!(!failed.matched());
    let err = failed.capture("anything").unwrap_err();
    assert_eq!(err, MatchError::no_such_capture("anything"));
}

#[test]
fn test_predicate_panic_propagates() {
    let pattern = Pattern::check(|_| panic!("user predicate fault"));
    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _ = matches(&json!(1), &pattern);
    }));
    assert!(outcome.is_err());
}
