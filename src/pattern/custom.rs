//! Extension point for user-defined pattern nodes.

use crate::context::MatchContext;
use crate::error::Result;
use serde_json::Value;
use std::fmt::Debug;

/// Trait for user-defined pattern nodes.
///
/// Implementations are embedded into a pattern tree via
/// [`Pattern::custom`](crate::pattern::Pattern::custom) and dispatched to by
/// the evaluator exactly like built-in node kinds. An error returned here
/// propagates unmodified to the caller of [`matches`](crate::matches); an
/// `Ok(false)` is an ordinary match failure.
///
/// Captures committed through the context are subject to the same rollback
/// discipline as built-in nodes: they survive only if the surrounding
/// evaluation path ultimately succeeds.
pub trait CustomMatch: Debug + Send + Sync {
    /// Match a value under the given context.
    fn pattern_match(&self, value: &Value, ctx: &mut MatchContext) -> Result<bool>;

    /// Get a human-readable description of the node.
    fn describe(&self) -> String {
        "<custom>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct IsEmpty;

    impl CustomMatch for IsEmpty {
        fn pattern_match(&self, value: &Value, _ctx: &mut MatchContext) -> Result<bool> {
            Ok(match value {
                Value::String(s) => s.is_empty(),
                Value::Array(a) => a.is_empty(),
                Value::Object(o) => o.is_empty(),
                _ => false,
            })
        }

        fn describe(&self) -> String {
            "is_empty".to_string()
        }
    }

    #[test]
    fn test_custom_node_dispatch() {
        let mut ctx = MatchContext::new(false);
        let node = IsEmpty;
        assert!(node.pattern_match(&serde_json::json!(""), &mut ctx).unwrap());
        assert!(!node.pattern_match(&serde_json::json!("x"), &mut ctx).unwrap());
        assert_eq!(node.describe(), "is_empty");
    }
}
