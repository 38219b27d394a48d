//! Match outcome and capture lookup.

use crate::error::{MatchError, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::ops::Index;

/// Outcome of a top-level match: a success flag plus the captures committed
/// on the successful path.
///
/// Captures are only reachable when the match succeeded; a failed result
/// carries none, and any lookup on it reports
/// [`MatchError::NoSuchCapture`].
///
/// # Examples
///
/// ```
/// use apm_rs::{matches, Pattern};
/// use serde_json::json;
///
/// # fn main() -> apm_rs::Result<()> {
/// let pattern = Pattern::capture(Pattern::instance_of([apm_rs::ValueType::String]), "word");
/// let result = matches(&json!("hello"), &pattern)?;
///
/// assert!(result.matched());
/// assert_eq!(result.capture("word")?, &json!("hello"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    matched: bool,
    captures: BTreeMap<String, Value>,
}

impl MatchResult {
    /// Create a result from the evaluator's outcome. Captures of a failed
    /// evaluation are discarded so they can never leak out.
    pub(crate) fn new(matched: bool, captures: BTreeMap<String, Value>) -> Self {
        Self {
            matched,
            captures: if matched { captures } else { BTreeMap::new() },
        }
    }

    /// Create a failed result.
    pub fn not_matched() -> Self {
        Self {
            matched: false,
            captures: BTreeMap::new(),
        }
    }

    /// Whether the value satisfied the pattern.
    pub fn matched(&self) -> bool {
        self.matched
    }

    /// Look up a capture by name.
    ///
    /// Returns [`MatchError::NoSuchCapture`] for a name that was never
    /// bound, and for any lookup on a failed result.
    pub fn capture(&self, name: &str) -> Result<&Value> {
        self.captures
            .get(name)
            .ok_or_else(|| MatchError::no_such_capture(name))
    }

    /// Look up a capture by name, returning `None` on a miss.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.captures.get(name)
    }

    /// All captures committed by the match.
    pub fn captures(&self) -> &BTreeMap<String, Value> {
        &self.captures
    }
}

impl From<MatchResult> for bool {
    fn from(result: MatchResult) -> bool {
        result.matched
    }
}

impl Index<&str> for MatchResult {
    type Output = Value;

    /// Panics when the capture is absent; use [`MatchResult::capture`] for a
    /// fallible lookup.
    fn index(&self, name: &str) -> &Value {
        self.captures
            .get(name)
            .unwrap_or_else(|| panic!("no such capture: {name}"))
    }
}
