//! Per-invocation match state.
//!
//! A [`MatchContext`] is created fresh for every top-level match call and
//! threaded by mutable reference through recursive evaluation. It carries the
//! strictness flag and the capture accumulator, and supports the
//! snapshot/restore and fork/commit discipline the combinator algebra needs
//! to keep captures from failed or non-selected branches out of the result.

use serde_json::Value;
use std::collections::BTreeMap;

/// Mutable state threaded through one match invocation.
#[derive(Debug, Clone)]
pub struct MatchContext {
    strict: bool,
    captures: BTreeMap<String, Value>,
}

/// Saved capture state used to roll back a failed evaluation path.
#[derive(Debug)]
pub(crate) struct Snapshot {
    captures: BTreeMap<String, Value>,
}

impl MatchContext {
    /// Create a fresh context with the given strictness default.
    pub fn new(strict: bool) -> Self {
        Self {
            strict,
            captures: BTreeMap::new(),
        }
    }

    /// Whether strict mapping matching is the invocation-wide default.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Bind a capture name to a value. A later write to the same name
    /// overwrites the earlier one.
    pub fn bind(&mut self, name: impl Into<String>, value: Value) {
        self.captures.insert(name.into(), value);
    }

    /// Look up a capture bound earlier on the current path.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.captures.get(name)
    }

    /// Record the capture state so a failed sub-evaluation can be undone.
    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            captures: self.captures.clone(),
        }
    }

    /// Discard every capture bound since the snapshot was taken.
    pub(crate) fn restore(&mut self, snapshot: Snapshot) {
        self.captures = snapshot.captures;
    }

    /// Create an isolated copy for evaluating an alternative branch.
    pub(crate) fn fork(&self) -> MatchContext {
        self.clone()
    }

    /// Adopt the captures committed in a fork.
    pub(crate) fn commit(&mut self, fork: MatchContext) {
        self.captures = fork.captures;
    }

    /// Consume the context, yielding the committed captures.
    pub(crate) fn into_captures(self) -> BTreeMap<String, Value> {
        self.captures
    }
}
