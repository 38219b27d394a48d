//! Error types for pattern construction and evaluation.
//!
//! Ordinary match failure is never an error: a shape, type, count, predicate
//! or key-set mismatch simply produces an unmatched [`MatchResult`]. The
//! variants here cover the fault paths that must reach the caller unmodified.
//!
//! [`MatchResult`]: crate::result::MatchResult

use crate::pattern::ValueType;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MatchError>;

/// Faults raised while building or evaluating patterns.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    /// Regular expression source failed to compile.
    #[error("invalid regex pattern '{pattern}': {error}")]
    InvalidRegex {
        /// The offending regex source
        pattern: String,
        /// Compiler error description
        error: String,
    },

    /// A sequence pattern was applied to a value that is not a sequence.
    #[error("cannot match a sequence pattern against a value of type {value_type}")]
    NotASequence {
        /// Runtime type of the offending value
        value_type: ValueType,
    },

    /// Capture lookup for a name that was never bound, or on a failed result.
    #[error("no such capture: {name}")]
    NoSuchCapture {
        /// The requested capture name
        name: String,
    },

    /// Fault raised by a user-supplied [`CustomMatch`] node.
    ///
    /// [`CustomMatch`]: crate::pattern::CustomMatch
    #[error("custom matcher error: {0}")]
    Custom(String),
}

impl MatchError {
    /// Create an invalid regex error from the compiler's diagnostic.
    pub fn invalid_regex(pattern: impl Into<String>, error: impl std::fmt::Display) -> Self {
        Self::InvalidRegex {
            pattern: pattern.into(),
            error: error.to_string(),
        }
    }

    /// Create a not-a-sequence error for the given runtime type.
    pub fn not_a_sequence(value_type: ValueType) -> Self {
        Self::NotASequence { value_type }
    }

    /// Create a missing-capture error.
    pub fn no_such_capture(name: impl Into<String>) -> Self {
        Self::NoSuchCapture { name: name.into() }
    }

    /// Create a custom matcher error.
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }
}
