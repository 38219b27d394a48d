//! Declarative structural pattern matching for JSON-like values
//!
//! This library decides whether an arbitrary runtime value (scalar, mapping,
//! or sequence) satisfies a composable pattern expression and, when it does,
//! collects named sub-values ("captures") encountered along the way.
//! Patterns are built programmatically from typed nodes, never parsed from
//! text, and a tree is immutable once built, so it can be reused across any
//! number of match invocations and shared between threads.
//!
//! # Example
//!
//! ```
//! use apm_rs::{matches, Pattern};
//! use serde_json::json;
//!
//! # fn main() -> apm_rs::Result<()> {
//! let pattern = Pattern::mapping([(
//!     "User",
//!     Pattern::capture(
//!         Pattern::mapping([("FirstName", Pattern::capture(Pattern::wildcard(), "first_name"))]),
//!         "user",
//!     ),
//! )]);
//!
//! let value = json!({"User": {"FirstName": "Jane", "LastName": "Doe"}});
//! let result = matches(&value, &pattern)?;
//!
//! assert!(result.matched());
//! assert_eq!(result.capture("first_name")?, &json!("Jane"));
//! assert_eq!(result.capture("user")?, &json!({"FirstName": "Jane", "LastName": "Doe"}));
//! # Ok(())
//! # }
//! ```
//!
//! # Combinators
//!
//! Patterns compose with [`and_`](Pattern::and_) / [`or_`](Pattern::or_) /
//! [`xor_`](Pattern::xor_), or equivalently the `&` / `|` / `^` operators:
//!
//! ```
//! use apm_rs::{matches, Pattern};
//! use serde_json::json;
//!
//! # fn main() -> apm_rs::Result<()> {
//! let exclusive = Pattern::between(0, 1) ^ Pattern::between(1, 2);
//! assert!(matches(&json!(0), &exclusive)?.matched());
//! // both branches accept 1, so the exclusive-or fails
//! assert!(!matches(&json!(1), &exclusive)?.matched());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]

// Re-export commonly used items
pub use context::MatchContext;
pub use error::{MatchError, Result};
pub use eval::{matches, matches_strict};
pub use pattern::{CustomMatch, Pattern, Predicate, ValueType};
pub use result::MatchResult;

/// Per-invocation match state
pub mod context;

/// Error types
pub mod error;

/// Recursive evaluation engine and top-level entry points
pub mod eval;

/// Pattern representation and builders
pub mod pattern;

/// Match outcome and capture lookup
pub mod result;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber with default settings
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
