//! Error types for the lexmatch library.
//!
//! All fallible operations return [`LexmatchError`] through the crate-wide
//! [`Result`] alias. Errors are reported at the point of the offending call;
//! no partial computation continues past one.
//!
//! # Examples
//!
//! ```
//! use lexmatch::error::{LexmatchError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(LexmatchError::invalid_argument("degree must be at least 1"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

/// The main error type for lexmatch operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexmatchError {
    /// A caller-supplied argument or configuration is unusable
    /// (n-gram degree < 1, missing alignment costs, unknown combination mode,
    /// unconfigured length bounds, ...).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A mathematically undefined quantity was requested, e.g. a
    /// Kullback-Leibler divergence against a reference with zero support.
    #[error("Domain error: {0}")]
    Domain(String),

    /// Building a multi-pattern substring automaton failed.
    #[error("Pattern error: {0}")]
    Pattern(String),
}

/// Result type alias for operations that may fail with LexmatchError.
pub type Result<T> = std::result::Result<T, LexmatchError>;

impl LexmatchError {
    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        LexmatchError::InvalidArgument(msg.into())
    }

    /// Create a new domain error.
    pub fn domain<S: Into<String>>(msg: S) -> Self {
        LexmatchError::Domain(msg.into())
    }

    /// Create a new pattern error.
    pub fn pattern<S: Into<String>>(msg: S) -> Self {
        LexmatchError::Pattern(msg.into())
    }

    /// Whether this error reports a bad argument or configuration.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, LexmatchError::InvalidArgument(_))
    }

    /// Whether this error reports an undefined mathematical quantity.
    pub fn is_domain(&self) -> bool {
        matches!(self, LexmatchError::Domain(_))
    }
}
