//! Error types for size augmentation.
//!
//! Failure classes:
//! - `Config`: a constructor/builder argument could not be resolved. Raised
//!   eagerly from `build()`, never deferred to call time. The message always
//!   starts with `"Expected "` followed by what would have been accepted.
//! - `Input`: data handed to an `augment_*` call is malformed (zero-sized
//!   arrays, mismatched batch lengths, ...).
//! - `Worker`: the worker pool could not run a batch (thread spawn failure).
//!
//! Degenerate geometry is not an error: output sizes are clamped to 1 pixel.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AugmentError {
    /// Bad constructor argument (unsupported type, wrong tuple arity, unknown literal)
    #[error("{0}")]
    Config(String),

    /// Malformed data passed to an augmentation call
    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Worker pool failure: {0}")]
    Worker(String),
}

impl AugmentError {
    /// Builds a `Config` error of the form `Expected <what>, got <got>.`
    pub fn expected(what: impl AsRef<str>, got: impl AsRef<str>) -> Self {
        Self::Config(format!("Expected {}, got {}.", what.as_ref(), got.as_ref()))
    }

    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, AugmentError>;

/// Returns early with an `AugmentError::Input` when the condition does not hold.
macro_rules! ensure_input {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err($crate::error::AugmentError::Input(format!($($arg)+)));
        }
    };
}

pub(crate) use ensure_input;
