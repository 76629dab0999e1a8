//! Type conversion error types.

use thiserror::Error;

/// Errors that can occur while converting driver text into Rust values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TypeError {
    /// The input text is not valid for the requested type.
    #[error("invalid {expected} literal: {input:?}")]
    InvalidLiteral {
        /// Name of the type being parsed.
        expected: &'static str,
        /// The offending input.
        input: String,
    },

    /// The input parsed, but describes a value outside the representable range.
    #[error("{expected} out of range: {input:?}")]
    OutOfRange {
        /// Name of the type being parsed.
        expected: &'static str,
        /// The offending input.
        input: String,
    },

    /// A local date-time does not map to exactly one instant in the system time zone.
    #[error("ambiguous or nonexistent local time: {0:?}")]
    AmbiguousLocalTime(String),
}

impl TypeError {
    pub(crate) fn invalid(expected: &'static str, input: &str) -> Self {
        Self::InvalidLiteral {
            expected,
            input: input.to_string(),
        }
    }
}
