//! Interpolation error types.

use thiserror::Error;

/// Error returned by a driver's quoting routine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct QuoteError {
    message: String,
}

impl QuoteError {
    /// Create a new quoting error with a human-readable message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Create an error for a value type the quoter cannot render.
    #[must_use]
    pub fn unsupported(type_name: &str) -> Self {
        Self::new(format!("cannot quote values of type {type_name}"))
    }

    /// Get the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors that can occur while interpolating parameters into a statement.
///
/// No partial output is ever produced alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum InterpolateError {
    /// An argument did not have the required shape.
    #[error("invalid {argument}: expected {expected}, got {actual}")]
    InvalidArgumentType {
        /// Name of the offending argument.
        argument: &'static str,
        /// Shape the argument should have had.
        expected: &'static str,
        /// Shape the argument actually had.
        actual: &'static str,
    },

    /// The number of markers in the statement differs from the number of parameters.
    #[error("bind parameter mismatch ({params} for {markers}) in query {sql}")]
    ParamCountMismatch {
        /// Number of parameters supplied.
        params: usize,
        /// Number of substitutable `?` markers found.
        markers: usize,
        /// The statement as given.
        sql: String,
    },

    /// The quoting routine could not produce usable text for a parameter.
    #[error("invalid quote result for parameter {position}: {reason}")]
    InvalidQuoteResult {
        /// Zero-based position of the parameter.
        position: usize,
        /// Why the quoted text was rejected.
        reason: String,
    },
}

/// Result type for interpolation.
pub type Result<T> = std::result::Result<T, InterpolateError>;
