//! Client error types.

use rdo_sql::{InterpolateError, QuoteError};
use rdo_types::TypeError;
use thiserror::Error;

/// Errors surfaced by connections, statements and drivers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Invalid connection configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// No driver is registered under the requested name.
    #[error("unregistered driver {0:?}")]
    UnknownDriver(String),

    /// A driver name is not a valid URI scheme.
    #[error("invalid driver name {0:?}: must start with a letter and contain only letters, digits, '+', '-' or '.'")]
    InvalidDriverName(String),

    /// The driver reported that it could not open a connection, without giving a reason.
    #[error("unable to establish connection with driver {driver:?}, but the driver did not provide a reason")]
    OpenFailed {
        /// Driver name.
        driver: String,
    },

    /// The operation requires an open connection.
    #[error("connection is closed")]
    ConnectionClosed,

    /// Bind parameters could not be interpolated into the statement.
    #[error(transparent)]
    Interpolate(#[from] InterpolateError),

    /// The driver could not quote a value.
    #[error("quote error: {0}")]
    Quote(#[from] QuoteError),

    /// A column value could not be converted.
    #[error("type error: {0}")]
    Type(#[from] TypeError),

    /// Error reported by the DBMS or the driver.
    #[error("driver error: {0}")]
    Driver(String),
}

impl Error {
    /// Create a driver error from any displayable message.
    pub fn driver(message: impl std::fmt::Display) -> Self {
        Self::Driver(message.to_string())
    }

    /// Check if this error was caused by the statement or its parameters
    /// rather than by the connection.
    #[must_use]
    pub fn is_statement_error(&self) -> bool {
        matches!(self, Self::Interpolate(_) | Self::Quote(_))
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
