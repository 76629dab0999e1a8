//! Connections.

use std::fmt;
use std::time::Instant;

use rdo_sql::Quote;
use rdo_types::{Param, SqlValue, ToParam};
use tracing::Instrument;

use crate::config::Config;
use crate::driver::Driver;
use crate::error::{Error, Result};
use crate::instrumentation::{MAX_STATEMENT_LEN, StatementLog, extract_operation, span_names, truncate_sql};
use crate::result::ResultSet;
use crate::statement::Statement;

/// An open (or closed) connection to a database through a [`Driver`].
///
/// Connections are created by [`Registry::connect`](crate::Registry::connect),
/// which opens them before returning.
pub struct Connection {
    config: Config,
    driver: Box<dyn Driver>,
}

impl Connection {
    /// Wrap a driver. The connection is not opened.
    #[must_use]
    pub fn new(config: Config, driver: Box<dyn Driver>) -> Self {
        Self { config, driver }
    }

    /// The configuration this connection was created with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The underlying driver.
    #[must_use]
    pub fn driver(&self) -> &dyn Driver {
        self.driver.as_ref()
    }

    /// Open the connection if it is not already open.
    ///
    /// Returns `Ok(false)` if the driver could not open it.
    pub async fn open(&mut self) -> Result<bool> {
        if self.driver.is_open() {
            return Ok(true);
        }
        let opened = self.driver.open().await?;
        tracing::debug!(driver = %self.config.driver, opened, "open");
        Ok(opened)
    }

    /// Check if the connection is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.driver.is_open()
    }

    /// Close the connection if it is open.
    pub async fn close(&mut self) -> Result<bool> {
        let span = tracing::debug_span!(span_names::CLOSE, db.system = %self.config.driver);
        let closed = self.driver.close().instrument(span).await?;
        tracing::debug!(driver = %self.config.driver, closed, "close");
        Ok(closed)
    }

    /// Create an emulated prepared statement.
    #[must_use]
    pub fn prepare(&self, sql: impl Into<String>) -> Statement {
        Statement::new(sql)
    }

    /// Execute a statement, binding each `?` to the matching value.
    ///
    /// ```rust,ignore
    /// let result = conn.execute("SELECT * FROM users WHERE id = ? AND name = ?", &[&42, &"bob"]).await?;
    /// ```
    pub async fn execute(&mut self, sql: &str, params: &[&(dyn ToParam + Sync)]) -> Result<ResultSet> {
        let params: Vec<Param> = params.iter().map(|p| p.to_param()).collect();
        self.execute_params(sql, &params).await
    }

    /// Execute a statement with already-converted parameters.
    pub async fn execute_params(&mut self, sql: &str, params: &[Param]) -> Result<ResultSet> {
        if !self.driver.is_open() {
            return Err(Error::ConnectionClosed);
        }

        let span = tracing::debug_span!(
            span_names::EXECUTE,
            db.system = %self.config.driver,
            db.operation = extract_operation(sql),
            db.statement = %truncate_sql(sql, MAX_STATEMENT_LEN),
        );

        let started = Instant::now();
        match self.driver.execute(sql, params).instrument(span).await {
            Ok(result) => {
                tracing::debug!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    rows = result.count(),
                    "{}",
                    StatementLog { sql, params }
                );
                Ok(result)
            }
            Err(e) => {
                tracing::error!(error = %e, "{}", StatementLog { sql, params });
                Err(e)
            }
        }
    }

    /// Quote a value with the driver's escaping rules.
    pub fn quote(&self, value: &SqlValue) -> Result<String> {
        Ok(self.driver.quote(value)?)
    }

    /// Interpolate parameters into a statement without executing it.
    pub fn interpolate(&self, sql: &str, params: &[Param]) -> Result<String> {
        self.driver.interpolate(sql, params)
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("config", &self.config)
            .field("open", &self.driver.is_open())
            .finish()
    }
}
