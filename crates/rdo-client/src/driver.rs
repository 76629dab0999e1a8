//! The driver abstraction.
//!
//! A driver speaks to one kind of DBMS. Drivers whose servers lack native
//! bind parameter support execute statements by interpolating the bind
//! values themselves; the default [`Driver::interpolate`] does exactly that
//! using the driver's own [`Quote`] implementation.

use async_trait::async_trait;
use rdo_sql::Quote;
use rdo_types::Param;

use crate::error::Result;
use crate::result::ResultSet;

/// A database driver.
///
/// Implementations are constructed by a factory registered with a
/// [`Registry`](crate::Registry) and are always used behind a
/// [`Connection`](crate::Connection).
#[async_trait]
pub trait Driver: Quote + Send + Sync {
    /// Open the underlying connection if it is not already open.
    ///
    /// Returns `Ok(false)` if the connection could not be opened and the
    /// driver has no more specific error to report.
    async fn open(&mut self) -> Result<bool>;

    /// Check if the connection is open.
    fn is_open(&self) -> bool;

    /// Close the connection if it is open.
    ///
    /// Returns `Ok(true)` if the connection was closed or already closed.
    async fn close(&mut self) -> Result<bool>;

    /// Execute a statement with `?` placeholders bound to `params`.
    async fn execute(&mut self, sql: &str, params: &[Param]) -> Result<ResultSet>;

    /// Produce the final statement text for `sql` and `params`.
    fn interpolate(&self, sql: &str, params: &[Param]) -> Result<String> {
        Ok(rdo_sql::interpolate(sql, params, self)?)
    }
}
