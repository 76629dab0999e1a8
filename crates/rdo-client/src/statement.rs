//! Emulated prepared statements.

use rdo_sql::count_markers;
use rdo_types::{Param, ToParam};

use crate::connection::Connection;
use crate::error::Result;
use crate::result::ResultSet;

/// A statement prepared for repeated execution.
///
/// Nothing is sent to the server when the statement is created: each
/// execution passes the command text and its bind values to the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    command: String,
    param_count: usize,
}

impl Statement {
    /// Prepare a command with `?` placeholders.
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        let command = command.into();
        let param_count = count_markers(&command);
        Self { command, param_count }
    }

    /// The command text.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Number of bind parameters the command expects.
    #[must_use]
    pub fn param_count(&self) -> usize {
        self.param_count
    }

    /// Execute on `conn` with the given bind values.
    pub async fn execute(&self, conn: &mut Connection, params: &[&(dyn ToParam + Sync)]) -> Result<ResultSet> {
        conn.execute(&self.command, params).await
    }

    /// Execute on `conn` with already-converted bind values.
    pub async fn execute_params(&self, conn: &mut Connection, params: &[Param]) -> Result<ResultSet> {
        conn.execute_params(&self.command, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_count() {
        let stmt = Statement::new("SELECT * FROM t WHERE a = ? AND b = '?' AND c = \\? -- ?\n AND d = ?");
        assert_eq!(stmt.param_count(), 2);
        assert_eq!(stmt.command(), "SELECT * FROM t WHERE a = ? AND b = '?' AND c = \\? -- ?\n AND d = ?");
    }

    #[test]
    fn test_no_params() {
        assert_eq!(Statement::new("SELECT 1").param_count(), 0);
    }
}
