//! Tracing helpers for database operations.
//!
//! Spans and events use the field names of the OpenTelemetry database
//! semantic conventions so that any `tracing` subscriber bridging to
//! OpenTelemetry picks them up unchanged:
//!
//! - `db.system`: driver name
//! - `db.name`: database name
//! - `db.statement`: SQL statement, truncated to [`MAX_STATEMENT_LEN`] bytes
//! - `db.operation`: statement type (SELECT, INSERT, etc.)

use std::fmt;

use rdo_types::Param;

/// Longest statement text recorded on spans and log events.
pub const MAX_STATEMENT_LEN: usize = 2048;

/// Span names for database operations.
pub mod span_names {
    /// Span name for opening a connection.
    pub const CONNECT: &str = "rdo.connect";
    /// Span name for statement execution.
    pub const EXECUTE: &str = "rdo.execute";
    /// Span name for closing a connection.
    pub const CLOSE: &str = "rdo.close";
}

/// Extract the operation type from a SQL statement.
#[must_use]
pub fn extract_operation(sql: &str) -> &'static str {
    let keyword = sql
        .trim_start()
        .split(|c: char| !c.is_ascii_alphabetic())
        .next()
        .unwrap_or_default()
        .to_ascii_uppercase();

    match keyword.as_str() {
        "SELECT" | "WITH" => "SELECT",
        "INSERT" => "INSERT",
        "UPDATE" => "UPDATE",
        "DELETE" => "DELETE",
        "EXEC" | "EXECUTE" | "CALL" => "EXECUTE",
        "BEGIN" | "START" => "BEGIN",
        "COMMIT" => "COMMIT",
        "ROLLBACK" => "ROLLBACK",
        "CREATE" => "CREATE",
        "ALTER" => "ALTER",
        "DROP" => "DROP",
        _ => "OTHER",
    }
}

/// Truncate a statement for logging, keeping whole characters.
#[must_use]
pub fn truncate_sql(sql: &str, max_len: usize) -> String {
    if sql.len() <= max_len {
        return sql.to_string();
    }
    let mut end = max_len.saturating_sub(3);
    while !sql.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &sql[..end])
}

/// Displays bind values as `[1, "a", NULL]`.
#[derive(Debug, Clone, Copy)]
pub struct BindList<'a>(pub &'a [Param]);

impl fmt::Display for BindList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, param) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        f.write_str("]")
    }
}

/// Displays a statement followed by its bind values, if there are any.
#[derive(Debug, Clone, Copy)]
pub struct StatementLog<'a> {
    /// Statement text.
    pub sql: &'a str,
    /// Bind values.
    pub params: &'a [Param],
}

impl fmt::Display for StatementLog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&truncate_sql(self.sql, MAX_STATEMENT_LEN))?;
        if !self.params.is_empty() {
            write!(f, " <Bind: {}>", BindList(self.params))?;
        }
        Ok(())
    }
}
