//! Query results.

use std::collections::BTreeMap;
use std::time::Duration;

use rdo_types::{Number, Param};

use crate::error::{Error, Result};

/// A row from a query result.
///
/// Values keep the order in which the driver reported the columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<Param>,
}

impl Row {
    /// Create a row from column names and values of equal length.
    pub fn new(columns: Vec<String>, values: Vec<Param>) -> Result<Self> {
        if columns.len() != values.len() {
            return Err(Error::driver(format_args!(
                "row has {} columns but {} values",
                columns.len(),
                values.len()
            )));
        }
        Ok(Self { columns, values })
    }

    /// Build a row from `(column, value)` pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Param>,
    {
        let (columns, values) = pairs.into_iter().map(|(k, v)| (k.into(), v.into())).unzip();
        Self { columns, values }
    }

    /// Get a value by column index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Param> {
        self.values.get(index)
    }

    /// Get a value by column name, ignoring ASCII case.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&Param> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
            .and_then(|i| self.values.get(i))
    }

    /// Get the number of columns in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the row is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the column names.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Iterate over (column, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Param)> {
        self.columns.iter().map(String::as_str).zip(self.values.iter())
    }
}

impl IntoIterator for Row {
    type Item = Param;
    type IntoIter = std::vec::IntoIter<Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a Param;
    type IntoIter = std::slice::Iter<'a, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Execution metadata reported by the driver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultInfo {
    /// Total number of rows, when the driver knows it without counting.
    pub count: Option<u64>,
    /// Rows changed by a write.
    pub affected_rows: Option<u64>,
    /// Identifier generated by an insert.
    pub insert_id: Option<i64>,
    /// Time the statement took on the server.
    pub execution_time: Option<Duration>,
    /// Anything else the driver wants to expose.
    pub extra: BTreeMap<String, String>,
}

/// The outcome of executing a statement: rows plus metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    rows: Vec<Row>,
    info: ResultInfo,
}

impl ResultSet {
    /// Create a result set.
    #[must_use]
    pub fn new(rows: Vec<Row>, info: ResultInfo) -> Self {
        Self { rows, info }
    }

    /// A result with no rows, as returned by most writes.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Driver metadata.
    #[must_use]
    pub fn info(&self) -> &ResultInfo {
        &self.info
    }

    /// All rows.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows in the result.
    ///
    /// Uses the driver-reported count when present.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.info.count.unwrap_or(self.rows.len() as u64)
    }

    /// Number of rows affected by a write, if reported.
    #[must_use]
    pub fn affected_rows(&self) -> Option<u64> {
        self.info.affected_rows
    }

    /// The identifier generated by an insert.
    ///
    /// Falls back to an integer `id` column in the first row.
    #[must_use]
    pub fn insert_id(&self) -> Option<i64> {
        self.info.insert_id.or_else(|| {
            match self.rows.first()?.get_by_name("id")? {
                Param::Number(Number::Int(id)) => Some(*id),
                Param::Number(Number::UInt(id)) => i64::try_from(*id).ok(),
                _ => None,
            }
        })
    }

    /// The first row, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Whether the result has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over rows.
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }
}

impl IntoIterator for ResultSet {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn user(id: i64, name: &str) -> Row {
        Row::from_pairs([("id", Param::from(id)), ("name", Param::text(name))])
    }

    #[test]
    fn test_row_access() {
        let row = user(1, "bob");
        assert_eq!(row.len(), 2);
        assert_eq!(row.get(0), Some(&Param::from(1i64)));
        assert_eq!(row.get_by_name("NAME"), Some(&Param::text("bob")));
        assert_eq!(row.get_by_name("missing"), None);
        assert_eq!(row.columns(), ["id", "name"]);
        let names: Vec<&str> = row.iter().map(|(c, _)| c).collect();
        assert_eq!(names, ["id", "name"]);
    }

    #[test]
    fn test_row_length_mismatch() {
        assert!(Row::new(vec!["a".into()], vec![]).is_err());
        assert!(Row::new(vec!["a".into()], vec![Param::Null]).is_ok());
    }

    #[test]
    fn test_count_prefers_info() {
        let rows = vec![user(1, "a"), user(2, "b")];
        assert_eq!(ResultSet::new(rows.clone(), ResultInfo::default()).count(), 2);

        let info = ResultInfo {
            count: Some(40),
            ..ResultInfo::default()
        };
        assert_eq!(ResultSet::new(rows, info).count(), 40);
    }

    #[test]
    fn test_insert_id() {
        let info = ResultInfo {
            insert_id: Some(9),
            ..ResultInfo::default()
        };
        assert_eq!(ResultSet::new(vec![user(3, "c")], info).insert_id(), Some(9));
        assert_eq!(ResultSet::new(vec![user(3, "c")], ResultInfo::default()).insert_id(), Some(3));
        assert_eq!(ResultSet::empty().insert_id(), None);

        let text_id = Row::from_pairs([("id", Param::text("x"))]);
        assert_eq!(ResultSet::new(vec![text_id], ResultInfo::default()).insert_id(), None);
    }

    #[test]
    fn test_affected_rows_and_iteration() {
        let info = ResultInfo {
            affected_rows: Some(2),
            ..ResultInfo::default()
        };
        let result = ResultSet::new(vec![user(1, "a"), user(2, "b")], info);
        assert_eq!(result.affected_rows(), Some(2));
        assert_eq!(result.iter().count(), 2);
        assert_eq!(result.first().unwrap().get_by_name("name"), Some(&Param::text("a")));
        let ids: Vec<Param> = result.into_iter().filter_map(|r| r.get(0).cloned()).collect();
        assert_eq!(ids, [Param::from(1i64), Param::from(2i64)]);
    }
}
