//! Values that require driver-specific quoting.

use std::fmt;

use bytes::Bytes;

/// A non-null, non-numeric bind value.
///
/// These are the values a driver's quoting routine receives. The
/// [`Display`](fmt::Display) rendering is the raw, unescaped text of the
/// value; escaping it for the target dialect is the driver's job.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SqlValue {
    /// Character data.
    Text(String),
    /// Boolean, rendered as `true` / `false`.
    Bool(bool),
    /// Binary data, rendered as `\x` followed by lowercase hex digits.
    Binary(Bytes),
    /// Exact decimal number.
    #[cfg(feature = "decimal")]
    Decimal(rust_decimal::Decimal),
    /// Calendar date.
    #[cfg(feature = "chrono")]
    Date(chrono::NaiveDate),
    /// Date and time without a time zone.
    #[cfg(feature = "chrono")]
    DateTime(chrono::NaiveDateTime),
    /// Date and time with a fixed UTC offset.
    #[cfg(feature = "chrono")]
    DateTimeTz(chrono::DateTime<chrono::FixedOffset>),
    /// UUID.
    #[cfg(feature = "uuid")]
    Uuid(uuid::Uuid),
    /// JSON document, rendered compactly.
    #[cfg(feature = "json")]
    Json(serde_json::Value),
}

impl SqlValue {
    /// Get a short name for the variant, used in diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Bool(_) => "bool",
            Self::Binary(_) => "binary",
            #[cfg(feature = "decimal")]
            Self::Decimal(_) => "decimal",
            #[cfg(feature = "chrono")]
            Self::Date(_) => "date",
            #[cfg(feature = "chrono")]
            Self::DateTime(_) => "datetime",
            #[cfg(feature = "chrono")]
            Self::DateTimeTz(_) => "datetimetz",
            #[cfg(feature = "uuid")]
            Self::Uuid(_) => "uuid",
            #[cfg(feature = "json")]
            Self::Json(_) => "json",
        }
    }

    /// Borrow the text if this is a [`SqlValue::Text`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Binary(bytes) => {
                f.write_str("\\x")?;
                for byte in bytes.iter() {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
            #[cfg(feature = "decimal")]
            Self::Decimal(d) => write!(f, "{d}"),
            #[cfg(feature = "chrono")]
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            #[cfg(feature = "chrono")]
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%.f")),
            #[cfg(feature = "chrono")]
            Self::DateTimeTz(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%.f%:z")),
            #[cfg(feature = "uuid")]
            Self::Uuid(u) => write!(f, "{u}"),
            #[cfg(feature = "json")]
            Self::Json(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Bytes> for SqlValue {
    fn from(value: Bytes) -> Self {
        Self::Binary(value)
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Binary(Bytes::from(value))
    }
}
