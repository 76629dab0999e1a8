//! Bind parameters and their classification.

use std::fmt;

use bytes::Bytes;

use crate::value::SqlValue;

/// A numeric bind value, emitted into SQL without quotes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Floating-point number.
    Float(f64),
}

impl Number {
    /// Get the value as an `f64`, possibly losing precision for large integers.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Int(i) => i as f64,
            Self::UInt(u) => u as f64,
            Self::Float(f) => f,
        }
    }
}

/// Canonical SQL text of a number.
///
/// Integers print in base 10. Finite floats print in the shortest form that
/// parses back to the same value, always with a fractional part or an
/// exponent so the literal stays a float. Non-finite floats print as
/// `Infinity`, `-Infinity` and `NaN`.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Int(i) => write!(f, "{i}"),
            Self::UInt(u) => write!(f, "{u}"),
            Self::Float(v) if v.is_nan() => f.write_str("NaN"),
            Self::Float(v) if v.is_infinite() => {
                f.write_str(if v.is_sign_positive() { "Infinity" } else { "-Infinity" })
            }
            // Debug formatting is the shortest round-trip form and keeps `.0`
            Self::Float(v) => write!(f, "{v:?}"),
        }
    }
}

/// The three ways a bind parameter can be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Rendered as `NULL`.
    Null,
    /// Rendered as unquoted numeric text.
    Number,
    /// Rendered through the driver's quoting routine.
    Other,
}

impl ParamKind {
    /// Lowercase name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Number => "number",
            Self::Other => "other",
        }
    }
}

/// A single positional bind parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    /// SQL `NULL`.
    Null,
    /// A number, emitted as-is.
    Number(Number),
    /// Anything the driver must quote.
    Other(SqlValue),
}

impl Param {
    /// Get the rendering kind of this parameter.
    #[must_use]
    pub fn kind(&self) -> ParamKind {
        match self {
            Self::Null => ParamKind::Null,
            Self::Number(_) => ParamKind::Number,
            Self::Other(_) => ParamKind::Other,
        }
    }

    /// Check if this parameter is `NULL`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Create a text parameter.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Other(SqlValue::Text(value.into()))
    }
}

/// Log rendering: `NULL`, bare numbers and booleans, everything else as a
/// double-quoted string literal.
impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Other(SqlValue::Text(s)) => write!(f, "{s:?}"),
            Self::Other(SqlValue::Bool(b)) => write!(f, "{b}"),
            Self::Other(v) => write!(f, "{:?}", v.to_string()),
        }
    }
}

/// Conversion of Rust values into bind parameters.
///
/// This is the trait object type accepted wherever a heterogeneous list of
/// parameters is needed, e.g. `&[&dyn ToParam]`.
pub trait ToParam {
    /// Convert this value into a bind parameter.
    fn to_param(&self) -> Param;
}

/// Convert a slice of trait objects into owned parameters.
#[must_use]
pub fn to_params(values: &[&dyn ToParam]) -> Vec<Param> {
    values.iter().map(|v| v.to_param()).collect()
}

impl ToParam for Param {
    fn to_param(&self) -> Param {
        self.clone()
    }
}

impl ToParam for SqlValue {
    fn to_param(&self) -> Param {
        Param::Other(self.clone())
    }
}

impl ToParam for Number {
    fn to_param(&self) -> Param {
        Param::Number(*self)
    }
}

impl<T: ToParam> ToParam for Option<T> {
    fn to_param(&self) -> Param {
        match self {
            Some(v) => v.to_param(),
            None => Param::Null,
        }
    }
}

impl<T: ToParam + ?Sized> ToParam for &T {
    fn to_param(&self) -> Param {
        (**self).to_param()
    }
}

macro_rules! impl_signed {
    ($($t:ty),*) => {
        $(
            impl ToParam for $t {
                fn to_param(&self) -> Param {
                    Param::Number(Number::Int(i64::from(*self)))
                }
            }
        )*
    };
}

macro_rules! impl_unsigned {
    ($($t:ty),*) => {
        $(
            impl ToParam for $t {
                fn to_param(&self) -> Param {
                    Param::Number(Number::UInt(u64::from(*self)))
                }
            }
        )*
    };
}

impl_signed!(i8, i16, i32, i64);
impl_unsigned!(u8, u16, u32, u64);

impl ToParam for f32 {
    fn to_param(&self) -> Param {
        Param::Number(Number::Float(f64::from(*self)))
    }
}

impl ToParam for f64 {
    fn to_param(&self) -> Param {
        Param::Number(Number::Float(*self))
    }
}

impl ToParam for bool {
    fn to_param(&self) -> Param {
        Param::Other(SqlValue::Bool(*self))
    }
}

impl ToParam for str {
    fn to_param(&self) -> Param {
        Param::text(self)
    }
}

impl ToParam for String {
    fn to_param(&self) -> Param {
        Param::text(self.as_str())
    }
}

impl ToParam for Bytes {
    fn to_param(&self) -> Param {
        Param::Other(SqlValue::Binary(self.clone()))
    }
}

impl ToParam for Vec<u8> {
    fn to_param(&self) -> Param {
        Param::Other(SqlValue::Binary(Bytes::copy_from_slice(self)))
    }
}

#[cfg(feature = "decimal")]
impl ToParam for rust_decimal::Decimal {
    fn to_param(&self) -> Param {
        Param::Other(SqlValue::Decimal(*self))
    }
}

#[cfg(feature = "chrono")]
impl ToParam for chrono::NaiveDate {
    fn to_param(&self) -> Param {
        Param::Other(SqlValue::Date(*self))
    }
}

#[cfg(feature = "chrono")]
impl ToParam for chrono::NaiveDateTime {
    fn to_param(&self) -> Param {
        Param::Other(SqlValue::DateTime(*self))
    }
}

#[cfg(feature = "chrono")]
impl ToParam for chrono::DateTime<chrono::FixedOffset> {
    fn to_param(&self) -> Param {
        Param::Other(SqlValue::DateTimeTz(*self))
    }
}

#[cfg(feature = "uuid")]
impl ToParam for uuid::Uuid {
    fn to_param(&self) -> Param {
        Param::Other(SqlValue::Uuid(*self))
    }
}

#[cfg(feature = "json")]
impl ToParam for serde_json::Value {
    fn to_param(&self) -> Param {
        Param::Other(SqlValue::Json(self.clone()))
    }
}

impl<T: ToParam> From<Option<T>> for Param {
    fn from(value: Option<T>) -> Self {
        value.to_param()
    }
}

macro_rules! impl_from_via_to_param {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Param {
                fn from(value: $t) -> Self {
                    value.to_param()
                }
            }
        )*
    };
}

impl_from_via_to_param!(
    i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, bool, &str, String, Bytes, Vec<u8>, Number,
    SqlValue
);
