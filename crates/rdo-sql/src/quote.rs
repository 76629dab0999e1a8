//! Parameter quoting.
//!
//! Each [`Param`] is rendered into a [`QuotedFragment`] purely by its kind:
//!
//! | Kind     | Fragment                                    |
//! |----------|---------------------------------------------|
//! | `Null`   | `NULL`                                      |
//! | `Number` | canonical numeric text, unquoted            |
//! | `Other`  | `'` + output of the [`Quote`] capability + `'` |
//!
//! The [`Quote`] capability is supplied by the driver and is entirely
//! responsible for escaping; nothing here inspects the characters it returns
//! beyond rejecting text that cannot be embedded in a statement.

use rdo_types::{Param, SqlValue};

use crate::error::{InterpolateError, QuoteError, Result};

/// Dialect-specific escaping of values for embedding in single quotes.
///
/// Implementations return the *inner* text of the literal: the caller adds
/// the surrounding `'` characters.
pub trait Quote {
    /// Escape a value for use between single quotes.
    fn quote(&self, value: &SqlValue) -> std::result::Result<String, QuoteError>;
}

impl<F> Quote for F
where
    F: Fn(&SqlValue) -> std::result::Result<String, QuoteError>,
{
    fn quote(&self, value: &SqlValue) -> std::result::Result<String, QuoteError> {
        self(value)
    }
}

/// ANSI quoting: embedded `'` characters are doubled.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardQuoter;

impl Quote for StandardQuoter {
    fn quote(&self, value: &SqlValue) -> std::result::Result<String, QuoteError> {
        Ok(value.to_string().replace('\'', "''"))
    }
}

/// MySQL-style quoting: special characters are escaped with a backslash.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackslashQuoter;

impl Quote for BackslashQuoter {
    fn quote(&self, value: &SqlValue) -> std::result::Result<String, QuoteError> {
        let raw = value.to_string();
        let mut escaped = String::with_capacity(raw.len() + 2);
        for c in raw.chars() {
            match c {
                '\\' => escaped.push_str("\\\\"),
                '\'' => escaped.push_str("\\'"),
                '"' => escaped.push_str("\\\""),
                '\0' => escaped.push_str("\\0"),
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                '\x1a' => escaped.push_str("\\Z"),
                other => escaped.push(other),
            }
        }
        Ok(escaped)
    }
}

/// The SQL literal text for one parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedFragment {
    text: String,
}

impl QuotedFragment {
    /// The literal text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length of the literal in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the literal is empty. Never true for a fragment built by [`quote_param`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Consume the fragment, returning the literal text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }
}

/// Render one parameter as SQL literal text.
///
/// `position` is the zero-based index of the parameter, reported in
/// [`InterpolateError::InvalidQuoteResult`] if the quoter fails or returns
/// text containing a NUL byte.
pub fn quote_param<Q: Quote + ?Sized>(
    quoter: &Q,
    position: usize,
    param: &Param,
) -> Result<QuotedFragment> {
    let text = match param {
        Param::Null => "NULL".to_string(),
        Param::Number(n) => n.to_string(),
        Param::Other(value) => {
            let inner = quoter
                .quote(value)
                .map_err(|e| InterpolateError::InvalidQuoteResult {
                    position,
                    reason: e.to_string(),
                })?;

            if inner.contains('\0') {
                return Err(InterpolateError::InvalidQuoteResult {
                    position,
                    reason: "quoted text contains a NUL byte".to_string(),
                });
            }

            let mut text = String::with_capacity(inner.len() + 2);
            text.push('\'');
            text.push_str(&inner);
            text.push('\'');
            text
        }
    };

    Ok(QuotedFragment { text })
}

/// Render every parameter, in order.
pub fn quote_params<Q: Quote + ?Sized>(quoter: &Q, params: &[Param]) -> Result<Vec<QuotedFragment>> {
    params
        .iter()
        .enumerate()
        .map(|(position, param)| quote_param(quoter, position, param))
        .collect()
}
