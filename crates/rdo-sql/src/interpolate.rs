//! Statement interpolation.
//!
//! [`interpolate`] replaces every eligible `?` marker in a SQL template with
//! the quoted literal of the corresponding parameter, in order.
//!
//! All parameters are quoted before scanning starts, so the output buffer is
//! allocated once at its final size: the template length plus the length of
//! every fragment. Escaped markers only ever shrink the output.

use rdo_types::Param;

use crate::error::{InterpolateError, Result};
use crate::lexer::{Scanner, Token};
use crate::quote::{Quote, QuotedFragment, quote_params};

/// Interpolate `params` into the `?` markers of `sql`.
///
/// Markers inside quoted strings and comments are left alone, and `\?` is
/// reduced to a literal `?`. Neither consumes a parameter.
///
/// # Errors
///
/// - [`InterpolateError::InvalidQuoteResult`] if `quoter` fails for any
///   parameter (checked before the template is scanned).
/// - [`InterpolateError::ParamCountMismatch`] if the number of eligible
///   markers differs from `params.len()`.
///
/// # Example
///
/// ```
/// use rdo_sql::{interpolate, StandardQuoter};
/// use rdo_types::Param;
///
/// let sql = interpolate(
///     "SELECT * FROM t WHERE name = ? AND id = ?",
///     &[Param::text("O'Brien"), Param::from(5i32)],
///     &StandardQuoter,
/// )?;
/// assert_eq!(sql, "SELECT * FROM t WHERE name = 'O''Brien' AND id = 5");
/// # Ok::<(), rdo_sql::InterpolateError>(())
/// ```
pub fn interpolate<Q: Quote + ?Sized>(sql: &str, params: &[Param], quoter: &Q) -> Result<String> {
    let fragments = quote_params(quoter, params)?;
    splice(sql, &fragments)
}

/// Interpolate already-quoted fragments into the `?` markers of `sql`.
///
/// # Errors
///
/// Returns [`InterpolateError::ParamCountMismatch`] if the number of
/// eligible markers differs from `fragments.len()`.
pub fn splice(sql: &str, fragments: &[QuotedFragment]) -> Result<String> {
    let capacity = sql.len() + fragments.iter().map(QuotedFragment::len).sum::<usize>();
    let mut out = String::with_capacity(capacity);

    // Start of the text not yet copied to `out`.
    let mut copied = 0;
    let mut markers = 0;

    for token in Scanner::new(sql) {
        match token {
            Token::EscapedMarker(at) => {
                // Drop the backslash; the `?` starts the next verbatim run.
                out.push_str(&sql[copied..at]);
                copied = at + 1;
            }
            Token::Marker(at) => {
                if let Some(fragment) = fragments.get(markers) {
                    out.push_str(&sql[copied..at]);
                    out.push_str(fragment.as_str());
                    copied = at + 1;
                }
                markers += 1;
            }
        }
    }

    if markers != fragments.len() {
        tracing::debug!(
            params = fragments.len(),
            markers = markers,
            "bind parameter count mismatch"
        );
        return Err(InterpolateError::ParamCountMismatch {
            params: fragments.len(),
            markers,
            sql: sql.to_string(),
        });
    }

    out.push_str(&sql[copied..]);
    debug_assert!(out.len() <= capacity);

    tracing::trace!(
        params = fragments.len(),
        input_len = sql.len(),
        output_len = out.len(),
        "interpolated statement"
    );

    Ok(out)
}
