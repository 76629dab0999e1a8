//! # rdo-sql
//!
//! Client-side interpolation of bind parameters into SQL statements.
//!
//! Drivers for servers without (or with incomplete) native bind parameter
//! support use this crate to turn a template such as
//! `SELECT * FROM users WHERE name = ? AND id = ?` and a list of values
//! into a single statement with every value safely quoted.
//!
//! ## Features
//!
//! - Single pass over the template, with one up-front output allocation
//! - `?` inside `'...'`, `"..."`, `-- ...` and nested `/* ... */` is ignored
//! - `\?` produces a literal `?` without consuming a parameter
//! - Strict parameter count checking; no partial output on error
//! - Dialect escaping is delegated to a driver-supplied [`Quote`]
//!
//! ## Example
//!
//! ```
//! use rdo_sql::{interpolate, StandardQuoter};
//! use rdo_types::Param;
//!
//! let sql = interpolate(
//!     "SELECT ? /* not ? this */, '?'",
//!     &[Param::from(1i32)],
//!     &StandardQuoter,
//! )?;
//! assert_eq!(sql, "SELECT 1 /* not ? this */, '?'");
//! # Ok::<(), rdo_sql::InterpolateError>(())
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

#[cfg(feature = "json")]
pub mod dynamic;
pub mod error;
pub mod interpolate;
pub mod lexer;
pub mod quote;

#[cfg(feature = "json")]
pub use dynamic::interpolate_value;
pub use error::{InterpolateError, QuoteError, Result};
pub use interpolate::{interpolate, splice};
pub use lexer::{ScanState, Scanner, Token, count_markers};
pub use quote::{BackslashQuoter, Quote, QuotedFragment, StandardQuoter, quote_param, quote_params};
