//! # rdo-types
//!
//! Bind parameter values for RDO drivers.
//!
//! Every value passed in place of a `?` marker is classified into one of
//! three kinds:
//!
//! - [`Param::Null`] renders as the bare `NULL` keyword
//! - [`Param::Number`] renders as its own canonical numeric text
//! - [`Param::Other`] carries a [`SqlValue`] that a driver must quote
//!
//! The crate also hosts the [`convert`] helpers drivers use to turn raw
//! textual column data back into rich Rust values.
//!
//! ## Features
//!
//! - `chrono` (default): date and time values
//! - `uuid` (default): UUID values
//! - `decimal` (default): `rust_decimal::Decimal` values
//! - `json` (default): `serde_json::Value` values

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod convert;
pub mod error;
pub mod param;
pub mod value;

pub use error::TypeError;
pub use param::{Number, Param, ParamKind, ToParam};
pub use value::SqlValue;
