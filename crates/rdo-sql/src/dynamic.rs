//! Interpolation with dynamically-typed arguments.
//!
//! Callers that receive statements and bind values as JSON (RPC bridges,
//! scripting hosts) cannot rely on the type system to guarantee the shape of
//! their input. [`interpolate_value`] checks it first and reports
//! [`InterpolateError::InvalidArgumentType`] before any scanning happens.

use rdo_types::{Number, Param, SqlValue};
use serde_json::Value;

use crate::error::{InterpolateError, Result};
use crate::interpolate::interpolate;
use crate::quote::Quote;

/// Interpolate a JSON array of parameters into a JSON string template.
///
/// # Errors
///
/// - [`InterpolateError::InvalidArgumentType`] if `template` is not a string
///   or `params` is not an array.
/// - Any error of [`interpolate`].
pub fn interpolate_value<Q: Quote + ?Sized>(template: &Value, params: &Value, quoter: &Q) -> Result<String> {
    let Value::String(sql) = template else {
        return Err(InterpolateError::InvalidArgumentType {
            argument: "template",
            expected: "string",
            actual: json_type_name(template),
        });
    };

    let Value::Array(values) = params else {
        return Err(InterpolateError::InvalidArgumentType {
            argument: "params",
            expected: "array",
            actual: json_type_name(params),
        });
    };

    let params: Vec<Param> = values.iter().map(param_from_json).collect();
    interpolate(sql, &params, quoter)
}

/// Classify a JSON value as a bind parameter.
///
/// Numbers stay integers when they are integers; strings become text,
/// booleans stay booleans, and arrays or objects are passed as JSON.
#[must_use]
pub fn param_from_json(value: &Value) -> Param {
    match value {
        Value::Null => Param::Null,
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Param::Number(Number::Int(i))
            } else if let Some(u) = n.as_u64() {
                Param::Number(Number::UInt(u))
            } else {
                Param::Number(Number::Float(n.as_f64().unwrap_or(f64::NAN)))
            }
        }
        Value::String(s) => Param::Other(SqlValue::Text(s.clone())),
        Value::Bool(b) => Param::Other(SqlValue::Bool(*b)),
        Value::Array(_) | Value::Object(_) => Param::Other(SqlValue::Json(value.clone())),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
