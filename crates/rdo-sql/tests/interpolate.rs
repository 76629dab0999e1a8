//! Behavioral tests for statement interpolation.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use proptest::prelude::*;
use rdo_sql::{InterpolateError, QuoteError, StandardQuoter, count_markers, interpolate};
use rdo_types::convert::parse_float;
use rdo_types::{Number, Param, SqlValue};

/// Quoter that doubles embedded single quotes, as most dialects expect.
fn doubling(value: &SqlValue) -> Result<String, QuoteError> {
    Ok(value.to_string().replace('\'', "''"))
}

// =============================================================================
// Documented examples
// =============================================================================

#[test]
fn test_number_substitution() {
    let sql = interpolate(
        "SELECT * FROM t WHERE id = ?",
        &[Param::Number(Number::Int(5))],
        &doubling,
    )
    .unwrap();
    assert_eq!(sql, "SELECT * FROM t WHERE id = 5");
}

#[test]
fn test_other_value_uses_external_quote() {
    let sql = interpolate(
        "SELECT * FROM t WHERE name = ?",
        &[Param::text("O'Brien")],
        &doubling,
    )
    .unwrap();
    assert_eq!(sql, "SELECT * FROM t WHERE name = 'O''Brien'");
}

#[test]
fn test_line_comment() {
    let sql = interpolate("-- ignore ?\nSELECT ?", &[Param::from(1i32)], &doubling).unwrap();
    assert_eq!(sql, "-- ignore ?\nSELECT 1");
}

#[test]
fn test_nested_block_comment() {
    let sql = interpolate(
        "/* outer /* inner ? */ still */ SELECT ?",
        &[Param::from(7i32)],
        &doubling,
    )
    .unwrap();
    assert_eq!(sql, "/* outer /* inner ? */ still */ SELECT 7");
}

#[test]
fn test_escaped_marker() {
    let sql = interpolate("SELECT \\?, ?", &[Param::from(9i32)], &doubling).unwrap();
    assert_eq!(sql, "SELECT ?, 9");
}

#[test]
fn test_mismatch_more_markers() {
    let err = interpolate("SELECT ?, ?", &[Param::from(1i32)], &doubling).unwrap_err();
    assert!(matches!(
        err,
        InterpolateError::ParamCountMismatch {
            params: 1,
            markers: 2,
            ..
        }
    ));
}

#[test]
fn test_mismatch_more_params() {
    let err = interpolate(
        "SELECT ?",
        &[Param::from(1i32), Param::from(2i32)],
        &doubling,
    )
    .unwrap_err();
    match err {
        InterpolateError::ParamCountMismatch {
            params,
            markers,
            sql,
        } => {
            assert_eq!(params, 2);
            assert_eq!(markers, 1);
            assert_eq!(sql, "SELECT ?");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// =============================================================================
// Mixed contexts
// =============================================================================

#[test]
fn test_realistic_statement() {
    let template = "\
-- find users?
SELECT u.id, u.\"name?\" /* what /* about */ this? */
FROM users u
WHERE u.email = ? AND u.note <> 'n/a?' AND u.score > ? AND u.deleted_at IS ?";

    let sql = interpolate(
        template,
        &[Param::text("bob@example.com"), Param::from(0.5f64), Param::Null],
        &StandardQuoter,
    )
    .unwrap();

    assert_eq!(
        sql,
        "\
-- find users?
SELECT u.id, u.\"name?\" /* what /* about */ this? */
FROM users u
WHERE u.email = 'bob@example.com' AND u.note <> 'n/a?' AND u.score > 0.5 AND u.deleted_at IS NULL"
    );
}

#[test]
fn test_crlf_ends_line_comment() {
    let sql = interpolate("SELECT 1 -- one?\r\nUNION SELECT ?", &[Param::from(2i32)], &doubling).unwrap();
    assert_eq!(sql, "SELECT 1 -- one?\r\nUNION SELECT 2");
}

#[test]
fn test_line_comment_at_end_without_newline() {
    let sql = interpolate("SELECT ? -- trailing ?", &[Param::from(3i32)], &doubling).unwrap();
    assert_eq!(sql, "SELECT 3 -- trailing ?");
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_marker_free_template_unchanged(template in "[^?]*") {
        let sql = interpolate(&template, &[], &doubling).unwrap();
        prop_assert_eq!(sql, template);
    }

    #[test]
    fn prop_int_literal_round_trips(v in any::<i64>()) {
        let sql = interpolate("?", &[Param::from(v)], &doubling).unwrap();
        prop_assert_eq!(sql.parse::<i64>().ok(), Some(v));
    }

    #[test]
    fn prop_float_literal_round_trips(v in any::<f64>()) {
        let sql = interpolate("?", &[Param::from(v)], &doubling).unwrap();
        let parsed = parse_float(&sql).unwrap();
        if v.is_nan() {
            prop_assert!(parsed.is_nan());
        } else {
            prop_assert_eq!(parsed.to_bits(), v.to_bits());
        }
    }

    #[test]
    fn prop_counted_markers_accept_matching_params(template in "[a-z ?'\"*/\\-\\\\\n]{0,40}") {
        let markers = count_markers(&template);
        let params: Vec<Param> = (0..markers).map(|_| Param::Null).collect();
        prop_assert!(interpolate(&template, &params, &doubling).is_ok());

        let mut extra = params.clone();
        extra.push(Param::Null);
        let is_mismatch = matches!(
            interpolate(&template, &extra, &doubling),
            Err(InterpolateError::ParamCountMismatch { .. })
        );
        prop_assert!(is_mismatch);
    }
}
