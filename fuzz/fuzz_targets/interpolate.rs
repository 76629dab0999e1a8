//! Interpolation must never panic, and a successful result must contain
//! every byte of the template outside the substituted markers.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rdo_sql::{BackslashQuoter, InterpolateError, StandardQuoter, count_markers, interpolate};
use rdo_types::{Number, Param};

#[derive(Debug, Arbitrary)]
enum FuzzParam {
    Null,
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Bool(bool),
    Bytes(Vec<u8>),
}

impl From<FuzzParam> for Param {
    fn from(p: FuzzParam) -> Self {
        match p {
            FuzzParam::Null => Param::Null,
            FuzzParam::Int(v) => Param::Number(Number::Int(v)),
            FuzzParam::UInt(v) => Param::Number(Number::UInt(v)),
            FuzzParam::Float(v) => Param::Number(Number::Float(v)),
            FuzzParam::Text(v) => Param::text(v),
            FuzzParam::Bool(v) => Param::from(v),
            FuzzParam::Bytes(v) => Param::from(v),
        }
    }
}

#[derive(Debug, Arbitrary)]
struct Input {
    sql: String,
    params: Vec<FuzzParam>,
    backslash: bool,
}

fuzz_target!(|input: Input| {
    let markers = count_markers(&input.sql);
    let params: Vec<Param> = input.params.into_iter().map(Param::from).collect();

    let result = if input.backslash {
        interpolate(&input.sql, &params, &BackslashQuoter)
    } else {
        interpolate(&input.sql, &params, &StandardQuoter)
    };

    match result {
        Ok(sql) => {
            assert_eq!(markers, params.len());
            if markers == 0 {
                assert!(sql.len() <= input.sql.len());
            }
        }
        Err(InterpolateError::ParamCountMismatch { params: p, markers: m, .. }) => {
            assert_eq!(p, params.len());
            assert_eq!(m, markers);
            assert_ne!(p, m);
        }
        Err(_) => {}
    }
});
