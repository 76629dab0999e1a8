//! Text literal parsers must reject bad input with an error, never a panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rdo_types::convert;

fuzz_target!(|data: &str| {
    let _ = convert::parse_int(data);
    let _ = convert::parse_float(data);
    let _ = convert::parse_decimal(data);
    let _ = convert::parse_bool(data);
    let _ = convert::parse_date(data);
    let _ = convert::parse_date_time_with_zone(data);
    let _ = convert::parse_date_time_without_zone(data);
});
