//! Duration token parsing: unit precedence, unknown suffixes, and the
//! format/parse round trip.
//!
//! Run: `cargo test --test duration`

use loadsum::duration::{format_ms, parse_duration_ms};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn milliseconds_pass_through() {
    assert_eq!(parse_duration_ms("1.23ms"), Some(1.23));
    assert_eq!(parse_duration_ms("0.00ms"), Some(0.0));
}

#[test]
fn microseconds_divide() {
    assert_eq!(parse_duration_ms("456.78us"), Some(0.45678));
}

#[test]
fn seconds_multiply() {
    assert_eq!(parse_duration_ms("1.50s"), Some(1500.0));
}

#[test]
fn minutes_multiply() {
    assert_eq!(parse_duration_ms("2.00m"), Some(120_000.0));
}

#[test]
fn ms_suffix_never_misreads_as_seconds() {
    // "12ms" must not match the bare-`s` branch and come back as 12000.
    assert_eq!(parse_duration_ms("12ms"), Some(12.0));
    assert_eq!(parse_duration_ms("12us"), Some(0.012));
}

#[test]
fn surrounding_whitespace_is_trimmed() {
    assert_eq!(parse_duration_ms("  3.5ms "), Some(3.5));
}

#[test]
fn unknown_suffix_is_unavailable() {
    assert_eq!(parse_duration_ms("1.23h"), None);
    assert_eq!(parse_duration_ms("1.23"), None);
    assert_eq!(parse_duration_ms(""), None);
    assert_eq!(parse_duration_ms("fast"), None);
}

#[test]
fn non_numeric_value_is_unavailable() {
    assert_eq!(parse_duration_ms("xxms"), None);
    assert_eq!(parse_duration_ms("1.2.3s"), None);
}

proptest! {
    #[test]
    fn roundtrip_recovers_milliseconds(ms in 0.001_f64..600_000.0) {
        let token = format_ms(ms);
        let parsed = parse_duration_ms(&token).expect("formatted token parses");
        let tolerance = ms.abs() * 1e-12 + 1e-12;
        prop_assert!(
            (parsed - ms).abs() <= tolerance,
            "{token}: {parsed} != {ms}"
        );
    }
}
