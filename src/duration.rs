//! wrk-style duration tokens.
//!
//! wrk prints latencies as a decimal number with a unit suffix
//! (`1.23ms`, `456.78us`, `1.50s`, `2.00m`). Everything downstream works
//! in milliseconds.

/// Convert a duration token to milliseconds.
///
/// Suffixes are checked most-specific first so `ms`/`us` are never
/// misread as a bare `s`. An unrecognized suffix yields `None`;
/// extraction upstream is best-effort and treats that as the field being
/// unavailable rather than an error.
#[must_use]
pub fn parse_duration_ms(token: &str) -> Option<f64> {
    let token = token.trim();
    if let Some(value) = token.strip_suffix("ms") {
        value.parse::<f64>().ok()
    } else if let Some(value) = token.strip_suffix("us") {
        value.parse::<f64>().ok().map(|v| v / 1000.0)
    } else if let Some(value) = token.strip_suffix('s') {
        value.parse::<f64>().ok().map(|v| v * 1000.0)
    } else if let Some(value) = token.strip_suffix('m') {
        value.parse::<f64>().ok().map(|v| v * 60_000.0)
    } else {
        None
    }
}

/// Format a millisecond value back into a wrk-style token, picking the
/// unit wrk itself would use at that magnitude.
#[must_use]
pub fn format_ms(ms: f64) -> String {
    if ms >= 60_000.0 {
        format!("{}m", ms / 60_000.0)
    } else if ms >= 1000.0 {
        format!("{}s", ms / 1000.0)
    } else if ms < 1.0 && ms > 0.0 {
        format!("{}us", ms * 1000.0)
    } else {
        format!("{ms}ms")
    }
}
