//! Tolerant extraction of metrics from wrk output text.
//!
//! Every field is extracted by its own pattern over the same text; a
//! missing or mangled section leaves that one field `None` and never
//! blocks the others. Values are passed through as matched, with no range
//! validation.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::duration::parse_duration_ms;

/// Metrics pulled from one wrk report.
///
/// Latencies are milliseconds. `non_2xx` defaults to 0 because wrk only
/// prints the line when errors occurred; `transfer_sec` keeps wrk's
/// unit-suffixed form verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub requests_sec: Option<f64>,
    pub latency_avg: Option<f64>,
    pub latency_stdev: Option<f64>,
    pub latency_max: Option<f64>,
    pub latency_p50: Option<f64>,
    pub latency_p75: Option<f64>,
    pub latency_p90: Option<f64>,
    pub latency_p99: Option<f64>,
    pub total_requests: Option<u64>,
    pub non_2xx: u64,
    pub transfer_sec: Option<String>,
}

fn requests_sec_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Requests/sec:\s+([\d.]+)").expect("Requests/sec regex"))
}

fn transfer_sec_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Transfer/sec:\s+([\d.]+\S+)").expect("Transfer/sec regex"))
}

fn latency_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"Latency\s+([\d.]+\S+)\s+([\d.]+\S+)\s+([\d.]+\S+)").expect("Latency regex")
    })
}

fn percentile_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*(50|75|90|99)%\s+([\d.]+\S+)").expect("percentile regex")
    })
}

fn total_requests_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\s+requests\s+in").expect("requests-in regex"))
}

fn non_2xx_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Non-2xx responses:\s+(\d+)").expect("Non-2xx regex"))
}

/// Extract whatever fields are present in `content`. Never fails.
#[must_use]
pub fn parse_load_report(content: &str) -> LoadReport {
    let mut report = LoadReport::default();

    if let Some(caps) = requests_sec_regex().captures(content) {
        report.requests_sec = caps[1].parse().ok();
    }
    if let Some(caps) = transfer_sec_regex().captures(content) {
        report.transfer_sec = Some(caps[1].to_string());
    }

    // Thread-stats line: avg, stdev, max in one shot.
    if let Some(caps) = latency_line_regex().captures(content) {
        report.latency_avg = parse_duration_ms(&caps[1]);
        report.latency_stdev = parse_duration_ms(&caps[2]);
        report.latency_max = parse_duration_ms(&caps[3]);
    }

    for caps in percentile_regex().captures_iter(content) {
        let value = parse_duration_ms(&caps[2]);
        match &caps[1] {
            "50" => report.latency_p50 = value,
            "75" => report.latency_p75 = value,
            "90" => report.latency_p90 = value,
            "99" => report.latency_p99 = value,
            _ => {}
        }
    }

    if let Some(caps) = total_requests_regex().captures(content) {
        report.total_requests = caps[1].parse().ok();
    }
    if let Some(caps) = non_2xx_regex().captures(content) {
        report.non_2xx = caps[1].parse().unwrap_or(0);
    }

    report
}

/// Read and parse one wrk output file. A missing or unreadable file
/// yields an all-unavailable report, not an error.
#[must_use]
pub fn read_load_report(path: &Path) -> LoadReport {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_load_report(&content),
        Err(err) => {
            tracing::debug!("no load report at {}: {err}", path.display());
            LoadReport::default()
        }
    }
}
