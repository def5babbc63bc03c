//! wrk report extraction: full reports, partial reports, and garbage.
//! Every field must extract independently of the rest.
//!
//! Run: `cargo test --test load_report`

use loadsum::wrk::{LoadReport, parse_load_report, read_load_report};
use pretty_assertions::assert_eq;

const FULL_REPORT: &str = "\
Running 30s test @ http://127.0.0.1:8080/
  4 threads and 64 connections
  Thread Stats   Avg      Stdev     Max   +/- Stdev
    Latency     1.23ms  456.78us  12.34ms   78.90%
    Req/Sec     2.51k   210.45     3.01k    69.75%
  Latency Distribution
     50%    1.10ms
     75%    1.45ms
     90%    2.01ms
     99%    5.67ms
  300000 requests in 30.00s, 35.10MB read
  Non-2xx responses: 12
Requests/sec:  10000.00
Transfer/sec:      1.17MB
";

#[test]
fn full_report_extracts_every_field() {
    let report = parse_load_report(FULL_REPORT);
    assert_eq!(report.requests_sec, Some(10000.0));
    assert_eq!(report.transfer_sec.as_deref(), Some("1.17MB"));
    assert_eq!(report.latency_avg, Some(1.23));
    assert_eq!(report.latency_stdev, Some(0.45678));
    assert_eq!(report.latency_max, Some(12.34));
    assert_eq!(report.latency_p50, Some(1.10));
    assert_eq!(report.latency_p75, Some(1.45));
    assert_eq!(report.latency_p90, Some(2.01));
    assert_eq!(report.latency_p99, Some(5.67));
    assert_eq!(report.total_requests, Some(300_000));
    assert_eq!(report.non_2xx, 12);
}

#[test]
fn throughput_only_report_leaves_latency_unavailable() {
    let report = parse_load_report("Requests/sec:  512.25\n");
    assert_eq!(report.requests_sec, Some(512.25));
    assert_eq!(report.latency_avg, None);
    assert_eq!(report.latency_stdev, None);
    assert_eq!(report.latency_max, None);
    assert_eq!(report.latency_p50, None);
    assert_eq!(report.latency_p75, None);
    assert_eq!(report.latency_p90, None);
    assert_eq!(report.latency_p99, None);
    assert_eq!(report.total_requests, None);
    assert_eq!(report.transfer_sec, None);
}

#[test]
fn missing_non_2xx_line_means_zero_errors() {
    let report = parse_load_report("Requests/sec:  100.00\n");
    assert_eq!(report.non_2xx, 0);
}

#[test]
fn empty_content_is_all_unavailable() {
    assert_eq!(parse_load_report(""), LoadReport::default());
}

#[test]
fn percentiles_extract_without_latency_line() {
    let report = parse_load_report("  Latency Distribution\n     99%    8.00ms\n");
    assert_eq!(report.latency_p99, Some(8.0));
    assert_eq!(report.latency_p50, None);
    assert_eq!(report.latency_avg, None);
}

#[test]
fn unknown_percentile_unit_degrades_that_field_only() {
    let report = parse_load_report("     50%    1.10ms\n     99%    5.67h\n");
    assert_eq!(report.latency_p50, Some(1.10));
    assert_eq!(report.latency_p99, None);
}

#[test]
fn stdev_column_percentage_is_not_a_percentile() {
    // The 78.90% in the thread-stats header row must not be captured as a
    // latency percentile.
    let report = parse_load_report(FULL_REPORT);
    assert_eq!(report.latency_p90, Some(2.01));
}

#[test]
fn nonsensical_numbers_pass_through_unvalidated() {
    let report = parse_load_report("Requests/sec:  99999999.99\n");
    assert_eq!(report.requests_sec, Some(99_999_999.99));
}

#[test]
fn missing_file_yields_default_report() {
    let dir = tempfile::tempdir().unwrap();
    let report = read_load_report(&dir.path().join("does_not_exist.txt"));
    assert_eq!(report, LoadReport::default());
}

#[test]
fn file_content_round_trips_through_reader() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wrk.txt");
    std::fs::write(&path, FULL_REPORT).unwrap();
    assert_eq!(read_load_report(&path), parse_load_report(FULL_REPORT));
}
