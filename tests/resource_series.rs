//! Resource CSV reduction: per-column independence, row skipping, and
//! the zero-defaults for missing series/sidecar.
//!
//! Run: `cargo test --test resource_series`

use std::fs;
use std::path::PathBuf;

use loadsum::resources::{ResourceUsage, read_cpu_time, read_resource_series};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write_series(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("resources.csv");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn clean_series_reduces_all_three() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_series(
        &dir,
        "Timestamp,RSS_KB,CPU_Percent\n\
         1,1024,10.0\n\
         2,2048,30.0\n\
         3,1536,20.0\n",
    );
    let usage = read_resource_series(&path);
    assert_eq!(usage.max_rss_mb, 2.0);
    assert_eq!(usage.avg_cpu_pct, 20.0);
    assert_eq!(usage.peak_cpu_pct, 30.0);
}

#[test]
fn bad_cpu_cells_do_not_discard_rss_readings() {
    // 2 of 5 rows have non-numeric CPU: the CPU mean/peak cover the 3
    // valid rows, while peak RSS still covers all 5 RSS values.
    let dir = tempfile::tempdir().unwrap();
    let path = write_series(
        &dir,
        "Timestamp,RSS_KB,CPU_Percent\n\
         1,1000,12.0\n\
         2,2000,broken\n\
         3,3000,30.0\n\
         4,5000,\n\
         5,4000,18.0\n",
    );
    let usage = read_resource_series(&path);
    assert_eq!(usage.max_rss_mb, 5000.0 / 1024.0);
    assert_eq!(usage.avg_cpu_pct, 20.0);
    assert_eq!(usage.peak_cpu_pct, 30.0);
}

#[test]
fn bad_rss_cells_do_not_discard_cpu_readings() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_series(
        &dir,
        "Timestamp,RSS_KB,CPU_Percent\n\
         1,oops,40.0\n\
         2,1024,60.0\n",
    );
    let usage = read_resource_series(&path);
    assert_eq!(usage.max_rss_mb, 1.0);
    assert_eq!(usage.avg_cpu_pct, 50.0);
    assert_eq!(usage.peak_cpu_pct, 60.0);
}

#[test]
fn missing_series_is_all_zero() {
    let dir = tempfile::tempdir().unwrap();
    let usage = read_resource_series(&dir.path().join("nope.csv"));
    assert_eq!(usage, ResourceUsage::default());
}

#[test]
fn header_only_series_is_all_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_series(&dir, "Timestamp,RSS_KB,CPU_Percent\n");
    assert_eq!(read_resource_series(&path), ResourceUsage::default());
}

#[test]
fn unknown_columns_are_all_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_series(&dir, "a,b\n1,2\n");
    assert_eq!(read_resource_series(&path), ResourceUsage::default());
}

#[test]
fn entirely_unparseable_rows_are_all_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_series(
        &dir,
        "Timestamp,RSS_KB,CPU_Percent\n\
         1,x,y\n\
         2,,\n",
    );
    assert_eq!(read_resource_series(&path), ResourceUsage::default());
}

#[test]
fn sidecar_reads_total_cpu_seconds() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resources.csv.summary");
    fs::write(&path, r#"{"total_cpu_seconds": 12.5, "samples": 30}"#).unwrap();
    assert_eq!(read_cpu_time(&path), 12.5);
}

#[test]
fn sidecar_missing_key_defaults_to_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resources.csv.summary");
    fs::write(&path, r#"{"samples": 30}"#).unwrap();
    assert_eq!(read_cpu_time(&path), 0.0);
}

#[test]
fn sidecar_missing_or_corrupt_defaults_to_zero() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(read_cpu_time(&dir.path().join("nope.summary")), 0.0);

    let path = dir.path().join("bad.summary");
    fs::write(&path, "{not json").unwrap();
    assert_eq!(read_cpu_time(&path), 0.0);
}
