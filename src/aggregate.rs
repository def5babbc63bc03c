//! Per-run assembly and cross-run reduction.
//!
//! One [`RunRecord`] is built per (variant, run) pair by invoking every
//! parser over that run's artifact set; a variant's records then fold
//! into a [`VariantSummary`]. Runs are independent: a missing artifact
//! degrades its own fields and never aborts the batch.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::artifacts::RunArtifacts;
use crate::config::BenchConfig;
use crate::drift::{RssDrift, RuntimeDrift, rss_drift_for_run, runtime_drift_for_run};
use crate::resources::{read_cpu_time, read_resource_series};
use crate::stats;
use crate::wrk::read_load_report;

/// Everything measured for one (variant, run) pair. Write-once; field
/// names match the harness's `summary.json` schema.
#[derive(Debug, Clone, Serialize)]
pub struct RunRecord {
    pub run: u32,
    pub requests_sec: Option<f64>,
    pub latency_avg_ms: Option<f64>,
    pub latency_stdev_ms: Option<f64>,
    pub latency_p50_ms: Option<f64>,
    pub latency_p75_ms: Option<f64>,
    pub latency_p90_ms: Option<f64>,
    pub latency_p99_ms: Option<f64>,
    pub latency_max_ms: Option<f64>,
    pub total_requests: Option<u64>,
    pub non_2xx: u64,
    pub transfer_sec: Option<String>,
    pub max_rss_mb: f64,
    pub avg_cpu_pct: f64,
    pub peak_cpu_pct: f64,
    pub total_cpu_sec: f64,
    pub rss_drift: RssDrift,
    /// Runtime-introspection drift; `null` for variants without it.
    pub pprof: Option<RuntimeDrift>,
}

impl RunRecord {
    /// Parse one run's artifact set.
    #[must_use]
    pub fn collect(artifacts: &RunArtifacts, run: u32, leak_cycles: u32) -> Self {
        let load = read_load_report(&artifacts.load_report());
        let resources = read_resource_series(&artifacts.resource_series());
        let total_cpu_sec = read_cpu_time(&artifacts.resource_sidecar());
        let rss_drift = rss_drift_for_run(artifacts, leak_cycles);
        let pprof = runtime_drift_for_run(artifacts, leak_cycles);

        Self {
            run,
            requests_sec: load.requests_sec,
            latency_avg_ms: load.latency_avg,
            latency_stdev_ms: load.latency_stdev,
            latency_p50_ms: load.latency_p50,
            latency_p75_ms: load.latency_p75,
            latency_p90_ms: load.latency_p90,
            latency_p99_ms: load.latency_p99,
            latency_max_ms: load.latency_max,
            total_requests: load.total_requests,
            non_2xx: load.non_2xx,
            transfer_sec: load.transfer_sec,
            max_rss_mb: stats::round2(resources.max_rss_mb),
            avg_cpu_pct: stats::round1(resources.avg_cpu_pct),
            peak_cpu_pct: stats::round1(resources.peak_cpu_pct),
            total_cpu_sec,
            rss_drift,
            pprof,
        }
    }
}

/// Cross-run statistics for one variant, plus the raw records.
///
/// Median for throughput and latency percentiles (robust to an outlier
/// run), mean for magnitudes, peak where worst-case matters, sum only for
/// error counts. Every reduction sees only the runs that produced a
/// defined value for its field; `None` means no run did.
#[derive(Debug, Clone, Serialize)]
pub struct VariantSummary {
    pub runs: Vec<RunRecord>,
    pub median_rps: Option<f64>,
    pub median_p50_ms: Option<f64>,
    pub median_p99_ms: Option<f64>,
    pub peak_rss_mb: Option<f64>,
    pub mean_rss_mb: Option<f64>,
    pub avg_cpu_pct: Option<f64>,
    pub peak_cpu_pct: Option<f64>,
    pub mean_total_cpu_sec: Option<f64>,
    /// Mean over runs with nonzero drift; 0.0 when none drifted.
    pub mean_rss_drift_kb: f64,
    /// Plain sum: no observations counts as no occurrences.
    pub total_non_2xx: u64,
    /// `null` (not zero) when no run exposed runtime introspection.
    pub mean_goroutine_leak: Option<f64>,
    pub mean_heap_inuse_drift: Option<f64>,
}

impl VariantSummary {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_runs(runs: Vec<RunRecord>) -> Self {
        let rps: Vec<f64> = runs.iter().filter_map(|r| r.requests_sec).collect();
        let p50: Vec<f64> = runs.iter().filter_map(|r| r.latency_p50_ms).collect();
        let p99: Vec<f64> = runs.iter().filter_map(|r| r.latency_p99_ms).collect();
        // RSS/CPU zeros mean "no signal" and are excluded from reduction.
        let rss: Vec<f64> = runs
            .iter()
            .map(|r| r.max_rss_mb)
            .filter(|&v| v > 0.0)
            .collect();
        let avg_cpu: Vec<f64> = runs
            .iter()
            .map(|r| r.avg_cpu_pct)
            .filter(|&v| v > 0.0)
            .collect();
        let peak_cpu: Vec<f64> = runs
            .iter()
            .map(|r| r.peak_cpu_pct)
            .filter(|&v| v > 0.0)
            .collect();
        let cpu_sec: Vec<f64> = runs
            .iter()
            .map(|r| r.total_cpu_sec)
            .filter(|&v| v > 0.0)
            .collect();
        let drift_kb: Vec<f64> = runs
            .iter()
            .map(|r| r.rss_drift.drift_kb)
            .filter(|&kb| kb != 0)
            .map(|kb| kb as f64)
            .collect();
        let goroutine_leak: Vec<f64> = runs
            .iter()
            .filter_map(|r| r.pprof)
            .map(|p| p.goroutine_leak as f64)
            .collect();
        let heap_drift: Vec<f64> = runs
            .iter()
            .filter_map(|r| r.pprof)
            .map(|p| p.heap_inuse_drift as f64)
            .collect();

        Self {
            median_rps: stats::median(&rps),
            median_p50_ms: stats::median(&p50),
            median_p99_ms: stats::median(&p99),
            peak_rss_mb: stats::max(&rss).map(stats::round2),
            mean_rss_mb: stats::mean(&rss),
            avg_cpu_pct: stats::mean(&avg_cpu),
            peak_cpu_pct: stats::max(&peak_cpu).map(stats::round1),
            mean_total_cpu_sec: stats::mean(&cpu_sec),
            mean_rss_drift_kb: stats::mean(&drift_kb).unwrap_or(0.0),
            total_non_2xx: runs.iter().map(|r| r.non_2xx).sum(),
            mean_goroutine_leak: stats::mean(&goroutine_leak),
            mean_heap_inuse_drift: stats::mean(&heap_drift),
            runs,
        }
    }
}

/// Analyze one variant: R run records folded into a summary.
#[must_use]
pub fn analyze_variant(results_dir: &Path, variant: &str, config: &BenchConfig) -> VariantSummary {
    let runs = (1..=config.runs)
        .map(|run| {
            let artifacts = RunArtifacts::new(results_dir, variant, run);
            RunRecord::collect(&artifacts, run, config.leak_cycles)
        })
        .collect();
    VariantSummary::from_runs(runs)
}

/// Analyze every configured variant over a results directory. Single
/// threaded, single pass; nothing here can fail once the config loaded.
#[must_use]
pub fn analyze(results_dir: &Path, config: &BenchConfig) -> BTreeMap<String, VariantSummary> {
    let mut results = BTreeMap::new();
    for variant in &config.variants {
        tracing::debug!("analyzing variant {variant}");
        results.insert(
            variant.clone(),
            analyze_variant(results_dir, variant, config),
        );
    }
    results
}
