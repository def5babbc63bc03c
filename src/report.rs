//! Output rendering: the JSON envelope and the markdown report.
//!
//! Pure formatting over already-computed data. The JSON side is a
//! faithful dump of the config plus every variant summary; the markdown
//! side is a performance table and a per-run leak-detection section.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::aggregate::VariantSummary;
use crate::config::BenchConfig;

/// RSS drift below this (percent, absolute) counts as a pass.
const RSS_DRIFT_WARN_PCT: f64 = 10.0;
/// Goroutine-count drift above this (absolute) gets flagged.
const GOROUTINE_LEAK_WARN: i64 = 5;

/// The complete output artifact: config echo, per-variant results, and a
/// generation timestamp.
#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    pub generated_at: String,
    pub config: &'a BenchConfig,
    pub results: &'a BTreeMap<String, VariantSummary>,
}

impl<'a> Summary<'a> {
    #[must_use]
    pub fn new(config: &'a BenchConfig, results: &'a BTreeMap<String, VariantSummary>) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            config,
            results,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Title-case a variant id for display: `go_process_short` becomes
/// `Go Process Short`, with `std` expanded to `Standard`.
#[must_use]
pub fn format_variant_name(variant: &str) -> String {
    variant
        .split('_')
        .map(|word| {
            if word.eq_ignore_ascii_case("std") {
                return "Standard".to_string();
            }
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn cell0(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.0}"))
}

fn cell1(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.1}"))
}

fn cell2(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.2}"))
}

fn scenario_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render the markdown report. Variants appear in config order; a variant
/// with no summary (not produced by this pipeline, but tolerated) is
/// skipped.
#[must_use]
pub fn render_markdown(summary: &Summary<'_>) -> String {
    let config = summary.config;
    let mut out = String::new();

    out.push_str("# Load Benchmark Results\n\n");
    let _ = writeln!(out, "**Generated:** {}  ", summary.generated_at);
    let _ = writeln!(out, "**Runs per variant:** {}  ", config.runs);
    if let Some(scenarios) = &config.scenarios {
        out.push_str("**Scenarios tested:**\n");
        for (name, args) in scenarios {
            let _ = writeln!(out, "- **{name}:** {}", scenario_value(args));
        }
    }
    out.push('\n');

    out.push_str("## Performance\n\n");
    out.push_str(
        "| Variant | Median Req/s | p50 (ms) | p99 (ms) | Non-2xx | Peak RSS (MB) \
         | Avg CPU (%) | CPU Time (s) | RSS Drift (KB) | Goroutine Leak |\n",
    );
    out.push_str("|---|---:|---:|---:|---:|---:|---:|---:|---:|---:|\n");

    for variant in &config.variants {
        let Some(data) = summary.results.get(variant) else {
            continue;
        };
        let drift = if data.mean_rss_drift_kb == 0.0 {
            "0".to_string()
        } else {
            format!("{:.0}", data.mean_rss_drift_kb)
        };
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} | {} | {} | {} | {} |",
            format_variant_name(variant),
            cell0(data.median_rps),
            cell2(data.median_p50_ms),
            cell2(data.median_p99_ms),
            data.total_non_2xx,
            cell1(data.peak_rss_mb),
            cell1(data.avg_cpu_pct),
            cell2(data.mean_total_cpu_sec),
            drift,
            cell0(data.mean_goroutine_leak),
        );
    }

    out.push_str("\n## Leak Detection Details\n\n");
    for variant in &config.variants {
        let Some(data) = summary.results.get(variant) else {
            continue;
        };
        let readable = format_variant_name(variant);
        for record in &data.runs {
            let drift = &record.rss_drift;
            let status = if drift.drift_pct.abs() < RSS_DRIFT_WARN_PCT {
                "PASS"
            } else {
                "WARN"
            };
            let mut line = format!(
                "- **{readable}** run {}: RSS drift={}KB ({:.1}%) [{status}]",
                record.run, drift.drift_kb, drift.drift_pct
            );
            if let Some(pprof) = record.pprof {
                let g_status = if pprof.goroutine_leak.abs() <= GOROUTINE_LEAK_WARN {
                    "PASS"
                } else {
                    "WARN"
                };
                let _ = write!(
                    line,
                    " | goroutines: {}->{} (leak={}) [{g_status}]",
                    pprof.goroutines_before, pprof.goroutines_final, pprof.goroutine_leak
                );
            }
            out.push_str(&line);
            out.push('\n');
        }
    }
    out.push('\n');

    out
}
