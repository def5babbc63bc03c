//! Resource-sample series and the cumulative CPU-time sidecar.
//!
//! The monitor appends one CSV row per sampling tick while the server is
//! under load, and writes a small JSON sidecar with process totals when
//! it stops. Both are reduced here to per-run scalars.

use std::path::Path;

use serde::Deserialize;

const RSS_COLUMN: &str = "RSS_KB";
const CPU_COLUMN: &str = "CPU_Percent";

/// Reduced view of one run's resource samples.
///
/// All fields are 0.0 when the series or sidecar is missing or entirely
/// unparseable. Zero deliberately means "no signal" here (not
/// "unavailable"): the cross-run aggregator filters zeros out before
/// reducing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResourceUsage {
    /// Peak resident set size, MB (the series is KB-denominated).
    pub max_rss_mb: f64,
    pub avg_cpu_pct: f64,
    pub peak_cpu_pct: f64,
    /// Cumulative CPU seconds, from the sidecar rather than the series.
    pub total_cpu_sec: f64,
}

/// Reduce the `RSS_KB`/`CPU_Percent` sample series.
///
/// Each column is reduced independently over the rows where that column
/// parses as a number, so a tick with a mangled CPU reading still
/// contributes its RSS reading and vice versa. Unparseable cells are
/// skipped, never fatal.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn read_resource_series(path: &Path) -> ResourceUsage {
    let mut usage = ResourceUsage::default();
    let Ok(mut reader) = csv::ReaderBuilder::new().flexible(true).from_path(path) else {
        tracing::debug!("no resource series at {}", path.display());
        return usage;
    };
    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(err) => {
            tracing::warn!("unreadable resource series header {}: {err}", path.display());
            return usage;
        }
    };
    let rss_col = headers.iter().position(|name| name == RSS_COLUMN);
    let cpu_col = headers.iter().position(|name| name == CPU_COLUMN);
    if rss_col.is_none() && cpu_col.is_none() {
        tracing::warn!(
            "resource series {} has neither {RSS_COLUMN} nor {CPU_COLUMN}",
            path.display()
        );
        return usage;
    }

    let mut max_rss_kb: i64 = 0;
    let mut total_cpu = 0.0_f64;
    let mut peak_cpu = 0.0_f64;
    let mut cpu_samples: u32 = 0;

    for record in reader.records() {
        let Ok(record) = record else {
            continue;
        };
        if let Some(rss) = rss_col
            .and_then(|col| record.get(col))
            .and_then(|cell| cell.trim().parse::<i64>().ok())
        {
            max_rss_kb = max_rss_kb.max(rss);
        }
        if let Some(cpu) = cpu_col
            .and_then(|col| record.get(col))
            .and_then(|cell| cell.trim().parse::<f64>().ok())
        {
            total_cpu += cpu;
            peak_cpu = peak_cpu.max(cpu);
            cpu_samples += 1;
        }
    }

    usage.max_rss_mb = max_rss_kb as f64 / 1024.0;
    if cpu_samples > 0 {
        usage.avg_cpu_pct = total_cpu / f64::from(cpu_samples);
    }
    usage.peak_cpu_pct = peak_cpu;
    usage
}

#[derive(Debug, Deserialize)]
struct ResourceSidecar {
    #[serde(default)]
    total_cpu_seconds: f64,
}

/// Read cumulative CPU seconds from the monitor's JSON sidecar, 0.0 on
/// any read or parse failure.
#[must_use]
pub fn read_cpu_time(path: &Path) -> f64 {
    let Ok(raw) = std::fs::read_to_string(path) else {
        return 0.0;
    };
    match serde_json::from_str::<ResourceSidecar>(&raw) {
        Ok(sidecar) => sidecar.total_cpu_seconds,
        Err(err) => {
            tracing::warn!("bad resource sidecar {}: {err}", path.display());
            0.0
        }
    }
}
