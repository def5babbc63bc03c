//! Leak-detection drift: RSS across cycles and runtime-counter deltas.
//!
//! A run repeats a load-then-measure cycle `leak_cycles` times; monotonic
//! growth of RSS or of runtime counters across those cycles is the leak
//! signal. Both drift paths tolerate arbitrary gaps in the artifact set.

use serde::Serialize;

use crate::artifacts::RunArtifacts;
use crate::snapshot::{RuntimeSnapshot, read_snapshot};
use crate::stats::round2;

/// Read one post-cycle RSS sample (KB). Empty, non-numeric, and literal
/// `0` content all mean "no sample" and come back as 0; a missing file
/// does too.
#[must_use]
pub fn read_rss_sample(path: &std::path::Path) -> i64 {
    let Ok(raw) = std::fs::read_to_string(path) else {
        return 0;
    };
    raw.trim().parse().unwrap_or(0)
}

/// RSS trend across leak-detection cycles.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RssDrift {
    /// Valid (> 0) post-cycle samples in cycle order.
    pub rss_after_cycle_kb: Vec<i64>,
    /// Last minus first valid sample; may be negative.
    pub drift_kb: i64,
    /// Drift relative to the first valid sample, percent.
    pub drift_pct: f64,
}

/// Fold the per-cycle samples into a drift measurement.
///
/// Fewer than two valid samples means no drift can be computed: both
/// deltas stay 0, but the surviving sample list is still reported so the
/// output shows what was observed.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compute_rss_drift<I: IntoIterator<Item = i64>>(samples: I) -> RssDrift {
    let valid: Vec<i64> = samples.into_iter().filter(|&kb| kb > 0).collect();
    if valid.len() < 2 {
        return RssDrift {
            rss_after_cycle_kb: valid,
            ..RssDrift::default()
        };
    }
    let first = valid[0];
    let drift_kb = valid[valid.len() - 1] - first;
    let drift_pct = if first > 0 {
        round2(drift_kb as f64 / first as f64 * 100.0)
    } else {
        0.0
    };
    RssDrift {
        rss_after_cycle_kb: valid,
        drift_kb,
        drift_pct,
    }
}

/// Read cycles 1..=N for one run and compute the RSS drift.
#[must_use]
pub fn rss_drift_for_run(artifacts: &RunArtifacts, leak_cycles: u32) -> RssDrift {
    compute_rss_drift(
        (1..=leak_cycles).map(|cycle| read_rss_sample(&artifacts.rss_after_cycle(cycle))),
    )
}

/// Runtime-counter movement over one run, final minus before.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RuntimeDrift {
    pub goroutines_before: i64,
    pub goroutines_after_load: i64,
    pub goroutines_final: i64,
    pub heap_inuse_before: i64,
    pub heap_inuse_after_load: i64,
    pub heap_inuse_final: i64,
    pub goroutine_leak: i64,
    pub heap_inuse_drift: i64,
}

/// Compute runtime drift from up to three snapshots.
///
/// No "before" snapshot means no baseline, so the whole drift is `None`.
/// A missing after-load or final snapshot zeroes its columns without
/// blocking the final-vs-before delta.
#[must_use]
pub fn compute_runtime_drift(
    before: Option<RuntimeSnapshot>,
    after_load: Option<RuntimeSnapshot>,
    last: Option<RuntimeSnapshot>,
) -> Option<RuntimeDrift> {
    let before = before?;
    let after_load = after_load.unwrap_or_default();
    let last = last.unwrap_or_default();
    Some(RuntimeDrift {
        goroutines_before: before.goroutines,
        goroutines_after_load: after_load.goroutines,
        goroutines_final: last.goroutines,
        heap_inuse_before: before.heap_inuse,
        heap_inuse_after_load: after_load.heap_inuse,
        heap_inuse_final: last.heap_inuse,
        goroutine_leak: last.goroutines - before.goroutines,
        heap_inuse_drift: last.heap_inuse - before.heap_inuse,
    })
}

/// The "final" snapshot is the newest post-cycle snapshot that exists:
/// scan cycle N down to 1 and take the first hit, so a missing trailing
/// cycle falls back to an earlier one.
#[must_use]
pub fn final_snapshot(artifacts: &RunArtifacts, leak_cycles: u32) -> Option<RuntimeSnapshot> {
    (1..=leak_cycles)
        .rev()
        .find_map(|cycle| read_snapshot(&artifacts.snapshot_after_cycle(cycle)))
}

/// Gather the before / after-load / final snapshots for one run and
/// compute the drift, `None` when the variant exposes no introspection.
#[must_use]
pub fn runtime_drift_for_run(artifacts: &RunArtifacts, leak_cycles: u32) -> Option<RuntimeDrift> {
    let before = read_snapshot(&artifacts.snapshot_before());
    if before.is_none() {
        tracing::debug!("no runtime introspection for {}", artifacts.tag());
    }
    let after_load = read_snapshot(&artifacts.snapshot_after_load());
    compute_runtime_drift(before, after_load, final_snapshot(artifacts, leak_cycles))
}
