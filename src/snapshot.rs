//! Runtime-introspection snapshots.
//!
//! Some benchmarked implementations expose pprof-style counters (a
//! concurrency-unit count and heap-in-use bytes) that the harness dumps
//! as small JSON files around the load phase. Variants without
//! introspection simply never produce these files.

use std::path::Path;

use serde::Deserialize;

/// Point-in-time runtime counters. Missing keys default to 0; the shape
/// is otherwise not validated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct RuntimeSnapshot {
    #[serde(default)]
    pub goroutines: i64,
    #[serde(default)]
    pub heap_inuse: i64,
}

/// Load one snapshot file, or `None` on any read or parse failure.
#[must_use]
pub fn read_snapshot(path: &Path) -> Option<RuntimeSnapshot> {
    let raw = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            tracing::warn!("bad runtime snapshot {}: {err}", path.display());
            None
        }
    }
}
