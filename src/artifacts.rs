//! Filename conventions for per-run artifacts in a results directory.
//!
//! The harness tags every file it writes with `{variant}_run{N}`. This is
//! the single place that knows the tag and suffix scheme; everything else
//! asks for paths by role.

use std::path::{Path, PathBuf};

/// Path resolver for one (variant, run) pair's artifact set.
#[derive(Debug, Clone)]
pub struct RunArtifacts {
    dir: PathBuf,
    tag: String,
}

impl RunArtifacts {
    #[must_use]
    pub fn new(results_dir: &Path, variant: &str, run: u32) -> Self {
        Self {
            dir: results_dir.to_path_buf(),
            tag: format!("{variant}_run{run}"),
        }
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// wrk output for the high-load phase.
    #[must_use]
    pub fn load_report(&self) -> PathBuf {
        self.dir.join(format!("{}_wrk_load.txt", self.tag))
    }

    #[must_use]
    pub fn resource_series(&self) -> PathBuf {
        self.dir.join(format!("{}_resources.csv", self.tag))
    }

    /// JSON sidecar the monitor writes next to the series on shutdown.
    #[must_use]
    pub fn resource_sidecar(&self) -> PathBuf {
        self.dir.join(format!("{}_resources.csv.summary", self.tag))
    }

    /// Single-value RSS reading taken after a leak-detection cycle.
    #[must_use]
    pub fn rss_after_cycle(&self, cycle: u32) -> PathBuf {
        self.dir
            .join(format!("{}_rss_after_cycle{cycle}.txt", self.tag))
    }

    #[must_use]
    pub fn snapshot_before(&self) -> PathBuf {
        self.dir.join(format!("{}_pprof_before.json", self.tag))
    }

    #[must_use]
    pub fn snapshot_after_load(&self) -> PathBuf {
        self.dir.join(format!("{}_pprof_after_load.json", self.tag))
    }

    #[must_use]
    pub fn snapshot_after_cycle(&self, cycle: u32) -> PathBuf {
        self.dir
            .join(format!("{}_pprof_leak_cycle{cycle}_after.json", self.tag))
    }
}
