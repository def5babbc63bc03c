//! Tolerant extraction and cross-run aggregation of load-test benchmark
//! artifacts.
//!
//! The pipeline reads one results directory produced by the benchmark
//! harness: free-form wrk output, resource-sample CSVs, per-cycle RSS
//! readings, and optional runtime-introspection snapshots. Everything
//! except the configuration is allowed to be missing or mangled; parsers
//! degrade field by field so a partial report always beats no report.
//!
//! Flow: [`config::BenchConfig`] names the variants, runs, and
//! leak-detection cycles; [`aggregate::analyze`] folds each run's
//! artifacts into a [`aggregate::RunRecord`] and each variant's runs into
//! a [`aggregate::VariantSummary`]; [`report`] serializes the result as
//! JSON and markdown.

pub mod aggregate;
pub mod artifacts;
pub mod config;
pub mod drift;
pub mod duration;
pub mod report;
pub mod resources;
pub mod snapshot;
pub mod stats;
pub mod wrk;
