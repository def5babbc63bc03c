#![forbid(unsafe_code)]

//! CLI entrypoint: analyze a benchmark results directory and emit
//! `summary.json` plus `summary.md`.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use loadsum::aggregate::analyze;
use loadsum::config::BenchConfig;
use loadsum::report::{Summary, render_markdown};

#[derive(Debug, Parser)]
#[command(name = "loadsum")]
#[command(version)]
#[command(about = "Summarize load-test benchmark artifacts into JSON and markdown reports")]
struct Args {
    /// Directory holding config.json and the per-run artifacts.
    results_dir: PathBuf,
    /// JSON output path (defaults to <results_dir>/summary.json).
    #[arg(long)]
    json_out: Option<PathBuf>,
    /// Markdown output path (defaults to <results_dir>/summary.md).
    #[arg(long)]
    md_out: Option<PathBuf>,
    /// Skip printing the markdown report to stdout.
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

fn main() {
    if let Err(err) = main_impl() {
        eprintln!("{err:?}");
        std::process::exit(1);
    }
}

fn main_impl() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_path = args.results_dir.join("config.json");
    let config = BenchConfig::load(&config_path)
        .with_context(|| format!("load {}", config_path.display()))?;

    let results = analyze(&args.results_dir, &config);
    let summary = Summary::new(&config, &results);

    let json_path = args
        .json_out
        .unwrap_or_else(|| args.results_dir.join("summary.json"));
    fs::write(&json_path, summary.to_json()?)
        .with_context(|| format!("write {}", json_path.display()))?;
    tracing::info!("wrote {}", json_path.display());

    let markdown = render_markdown(&summary);
    let md_path = args
        .md_out
        .unwrap_or_else(|| args.results_dir.join("summary.md"));
    fs::write(&md_path, &markdown).with_context(|| format!("write {}", md_path.display()))?;
    tracing::info!("wrote {}", md_path.display());

    if !args.quiet {
        println!("{markdown}");
    }
    Ok(())
}
