//! `verify-samples`: re-derive sharded depth labels for a seeded corpus
//! sample and write `step<label>.qasm` artifacts.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use xferdepth_harness::config::DriverConfig;
use xferdepth_harness::runner::run_verification;

#[derive(Parser, Debug)]
#[command(author, version, about = "Verify precomputed rewrite-distance labels")]
struct Args {
    /// JSON configuration file; omitted fields take their defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory holding `<i>.json` label shards
    #[arg(long)]
    shard_dir: Option<PathBuf>,
    #[arg(long)]
    shard_count: Option<usize>,
    #[arg(long)]
    shard_stride: Option<usize>,
    /// Corpus file mapping id to `[qasm, gate_count]`
    #[arg(long)]
    corpus: Option<PathBuf>,
    #[arg(long)]
    sample_size: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    max_depth: Option<u32>,
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Searches run in parallel
    #[arg(long)]
    jobs: Option<usize>,
    /// Stop at the first mismatching label
    #[arg(long)]
    fail_fast: bool,
    /// Per-search wall-clock budget in seconds
    #[arg(long)]
    deadline_secs: Option<u64>,
}

impl Args {
    fn into_config(self) -> Result<DriverConfig> {
        let mut config = match &self.config {
            Some(path) => DriverConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => DriverConfig::default(),
        };
        if let Some(v) = self.shard_dir {
            config.shard_dir = v;
        }
        if let Some(v) = self.shard_count {
            config.shard_count = v;
        }
        if let Some(v) = self.shard_stride {
            config.shard_stride = v;
        }
        if let Some(v) = self.corpus {
            config.corpus_path = v;
        }
        if let Some(v) = self.sample_size {
            config.sample_size = v;
        }
        if let Some(v) = self.seed {
            config.seed = v;
        }
        if let Some(v) = self.max_depth {
            config.max_depth = v;
        }
        if let Some(v) = self.output_dir {
            config.output_dir = v;
        }
        if let Some(v) = self.jobs {
            config.jobs = v;
        }
        if self.fail_fast {
            config.fail_fast = true;
        }
        if self.deadline_secs.is_some() {
            config.deadline_secs = self.deadline_secs;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = args.into_config()?;
    let report = run_verification(&config).context("verification batch failed")?;
    info!(
        verified = report.verified.len(),
        output_dir = %config.output_dir.display(),
        "all sampled labels verified"
    );
    Ok(())
}
