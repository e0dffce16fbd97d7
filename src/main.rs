mod config;
mod diff;
mod fetch;
mod keywords;
mod models;
mod orchestrator;
mod persist;
mod text;
mod weights;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

use config::{load_config, AppConfig, CONFIG_ENV};
use orchestrator::run_pipeline;

/// Title Cloud - word cloud weights from patent and paper titles
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory for wordcloud_data.json / wordcloud_diff.json (default: ".")
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Path to YAML config file (overrides TITLE_CLOUD_CONFIG environment variable)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Local file of pre-scraped DZone titles, one per line
    #[arg(long)]
    cache_file: Option<PathBuf>,
}

fn resolve_config(args: &Args) -> Result<AppConfig> {
    // --config > TITLE_CLOUD_CONFIG > built-in defaults
    let path = args
        .config
        .clone()
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

    let mut cfg = match path {
        Some(p) => {
            debug!("Using config file: {}", p.display());
            load_config(&p)?
        }
        None => {
            debug!("No config file given, using built-in defaults");
            AppConfig::default()
        }
    };

    if let Some(ref cache) = args.cache_file {
        cfg.cache_file = cache.clone();
    }
    Ok(cfg.with_output_dir(&args.output_dir))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();

    info!("Starting title_cloud");

    let args = Args::parse();
    let cfg = resolve_config(&args)?;
    debug!(
        "Resolved outputs - data={}, diff={}",
        cfg.output_file.display(),
        cfg.diff_file.display()
    );

    let summary = run_pipeline(&cfg).await?;
    debug!(
        "Run summary - titles={}, words={}, changed={}, diff_written={}",
        summary.titles,
        summary.weights.len(),
        summary.diff.len(),
        summary.diff_written
    );
    Ok(())
}
