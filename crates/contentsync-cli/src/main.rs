use anyhow::Result;
use clap::Parser;
use contentsync_cli::pipeline;
use contentsync_model::{clean_arxiv_ids, SyncConfig};
use std::path::PathBuf;

/// Fetch itch.io projects and arXiv publications into Hugo content files.
#[derive(Parser)]
#[command(name = "contentsync")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long)]
    utc: bool,

    /// TOML config file; flags given here override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Itch.io profile URL to scrape
    #[arg(long)]
    itch_url: Option<String>,

    /// ArXiv identifiers to download metadata for (space- or comma-separated)
    #[arg(long, num_args = 0.., value_delimiter = ',')]
    arxiv: Option<Vec<String>>,

    /// Output directory for project pages
    #[arg(long)]
    project_dir: Option<PathBuf>,

    /// Output directory for publication pages
    #[arg(long)]
    publication_dir: Option<PathBuf>,

    /// Fetch data but do not write files
    #[arg(long)]
    dry_run: bool,

    /// Print the run report as a single JSON line
    #[arg(long)]
    json: bool,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Cli {
    /// Layer flags over the config file (or defaults).
    fn resolve_config(&self) -> Result<SyncConfig> {
        let mut config = SyncConfig::load(self.config.as_deref())?;
        if let Some(url) = &self.itch_url {
            config.listing_url = url.clone();
        }
        if let Some(ids) = &self.arxiv {
            config.arxiv_ids = clean_arxiv_ids(ids);
        }
        if let Some(dir) = &self.project_dir {
            config.project_dir = dir.clone();
        }
        if let Some(dir) = &self.publication_dir {
            config.publication_dir = dir.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(level: &LogLevel, utc: bool) {
    // Suppress noisy HTML-parsing crates at debug/trace
    let level = match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug,selectors=warn,html5ever=warn",
        LogLevel::Trace => "trace,selectors=warn,html5ever=warn",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    // Logs go to stderr; stdout carries only the run report.
    if utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.utc);

    let config = cli.resolve_config()?;
    tracing::info!(
        listing = %config.listing_url,
        arxiv_ids = config.arxiv_ids.len(),
        dry_run = cli.dry_run,
        "Starting content sync"
    );

    let report = pipeline::run(&config, cli.dry_run).await?;

    let mut stdout = std::io::stdout().lock();
    if cli.json {
        report.write_json(&mut stdout)?;
    } else {
        report.write_lines(&mut stdout)?;
    }

    Ok(())
}
