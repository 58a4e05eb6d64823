//! capindex Binary
//!
//! Summarizes an index directory and prints one JSON line to stdout.

use std::path::PathBuf;

use capindex::config::DEFAULT_WORKERS;
use capindex::{Config, Summarizer};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

/// capindex
#[derive(Parser, Debug)]
#[command(name = "capindex")]
#[command(about = "Summarize protocols, ports and addresses in capture index files")]
#[command(version)]
struct Args {
    /// Index directory (its IDX0 path component maps to the PKT0 data directory)
    index_dir: PathBuf,

    /// Window start, 10-digit Unix timestamp
    #[arg(value_parser = parse_timestamp, requires = "end")]
    start: Option<i64>,

    /// Window end, 10-digit Unix timestamp (must be after start)
    #[arg(value_parser = parse_timestamp)]
    end: Option<i64>,

    /// Number of scan worker threads
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Log scan progress and skipped files to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Accept exactly ten ASCII digits
fn parse_timestamp(raw: &str) -> Result<i64, String> {
    if raw.len() != 10 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("wrong timestamp input {:?}: expected 10 digits", raw));
    }
    raw.parse().map_err(|e| format!("wrong timestamp input {:?}: {}", raw, e))
}

fn build_config(args: &Args) -> capindex::Result<Config> {
    let mut builder = Config::builder()
        .index_dir(&args.index_dir)
        .workers(args.workers);

    if let (Some(start), Some(end)) = (args.start, args.end) {
        builder = builder.window(start, end);
    }

    builder.build()
}

fn main() {
    let args = Args::parse();

    // Logs go to stderr; stdout carries only the summary line
    let default_filter = if args.verbose {
        "info,capindex=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("capindex v{}", capindex::VERSION);

    let config = match build_config(&args) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    let summary = match Summarizer::new(config).run() {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Scan failed: {}", e);
            std::process::exit(1);
        }
    };

    match summary.snapshot.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            tracing::error!("Failed to render summary: {}", e);
            std::process::exit(1);
        }
    }
}
