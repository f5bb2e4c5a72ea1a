//! CLI for tget: `tget <url> [speedLimitKBps]`.

mod args;
mod summary;

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tget_core::control::CancelToken;
use tget_core::downloader::{self, DownloadOptions};
use tget_core::session::TransferSession;
use tget_core::{checksum, config, units, url_model};

use args::resolve_speed_limit;

/// Download one file over HTTP(S) with a bandwidth cap.
#[derive(Debug, Parser)]
#[command(name = "tget", version)]
#[command(about = "Download a file over HTTP(S) at a capped rate", long_about = None)]
pub struct Cli {
    /// Direct HTTP/HTTPS URL to download.
    pub url: String,

    /// Maximum rate in KB/s (1 KB = 1024 bytes). Zero or negative disables the cap.
    #[arg(value_name = "SPEED_LIMIT_KBPS", allow_negative_numbers = true)]
    pub speed_limit: Option<String>,

    /// Save to FILE instead of the name taken from the URL.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print the SHA-256 of the file after a successful download.
    #[arg(long)]
    pub sha256: bool,
}

pub fn run_from_args() -> Result<()> {
    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    let cfg = config_or_default(config::load_or_init());
    tracing::debug!("loaded config: {:?}", cfg);

    let limit = resolve_speed_limit(cli.speed_limit.as_deref(), cfg.default_speed_limit_kbps);
    if let Some(notice) = limit.notice() {
        tracing::warn!("{}", notice);
        println!("{}", notice);
    }

    let destination = match cli.output {
        Some(path) => path,
        None => {
            let now = url_model::unix_now();
            let name = url_model::derive_filename(&cli.url, now);
            if name == url_model::fallback_filename(now) {
                println!("Failed to parse file name from url. Using {}.", name);
            }
            PathBuf::from(name)
        }
    };

    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        ctrlc::set_handler(move || cancel.cancel()).context("failed to install Ctrl-C handler")?;
    }

    let mut session = TransferSession::new(
        cli.url,
        destination,
        units::kbps_to_bytes_per_sec(limit.kbps),
    );
    let opts = DownloadOptions::from_config(&cfg);
    let result = downloader::download(&mut session, &opts, &cancel, io::stdout());
    // Finish the in-place progress line.
    println!();
    result?;

    println!("{}", summary::summary_line(&session));
    if cli.sha256 {
        let digest = checksum::sha256_path(session.destination())?;
        println!("{}  {}", digest, session.destination().display());
    }
    Ok(())
}

/// A broken or unwritable config never stops a download.
fn config_or_default(loaded: Result<config::TgetConfig>) -> config::TgetConfig {
    loaded.unwrap_or_else(|err| {
        tracing::warn!("using default config: {:#}", err);
        config::TgetConfig::default()
    })
}
