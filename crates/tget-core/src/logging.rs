//! Logging init: file under the XDG state dir, or stderr when that fails.
//!
//! Stdout belongs to the progress line, so logs never go there. The filter
//! comes from `TGET_LOG` (same syntax as `RUST_LOG`) when set.

use anyhow::Result;
use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive.
pub const LOG_ENV: &str = "TGET_LOG";
const DEFAULT_FILE_FILTER: &str = "info,tget=debug,tget_core=debug";
/// Stderr shares the terminal with the progress line; keep it quiet by default.
const DEFAULT_STDERR_FILTER: &str = "warn";

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Path of the log file: `~/.local/state/tget/tget.log`.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("tget")?;
    Ok(xdg_dirs.get_state_home().join("tget.log"))
}

/// Hands out clones of one append-mode log file; a failed clone degrades to stderr.
struct SharedLogFile(Arc<File>);

enum LogSink {
    File(File),
    Stderr(io::Stderr),
}

impl io::Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogSink::File(f) => f.write(buf),
            LogSink::Stderr(e) => e.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogSink::File(f) => f.flush(),
            LogSink::Stderr(e) => e.flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for SharedLogFile {
    type Writer = LogSink;

    fn make_writer(&'a self) -> Self::Writer {
        match self.0.try_clone() {
            Ok(f) => LogSink::File(f),
            Err(_) => LogSink::Stderr(io::stderr()),
        }
    }
}

/// Initialize structured logging to the XDG state log file.
/// Returns Err (e.g. state dir unwritable) so the caller can fall back to [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let path = log_file_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter(DEFAULT_FILE_FILTER))
        .with_writer(SharedLogFile(Arc::new(file)))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!("tget logging initialized at {}", path.display());
    Ok(())
}

/// Initialize logging to stderr only, warnings and up unless `TGET_LOG` says otherwise.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(DEFAULT_STDERR_FILTER))
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}
