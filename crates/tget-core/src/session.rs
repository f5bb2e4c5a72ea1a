//! State of one in-progress download.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Lifecycle of a transfer session. `Completed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferState {
    InProgress,
    Completed,
    Failed,
}

/// One download: where from, where to, how fast, and how far along.
///
/// `transferred` only moves forward and only through [`record_chunk`](Self::record_chunk),
/// which the stream copier calls after a chunk is fully written.
#[derive(Debug, Clone)]
pub struct TransferSession {
    source_url: String,
    destination: PathBuf,
    total_size: Option<u64>,
    transferred: u64,
    rate_limit_bytes_per_sec: u64,
    elapsed: Option<Duration>,
    state: TransferState,
}

impl TransferSession {
    /// `rate_limit_bytes_per_sec` of 0 disables throttling.
    pub fn new(
        source_url: impl Into<String>,
        destination: impl Into<PathBuf>,
        rate_limit_bytes_per_sec: u64,
    ) -> Self {
        Self {
            source_url: source_url.into(),
            destination: destination.into(),
            total_size: None,
            transferred: 0,
            rate_limit_bytes_per_sec,
            elapsed: None,
            state: TransferState::InProgress,
        }
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Size declared by the server, if any.
    pub fn total_size(&self) -> Option<u64> {
        self.total_size
    }

    pub fn transferred_bytes(&self) -> u64 {
        self.transferred
    }

    pub fn rate_limit_bytes_per_sec(&self) -> u64 {
        self.rate_limit_bytes_per_sec
    }

    /// Wall-clock duration of the copy loop; `None` until the transfer succeeds.
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    pub fn state(&self) -> TransferState {
        self.state
    }

    /// Set once, when the response starts. Later calls are ignored.
    pub(crate) fn set_total_size(&mut self, total: Option<u64>) {
        if self.total_size.is_some() {
            tracing::debug!("total size already set, ignoring {:?}", total);
            return;
        }
        self.total_size = total;
    }

    pub(crate) fn record_chunk(&mut self, len: usize) {
        self.transferred = self.transferred.saturating_add(len as u64);
    }

    pub(crate) fn complete(&mut self, elapsed: Duration) {
        self.elapsed = Some(elapsed);
        self.state = TransferState::Completed;
    }

    pub(crate) fn fail(&mut self) {
        self.state = TransferState::Failed;
    }
}
