//! libcurl settings for the GET.

use std::time::Duration;

use crate::config::TgetConfig;

/// Smallest receive buffer libcurl accepts.
const MIN_BUFFER: usize = 1024;
/// Largest receive buffer accepted by every libcurl release we build against.
const MAX_BUFFER: usize = 512 * 1024;

#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Chunk size; clamped to what libcurl accepts.
    pub buffer_size: usize,
    pub connect_timeout: Duration,
    /// Stall detection: bytes/s floor and how long it may be undercut. 0 disables.
    pub low_speed_limit: u32,
    pub low_speed_time: Duration,
    pub timeout: Option<Duration>,
    pub max_redirections: u32,
    pub user_agent: String,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self::from_config(&TgetConfig::default())
    }
}

impl DownloadOptions {
    pub fn from_config(cfg: &TgetConfig) -> Self {
        Self {
            buffer_size: cfg.buffer_bytes.clamp(MIN_BUFFER, MAX_BUFFER),
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            low_speed_limit: cfg.low_speed_limit_bytes,
            low_speed_time: Duration::from_secs(cfg.low_speed_time_secs),
            timeout: cfg.timeout_secs.map(Duration::from_secs),
            max_redirections: cfg.max_redirections,
            user_agent: cfg
                .user_agent
                .clone()
                .unwrap_or_else(|| format!("tget/{}", env!("CARGO_PKG_VERSION"))),
        }
    }

    /// Stall detection only makes sense when the cap leaves headroom above the
    /// low-speed floor; otherwise throttling alone would trip it.
    pub(crate) fn stall_detection_for(&self, cap_bytes_per_sec: u64) -> Option<(u32, Duration)> {
        if self.low_speed_limit == 0 || self.low_speed_time.is_zero() {
            return None;
        }
        let floor = u64::from(self.low_speed_limit);
        if cap_bytes_per_sec != 0 && cap_bytes_per_sec < floor.saturating_mul(2) {
            return None;
        }
        Some((self.low_speed_limit, self.low_speed_time))
    }
}
