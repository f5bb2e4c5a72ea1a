use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Speed limit used when none is given on the command line, in KB/s.
pub const DEFAULT_SPEED_LIMIT_KBPS: i64 = 100_000;

/// Global configuration loaded from `~/.config/tget/config.toml`.
/// Keys missing from the file take their default values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TgetConfig {
    /// Speed limit in KB/s when the CLI argument is absent or invalid. Zero or negative = no cap.
    pub default_speed_limit_kbps: i64,
    /// Chunk size in bytes; also libcurl's receive buffer.
    pub buffer_bytes: usize,
    /// Seconds allowed for connection setup (DNS, TCP, TLS).
    pub connect_timeout_secs: u64,
    /// Abort if throughput stays below this many bytes/s for `low_speed_time_secs`.
    /// Skipped when the speed cap is too low to tell a stall from throttling.
    pub low_speed_limit_bytes: u32,
    pub low_speed_time_secs: u64,
    /// Maximum redirects to follow.
    pub max_redirections: u32,
    /// Optional hard limit on total transfer time (None = no limit).
    pub timeout_secs: Option<u64>,
    /// Optional User-Agent override (None = `tget/<version>`).
    pub user_agent: Option<String>,
}

impl Default for TgetConfig {
    fn default() -> Self {
        Self {
            default_speed_limit_kbps: DEFAULT_SPEED_LIMIT_KBPS,
            buffer_bytes: 16 * 1024,
            connect_timeout_secs: 30,
            low_speed_limit_bytes: 1024,
            low_speed_time_secs: 60,
            max_redirections: 10,
            timeout_secs: None,
            user_agent: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("tget")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<TgetConfig> {
    let path = config_path().context("config directory")?;
    let ctx = || format!("config {}", path.display());
    if !path.exists() {
        let default_cfg = TgetConfig::default();
        let toml = toml::to_string_pretty(&default_cfg).with_context(ctx)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(ctx)?;
        }
        fs::write(&path, toml).with_context(ctx)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path).with_context(ctx)?;
    toml::from_str::<TgetConfig>(&data).with_context(ctx)
}
