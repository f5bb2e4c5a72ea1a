//! tget core: one HTTP(S) GET, streamed to disk under a bandwidth cap.

pub mod config;
pub mod logging;

pub mod checksum;
pub mod control;
pub mod copier;
pub mod downloader;
pub mod progress;
pub mod session;
pub mod storage;
pub mod throttle;
pub mod units;
pub mod url_model;
