//! Destination filename derivation.
//!
//! The local name is the last segment of the URL path, sanitized for Linux.
//! When that yields nothing usable, a timestamped `unknown_<secs>` name is used.

mod path;
mod sanitize;

pub use path::filename_from_url_path;
pub use sanitize::sanitize_filename_for_linux;

use std::time::{SystemTime, UNIX_EPOCH};

/// Prefix of the generated name when the URL has no usable filename.
const FALLBACK_PREFIX: &str = "unknown_";

/// Derives the filename for `url`, falling back to `unknown_<unix_secs>`.
///
/// # Examples
///
/// - `derive_filename("https://example.com/archive.zip", 0)` → `"archive.zip"`
/// - `derive_filename("https://example.com/", 1700000000)` → `"unknown_1700000000"`
pub fn derive_filename(url: &str, unix_secs: u64) -> String {
    let sanitized = filename_from_url_path(url)
        .map(|raw| sanitize_filename_for_linux(&raw))
        .filter(|s| !s.is_empty() && s != "." && s != "..");
    match sanitized {
        Some(name) => name,
        None => {
            tracing::warn!(url, "failed to derive a filename from the URL");
            fallback_filename(unix_secs)
        }
    }
}

pub fn fallback_filename(unix_secs: u64) -> String {
    format!("{}{}", FALLBACK_PREFIX, unix_secs)
}

/// Seconds since the Unix epoch (0 if the clock is before it).
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_filename_from_url_path() {
        assert_eq!(
            derive_filename("https://example.com/archive.zip", 1),
            "archive.zip"
        );
        assert_eq!(
            derive_filename("https://cdn.example.com/path/to/debian-12.iso", 1),
            "debian-12.iso"
        );
    }

    #[test]
    fn derive_filename_empty_url_path_fallback() {
        assert_eq!(
            derive_filename("https://example.com/", 1_700_000_000),
            "unknown_1700000000"
        );
        assert_eq!(derive_filename("https://example.com", 42), "unknown_42");
    }

    #[test]
    fn derive_filename_trailing_slash_fallback() {
        assert_eq!(derive_filename("https://example.com/dir/", 7), "unknown_7");
    }

    #[test]
    fn derive_filename_reserved_names_fallback() {
        assert_eq!(derive_filename("https://example.com/.", 3), "unknown_3");
        assert_eq!(derive_filename("https://example.com/...", 3), "unknown_3");
    }

    #[test]
    fn derive_filename_unparsable_url_fallback() {
        assert_eq!(derive_filename("not a url", 9), "unknown_9");
    }

    #[test]
    fn unix_now_is_after_2020() {
        assert!(unix_now() > 1_577_836_800);
    }
}
