//! Byte / kilobyte conversions. One KB is 1024 bytes throughout tget.

const KB: u64 = 1024;

/// Whole kilobytes in `bytes` (truncating).
pub fn bytes_to_kb(bytes: u64) -> u64 {
    bytes / KB
}

/// Converts a KB/s limit to bytes per second. Zero or negative means "no cap" and maps to 0.
pub fn kbps_to_bytes_per_sec(kbps: i64) -> u64 {
    if kbps <= 0 {
        return 0;
    }
    (kbps as u64).saturating_mul(KB)
}

/// Average rate in whole KB/s; 0 when no time elapsed.
pub fn average_kbps(bytes: u64, elapsed_secs: f64) -> u64 {
    if elapsed_secs <= 0.0 {
        return 0;
    }
    (bytes as f64 / KB as f64 / elapsed_secs) as u64
}
