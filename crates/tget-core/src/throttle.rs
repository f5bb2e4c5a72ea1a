//! Fixed-window rate limiter.
//!
//! Tracks a byte quota per one-second window. The copy loop consumes quota per
//! chunk; once the window has run its course or the quota is spent, it sleeps
//! for [`RateLimiter::compute_sleep`] and opens a new window. Bytes consumed
//! past the cap are paid back as extra sleep (overflow correction), so a window
//! never averages more than the cap plus one chunk.

use std::time::{Duration, Instant};

/// Length of one quota window.
pub const WINDOW: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct RateLimiter {
    /// Bytes per second; 0 disables limiting.
    cap: u64,
    /// Bytes left in the current window. Goes negative on overshoot.
    quota: i64,
    window_start: Instant,
}

impl RateLimiter {
    /// `cap_bytes_per_sec` of 0 means unlimited: windows still close every second
    /// (so progress keeps flowing) but never sleep.
    pub fn new(cap_bytes_per_sec: u64) -> Self {
        Self {
            cap: cap_bytes_per_sec,
            quota: Self::full_quota(cap_bytes_per_sec),
            window_start: Instant::now(),
        }
    }

    fn full_quota(cap: u64) -> i64 {
        i64::try_from(cap).unwrap_or(i64::MAX)
    }

    pub fn is_limited(&self) -> bool {
        self.cap > 0
    }

    pub fn remaining_quota(&self) -> i64 {
        self.quota
    }

    /// Time since the current window opened.
    pub fn elapsed(&self) -> Duration {
        self.window_start.elapsed()
    }

    pub fn consume(&mut self, n: usize) {
        let n = i64::try_from(n).unwrap_or(i64::MAX);
        self.quota = self.quota.saturating_sub(n);
    }

    /// True once the window has lasted a full second or its quota is spent.
    pub fn should_throttle(&self) -> bool {
        self.should_throttle_after(self.elapsed())
    }

    pub fn should_throttle_after(&self, elapsed: Duration) -> bool {
        elapsed >= WINDOW || (self.is_limited() && self.quota <= 0)
    }

    /// How long to pause before the next window, given `elapsed` time in this one.
    ///
    /// Sleeps until the window's natural end plus the time the excess bytes
    /// would take at the cap. Clamped at zero when `elapsed` already covers it.
    pub fn compute_sleep(&self, elapsed: Duration) -> Duration {
        if !self.is_limited() {
            return Duration::ZERO;
        }
        (WINDOW + self.overflow()).saturating_sub(elapsed)
    }

    /// Time needed to drain the bytes consumed beyond the cap.
    fn overflow(&self) -> Duration {
        if self.quota >= 0 || self.cap == 0 {
            return Duration::ZERO;
        }
        let excess = self.quota.unsigned_abs() as u128;
        let nanos = excess * 1_000_000_000 / self.cap as u128;
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }

    /// Open a fresh window with a full quota.
    pub fn reset(&mut self) {
        self.quota = Self::full_quota(self.cap);
        self.window_start = Instant::now();
    }
}
