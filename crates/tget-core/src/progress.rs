//! User-facing progress output.
//!
//! The reporter only formats and writes; how often it is called is up to the
//! copy loop (once per closed quota window, plus once at the end).

use std::io::{self, Write};

use crate::units::bytes_to_kb;

/// Whole percent complete, or `None` when the total is unknown or zero.
pub fn percent_complete(transferred: u64, total: Option<u64>) -> Option<u64> {
    match total {
        Some(total) if total > 0 => Some((transferred as u128 * 100 / total as u128) as u64),
        _ => None,
    }
}

/// Progress line body, e.g. ` 512/2048 kb downloaded (25% complete)`.
pub fn format_progress(transferred: u64, total: Option<u64>) -> String {
    let total_kb = match total {
        Some(t) => bytes_to_kb(t).to_string(),
        None => "?".to_string(),
    };
    let mut line = format!(" {}/{} kb downloaded", bytes_to_kb(transferred), total_kb);
    if let Some(pct) = percent_complete(transferred, total) {
        line.push_str(&format!(" ({}% complete)", pct));
    }
    line
}

/// Writes progress (overwritten in place with `\r`) and status lines to `out`.
pub struct ProgressReporter<W: Write> {
    out: W,
}

impl<W: Write> ProgressReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn report(&mut self, transferred: u64, total: Option<u64>) -> io::Result<()> {
        write!(self.out, "\r{}", format_progress(transferred, total))?;
        self.out.flush()
    }

    pub fn status(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "{}", line)?;
        self.out.flush()
    }
}
