//! Rate-limited chunk copy into the download file.
//!
//! Two ways in: [`StreamCopier::copy`] pulls from any `Read`, and
//! [`StreamCopier::commit`] accepts chunks pushed by a callback-driven client
//! (libcurl's write function). Both go through the same per-chunk step: write
//! the whole chunk, count it, consume quota, and pace/report when the window
//! closes.

use std::io::{self, Read, Write};

use crate::control::CancelToken;
use crate::progress::ProgressReporter;
use crate::session::TransferSession;
use crate::throttle::RateLimiter;

/// Default read buffer / chunk size.
pub const DEFAULT_BUFFER_SIZE: usize = 16 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    #[error("read failed")]
    Read(#[source] io::Error),
    #[error("write failed")]
    Write(#[source] io::Error),
    #[error("download cancelled by user")]
    Cancelled,
}

impl From<crate::control::Cancelled> for CopyError {
    fn from(_: crate::control::Cancelled) -> Self {
        CopyError::Cancelled
    }
}

pub struct StreamCopier<W: Write, P: Write> {
    sink: W,
    buffer_size: usize,
    limiter: RateLimiter,
    reporter: ProgressReporter<P>,
    cancel: CancelToken,
}

impl<W: Write, P: Write> StreamCopier<W, P> {
    /// The limiter's window starts now.
    pub fn new(
        sink: W,
        buffer_size: usize,
        limiter: RateLimiter,
        reporter: ProgressReporter<P>,
        cancel: CancelToken,
    ) -> Self {
        Self {
            sink,
            buffer_size: buffer_size.max(1),
            limiter,
            reporter,
            cancel,
        }
    }

    /// Drain `reader` until end of stream. `Interrupted` reads are retried;
    /// any other read error aborts the copy.
    pub fn copy<R: Read>(
        &mut self,
        session: &mut TransferSession,
        mut reader: R,
    ) -> Result<(), CopyError> {
        let mut buf = vec![0u8; self.buffer_size];
        loop {
            if self.cancel.is_cancelled() {
                return Err(CopyError::Cancelled);
            }
            let n = match reader.read(&mut buf) {
                Ok(0) => return Ok(()),
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(CopyError::Read(e)),
            };
            self.commit(session, &buf[..n])?;
        }
    }

    /// Write one chunk and account for it. The chunk is counted only after
    /// it has been written in full.
    pub fn commit(
        &mut self,
        session: &mut TransferSession,
        chunk: &[u8],
    ) -> Result<(), CopyError> {
        if self.cancel.is_cancelled() {
            return Err(CopyError::Cancelled);
        }
        if chunk.is_empty() {
            return Ok(());
        }
        self.sink.write_all(chunk).map_err(CopyError::Write)?;
        session.record_chunk(chunk.len());
        self.limiter.consume(chunk.len());

        if self.limiter.should_throttle() {
            self.report(session);
            let elapsed = self.limiter.elapsed();
            let pause = self.limiter.compute_sleep(elapsed);
            tracing::debug!(
                transferred = session.transferred_bytes(),
                quota = self.limiter.remaining_quota(),
                window_ms = elapsed.as_millis() as u64,
                pause_ms = pause.as_millis() as u64,
                "quota window closed"
            );
            self.cancel.sleep(pause)?;
            self.limiter.reset();
        }
        Ok(())
    }

    /// Emit the final progress line, flush the sink and hand it back.
    pub fn finish(mut self, session: &TransferSession) -> Result<W, CopyError> {
        self.report(session);
        self.sink.flush().map_err(CopyError::Write)?;
        Ok(self.sink)
    }

    fn report(&mut self, session: &TransferSession) {
        if let Err(e) = self
            .reporter
            .report(session.transferred_bytes(), session.total_size())
        {
            tracing::debug!("progress output failed: {}", e);
        }
    }
}
