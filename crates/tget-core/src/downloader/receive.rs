//! State shared by libcurl's callbacks during one GET.
//!
//! Headers arrive first; the first body chunk (or a successful end with an
//! empty body) triggers size detection and temp file creation, after which
//! every chunk goes through the stream copier.

use std::io::Write;
use std::mem;
use std::time::Instant;

use super::error::DownloadError;
use super::headers::{self, ResponseHeaders};
use super::options::DownloadOptions;
use crate::control::CancelToken;
use crate::copier::StreamCopier;
use crate::progress::ProgressReporter;
use crate::session::TransferSession;
use crate::storage::{self, TempFile};
use crate::throttle::RateLimiter;
use crate::units::bytes_to_kb;

enum Stage<P: Write> {
    Headers(ProgressReporter<P>),
    Body(Body<P>),
    /// The body was abandoned; libcurl is told to stop on the next chunk.
    Failed(DownloadError),
}

struct Body<P: Write> {
    copier: StreamCopier<TempFile, P>,
    started: Instant,
}

pub(super) struct Receiver<'a, P: Write> {
    session: &'a mut TransferSession,
    opts: &'a DownloadOptions,
    cancel: &'a CancelToken,
    headers: ResponseHeaders,
    stage: Stage<P>,
}

impl<'a, P: Write> Receiver<'a, P> {
    pub(super) fn new(
        session: &'a mut TransferSession,
        opts: &'a DownloadOptions,
        cancel: &'a CancelToken,
        reporter: ProgressReporter<P>,
    ) -> Self {
        Self {
            session,
            opts,
            cancel,
            headers: ResponseHeaders::default(),
            stage: Stage::Headers(reporter),
        }
    }

    pub(super) fn on_header(&mut self, data: &[u8]) -> bool {
        self.headers.push_raw(data);
        true
    }

    /// Returns the number of bytes taken; anything short of `data.len()` aborts the transfer.
    pub(super) fn on_body(&mut self, data: &[u8]) -> usize {
        if matches!(self.stage, Stage::Headers(_)) {
            // Placeholder only; replaced before this function returns.
            let stage = mem::replace(&mut self.stage, Stage::Failed(DownloadError::Cancelled));
            self.stage = match stage {
                Stage::Headers(reporter) => {
                    match open(self.session, self.opts, self.cancel, &self.headers, reporter) {
                        Ok(body) => Stage::Body(body),
                        Err(e) => Stage::Failed(e),
                    }
                }
                other => other,
            };
        }

        let Stage::Body(body) = &mut self.stage else {
            return 0;
        };
        match body.copier.commit(self.session, data) {
            Ok(()) => data.len(),
            Err(e) => {
                // Dropping the copier closes the temp file; its contents stay on disk.
                self.stage = Stage::Failed(e.into());
                0
            }
        }
    }

    /// Turn the outcome of `perform` into the download result and settle the session state.
    pub(super) fn finish(self, performed: Result<(), curl::Error>) -> Result<(), DownloadError> {
        let Receiver {
            session,
            opts,
            cancel,
            headers,
            stage,
        } = self;

        let result = match (stage, performed) {
            (Stage::Failed(err), _) => Err(err),
            (_, Err(_)) if cancel.is_cancelled() => Err(DownloadError::Cancelled),
            (Stage::Headers(_), Err(e)) => Err(DownloadError::Request(e)),
            (Stage::Body(_), Err(e)) => Err(DownloadError::Transfer(e)),
            (Stage::Body(body), Ok(())) => complete(session, body),
            // A body-less response never reached the write callback.
            (Stage::Headers(reporter), Ok(())) => open(session, opts, cancel, &headers, reporter)
                .and_then(|body| complete(session, body)),
        };
        if result.is_err() {
            session.fail();
        }
        result
    }
}

/// Size detection and temp file creation, once the final response's headers are in.
fn open<P: Write>(
    session: &mut TransferSession,
    opts: &DownloadOptions,
    cancel: &CancelToken,
    headers: &ResponseHeaders,
    mut reporter: ProgressReporter<P>,
) -> Result<Body<P>, DownloadError> {
    let total = match headers::parse_content_length(headers.lines()) {
        Ok(n) => {
            say(&mut reporter, &format!("Server reported total size as {} kb", bytes_to_kb(n)));
            Some(n)
        }
        Err(e) => {
            tracing::warn!(url = session.source_url(), "size unknown: {}", e);
            say(&mut reporter, &e.to_string());
            None
        }
    };
    session.set_total_size(total);

    let destination = session.destination().to_path_buf();
    let file = TempFile::create(&destination).map_err(|source| DownloadError::CreateTemp {
        path: storage::temp_path(&destination),
        source,
    })?;
    tracing::debug!(temp = %file.path().display(), "temp file created");
    say(&mut reporter, &format!("Starting to download {}", destination.display()));

    let limiter = RateLimiter::new(session.rate_limit_bytes_per_sec());
    Ok(Body {
        copier: StreamCopier::new(file, opts.buffer_size, limiter, reporter, cancel.clone()),
        started: Instant::now(),
    })
}

/// Final report, sync, and rename over the destination.
fn complete<P: Write>(session: &mut TransferSession, body: Body<P>) -> Result<(), DownloadError> {
    let file = body.copier.finish(session)?;
    let elapsed = body.started.elapsed();
    file.sync().map_err(DownloadError::Write)?;

    let temp = file.path().to_path_buf();
    let destination = session.destination().to_path_buf();
    file.finalize(&destination)
        .map_err(|source| DownloadError::Rename {
            from: temp,
            to: destination,
            source,
        })?;
    session.complete(elapsed);
    tracing::info!(
        bytes = session.transferred_bytes(),
        elapsed_ms = elapsed.as_millis() as u64,
        "download complete"
    );
    Ok(())
}

fn say<P: Write>(reporter: &mut ProgressReporter<P>, line: &str) {
    if let Err(e) = reporter.status(line) {
        tracing::debug!("status output failed: {}", e);
    }
}
