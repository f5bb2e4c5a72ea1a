//! Single-stream HTTP(S) download with a bandwidth cap.
//!
//! Issues one GET through libcurl and feeds the body, chunk by chunk, into a
//! [`StreamCopier`](crate::copier::StreamCopier) writing `<destination>.tmp`.
//! The temp file is renamed over the destination only when the whole body
//! arrived; on any failure it is left behind and the destination is untouched.

mod error;
mod headers;
mod options;
mod receive;

pub use error::DownloadError;
pub use headers::{parse_content_length, ContentLengthError};
pub use options::DownloadOptions;

use std::cell::RefCell;
use std::io::Write;

use crate::control::CancelToken;
use crate::progress::ProgressReporter;
use crate::session::TransferSession;
use receive::Receiver;

/// Downloads `session.source_url()` to `session.destination()`.
///
/// Progress and status lines go to `out`. Runs on the calling thread; the
/// throttle sleeps block it. `cancel` is honoured between chunks, during
/// throttle pauses and while waiting on the network.
pub fn download<P: Write>(
    session: &mut TransferSession,
    opts: &DownloadOptions,
    cancel: &CancelToken,
    out: P,
) -> Result<(), DownloadError> {
    tracing::info!(
        url = session.source_url(),
        destination = %session.destination().display(),
        limit_bytes_per_sec = session.rate_limit_bytes_per_sec(),
        "starting download"
    );

    let mut easy = curl::easy::Easy::new();
    if let Err(e) = configure(&mut easy, session, opts) {
        session.fail();
        return Err(DownloadError::Request(e));
    }

    let receiver = RefCell::new(Receiver::new(
        session,
        opts,
        cancel,
        ProgressReporter::new(out),
    ));
    let performed = (|| -> Result<(), curl::Error> {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| receiver.borrow_mut().on_header(data))?;
        transfer.write_function(|data| Ok(receiver.borrow_mut().on_body(data)))?;
        transfer.progress_function(|_, _, _, _| !cancel.is_cancelled())?;
        transfer.perform()
    })();

    receiver.into_inner().finish(performed)
}

fn configure(
    easy: &mut curl::easy::Easy,
    session: &TransferSession,
    opts: &DownloadOptions,
) -> Result<(), curl::Error> {
    easy.url(session.source_url())?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(opts.max_redirections)?;
    // HTTP >= 400 fails the request before any body is written.
    easy.fail_on_error(true)?;
    easy.useragent(&opts.user_agent)?;
    easy.buffer_size(opts.buffer_size)?;
    easy.connect_timeout(opts.connect_timeout)?;
    if let Some((limit, time)) = opts.stall_detection_for(session.rate_limit_bytes_per_sec()) {
        easy.low_speed_limit(limit)?;
        easy.low_speed_time(time)?;
    }
    if let Some(timeout) = opts.timeout {
        easy.timeout(timeout)?;
    }
    // Needed for the progress callback, which is where cancellation is noticed while idle.
    easy.progress(true)?;
    Ok(())
}
