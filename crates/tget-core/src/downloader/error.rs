//! Download failure taxonomy.

use std::io;
use std::path::PathBuf;

use crate::copier::CopyError;

/// Why a download failed. Every variant is fatal to the transfer; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// The request could not be established (DNS, connect, TLS, HTTP error status).
    #[error(transparent)]
    Request(curl::Error),
    /// The connection failed after the body started.
    #[error("transfer interrupted")]
    Transfer(#[source] curl::Error),
    #[error("failed to create temp file {}", path.display())]
    CreateTemp {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Reading the body failed. Only raised when the copier pulls from a
    /// `Read` source; libcurl failures mid-body surface as `Transfer`.
    #[error("read failed")]
    Read(#[source] io::Error),
    #[error("write to temp file failed")]
    Write(#[source] io::Error),
    #[error("failed to rename {} to {}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("download cancelled by user")]
    Cancelled,
}

impl From<CopyError> for DownloadError {
    fn from(e: CopyError) -> Self {
        match e {
            CopyError::Read(e) => DownloadError::Read(e),
            CopyError::Write(e) => DownloadError::Write(e),
            CopyError::Cancelled => DownloadError::Cancelled,
        }
    }
}
