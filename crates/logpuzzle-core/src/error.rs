//! Error taxonomy for the scan → sequence → fetch → page pipeline.

use std::fmt;
use std::path::PathBuf;

/// Errors surfaced by the pipeline stages.
///
/// Input, sequencing and download errors abort the run. `ViewerLaunch` is
/// the only variant callers are expected to log and swallow.
#[derive(Debug, thiserror::Error)]
pub enum PuzzleError {
    #[error("log file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("cannot read log file {}: {source}", path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed input {}: {reason}", path.display())]
    MalformedInput { path: PathBuf, reason: String },

    #[error("unsupported puzzle URL format ({len} chars): {url}")]
    UnsupportedUrlFormat { url: String, len: usize },

    #[error("download failed for {url}: {failure}")]
    Download { url: String, failure: DownloadFailure },

    #[error("could not open viewer for {}: {reason}", path.display())]
    ViewerLaunch { path: PathBuf, reason: String },

    #[error("destination {}: {source}", path.display())]
    Destination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("interactive input failed: {0}")]
    Prompt(String),
}

impl PuzzleError {
    pub(crate) fn destination(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PuzzleError::Destination {
            path: path.into(),
            source,
        }
    }
}

/// Why a single image transfer failed.
#[derive(Debug)]
pub enum DownloadFailure {
    /// libcurl reported an error (timeout, DNS, connection reset, ...).
    Transport(curl::Error),
    /// Server answered with a non-2xx status.
    Http(u32),
    /// Body ended before the declared `Content-Length`.
    Truncated { expected: u64, received: u64 },
    /// Writing the local file failed.
    Storage(std::io::Error),
}

/// Coarse class of a failure, used for the log line and the user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Timeout,
    Connection,
    Http,
    Truncated,
    Storage,
    Other,
}

impl DownloadFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            DownloadFailure::Transport(e) => classify_curl_error(e),
            DownloadFailure::Http(_) => FailureKind::Http,
            DownloadFailure::Truncated { .. } => FailureKind::Truncated,
            DownloadFailure::Storage(_) => FailureKind::Storage,
        }
    }
}

/// Classify a curl error into a reportable kind.
pub fn classify_curl_error(e: &curl::Error) -> FailureKind {
    if e.is_operation_timedout() {
        return FailureKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return FailureKind::Connection;
    }
    if e.is_partial_file() {
        return FailureKind::Truncated;
    }
    FailureKind::Other
}

impl fmt::Display for DownloadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadFailure::Transport(e) => match classify_curl_error(e) {
                FailureKind::Timeout => write!(f, "timed out: {}", e),
                FailureKind::Connection => write!(f, "connection failed: {}", e),
                _ => write!(f, "{}", e),
            },
            DownloadFailure::Http(code) => write!(f, "HTTP {}", code),
            DownloadFailure::Truncated { expected, received } => {
                write!(f, "partial transfer: expected {} bytes, got {}", expected, received)
            }
            DownloadFailure::Storage(e) => write!(f, "storage: {}", e),
        }
    }
}

impl std::error::Error for DownloadFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DownloadFailure::Transport(e) => Some(e),
            DownloadFailure::Storage(e) => Some(e),
            DownloadFailure::Http(_) | DownloadFailure::Truncated { .. } => None,
        }
    }
}
