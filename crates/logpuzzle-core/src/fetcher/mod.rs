//! Fetcher: downloads ordered puzzle URLs into `img0`, `img1`, ...
//!
//! Transfers run strictly one after another on the calling thread. The first
//! failure aborts the run and names the URL.

mod destination;
mod response;
mod transfer;

pub use destination::{disambiguate, prepare_destination, DestinationOutcome, PreparedDestination};
use transfer::download_to_file;

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::PuzzleConfig;
use crate::error::PuzzleError;

/// libcurl knobs for each image GET.
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    pub connect_timeout: Duration,
    /// Overall transfer limit; None = wait as long as the server keeps sending.
    pub timeout: Option<Duration>,
    pub max_redirections: u32,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::from(&PuzzleConfig::default())
    }
}

impl From<&PuzzleConfig> for FetchOptions {
    fn from(cfg: &PuzzleConfig) -> Self {
        Self {
            connect_timeout: cfg.connect_timeout(),
            timeout: cfg.timeout(),
            max_redirections: cfg.max_redirections,
        }
    }
}

/// Progress of one image transfer.
#[derive(Debug, Clone, Copy)]
pub struct FileProgress<'a> {
    /// Position in the ordered list (and the `img<index>` name).
    pub index: usize,
    pub url: &'a str,
    /// Body bytes received so far.
    pub bytes_done: u64,
    /// Declared `Content-Length`, if the server sent one.
    pub total_bytes: Option<u64>,
}

impl FileProgress<'_> {
    /// Percentage of the declared size, clamped to 100. None when no size was declared.
    pub fn percent(&self) -> Option<f64> {
        let total = self.total_bytes?;
        if total == 0 {
            return Some(100.0);
        }
        Some((self.bytes_done as f64 * 100.0 / total as f64).min(100.0))
    }
}

/// Receives per-file progress while the fetcher runs.
pub trait ProgressSink {
    fn on_start(&mut self, _index: usize, _url: &str) {}
    fn on_progress(&mut self, progress: &FileProgress<'_>);
    fn on_complete(&mut self, _index: usize, _path: &Path, _bytes: u64) {}
}

/// Sink that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_progress(&mut self, _progress: &FileProgress<'_>) {}
}

/// Files written by one fetch run, in download order.
#[derive(Debug, Clone)]
pub struct FetchReport {
    pub dir: PathBuf,
    pub files: Vec<PathBuf>,
    pub total_bytes: u64,
}

/// Local name of image `index`.
pub fn image_file_name(index: usize) -> String {
    format!("img{}", index)
}

/// Downloads every URL in order into `dir` (which must exist).
pub fn fetch_all(
    urls: &[String],
    dir: &Path,
    opts: &FetchOptions,
    sink: &mut dyn ProgressSink,
) -> Result<FetchReport, PuzzleError> {
    let mut files = Vec::with_capacity(urls.len());
    let mut total_bytes = 0u64;

    for (index, url) in urls.iter().enumerate() {
        let path = dir.join(image_file_name(index));
        sink.on_start(index, url);
        let bytes = download_to_file(index, url, &path, opts, sink).map_err(|failure| {
            tracing::warn!(
                index,
                url = %url,
                kind = ?failure.kind(),
                "download failed: {}",
                failure
            );
            PuzzleError::Download {
                url: url.clone(),
                failure,
            }
        })?;
        sink.on_complete(index, &path, bytes);
        total_bytes += bytes;
        files.push(path);
    }

    tracing::info!(
        count = files.len(),
        bytes = total_bytes,
        "downloaded images to {}",
        dir.display()
    );
    Ok(FetchReport {
        dir: dir.to_path_buf(),
        files,
        total_bytes,
    })
}
