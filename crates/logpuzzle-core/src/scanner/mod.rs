//! Log scanner: Apache access log → deduplicated puzzle URLs.
//!
//! The host comes from the log file name, the paths from `GET ... HTTP`
//! request lines that mention "puzzle". Order is first-seen order.

mod extract;
mod host;

pub use extract::{build_urls, puzzle_paths};
pub use host::host_from_log_path;

use std::path::Path;

use crate::error::PuzzleError;

/// Reads `path` and returns the unique puzzle URLs in first-seen order.
///
/// Fails with `InputNotFound` when the file is missing, `InputRead` when it
/// exists but cannot be read, and `MalformedInput` when no host can be
/// derived or no puzzle request exists.
pub fn read_urls(path: &Path) -> Result<Vec<String>, PuzzleError> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(PuzzleError::InputNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(PuzzleError::InputRead {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    let text = String::from_utf8_lossy(&bytes);

    let host = host_from_log_path(path).ok_or_else(|| PuzzleError::MalformedInput {
        path: path.to_path_buf(),
        reason: "cannot derive a hostname from the file name (expected e.g. animal_code.google.com)"
            .to_string(),
    })?;

    let paths = puzzle_paths(&text);
    let urls = build_urls(&host, paths.iter().copied());
    if urls.is_empty() {
        return Err(PuzzleError::MalformedInput {
            path: path.to_path_buf(),
            reason: "no puzzle URLs found".to_string(),
        });
    }
    tracing::info!(
        host = %host,
        matches = paths.len(),
        unique = urls.len(),
        "scanned {}",
        path.display()
    );
    Ok(urls)
}
