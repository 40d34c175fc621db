//! Single-image HTTP GET with streaming write and progress callbacks.
//!
//! The body goes to `<name>.part` and is renamed to its final name only after
//! a 2xx response whose size matches the declared `Content-Length`.

use std::cell::RefCell;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str;

use super::response::{is_status_line, parse_headers, ResponseHead};
use super::{FetchOptions, FileProgress, ProgressSink};
use crate::error::DownloadFailure;

/// Temporary file suffix used before the final rename.
pub(crate) const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `img0` → `img0.part`).
pub(crate) fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Per-transfer state shared by the header and write callbacks.
struct TransferState<'s> {
    header_lines: Vec<String>,
    head: ResponseHead,
    received: u64,
    writer: BufWriter<File>,
    storage_error: Option<std::io::Error>,
    sink: &'s mut dyn ProgressSink,
}

/// Downloads `url` into `final_path`, reporting progress as image `index`.
/// Returns the number of bytes written.
pub(crate) fn download_to_file(
    index: usize,
    url: &str,
    final_path: &Path,
    opts: &FetchOptions,
    sink: &mut dyn ProgressSink,
) -> Result<u64, DownloadFailure> {
    let part = temp_path(final_path);
    let file = File::create(&part).map_err(DownloadFailure::Storage)?;

    let result = perform(index, url, file, opts, sink);
    match result {
        Ok(written) => {
            std::fs::rename(&part, final_path).map_err(DownloadFailure::Storage)?;
            Ok(written)
        }
        Err(failure) => {
            let _ = std::fs::remove_file(&part);
            Err(failure)
        }
    }
}

fn perform(
    index: usize,
    url: &str,
    file: File,
    opts: &FetchOptions,
    sink: &mut dyn ProgressSink,
) -> Result<u64, DownloadFailure> {
    let state = RefCell::new(TransferState {
        header_lines: Vec::new(),
        head: ResponseHead::default(),
        received: 0,
        writer: BufWriter::new(file),
        storage_error: None,
        sink,
    });

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(DownloadFailure::Transport)?;
    easy.follow_location(true).map_err(DownloadFailure::Transport)?;
    easy.max_redirections(opts.max_redirections)
        .map_err(DownloadFailure::Transport)?;
    easy.connect_timeout(opts.connect_timeout)
        .map_err(DownloadFailure::Transport)?;
    if let Some(timeout) = opts.timeout {
        easy.timeout(timeout).map_err(DownloadFailure::Transport)?;
    }

    let performed = {
        let mut transfer = easy.transfer();
        transfer
            .header_function(|data| {
                let mut st = state.borrow_mut();
                let line = str::from_utf8(data).unwrap_or("").trim_end();
                if is_status_line(line) {
                    // Each redirect hop sends its own head; keep only the latest.
                    st.header_lines.clear();
                }
                if line.is_empty() {
                    st.head = parse_headers(&st.header_lines);
                } else {
                    st.header_lines.push(line.to_string());
                }
                true
            })
            .map_err(DownloadFailure::Transport)?;
        transfer
            .write_function(|data| {
                let mut st = state.borrow_mut();
                if !st.head.is_success() {
                    // Error page body; discard, the status is reported after perform.
                    return Ok(data.len());
                }
                if let Err(e) = st.writer.write_all(data) {
                    st.storage_error = Some(e);
                    return Ok(0); // abort transfer
                }
                st.received += data.len() as u64;
                let progress = FileProgress {
                    index,
                    url,
                    bytes_done: st.received,
                    total_bytes: st.head.content_length,
                };
                st.sink.on_progress(&progress);
                Ok(data.len())
            })
            .map_err(DownloadFailure::Transport)?;
        transfer.perform()
    };

    let mut st = state.into_inner();
    if let Some(e) = st.storage_error.take() {
        return Err(DownloadFailure::Storage(e));
    }
    if let Err(e) = performed {
        return Err(match st.head.content_length {
            Some(expected) if e.is_partial_file() => DownloadFailure::Truncated {
                expected,
                received: st.received,
            },
            _ => DownloadFailure::Transport(e),
        });
    }

    let code = easy.response_code().map_err(DownloadFailure::Transport)?;
    if !(200..300).contains(&code) {
        return Err(DownloadFailure::Http(code));
    }

    if let Some(expected) = st.head.content_length {
        if st.received != expected {
            return Err(DownloadFailure::Truncated {
                expected,
                received: st.received,
            });
        }
    }

    st.writer.flush().map_err(DownloadFailure::Storage)?;
    st.writer
        .get_ref()
        .sync_all()
        .map_err(DownloadFailure::Storage)?;

    tracing::debug!(
        index,
        url,
        bytes = st.received,
        content_type = st.head.content_type.as_deref().unwrap_or("-"),
        "image transfer complete"
    );
    Ok(st.received)
}
