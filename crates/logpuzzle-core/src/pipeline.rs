//! Scanner → Sequencer → Fetcher → Page Builder, run top to bottom.

use std::path::{Path, PathBuf};

use crate::config::PuzzleConfig;
use crate::error::PuzzleError;
use crate::fetcher::{self, FetchOptions, FetchReport, PreparedDestination, ProgressSink};
use crate::page;
use crate::prompt::ConfirmationProvider;
use crate::scanner;

/// Scans `log` and returns its puzzle URLs in reconstruction order.
pub fn ordered_urls(log: &Path, cfg: &PuzzleConfig) -> Result<Vec<String>, PuzzleError> {
    let urls = scanner::read_urls(log)?;
    cfg.sequencer().sequence(&urls)
}

/// Result of a full download-and-build run.
#[derive(Debug)]
pub struct Assembly {
    pub destination: PreparedDestination,
    pub report: FetchReport,
    pub index_path: PathBuf,
    /// Set when the viewer could not be launched (non-fatal).
    pub viewer_error: Option<PuzzleError>,
}

/// Downloads ordered `urls` into `todir` and writes the index page.
///
/// When `cfg.open_viewer` is set the configured viewer is launched afterwards;
/// a launch failure is logged and returned in `Assembly::viewer_error` rather
/// than aborting.
pub fn assemble(
    urls: &[String],
    todir: &Path,
    cfg: &PuzzleConfig,
    prompt: &mut dyn ConfirmationProvider,
    sink: &mut dyn ProgressSink,
) -> Result<Assembly, PuzzleError> {
    let destination = fetcher::prepare_destination(todir, prompt)?;
    let opts = FetchOptions::from(cfg);
    let report = fetcher::fetch_all(urls, &destination.path, &opts, sink)?;
    let index_path = page::write_index(&destination.path, report.files.len())?;

    let viewer_error = if cfg.open_viewer {
        match page::open_in_viewer(&index_path, cfg.viewer_command.as_deref()) {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!("{}", e);
                Some(e)
            }
        }
    } else {
        None
    };

    Ok(Assembly {
        destination,
        report,
        index_path,
        viewer_error,
    })
}
