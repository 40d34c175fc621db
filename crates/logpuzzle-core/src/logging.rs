//! Logging init for the puzzle pipeline.
//!
//! Scanner, sequencer and fetcher events go to an append-only file under the
//! XDG state dir. When that file cannot be opened the same subscriber is
//! installed on stderr instead. `LOGPUZZLE_LOG` overrides `RUST_LOG`.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const APP: &str = "logpuzzle";
const FILTER_ENV: &str = "LOGPUZZLE_LOG";
const DEFAULT_FILTER: &str = "info,logpuzzle=debug,logpuzzle_core=debug";

/// Per-event writer over the run log; a failed handle clone drops to stderr.
enum RunLogWriter {
    File(fs::File),
    Stderr,
}

impl io::Write for RunLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            RunLogWriter::File(f) => f.write(buf),
            RunLogWriter::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            RunLogWriter::File(f) => f.flush(),
            RunLogWriter::Stderr => io::stderr().lock().flush(),
        }
    }
}

struct RunLog(fs::File);

impl<'a> MakeWriter<'a> for RunLog {
    type Writer = RunLogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(RunLogWriter::File)
            .unwrap_or(RunLogWriter::Stderr)
    }
}

/// Filter directives: `LOGPUZZLE_LOG`, then `RUST_LOG`, then the built-in default.
fn filter_directives(own: Option<String>, rust_log: Option<String>) -> String {
    own.or(rust_log)
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

fn pipeline_filter() -> EnvFilter {
    let directives = filter_directives(
        std::env::var(FILTER_ENV).ok(),
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
    );
    EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the one subscriber shape both the file and stderr paths use.
fn install(writer: BoxMakeWriter) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(pipeline_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{}", e))
}

fn log_file_under(state_home: &Path) -> PathBuf {
    state_home.join(APP).join(format!("{}.log", APP))
}

/// Path of the log file: `~/.local/state/logpuzzle/logpuzzle.log`.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix(APP)?;
    Ok(log_file_under(&xdg_dirs.get_state_home()))
}

fn open_run_log(path: &Path) -> Result<fs::File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    Ok(fs::OpenOptions::new().create(true).append(true).open(path)?)
}

/// Log to the XDG state file. Returns Err so the caller can fall back to
/// [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let path = log_file_path()?;
    let file = open_run_log(&path)?;
    install(BoxMakeWriter::new(RunLog(file)))?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "logging to {}", path.display());
    Ok(())
}

/// Log to stderr only. A subscriber that is already installed is left alone.
pub fn init_logging_stderr() {
    let _ = install(BoxMakeWriter::new(io::stderr));
}
