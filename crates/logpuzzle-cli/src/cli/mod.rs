//! CLI for logpuzzle.

mod commands;
mod progress;

use anyhow::Result;
use clap::Parser;
use logpuzzle_core::config::{self, PuzzleConfig};
use std::path::PathBuf;

use commands::{run_download, run_list};

/// Top-level CLI: scan an Apache log for puzzle images, then list or download them.
#[derive(Debug, Parser)]
#[command(name = "logpuzzle")]
#[command(
    about = "Find puzzle image URLs in an Apache log, download them in order and build an index page",
    long_about = None
)]
pub struct Cli {
    /// Apache log file to extract URLs from (e.g. animal_code.google.com).
    pub logfile: PathBuf,

    /// Destination directory for downloaded images. Without it, URLs are printed.
    #[arg(short = 'd', long, value_name = "DIR")]
    pub todir: Option<PathBuf>,

    /// Per-image transfer timeout in seconds (overrides config).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Do not open index.html in a viewer when done.
    #[arg(long)]
    pub no_open: bool,
}

/// Exit status when the program is run with no arguments at all (`arg_count`
/// includes the program name). Usage goes to stderr and the process exits 1.
pub fn usage_exit(arg_count: usize) -> Option<i32> {
    if arg_count <= 1 {
        Some(1)
    } else {
        None
    }
}

impl Cli {
    /// Command-line flags layered over the loaded config.
    pub fn apply_overrides(&self, cfg: &mut PuzzleConfig) {
        if let Some(secs) = self.timeout {
            cfg.timeout_secs = Some(secs);
        }
        if self.no_open {
            cfg.open_viewer = false;
        }
    }

    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = config::load_or_init()?;
        cli.apply_overrides(&mut cfg);
        tracing::debug!("loaded config: {:?}", cfg);

        match &cli.todir {
            None => run_list(&cli.logfile, &cfg, &mut std::io::stdout().lock())?,
            Some(todir) => run_download(&cli.logfile, todir, &cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
