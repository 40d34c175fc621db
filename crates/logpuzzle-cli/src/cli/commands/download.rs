//! `logpuzzle <logfile> --todir <dir>` – download the images and build the index page.

use anyhow::Result;
use logpuzzle_core::config::PuzzleConfig;
use logpuzzle_core::fetcher::DestinationOutcome;
use logpuzzle_core::pipeline;
use logpuzzle_core::prompt::TerminalPrompt;
use std::path::Path;

use crate::cli::progress::ConsoleProgress;

pub fn run_download(logfile: &Path, todir: &Path, cfg: &PuzzleConfig) -> Result<()> {
    let urls = pipeline::ordered_urls(logfile, cfg)?;
    println!("Found {} puzzle images in {}", urls.len(), logfile.display());

    let mut prompt = TerminalPrompt::stdio();
    let mut progress = ConsoleProgress::new(std::io::stdout());
    let assembly = pipeline::assemble(
        &urls,
        todir,
        cfg,
        &mut prompt,
        &mut progress,
    )?;

    match &assembly.destination.outcome {
        DestinationOutcome::Purged { removed } => {
            println!("Removed {} old entries from {}", removed, todir.display());
        }
        DestinationOutcome::Renamed { requested } => {
            println!(
                "{} already existed; files went to {}",
                requested.display(),
                assembly.destination.path.display()
            );
        }
        DestinationOutcome::Created | DestinationOutcome::Reused => {}
    }

    println!("--------");
    println!("Total files downloaded {}", assembly.report.files.len());
    let dir = assembly
        .index_path
        .parent()
        .unwrap_or(&assembly.destination.path);
    println!("Completed download to {}", dir.display());
    println!("Index page: {}", assembly.index_path.display());

    if let Some(err) = &assembly.viewer_error {
        eprintln!("warning: {}", err);
    }
    Ok(())
}
