//! `logpuzzle <logfile>` – print the ordered puzzle URLs, one per line.

use anyhow::Result;
use logpuzzle_core::config::PuzzleConfig;
use logpuzzle_core::pipeline;
use std::io::Write;
use std::path::Path;

pub fn run_list<W: Write>(logfile: &Path, cfg: &PuzzleConfig, out: &mut W) -> Result<()> {
    let urls = pipeline::ordered_urls(logfile, cfg)?;
    for url in &urls {
        writeln!(out, "{}", url)?;
    }
    out.flush()?;
    Ok(())
}
