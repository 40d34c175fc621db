//! Console rendering of per-file download progress.

use logpuzzle_core::fetcher::{FileProgress, ProgressSink};
use std::io::Write;
use std::path::Path;

/// Prints one updating line per image; redraws only when the whole percentage changes.
pub struct ConsoleProgress<W: Write> {
    out: W,
    last_shown: Option<u64>,
}

impl<W: Write> ConsoleProgress<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_shown: None,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ProgressSink for ConsoleProgress<W> {
    fn on_start(&mut self, index: usize, url: &str) {
        self.last_shown = None;
        let _ = writeln!(self.out, "--------\nimg{} <- {}", index, url);
    }

    fn on_progress(&mut self, progress: &FileProgress<'_>) {
        match progress.percent() {
            Some(pct) => {
                let whole = pct.floor() as u64;
                if self.last_shown == Some(whole) {
                    return;
                }
                self.last_shown = Some(whole);
                let _ = write!(self.out, "\r  Downloading file... {:.2}%", pct);
            }
            None => {
                let kib = progress.bytes_done / 1024;
                if self.last_shown == Some(kib) {
                    return;
                }
                self.last_shown = Some(kib);
                let _ = write!(self.out, "\r  Downloading file... {} KiB", kib);
            }
        }
        let _ = self.out.flush();
    }

    fn on_complete(&mut self, _index: usize, path: &Path, bytes: u64) {
        let _ = writeln!(self.out, "\n  saved {} ({} bytes)", path.display(), bytes);
        let _ = self.out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(done: u64, total: Option<u64>) -> FileProgress<'static> {
        FileProgress {
            index: 0,
            url: "http://code.google.com/puzzle/a-baaa.jpg",
            bytes_done: done,
            total_bytes: total,
        }
    }

    #[test]
    fn redraws_only_on_whole_percent_change() {
        let mut p = ConsoleProgress::new(Vec::new());
        p.on_start(0, "http://code.google.com/puzzle/a-baaa.jpg");
        p.on_progress(&progress(1, Some(1000)));
        p.on_progress(&progress(5, Some(1000)));
        p.on_progress(&progress(500, Some(1000)));
        p.on_progress(&progress(1000, Some(1000)));
        p.on_complete(0, Path::new("/tmp/pics/img0"), 1000);
        let out = String::from_utf8(p.into_inner()).unwrap();
        assert_eq!(out.matches("Downloading file...").count(), 3);
        assert!(out.contains("0.10%"));
        assert!(out.contains("50.00%"));
        assert!(out.contains("100.00%"));
        assert!(out.contains("saved /tmp/pics/img0 (1000 bytes)"));
    }

    #[test]
    fn overshoot_is_shown_as_100() {
        let mut p = ConsoleProgress::new(Vec::new());
        p.on_progress(&progress(1500, Some(1000)));
        let out = String::from_utf8(p.into_inner()).unwrap();
        assert!(out.contains("100.00%"));
    }

    #[test]
    fn unknown_length_shows_kib() {
        let mut p = ConsoleProgress::new(Vec::new());
        p.on_progress(&progress(4096, None));
        let out = String::from_utf8(p.into_inner()).unwrap();
        assert!(out.contains("4 KiB"));
    }
}
