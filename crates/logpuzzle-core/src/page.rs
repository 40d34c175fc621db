//! Page builder: `index.html` showing the downloaded slices side by side,
//! plus a best-effort launch of the user's viewer.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::PuzzleError;
use crate::fetcher::image_file_name;

pub const INDEX_FILE: &str = "index.html";

/// Escape text for use inside a double-quoted HTML attribute.
fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Markup with one `<img>` per path, in the given order.
pub fn render_index(images: &[PathBuf]) -> String {
    let mut html = String::new();
    html.push_str("<html>\n");
    html.push_str("<body>\n");
    html.push_str("<div style=\"display: flex;justify-content: center;\" >\n");
    for img in images {
        let _ = write!(
            html,
            "<img src=\"{}\">",
            escape_attr(&img.to_string_lossy())
        );
    }
    html.push_str("\n</div>\n");
    html.push_str("</body>\n");
    html.push_str("</html>\n");
    html
}

/// Writes `index.html` into `dir` referencing `img0..img{count-1}` by absolute
/// path and returns the absolute path of the page. Overwrites an existing page.
pub fn write_index(dir: &Path, count: usize) -> Result<PathBuf, PuzzleError> {
    let abs_dir = fs::canonicalize(dir).map_err(|e| PuzzleError::destination(dir, e))?;
    let images: Vec<PathBuf> = (0..count)
        .map(|i| abs_dir.join(image_file_name(i)))
        .collect();
    let index_path = abs_dir.join(INDEX_FILE);
    fs::write(&index_path, render_index(&images))
        .map_err(|e| PuzzleError::destination(&index_path, e))?;
    tracing::info!(images = count, "wrote {}", index_path.display());
    Ok(index_path)
}

const NO_ARGS: &[&str] = &[];
const WINDOWS_START: &[&str] = &["/C", "start", ""];

/// Program and leading arguments of the platform's default opener.
fn platform_opener() -> (&'static str, &'static [&'static str]) {
    if cfg!(target_os = "macos") {
        ("open", NO_ARGS)
    } else if cfg!(windows) {
        ("cmd", WINDOWS_START)
    } else {
        ("xdg-open", NO_ARGS)
    }
}

/// Builds the viewer command for `page`. `viewer` overrides the platform
/// opener; it is split on whitespace into program and arguments.
pub fn viewer_command(page: &Path, viewer: Option<&str>) -> Result<Command, PuzzleError> {
    let launch_err = |reason: String| PuzzleError::ViewerLaunch {
        path: page.to_path_buf(),
        reason,
    };
    let target = url::Url::from_file_path(page)
        .map_err(|_| launch_err("index path is not absolute".to_string()))?;

    let mut cmd = match viewer.map(str::split_whitespace) {
        Some(mut parts) => {
            let program = parts
                .next()
                .ok_or_else(|| launch_err("viewer_command is empty".to_string()))?;
            let mut cmd = Command::new(program);
            cmd.args(parts);
            cmd
        }
        None => {
            let (program, args) = platform_opener();
            let mut cmd = Command::new(program);
            cmd.args(args);
            cmd
        }
    };
    cmd.arg(target.as_str());
    Ok(cmd)
}

/// Launches the viewer without waiting for it. Failure is `ViewerLaunch`,
/// which callers treat as a warning.
pub fn open_in_viewer(page: &Path, viewer: Option<&str>) -> Result<(), PuzzleError> {
    let mut cmd = viewer_command(page, viewer)?;
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    cmd.spawn().map_err(|e| PuzzleError::ViewerLaunch {
        path: page.to_path_buf(),
        reason: e.to_string(),
    })?;
    tracing::debug!("viewer launched for {}", page.display());
    Ok(())
}
