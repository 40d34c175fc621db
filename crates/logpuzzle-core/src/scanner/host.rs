//! Hostname derivation from the log file name.

use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

fn host_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^_]+\.\w+").expect("valid host regex"))
}

/// Derives the server hostname from a log file name like
/// `animal_code.google.com` (→ `code.google.com`).
///
/// Only the final path component is inspected, so underscores in parent
/// directories do not leak into the host. Returns `None` when the name has
/// no dotted segment.
pub fn host_from_log_path(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    host_pattern().find(name).map(|m| m.as_str().to_string())
}
