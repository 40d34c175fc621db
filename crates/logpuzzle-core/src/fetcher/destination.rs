//! Destination directory preparation.
//!
//! A missing directory is created. An existing non-empty one needs a decision
//! from the confirmation provider: purge its contents, or use another name.
//! An alternate name that already exists gets a `-dup` suffix.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::PuzzleError;
use crate::prompt::ConfirmationProvider;

/// What happened to the destination before downloading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestinationOutcome {
    /// Directory did not exist and was created.
    Created,
    /// Directory existed and was empty.
    Reused,
    /// Existing entries were deleted.
    Purged { removed: usize },
    /// User picked another directory; `requested` was taken, so `path` differs from it.
    Renamed { requested: PathBuf },
}

/// Directory the images will be written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedDestination {
    pub path: PathBuf,
    pub outcome: DestinationOutcome,
}

/// Makes `dest` ready for a fresh set of images, asking `prompt` when it holds files.
pub fn prepare_destination(
    dest: &Path,
    prompt: &mut dyn ConfirmationProvider,
) -> Result<PreparedDestination, PuzzleError> {
    if !dest.exists() {
        fs::create_dir_all(dest).map_err(|e| PuzzleError::destination(dest, e))?;
        tracing::info!("created destination {}", dest.display());
        return Ok(PreparedDestination {
            path: dest.to_path_buf(),
            outcome: DestinationOutcome::Created,
        });
    }
    if !dest.is_dir() {
        return Err(PuzzleError::destination(
            dest,
            io::Error::new(io::ErrorKind::AlreadyExists, "exists and is not a directory"),
        ));
    }

    let entries = list_entries(dest)?;
    if entries.is_empty() {
        return Ok(PreparedDestination {
            path: dest.to_path_buf(),
            outcome: DestinationOutcome::Reused,
        });
    }

    let question = format!(
        "{} already contains {} entries. Delete them?",
        dest.display(),
        entries.len()
    );
    if prompt.confirm(&question)? {
        for entry in &entries {
            remove_entry(entry).map_err(|e| PuzzleError::destination(entry, e))?;
            tracing::debug!("removed {}", entry.display());
        }
        tracing::info!("purged {} entries from {}", entries.len(), dest.display());
        return Ok(PreparedDestination {
            path: dest.to_path_buf(),
            outcome: DestinationOutcome::Purged {
                removed: entries.len(),
            },
        });
    }

    let name = prompt.ask_name("Name a new directory for the images")?;
    let requested = resolve_alternate(dest, &name);
    if !requested.exists() {
        fs::create_dir_all(&requested).map_err(|e| PuzzleError::destination(&requested, e))?;
        tracing::info!("created alternate destination {}", requested.display());
        return Ok(PreparedDestination {
            path: requested,
            outcome: DestinationOutcome::Created,
        });
    }

    let path = disambiguate(&requested);
    fs::create_dir_all(&path).map_err(|e| PuzzleError::destination(&path, e))?;
    tracing::info!(
        "{} exists; using {} instead",
        requested.display(),
        path.display()
    );
    Ok(PreparedDestination {
        path,
        outcome: DestinationOutcome::Renamed { requested },
    })
}

fn list_entries(dir: &Path) -> Result<Vec<PathBuf>, PuzzleError> {
    let mut entries = fs::read_dir(dir)
        .map_err(|e| PuzzleError::destination(dir, e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()
        .map_err(|e| PuzzleError::destination(dir, e))?;
    entries.sort();
    Ok(entries)
}

fn remove_entry(path: &Path) -> io::Result<()> {
    if fs::symlink_metadata(path)?.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

/// Relative names are taken next to the original destination.
fn resolve_alternate(dest: &Path, name: &str) -> PathBuf {
    let name = Path::new(name);
    if name.is_absolute() {
        return name.to_path_buf();
    }
    match dest.parent() {
        Some(parent) => parent.join(name),
        None => name.to_path_buf(),
    }
}

/// First unused path among `<p>-dup`, `<p>-dup-2`, `<p>-dup-3`, ...
pub fn disambiguate(path: &Path) -> PathBuf {
    let mut n = 1u32;
    loop {
        let mut candidate: OsString = path.as_os_str().to_owned();
        if n == 1 {
            candidate.push("-dup");
        } else {
            candidate.push(format!("-dup-{}", n));
        }
        let candidate = PathBuf::from(candidate);
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}
