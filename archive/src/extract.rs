//! Extraction executor.
//!
//! Replays a package's content entries onto a target directory, in the
//! order the source presents them. Extraction is all-or-abort: the first
//! I/O failure propagates immediately and leaves the remaining entries
//! unwritten, with no rollback of what was already extracted.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use chrono::Datelike;
use tracing::debug;

use crate::entry::PackageEntry;
use crate::error::{ArchiveError, Result};

/// Recorded years at or before this value mean "timestamp unset".
const TIMESTAMP_SENTINEL_YEAR: i32 = 1980;

/// Counts of what one extraction run wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Files written.
    pub files: u64,
    /// Directories created from directory markers.
    pub directories: u64,
}

/// Replays `entries` onto `target`.
///
/// Ensures `target` exists, then processes each content entry in order:
/// directory markers are created and counted; file entries have their
/// parent directory ensured and their bytes copied to the computed target
/// path. With `overwrite` unset the copy uses exclusive-create and fails
/// if the file already exists; with it set the file is created or
/// truncated. When `preserve_timestamps` is set, a recorded timestamp
/// whose year exceeds 1980 becomes the written file's modification time;
/// earlier timestamps are sentinel values and are left alone.
///
/// Non-content entries are skipped and never counted.
///
/// # Errors
///
/// Returns [`ArchiveError::UnsafeEntryPath`] for an entry path that would
/// land outside `target`, or [`ArchiveError::Io`] on the first I/O
/// failure; either aborts the remaining entries.
pub fn extract_entries<E: PackageEntry>(
    target: &Path,
    overwrite: bool,
    entries: &[E],
    preserve_timestamps: bool,
) -> Result<ExtractionReport> {
    fs::create_dir_all(target)?;
    let mut report = ExtractionReport::default();

    for entry in entries {
        if !entry.is_content() {
            continue;
        }
        let destination = resolve_entry_path(target, entry.relative_path())?;

        if entry.is_directory() {
            fs::create_dir_all(&destination)?;
            report.directories += 1;
            continue;
        }

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut options = fs::OpenOptions::new();
        options.write(true);
        if overwrite {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }
        let mut file = options.open(&destination)?;
        let mut reader = entry.open()?;
        io::copy(&mut reader, &mut file)?;

        if preserve_timestamps {
            if let Some(modified) = entry.modified() {
                if modified.year() > TIMESTAMP_SENTINEL_YEAR {
                    file.set_modified(SystemTime::from(modified))?;
                }
            }
        }

        report.files += 1;
        debug!(path = %destination.display(), "extracted file entry");
    }

    debug!(
        target = %target.display(),
        files = report.files,
        directories = report.directories,
        "extraction complete"
    );
    Ok(report)
}

fn resolve_entry_path(target: &Path, relative: &Path) -> Result<PathBuf> {
    if relative.is_absolute()
        || relative
            .components()
            .any(|component| matches!(component, Component::ParentDir))
    {
        return Err(ArchiveError::UnsafeEntryPath(relative.to_path_buf()));
    }
    Ok(target.join(relative))
}
