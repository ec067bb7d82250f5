//! Package content-entry contract and the directory-backed source.
//!
//! A package's payload is a sequence of entries, each tagged
//! content-or-not and directory-or-file, carrying a relative content path,
//! a readable byte stream, and an optional recorded timestamp. The
//! container format that produces them is a collaborator;
//! [`DirectoryPackage`] is the local implementation over an unpacked
//! package directory:
//!
//! ```text
//! <package>/
//!   manifest.json     non-content metadata entry
//!   content/          content entries, replayed on extraction
//! ```

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::{ArchiveError, Result};
use crate::manifest::Manifest;

/// One file or directory record inside a package's payload.
pub trait PackageEntry {
    /// Whether this entry belongs to the package's content payload.
    /// Non-content entries (metadata) are never extracted.
    fn is_content(&self) -> bool;

    /// Whether this entry is a directory marker rather than a file.
    fn is_directory(&self) -> bool;

    /// The entry's path relative to the package content root.
    fn relative_path(&self) -> &Path;

    /// The entry's recorded modification time, when one exists.
    fn modified(&self) -> Option<DateTime<Utc>>;

    /// Opens the entry's byte stream for reading.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the stream cannot be opened; directory
    /// markers have no byte stream.
    fn open(&self) -> io::Result<Box<dyn Read>>;
}

/// A [`PackageEntry`] backed by a file or directory on disk.
#[derive(Debug, Clone)]
pub struct FsEntry {
    absolute: PathBuf,
    relative: PathBuf,
    directory: bool,
    content: bool,
    modified: Option<DateTime<Utc>>,
}

impl PackageEntry for FsEntry {
    fn is_content(&self) -> bool {
        self.content
    }

    fn is_directory(&self) -> bool {
        self.directory
    }

    fn relative_path(&self) -> &Path {
        &self.relative
    }

    fn modified(&self) -> Option<DateTime<Utc>> {
        self.modified
    }

    fn open(&self) -> io::Result<Box<dyn Read>> {
        if self.directory {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "directory entry has no byte stream",
            ));
        }
        Ok(Box::new(fs::File::open(&self.absolute)?))
    }
}

/// An unpacked package directory exposing its entries and manifest.
///
/// Entries are enumerated depth-first with each directory's children in
/// name order, so repeated runs present the same sequence.
///
/// # Examples
///
/// ```no_run
/// use bale_archive::DirectoryPackage;
///
/// let package = DirectoryPackage::open("/srv/feed/tool.lib/1.2.0").unwrap();
/// let manifest = package.manifest().unwrap();
/// println!("{}", manifest.summary());
/// ```
#[derive(Debug, Clone)]
pub struct DirectoryPackage {
    root: PathBuf,
}

impl DirectoryPackage {
    /// Name of the content subtree inside a package directory.
    pub const CONTENT_DIR: &'static str = "content";

    /// Opens the package rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::MissingPackage`] when `root` is not a
    /// directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ArchiveError::MissingPackage(root));
        }
        Ok(Self { root })
    }

    /// The package's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Decodes the package manifest.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Io`] when the manifest stream cannot be
    /// opened or [`ArchiveError::InvalidManifest`] when it does not
    /// decode.
    pub fn manifest(&self) -> Result<Manifest> {
        Manifest::load(self.root.join(Manifest::FILE_NAME))
    }

    /// Enumerates the package's entries: the manifest as a non-content
    /// entry, then the content subtree in sorted order.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Io`] when the package tree cannot be read.
    pub fn entries(&self) -> Result<Vec<FsEntry>> {
        let mut entries = Vec::new();

        let manifest_path = self.root.join(Manifest::FILE_NAME);
        if manifest_path.is_file() {
            entries.push(FsEntry {
                modified: file_modified(&manifest_path)?,
                absolute: manifest_path,
                relative: PathBuf::from(Manifest::FILE_NAME),
                directory: false,
                content: false,
            });
        }

        let content_root = self.root.join(Self::CONTENT_DIR);
        if content_root.is_dir() {
            collect_content_entries(&content_root, Path::new(""), &mut entries)?;
        }

        Ok(entries)
    }
}

fn collect_content_entries(
    dir: &Path,
    relative: &Path,
    entries: &mut Vec<FsEntry>,
) -> Result<()> {
    let mut children: Vec<fs::DirEntry> = fs::read_dir(dir)?.collect::<io::Result<_>>()?;
    children.sort_by_key(fs::DirEntry::file_name);

    for child in children {
        let absolute = child.path();
        let child_relative = relative.join(child.file_name());
        let file_type = child.file_type()?;

        if file_type.is_dir() {
            entries.push(FsEntry {
                absolute: absolute.clone(),
                relative: child_relative.clone(),
                directory: true,
                content: true,
                modified: None,
            });
            collect_content_entries(&absolute, &child_relative, entries)?;
        } else {
            entries.push(FsEntry {
                modified: file_modified(&absolute)?,
                absolute,
                relative: child_relative,
                directory: false,
                content: true,
            });
        }
    }

    Ok(())
}

fn file_modified(path: &Path) -> Result<Option<DateTime<Utc>>> {
    let metadata = fs::metadata(path)?;
    Ok(metadata.modified().ok().map(DateTime::<Utc>::from))
}
