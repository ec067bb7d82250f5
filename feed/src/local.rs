//! Filesystem-backed feed listing.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::resolve::VersionListing;
use crate::transport::TransportError;
use crate::version::Version;

/// A feed rooted in a local directory.
///
/// Layout: `<root>/<id>/<version>/` holds one unpacked package per
/// version. Failures are reported as [`TransportError`]s so that local and
/// remote feeds share a single user-facing error path through the failure
/// translator; a package with no directory maps to status 404.
///
/// # Examples
///
/// ```no_run
/// use bale_feed::{resolve_version, DirectoryFeed};
///
/// let feed = DirectoryFeed::new("/srv/bale-feed");
/// let version = resolve_version("tool.lib", "latest", false, &feed).unwrap();
/// println!("{}", feed.package_dir("tool.lib", &version).display());
/// ```
#[derive(Debug, Clone)]
pub struct DirectoryFeed {
    root: PathBuf,
}

impl DirectoryFeed {
    /// Creates a feed over `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The feed's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The directory holding one package version.
    pub fn package_dir(&self, id: &str, version: &Version) -> PathBuf {
        self.root.join(id).join(version.to_string())
    }
}

impl VersionListing for DirectoryFeed {
    fn list_versions(&self, id: &str) -> Result<Vec<Version>, TransportError> {
        let package_root = self.root.join(id);
        if !package_root.is_dir() {
            return Err(TransportError::new(format!(
                "feed at '{}' has no entry for package '{id}'",
                self.root.display()
            ))
            .with_status(404));
        }

        let entries = std::fs::read_dir(&package_root).map_err(|err| {
            TransportError::new(format!(
                "failed to read feed entry '{}': {err}",
                package_root.display()
            ))
        })?;

        let mut versions = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| {
                TransportError::new(format!(
                    "failed to read feed entry '{}': {err}",
                    package_root.display()
                ))
            })?;
            if !entry.path().is_dir() {
                continue;
            }
            let name = entry.file_name();
            match name.to_string_lossy().parse::<Version>() {
                Ok(version) => versions.push(version),
                Err(_) => {
                    debug!(
                        id,
                        directory = %name.to_string_lossy(),
                        "skipping non-version directory in feed"
                    );
                }
            }
        }

        Ok(versions)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::resolve::resolve_version;

    #[test]
    fn test_lists_version_directories() {
        let dir = tempfile::tempdir().unwrap();
        let package_root = dir.path().join("tool.lib");
        for version in ["1.0.0", "1.2.0", "0.9.0"] {
            fs::create_dir_all(package_root.join(version)).unwrap();
        }
        // Neither a loose file nor a non-version directory is a release.
        fs::create_dir_all(package_root.join("staging")).unwrap();
        fs::write(package_root.join("notes.txt"), "n/a").unwrap();

        let feed = DirectoryFeed::new(dir.path());
        let mut versions = feed.list_versions("tool.lib").unwrap();
        versions.sort();

        let rendered: Vec<String> = versions.iter().map(Version::to_string).collect();
        assert_eq!(rendered, vec!["0.9.0", "1.0.0", "1.2.0"]);
    }

    #[test]
    fn test_missing_package_maps_to_not_found_status() {
        let dir = tempfile::tempdir().unwrap();
        let feed = DirectoryFeed::new(dir.path());

        let failure = feed.list_versions("absent.pkg").unwrap_err();
        assert_eq!(failure.status, Some(404));
    }

    #[test]
    fn test_resolves_latest_through_translator_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("tool.lib/1.0.0")).unwrap();
        fs::create_dir_all(dir.path().join("tool.lib/1.2.0")).unwrap();

        let feed = DirectoryFeed::new(dir.path());
        let resolved = resolve_version("tool.lib", "latest", false, &feed).unwrap();
        assert_eq!(resolved, Version::new(1, 2, 0));
        assert_eq!(
            feed.package_dir("tool.lib", &resolved),
            dir.path().join("tool.lib/1.2.0")
        );
    }
}
