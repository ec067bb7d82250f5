//! Package manifest decoding and display.
//!
//! The manifest is the package's embedded descriptor stream: an optional
//! group, a name, and a version. Decoding the container that carries it is
//! a collaborator concern; this module only decodes the JSON stream and
//! formats the result for display.

use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Package metadata decoded from a manifest stream.
///
/// # Examples
///
/// ```
/// use bale_archive::Manifest;
///
/// let manifest = Manifest::from_reader(
///     r#"{"group":"tools","name":"tool.lib","version":"1.2.0"}"#.as_bytes(),
/// )
/// .unwrap();
/// assert_eq!(manifest.summary(), "Package: tools:tool.lib\nVersion: 1.2.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Optional group the package belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Package name.
    pub name: String,
    /// Package version text.
    pub version: String,
}

impl Manifest {
    /// File name of the manifest entry inside a package.
    pub const FILE_NAME: &'static str = "manifest.json";

    /// Decodes a manifest from a JSON byte stream.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidManifest`](crate::ArchiveError::InvalidManifest)
    /// when the stream does not decode.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(BufReader::new(reader))?)
    }

    /// Loads a manifest from a file.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](crate::ArchiveError::Io) when the file cannot be
    /// opened or [`InvalidManifest`](crate::ArchiveError::InvalidManifest)
    /// when it does not decode.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// The display identity: `group:name`, or just `name` without a group.
    pub fn qualified_name(&self) -> String {
        match &self.group {
            Some(group) => format!("{group}:{}", self.name),
            None => self.name.clone(),
        }
    }

    /// The two display lines shown after package operations.
    pub fn summary(&self) -> String {
        format!("Package: {}\nVersion: {}", self.qualified_name(), self.version)
    }
}
