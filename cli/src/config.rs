//! Working-directory configuration.
//!
//! A `bale.yml` in the working directory supplies defaults that bound
//! command arguments override. An absent file means defaults; a file that
//! does not parse is a startup error.
//!
//! # Example YAML
//!
//! ```yaml
//! feed: /srv/bale-feed
//! target: ./vendor
//! timestamps: true
//! ```

use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file does not parse.
    #[error("invalid configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Defaults applied when a command argument is absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Default feed root directory.
    #[serde(default)]
    pub feed: Option<PathBuf>,
    /// Default extraction target directory.
    #[serde(default)]
    pub target: Option<PathBuf>,
    /// Preserve recorded entry timestamps by default.
    #[serde(default)]
    pub timestamps: bool,
}

impl CliConfig {
    /// File name looked up in the working directory.
    pub const FILE_NAME: &'static str = "bale.yml";

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let config = serde_yaml::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// Loads `bale.yml` from the working directory, or defaults when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] only when the file exists and cannot be
    /// read or parsed.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = Path::new(Self::FILE_NAME);
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_complete() {
        let config: CliConfig = serde_yaml::from_str(
            "feed: /srv/bale-feed\ntarget: ./vendor\ntimestamps: true\n",
        )
        .unwrap();
        assert_eq!(config.feed, Some(PathBuf::from("/srv/bale-feed")));
        assert_eq!(config.target, Some(PathBuf::from("./vendor")));
        assert!(config.timestamps);
    }

    #[test]
    fn test_missing_fields_default() {
        let config: CliConfig = serde_yaml::from_str("feed: /srv/bale-feed\n").unwrap();
        assert!(config.target.is_none());
        assert!(!config.timestamps);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join(CliConfig::FILE_NAME);
        assert!(matches!(
            CliConfig::load(missing).unwrap_err(),
            ConfigError::Io(_)
        ));
    }

    #[test]
    fn test_malformed_file_is_yaml_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CliConfig::FILE_NAME);
        std::fs::write(&path, "feed: [unclosed").unwrap();
        assert!(matches!(
            CliConfig::load(path).unwrap_err(),
            ConfigError::Yaml(_)
        ));
    }
}
