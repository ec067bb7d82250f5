//! User-facing feed error type.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors surfaced to the user by feed operations.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Explicit version text that does not parse.
    #[error("'{0}' is not a valid package version")]
    InvalidVersion(String),

    /// The feed listed no versions for the package.
    #[error("no versions of package '{0}' were found on the feed")]
    NoVersions(String),

    /// A translated transport failure; the original failure is the cause.
    #[error("{message}")]
    Feed {
        /// User-facing message chosen by the failure translator.
        message: String,
        /// The transport failure this error was translated from.
        #[source]
        source: TransportError,
    },
}
