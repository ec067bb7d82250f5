//! Package version resolution and feed failure translation.
//!
//! This crate decides which package version an operation targets and
//! turns transport-layer failures into messages fit for the terminal:
//!
//! - [`Version`] — `major.minor[.patch][-pre]` with standard precedence
//!   ordering.
//! - [`VersionListing`] — the contract a feed client satisfies; only the
//!   local [`DirectoryFeed`] implementation lives here, the wire protocol
//!   is a collaborator.
//! - [`resolve_version`] — explicit requests parse locally;
//!   "latest"/prerelease requests consult the listing and take the
//!   maximum.
//! - [`translate`] — maps a [`TransportError`] (status code, message,
//!   optional plain-text body) onto a [`FeedError`] while preserving the
//!   original failure as the cause.
//!
//! Resolution classifies failures, it does not recover from them: there
//! is no retry, no backoff, and no authentication handshake here.

mod error;
mod local;
mod resolve;
mod transport;
mod version;

pub use error::FeedError;
pub use local::DirectoryFeed;
pub use resolve::{LATEST, VersionListing, resolve_version};
pub use transport::{
    DEFAULT_NOT_FOUND_MESSAGE, REJECTED_CREDENTIALS_MESSAGE, TransportError, translate,
};
pub use version::{Version, VersionParseError};
