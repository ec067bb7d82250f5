//! Version resolution against a feed listing.

use tracing::debug;

use crate::error::FeedError;
use crate::transport::{TransportError, translate};
use crate::version::Version;

/// Case-insensitive sentinel requesting the newest version on the feed.
pub const LATEST: &str = "latest";

/// The version-listing contract a feed client must satisfy.
///
/// Implementations may be remote (wire protocol, out of scope here) or
/// local (see [`DirectoryFeed`](crate::DirectoryFeed)). Failures are
/// transport-level and are run through the failure translator before they
/// reach the user.
pub trait VersionListing {
    /// Lists all versions of `id` known to the feed, in no particular
    /// order.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the feed cannot be consulted.
    fn list_versions(&self, id: &str) -> Result<Vec<Version>, TransportError>;
}

/// Decides which version of `id` an operation targets.
///
/// An explicit request — non-empty, not the [`LATEST`] sentinel, and with
/// `prerelease` unset — parses locally and returns immediately without
/// consulting the listing. Every other request lists the feed and picks
/// the maximum version by precedence.
///
/// # Examples
///
/// ```
/// use bale_feed::{resolve_version, TransportError, Version, VersionListing};
///
/// struct Fixed(Vec<Version>);
///
/// impl VersionListing for Fixed {
///     fn list_versions(&self, _id: &str) -> Result<Vec<Version>, TransportError> {
///         Ok(self.0.clone())
///     }
/// }
///
/// let feed = Fixed(vec![Version::new(1, 0, 0), Version::new(1, 2, 0)]);
/// let resolved = resolve_version("tool.lib", "latest", false, &feed).unwrap();
/// assert_eq!(resolved, Version::new(1, 2, 0));
/// ```
///
/// # Errors
///
/// Returns [`FeedError::InvalidVersion`] for explicit text that does not
/// parse, [`FeedError::NoVersions`] when the feed lists nothing for `id`,
/// or a translated transport failure when the listing call fails.
pub fn resolve_version(
    id: &str,
    requested: &str,
    prerelease: bool,
    listing: &dyn VersionListing,
) -> Result<Version, FeedError> {
    let requested = requested.trim();

    if !requested.is_empty() && !requested.eq_ignore_ascii_case(LATEST) && !prerelease {
        let version: Version = requested
            .parse()
            .map_err(|_| FeedError::InvalidVersion(requested.to_string()))?;
        debug!(id, %version, "resolved explicit version without feed call");
        return Ok(version);
    }

    let versions = listing
        .list_versions(id)
        .map_err(|failure| translate(failure, None))?;
    debug!(id, count = versions.len(), "listed feed versions");

    match versions.into_iter().max() {
        Some(version) => {
            debug!(id, %version, "resolved newest feed version");
            Ok(version)
        }
        None => Err(FeedError::NoVersions(id.to_string())),
    }
}
