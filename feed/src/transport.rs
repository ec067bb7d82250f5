//! Transport failure model and translation into user-facing errors.
//!
//! Feed clients report failures as [`TransportError`]: an optional
//! protocol status code, a client-side message, and the response body when
//! one could be read as plain text. [`translate`] maps that signal onto a
//! [`FeedError`] with a message fit for the terminal, keeping the original
//! failure reachable through `source()`. Translation classifies; it never
//! retries or recovers.

use thiserror::Error;

use crate::error::FeedError;

/// Message used for status 404 when the caller supplies none.
pub const DEFAULT_NOT_FOUND_MESSAGE: &str = "the package feed could not be found";

/// Fixed message for status 401.
pub const REJECTED_CREDENTIALS_MESSAGE: &str = "the server rejected the username or password";

/// A transport-level failure raised by a feed client.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    /// Protocol-level status code, when the failure carried one.
    pub status: Option<u16>,
    /// The client's own description of the failure.
    pub message: String,
    /// Plain-text response body, when one could be read. Clients swallow
    /// body-read failures and leave this unset.
    pub body: Option<String>,
}

impl TransportError {
    /// Creates a failure with a message and no status or body.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
            body: None,
        }
    }

    /// Attaches a protocol status code.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Attaches a plain-text response body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Translates a transport failure into a user-facing [`FeedError`].
///
/// Status 404 selects `not_found_message` (or
/// [`DEFAULT_NOT_FOUND_MESSAGE`] when the caller passes `None`), status
/// 401 selects the fixed [`REJECTED_CREDENTIALS_MESSAGE`], and any other
/// failure keeps its own message. A non-blank plain-text body is appended
/// on a new line. The returned error wraps `failure` as its cause.
///
/// # Examples
///
/// ```
/// use bale_feed::{translate, TransportError};
///
/// let failure = TransportError::new("GET /feeds/tools returned 404").with_status(404);
/// let error = translate(failure, Some("feed 'tools' does not exist"));
/// assert_eq!(error.to_string(), "feed 'tools' does not exist");
/// ```
pub fn translate(failure: TransportError, not_found_message: Option<&str>) -> FeedError {
    let mut message = match failure.status {
        Some(404) => not_found_message
            .unwrap_or(DEFAULT_NOT_FOUND_MESSAGE)
            .to_string(),
        Some(401) => REJECTED_CREDENTIALS_MESSAGE.to_string(),
        _ => failure.message.clone(),
    };

    if let Some(body) = failure.body.as_deref() {
        if !body.trim().is_empty() {
            message.push('\n');
            message.push_str(body);
        }
    }

    FeedError::Feed {
        message,
        source: failure,
    }
}
