//! Value binding for single raw tokens.
//!
//! [`bind`] converts one raw string into a typed [`Value`] for a
//! descriptor's [`ValueKind`], applying the kind-specific parsing rules:
//!
//! - **Bool** — an absent/empty raw value binds `true` (flag semantics);
//!   otherwise the value must be a literal boolean word.
//! - **Text** — bound verbatim, including the empty string.
//! - **Credentials** — blank input binds "no credentials"; otherwise the
//!   value splits on the *first* separator only, so the secret may itself
//!   contain the separator character.
//!
//! Malformed input is a [`BindError`] naming the offending argument. There
//! is no unsupported-kind path: the kind set is closed and the dispatch is
//! an exhaustive match.

use thiserror::Error;

use crate::descriptor::ValueKind;

/// Separator between the username and secret of a credential pair.
pub const CREDENTIAL_SEPARATOR: char = ':';

/// A username/secret pair parsed from a single `username:password` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Text before the first separator.
    pub username: String,
    /// Everything after the first separator, verbatim.
    pub secret: String,
}

/// A typed argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A boolean flag value.
    Bool(bool),
    /// Verbatim text.
    Text(String),
    /// A credential pair, or `None` when no credentials were supplied.
    Credentials(Option<Credentials>),
}

impl Value {
    /// Returns the boolean payload, if this is a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the text payload, if this is a [`Value::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the credential payload, if this is a [`Value::Credentials`].
    pub fn as_credentials(&self) -> Option<&Credentials> {
        match self {
            Self::Credentials(Some(credentials)) => Some(credentials),
            _ => None,
        }
    }
}

/// Malformed-input errors raised by the binder.
///
/// These are user-facing and recoverable: the caller reports the message
/// and aborts the parse for that argument.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// Value for a boolean argument is not a literal boolean word.
    #[error("invalid value for '{argument}': must be \"true\" or \"false\"")]
    InvalidBool {
        /// Display name of the offending argument.
        argument: String,
    },
    /// Credential value contains no separator.
    #[error("invalid value for '{argument}': must be in the format \"username:password\"")]
    InvalidCredentials {
        /// Display name of the offending argument.
        argument: String,
    },
}

/// Binds one raw string to a typed value for an argument of `kind`.
///
/// `argument` is the display name used in error messages.
///
/// # Examples
///
/// ```
/// use bale_core::{bind, Value, ValueKind};
///
/// assert_eq!(bind(ValueKind::Bool, "overwrite", ""), Ok(Value::Bool(true)));
/// assert_eq!(
///     bind(ValueKind::Text, "feed", "https://example.test/feed"),
///     Ok(Value::Text("https://example.test/feed".to_string())),
/// );
/// assert!(bind(ValueKind::Bool, "overwrite", "maybe").is_err());
/// ```
///
/// # Errors
///
/// Returns a [`BindError`] when the raw value does not satisfy the kind's
/// parsing rules.
pub fn bind(kind: ValueKind, argument: &str, raw: &str) -> Result<Value, BindError> {
    match kind {
        ValueKind::Bool => {
            if raw.is_empty() {
                return Ok(Value::Bool(true));
            }
            if raw.eq_ignore_ascii_case("true") {
                Ok(Value::Bool(true))
            } else if raw.eq_ignore_ascii_case("false") {
                Ok(Value::Bool(false))
            } else {
                Err(BindError::InvalidBool {
                    argument: argument.to_string(),
                })
            }
        }
        ValueKind::Text => Ok(Value::Text(raw.to_string())),
        ValueKind::Credentials => {
            if raw.trim().is_empty() {
                return Ok(Value::Credentials(None));
            }
            match raw.split_once(CREDENTIAL_SEPARATOR) {
                Some((username, secret)) => Ok(Value::Credentials(Some(Credentials {
                    username: username.to_string(),
                    secret: secret.to_string(),
                }))),
                None => Err(BindError::InvalidCredentials {
                    argument: argument.to_string(),
                }),
            }
        }
    }
}
