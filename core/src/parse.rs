//! Token matching against a command descriptor.
//!
//! [`parse_tokens`] walks the invocation tokens (already split by the
//! process-level tokenizer) against a [`CommandDescriptor`] and binds each
//! one through the value binder, producing a [`BoundCommand`]: the
//! command's fields populated with typed values, created fresh per
//! invocation.
//!
//! Token convention: positionals in index order, named arguments as
//! `--name=value` anywhere after the command name. `--name` without a
//! value binds the empty string, which for boolean arguments implies
//! `true`.
//!
//! All failures are explicit [`ParseError`] values; the caller reports the
//! message, prints usage, and aborts with a non-zero status.

use std::collections::HashMap;

use thiserror::Error;

use crate::bind::{BindError, Credentials, Value, bind};
use crate::descriptor::CommandDescriptor;

/// Token-matching and binding errors.
///
/// User-facing and recoverable at the invocation boundary, unlike
/// [`SchemaError`](crate::SchemaError).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A named token did not match any declared argument.
    #[error("unknown argument '--{0}'")]
    UnknownArgument(String),
    /// More positional tokens than declared slots.
    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
    /// A required argument was not supplied.
    #[error("missing required argument '{0}'")]
    MissingArgument(String),
    /// A supplied value failed to bind.
    #[error(transparent)]
    Bind(#[from] BindError),
}

/// A command instance with typed values bound for each argument.
///
/// Lookup is by the argument's display name. Optional arguments that were
/// absent but declare a default are present with the default value.
#[derive(Debug, Clone, Default)]
pub struct BoundCommand {
    values: HashMap<String, Value>,
}

impl BoundCommand {
    /// Returns the bound value for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns a boolean argument's value, treating absence as `false`.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Returns a text argument's value, if bound.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_text)
    }

    /// Returns a credential argument's pair, if one was supplied.
    pub fn credentials(&self, name: &str) -> Option<&Credentials> {
        self.get(name).and_then(Value::as_credentials)
    }
}

/// Matches `tokens` against `command` and binds a [`BoundCommand`].
///
/// # Examples
///
/// ```
/// use bale_core::{parse_tokens, CommandDescriptor, NamedArg, PositionalArg};
///
/// let command = CommandDescriptor::builder("install", "Installs a package.")
///     .positional(PositionalArg::required(0, "id", "Package id"))
///     .named(NamedArg::flag("overwrite", "Replace existing files"))
///     .build()
///     .unwrap();
///
/// let tokens = vec!["tool.lib".to_string(), "--overwrite".to_string()];
/// let bound = parse_tokens(&command, &tokens).unwrap();
/// assert_eq!(bound.text("id"), Some("tool.lib"));
/// assert!(bound.flag("overwrite"));
/// ```
///
/// # Errors
///
/// Returns a [`ParseError`] for unknown or surplus tokens, a missing
/// required argument, or a value the binder rejects.
pub fn parse_tokens(
    command: &CommandDescriptor,
    tokens: &[String],
) -> Result<BoundCommand, ParseError> {
    let mut values = HashMap::new();
    let mut position = 0usize;

    for token in tokens {
        if let Some(rest) = token.strip_prefix("--") {
            let (name, raw) = match rest.split_once('=') {
                Some((name, raw)) => (name, raw),
                None => (rest, ""),
            };
            let arg = command
                .find_named(name)
                .ok_or_else(|| ParseError::UnknownArgument(name.to_string()))?;
            let value = bind(arg.kind, &arg.name, raw)?;
            values.insert(arg.name.clone(), value);
        } else {
            let arg = command
                .positional_at(position)
                .ok_or_else(|| ParseError::UnexpectedArgument(token.to_string()))?;
            position += 1;
            let value = bind(arg.kind, &arg.name, token)?;
            values.insert(arg.name.clone(), value);
        }
    }

    for arg in command.positionals() {
        if values.contains_key(&arg.name) {
            continue;
        }
        if arg.required {
            return Err(ParseError::MissingArgument(arg.name.clone()));
        }
        if let Some(default) = &arg.default {
            values.insert(arg.name.clone(), default.clone());
        }
    }

    for arg in command.named() {
        if values.contains_key(&arg.name) {
            continue;
        }
        if arg.required {
            return Err(ParseError::MissingArgument(arg.name.clone()));
        }
        if let Some(default) = &arg.default {
            values.insert(arg.name.clone(), default.clone());
        }
    }

    Ok(BoundCommand { values })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bind::Value;
    use crate::descriptor::{NamedArg, PositionalArg};

    fn install_command() -> CommandDescriptor {
        CommandDescriptor::builder("install", "Installs a package from the feed.")
            .positional(PositionalArg::required(0, "id", "Package id"))
            .positional(PositionalArg::optional(1, "version", "Version to install"))
            .named(NamedArg::text("feed", "Feed location").with_alias("source"))
            .named(NamedArg::credentials("credentials", "Feed credentials"))
            .named(NamedArg::flag("overwrite", "Replace existing files"))
            .build()
            .unwrap()
    }

    fn tokens(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| part.to_string()).collect()
    }

    #[test]
    fn test_binds_positionals_in_order() {
        let bound = parse_tokens(&install_command(), &tokens(&["tool.lib", "1.2.0"])).unwrap();
        assert_eq!(bound.text("id"), Some("tool.lib"));
        assert_eq!(bound.text("version"), Some("1.2.0"));
    }

    #[test]
    fn test_flag_without_value_binds_true() {
        let bound =
            parse_tokens(&install_command(), &tokens(&["tool.lib", "--overwrite"])).unwrap();
        assert!(bound.flag("overwrite"));
    }

    #[test]
    fn test_absent_flag_defaults_false() {
        let bound = parse_tokens(&install_command(), &tokens(&["tool.lib"])).unwrap();
        assert_eq!(bound.get("overwrite"), Some(&Value::Bool(false)));
        assert!(!bound.flag("overwrite"));
    }

    #[test]
    fn test_named_value_and_alias() {
        let bound = parse_tokens(
            &install_command(),
            &tokens(&["tool.lib", "--source=/srv/feed"]),
        )
        .unwrap();
        assert_eq!(bound.text("feed"), Some("/srv/feed"));
    }

    #[test]
    fn test_credentials_bound_through_binder() {
        let bound = parse_tokens(
            &install_command(),
            &tokens(&["tool.lib", "--credentials=alice:s3cr:et"]),
        )
        .unwrap();
        let credentials = bound.credentials("credentials").unwrap();
        assert_eq!(credentials.username, "alice");
        assert_eq!(credentials.secret, "s3cr:et");
    }

    #[test]
    fn test_unknown_argument_rejected() {
        let err = parse_tokens(&install_command(), &tokens(&["tool.lib", "--force"])).unwrap_err();
        assert_eq!(err, ParseError::UnknownArgument("force".to_string()));
    }

    #[test]
    fn test_surplus_positional_rejected() {
        let err = parse_tokens(
            &install_command(),
            &tokens(&["tool.lib", "1.2.0", "extra"]),
        )
        .unwrap_err();
        assert_eq!(err, ParseError::UnexpectedArgument("extra".to_string()));
    }

    #[test]
    fn test_missing_required_positional_rejected() {
        let err = parse_tokens(&install_command(), &[]).unwrap_err();
        assert_eq!(err, ParseError::MissingArgument("id".to_string()));
    }

    #[test]
    fn test_bind_failure_propagates() {
        let err = parse_tokens(
            &install_command(),
            &tokens(&["tool.lib", "--overwrite=maybe"]),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value for 'overwrite': must be \"true\" or \"false\""
        );
    }

    #[test]
    fn test_missing_required_named_rejected() {
        let command = CommandDescriptor::builder("push", "Uploads a package.")
            .positional(PositionalArg::required(0, "file", "Package file"))
            .named(NamedArg::text("feed", "Feed location").require())
            .build()
            .unwrap();

        let err = parse_tokens(&command, &tokens(&["pkg.bale"])).unwrap_err();
        assert_eq!(err, ParseError::MissingArgument("feed".to_string()));
    }
}
