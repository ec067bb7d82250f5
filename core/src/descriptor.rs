//! Command and argument descriptor model.
//!
//! Commands declare their shape up front: an ordered set of positional
//! arguments and an unordered set of named arguments, each with a display
//! name, description, value kind, optionality, and default. The same
//! descriptors drive token binding ([`parse_tokens`](crate::parse_tokens))
//! and usage synthesis ([`usage`](crate::usage)), so the parser and the
//! help text cannot drift apart.
//!
//! Descriptor sets are built once per command through [`CommandBuilder`]
//! and are immutable afterwards. Building is pure and deterministic; a
//! malformed declaration (duplicate positional index, empty command name)
//! is a [`SchemaError`] — a defect in the command table, not user input.
//!
//! # Examples
//!
//! ```
//! use bale_core::{CommandDescriptor, NamedArg, PositionalArg};
//!
//! let install = CommandDescriptor::builder("install", "Installs a package from the feed.")
//!     .positional(PositionalArg::required(0, "id", "Package id to install"))
//!     .positional(PositionalArg::optional(1, "version", "Version to install"))
//!     .named(NamedArg::flag("prerelease", "Consider prerelease versions"))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(install.positionals()[0].name, "id");
//! assert!(install.find_named("prerelease").is_some());
//! ```

use thiserror::Error;

use crate::bind::Value;

/// Kind of value an argument accepts.
///
/// The set is closed: binding dispatches on it with an exhaustive match,
/// so adding a kind is a compile-time change, not a runtime fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Boolean flag; presence without a value implies `true`.
    Bool,
    /// Free-form text, bound verbatim.
    Text,
    /// A `username:password` credential pair.
    Credentials,
}

/// A positional argument slot.
///
/// The index defines the argument's place in the invocation and the sort
/// order within the command; it must be unique per command.
#[derive(Debug, Clone)]
pub struct PositionalArg {
    /// Zero-based position in the invocation.
    pub index: usize,
    /// Display name used in usage/help text and error messages.
    pub name: String,
    /// One-line description for help text.
    pub description: String,
    /// Kind of value this slot accepts.
    pub kind: ValueKind,
    /// Whether the invocation must supply this slot.
    pub required: bool,
    /// Value bound when an optional slot is absent.
    pub default: Option<Value>,
}

impl PositionalArg {
    /// Creates a required text positional.
    ///
    /// # Examples
    ///
    /// ```
    /// use bale_core::PositionalArg;
    ///
    /// let id = PositionalArg::required(0, "id", "Package id");
    /// assert!(id.required);
    /// assert_eq!(id.index, 0);
    /// ```
    pub fn required(index: usize, name: &str, description: &str) -> Self {
        Self {
            index,
            name: name.to_string(),
            description: description.to_string(),
            kind: ValueKind::Text,
            required: true,
            default: None,
        }
    }

    /// Creates an optional text positional.
    pub fn optional(index: usize, name: &str, description: &str) -> Self {
        Self {
            index,
            name: name.to_string(),
            description: description.to_string(),
            kind: ValueKind::Text,
            required: false,
            default: None,
        }
    }

    /// Overrides the value kind.
    pub fn with_kind(mut self, kind: ValueKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the value bound when the slot is absent.
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }
}

/// A named argument (`--name=value` in the invocation).
///
/// Alternate names all resolve to the same descriptor. Overlap between
/// descriptors is an unchecked configuration invariant: lookup scans in
/// declaration order and the first match wins.
#[derive(Debug, Clone)]
pub struct NamedArg {
    /// Primary name; also the display name in usage/help text.
    pub name: String,
    /// Alternate spellings accepted in the invocation.
    pub aliases: Vec<String>,
    /// One-line description for help text.
    pub description: String,
    /// Kind of value this argument accepts.
    pub kind: ValueKind,
    /// Whether the invocation must supply this argument.
    pub required: bool,
    /// Value bound when an optional argument is absent.
    pub default: Option<Value>,
}

impl NamedArg {
    /// Creates an optional boolean flag defaulting to `false`.
    ///
    /// Flags render bare in usage (`[--name]`) and bind `true` when
    /// present without a value.
    ///
    /// # Examples
    ///
    /// ```
    /// use bale_core::{NamedArg, Value};
    ///
    /// let overwrite = NamedArg::flag("overwrite", "Replace existing files");
    /// assert_eq!(overwrite.default, Some(Value::Bool(false)));
    /// ```
    pub fn flag(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            aliases: Vec::new(),
            description: description.to_string(),
            kind: ValueKind::Bool,
            required: false,
            default: Some(Value::Bool(false)),
        }
    }

    /// Creates an optional text argument.
    pub fn text(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            aliases: Vec::new(),
            description: description.to_string(),
            kind: ValueKind::Text,
            required: false,
            default: None,
        }
    }

    /// Creates an optional credential-pair argument.
    ///
    /// An absent or blank value binds to "no credentials" rather than an
    /// error.
    pub fn credentials(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            aliases: Vec::new(),
            description: description.to_string(),
            kind: ValueKind::Credentials,
            required: false,
            default: Some(Value::Credentials(None)),
        }
    }

    /// Marks the argument as required.
    pub fn require(mut self) -> Self {
        self.required = true;
        self
    }

    /// Adds an alternate name.
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    /// Sets the value bound when the argument is absent.
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Checks whether `name` is this argument's primary name or an alias.
    ///
    /// # Examples
    ///
    /// ```
    /// use bale_core::NamedArg;
    ///
    /// let feed = NamedArg::text("feed", "Feed location").with_alias("source");
    /// assert!(feed.matches("feed"));
    /// assert!(feed.matches("source"));
    /// assert!(!feed.matches("f"));
    /// ```
    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.aliases.iter().any(|alias| alias == name)
    }
}

/// Descriptor-set construction errors.
///
/// These indicate a mis-declared command table. They are fatal: the
/// registry must not be built from a schema that fails these checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Command display name is empty or whitespace-only.
    #[error("command name cannot be empty")]
    EmptyCommandName,
    /// Two positional descriptors declare the same index.
    #[error("duplicate positional index {index} on argument '{name}'")]
    DuplicatePositionalIndex { index: usize, name: String },
}

/// Immutable descriptor set for one command.
///
/// Positional descriptors are held strictly ordered by ascending index;
/// named descriptors keep declaration order and are looked up by primary
/// or alternate name.
#[derive(Debug, Clone)]
pub struct CommandDescriptor {
    name: String,
    description: String,
    positionals: Vec<PositionalArg>,
    named: Vec<NamedArg>,
}

impl CommandDescriptor {
    /// Returns a builder for a command with the given name and description.
    pub fn builder(name: &str, description: &str) -> CommandBuilder {
        CommandBuilder {
            name: name.to_string(),
            description: description.to_string(),
            positionals: Vec::new(),
            named: Vec::new(),
        }
    }

    /// The command's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The command's one-line description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Positional descriptors, ordered by ascending index.
    pub fn positionals(&self) -> &[PositionalArg] {
        &self.positionals
    }

    /// Named descriptors in declaration order.
    pub fn named(&self) -> &[NamedArg] {
        &self.named
    }

    /// Returns the positional descriptor at `position` in index order.
    pub fn positional_at(&self, position: usize) -> Option<&PositionalArg> {
        self.positionals.get(position)
    }

    /// Finds a named descriptor by primary name or alias.
    ///
    /// Scans in declaration order; the first match wins when alternate
    /// names overlap across descriptors.
    pub fn find_named(&self, name: &str) -> Option<&NamedArg> {
        self.named.iter().find(|arg| arg.matches(name))
    }
}

/// Builder for a [`CommandDescriptor`].
#[derive(Debug)]
pub struct CommandBuilder {
    name: String,
    description: String,
    positionals: Vec<PositionalArg>,
    named: Vec<NamedArg>,
}

impl CommandBuilder {
    /// Declares a positional argument.
    pub fn positional(mut self, arg: PositionalArg) -> Self {
        self.positionals.push(arg);
        self
    }

    /// Declares a named argument.
    pub fn named(mut self, arg: NamedArg) -> Self {
        self.named.push(arg);
        self
    }

    /// Finalises the descriptor set.
    ///
    /// Positionals are sorted by ascending index. Fails fast on a
    /// duplicate positional index or an empty command name.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicatePositionalIndex`] or
    /// [`SchemaError::EmptyCommandName`].
    pub fn build(mut self) -> Result<CommandDescriptor, SchemaError> {
        if self.name.trim().is_empty() {
            return Err(SchemaError::EmptyCommandName);
        }

        self.positionals.sort_by_key(|arg| arg.index);
        for pair in self.positionals.windows(2) {
            if pair[0].index == pair[1].index {
                return Err(SchemaError::DuplicatePositionalIndex {
                    index: pair[1].index,
                    name: pair[1].name.clone(),
                });
            }
        }

        Ok(CommandDescriptor {
            name: self.name,
            description: self.description,
            positionals: self.positionals,
            named: self.named,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positionals_sorted_by_ascending_index() {
        let command = CommandDescriptor::builder("push", "Uploads a package.")
            .positional(PositionalArg::optional(2, "tag", "Release tag"))
            .positional(PositionalArg::required(0, "id", "Package id"))
            .positional(PositionalArg::required(1, "file", "Package file"))
            .build()
            .unwrap();

        let indices: Vec<usize> = command.positionals().iter().map(|arg| arg.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(command.positional_at(0).unwrap().name, "id");
        assert_eq!(command.positional_at(2).unwrap().name, "tag");
    }

    #[test]
    fn test_duplicate_positional_index_rejected() {
        let result = CommandDescriptor::builder("push", "Uploads a package.")
            .positional(PositionalArg::required(0, "id", "Package id"))
            .positional(PositionalArg::required(0, "file", "Package file"))
            .build();

        assert_eq!(
            result.unwrap_err(),
            SchemaError::DuplicatePositionalIndex {
                index: 0,
                name: "file".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_command_name_rejected() {
        let result = CommandDescriptor::builder("  ", "No name.").build();
        assert_eq!(result.unwrap_err(), SchemaError::EmptyCommandName);
    }

    #[test]
    fn test_find_named_matches_alias() {
        let command = CommandDescriptor::builder("versions", "Lists versions.")
            .named(NamedArg::text("feed", "Feed location").with_alias("source"))
            .build()
            .unwrap();

        assert_eq!(command.find_named("source").unwrap().name, "feed");
        assert!(command.find_named("sources").is_none());
    }

    #[test]
    fn test_overlapping_alias_first_registered_wins() {
        let command = CommandDescriptor::builder("versions", "Lists versions.")
            .named(NamedArg::text("feed", "Feed location").with_alias("src"))
            .named(NamedArg::text("secondary", "Secondary feed").with_alias("src"))
            .build()
            .unwrap();

        assert_eq!(command.find_named("src").unwrap().name, "feed");
    }
}
