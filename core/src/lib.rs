//! Command descriptors, argument binding, and usage synthesis.
//!
//! This crate is the declarative command layer of the `bale` tool:
//!
//! - [`CommandDescriptor`] — the statically-declared shape of one command
//!   (ordered positional slots plus named arguments with alternates).
//! - [`bind`] — converts a single raw token into a typed [`Value`] per the
//!   argument's [`ValueKind`].
//! - [`parse_tokens`] — matches an invocation's tokens against a
//!   descriptor and produces a [`BoundCommand`].
//! - [`usage`] / [`help`] — deterministic usage and help text synthesised
//!   from the same descriptors that drive binding.
//!
//! Error kinds are deliberately separate: [`SchemaError`] marks a defect
//! in the command table (fatal, fail-fast at registry construction), while
//! [`BindError`] and [`ParseError`] report malformed user input and are
//! recoverable at the invocation boundary.
//!
//! # Example
//!
//! ```
//! use bale_core::*;
//!
//! let command = CommandDescriptor::builder("versions", "Lists package versions.")
//!     .positional(PositionalArg::required(0, "id", "Package id"))
//!     .named(NamedArg::flag("prerelease", "Consider prerelease versions"))
//!     .build()
//!     .unwrap();
//!
//! let tokens = vec!["tool.lib".to_string(), "--prerelease".to_string()];
//! let bound = parse_tokens(&command, &tokens).unwrap();
//! assert_eq!(bound.text("id"), Some("tool.lib"));
//! assert!(bound.flag("prerelease"));
//!
//! assert_eq!(usage("bale", &command), "bale versions <id> [--prerelease]");
//! ```

mod bind;
mod descriptor;
mod parse;
mod usage;

pub use bind::{BindError, CREDENTIAL_SEPARATOR, Credentials, Value, bind};
pub use descriptor::{
    CommandBuilder, CommandDescriptor, NamedArg, PositionalArg, SchemaError, ValueKind,
};
pub use parse::{BoundCommand, ParseError, parse_tokens};
pub use usage::{help, usage};
