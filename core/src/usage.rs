//! Usage and help text synthesis.
//!
//! Pure functions from a [`CommandDescriptor`] to display strings; no I/O
//! and no dependence on bound values, so the output is fully deterministic
//! for a given descriptor set.
//!
//! Rendering rules:
//!
//! - positionals render as `<name>`, wrapped in `[...]` when optional;
//! - named arguments render as `--name=<name>`, wrapped in `[...]` when
//!   optional;
//! - an optional boolean named argument whose default is `false` renders
//!   bare as `[--name]`, reflecting flag-style usage.

use crate::bind::Value;
use crate::descriptor::{CommandDescriptor, NamedArg, ValueKind};

/// Synthesises the one-line usage string for `command`.
///
/// # Examples
///
/// ```
/// use bale_core::{usage, CommandDescriptor, NamedArg, PositionalArg};
///
/// let command = CommandDescriptor::builder("install", "Installs a package.")
///     .positional(PositionalArg::required(0, "id", "Package id"))
///     .positional(PositionalArg::optional(1, "version", "Version to install"))
///     .named(NamedArg::text("feed", "Feed location"))
///     .named(NamedArg::flag("overwrite", "Replace existing files"))
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     usage("bale", &command),
///     "bale install <id> [<version>] [--feed=<feed>] [--overwrite]",
/// );
/// ```
pub fn usage(program: &str, command: &CommandDescriptor) -> String {
    let mut line = format!("{program} {}", command.name());

    for arg in command.positionals() {
        let rendered = format!("<{}>", arg.name);
        if arg.required {
            line.push_str(&format!(" {rendered}"));
        } else {
            line.push_str(&format!(" [{rendered}]"));
        }
    }

    for arg in command.named() {
        let rendered = if renders_as_bare_flag(arg) {
            format!("--{}", arg.name)
        } else {
            format!("--{}=<{}>", arg.name, arg.name)
        };
        if arg.required {
            line.push_str(&format!(" {rendered}"));
        } else {
            line.push_str(&format!(" [{rendered}]"));
        }
    }

    line
}

/// Synthesises the multi-paragraph help text for `command`.
///
/// Layout: usage line, blank line, command description, blank line, then
/// one `name - description` line per argument in usage order.
pub fn help(program: &str, command: &CommandDescriptor) -> String {
    let mut text = format!("{}\n\n{}\n", usage(program, command), command.description());

    if !command.positionals().is_empty() || !command.named().is_empty() {
        text.push('\n');
    }
    for arg in command.positionals() {
        text.push_str(&format!("{} - {}\n", arg.name, arg.description));
    }
    for arg in command.named() {
        text.push_str(&format!("{} - {}\n", arg.name, arg.description));
    }

    text
}

fn renders_as_bare_flag(arg: &NamedArg) -> bool {
    arg.kind == ValueKind::Bool
        && !arg.required
        && matches!(arg.default, Some(Value::Bool(false)))
}
