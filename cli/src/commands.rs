//! Command registry and dispatch.
//!
//! Each command registers its descriptor once through the builder; the
//! same descriptors drive token binding, usage printing, and the `help`
//! command. Execution yields an integer status for the shell: `0` on
//! success, `2` for usage errors, `1` for execution errors.

use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use bale_archive::{ArchiveError, DirectoryPackage, extract_entries};
use bale_core::{
    BoundCommand, CommandDescriptor, NamedArg, PositionalArg, Value, help, parse_tokens, usage,
};
use bale_feed::{DirectoryFeed, FeedError, VersionListing, resolve_version, translate};

use crate::config::CliConfig;

/// Program name used in usage and help text.
pub const PROGRAM: &str = "bale";

#[derive(Debug, Error)]
enum CommandError {
    #[error(transparent)]
    Feed(#[from] FeedError),
    #[error(transparent)]
    Archive(#[from] ArchiveError),
    #[error("{0}")]
    Invocation(String),
}

struct RunContext<'a> {
    registry: &'a Registry,
    config: &'a CliConfig,
}

struct Command {
    descriptor: CommandDescriptor,
    run: fn(&BoundCommand, &RunContext<'_>) -> Result<(), CommandError>,
}

struct Registry {
    commands: Vec<Command>,
}

impl Registry {
    fn new() -> Self {
        Self {
            commands: vec![
                Command {
                    descriptor: install_descriptor(),
                    run: run_install,
                },
                Command {
                    descriptor: versions_descriptor(),
                    run: run_versions,
                },
                Command {
                    descriptor: extract_descriptor(),
                    run: run_extract,
                },
                Command {
                    descriptor: info_descriptor(),
                    run: run_info,
                },
                Command {
                    descriptor: help_descriptor(),
                    run: run_help,
                },
            ],
        }
    }

    fn find(&self, name: &str) -> Option<&Command> {
        self.commands
            .iter()
            .find(|command| command.descriptor.name() == name)
    }
}

/// Parses and executes one invocation, returning the exit status.
pub fn run(tokens: &[String]) -> i32 {
    let config = match CliConfig::load_default() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return 1;
        }
    };
    let registry = Registry::new();

    let Some((name, rest)) = tokens.split_first() else {
        print_overview(&registry);
        return 2;
    };
    let Some(command) = registry.find(name) else {
        eprintln!("error: unknown command '{name}'");
        print_overview(&registry);
        return 2;
    };

    let bound = match parse_tokens(&command.descriptor, rest) {
        Ok(bound) => bound,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("{}", usage(PROGRAM, &command.descriptor));
            return 2;
        }
    };

    let context = RunContext {
        registry: &registry,
        config: &config,
    };
    match (command.run)(&bound, &context) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {err}");
            1
        }
    }
}

fn print_overview(registry: &Registry) {
    println!("{PROGRAM} <command> [arguments]");
    println!();
    println!("Commands:");
    for command in &registry.commands {
        println!(
            "  {:<10} {}",
            command.descriptor.name(),
            command.descriptor.description()
        );
    }
    println!();
    println!("Run '{PROGRAM} help <command>' for command usage.");
}

// ---------------------------------------------------------------------------
// Command schemas
// ---------------------------------------------------------------------------

fn install_descriptor() -> CommandDescriptor {
    CommandDescriptor::builder("install", "Installs a package from the feed into a directory.")
        .positional(PositionalArg::required(0, "id", "Package id to install"))
        .positional(PositionalArg::optional(
            1,
            "version",
            "Version to install; defaults to the newest feed version",
        ))
        .named(NamedArg::text("feed", "Root directory of the package feed").with_alias("source"))
        .named(NamedArg::credentials(
            "credentials",
            "Feed credentials in the form username:password",
        ))
        .named(NamedArg::text("dir", "Directory the package contents are written to"))
        .named(NamedArg::flag(
            "prerelease",
            "Consider prerelease versions when resolving",
        ))
        .named(NamedArg::flag(
            "overwrite",
            "Replace files that already exist in the target directory",
        ))
        .named(NamedArg::flag(
            "timestamps",
            "Preserve the recorded entry timestamps",
        ))
        .build()
        .expect("install command schema")
}

fn versions_descriptor() -> CommandDescriptor {
    CommandDescriptor::builder("versions", "Resolves or lists a package's feed versions.")
        .positional(PositionalArg::required(0, "id", "Package id to look up"))
        .named(NamedArg::text("feed", "Root directory of the package feed").with_alias("source"))
        .named(NamedArg::credentials(
            "credentials",
            "Feed credentials in the form username:password",
        ))
        .named(NamedArg::flag(
            "prerelease",
            "Consider prerelease versions when resolving",
        ))
        .named(NamedArg::flag("all", "List every version instead of the newest"))
        .build()
        .expect("versions command schema")
}

fn extract_descriptor() -> CommandDescriptor {
    CommandDescriptor::builder("extract", "Extracts an unpacked package into a directory.")
        .positional(PositionalArg::required(
            0,
            "package",
            "Directory containing the unpacked package",
        ))
        .positional(
            PositionalArg::optional(1, "dir", "Directory the contents are written to")
                .with_default(Value::Text(".".to_string())),
        )
        .named(NamedArg::flag(
            "overwrite",
            "Replace files that already exist in the target directory",
        ))
        .named(NamedArg::flag(
            "timestamps",
            "Preserve the recorded entry timestamps",
        ))
        .build()
        .expect("extract command schema")
}

fn info_descriptor() -> CommandDescriptor {
    CommandDescriptor::builder("info", "Prints a package's manifest.")
        .positional(PositionalArg::required(
            0,
            "package",
            "Directory containing the unpacked package",
        ))
        .build()
        .expect("info command schema")
}

fn help_descriptor() -> CommandDescriptor {
    CommandDescriptor::builder("help", "Prints usage for a command.")
        .positional(PositionalArg::optional(0, "command", "Command to describe"))
        .build()
        .expect("help command schema")
}

// ---------------------------------------------------------------------------
// Command execution
// ---------------------------------------------------------------------------

fn run_install(bound: &BoundCommand, context: &RunContext<'_>) -> Result<(), CommandError> {
    let id = bound.text("id").unwrap_or_default();
    let requested = bound.text("version").unwrap_or_default();
    let prerelease = bound.flag("prerelease");
    let feed = DirectoryFeed::new(feed_root(bound, context.config)?);
    log_credentials(bound);

    let version = resolve_version(id, requested, prerelease, &feed)?;
    let package = DirectoryPackage::open(feed.package_dir(id, &version))?;
    let manifest = package.manifest()?;
    let entries = package.entries()?;

    let target = target_dir(bound, context.config);
    let overwrite = bound.flag("overwrite");
    let timestamps = bound.flag("timestamps") || context.config.timestamps;
    let report = extract_entries(&target, overwrite, &entries, timestamps)?;

    println!("{}", manifest.summary());
    println!(
        "Added {} file(s) and {} directory(ies) to '{}'.",
        report.files,
        report.directories,
        target.display()
    );
    Ok(())
}

fn run_versions(bound: &BoundCommand, context: &RunContext<'_>) -> Result<(), CommandError> {
    let id = bound.text("id").unwrap_or_default();
    let prerelease = bound.flag("prerelease");
    let feed = DirectoryFeed::new(feed_root(bound, context.config)?);
    log_credentials(bound);

    if bound.flag("all") {
        let mut versions = feed
            .list_versions(id)
            .map_err(|failure| translate(failure, None))?;
        if versions.is_empty() {
            return Err(FeedError::NoVersions(id.to_string()).into());
        }
        versions.sort();
        versions.reverse();
        for version in versions {
            println!("{version}");
        }
    } else {
        let version = resolve_version(id, "", prerelease, &feed)?;
        println!("{version}");
    }
    Ok(())
}

fn run_extract(bound: &BoundCommand, context: &RunContext<'_>) -> Result<(), CommandError> {
    let package = DirectoryPackage::open(bound.text("package").unwrap_or_default())?;
    let entries = package.entries()?;

    let target = PathBuf::from(bound.text("dir").unwrap_or("."));
    let overwrite = bound.flag("overwrite");
    let timestamps = bound.flag("timestamps") || context.config.timestamps;
    let report = extract_entries(&target, overwrite, &entries, timestamps)?;

    println!(
        "Added {} file(s) and {} directory(ies) to '{}'.",
        report.files,
        report.directories,
        target.display()
    );
    Ok(())
}

fn run_info(bound: &BoundCommand, _context: &RunContext<'_>) -> Result<(), CommandError> {
    let package = DirectoryPackage::open(bound.text("package").unwrap_or_default())?;
    println!("{}", package.manifest()?.summary());
    Ok(())
}

fn run_help(bound: &BoundCommand, context: &RunContext<'_>) -> Result<(), CommandError> {
    match bound.text("command") {
        Some(name) if !name.is_empty() => match context.registry.find(name) {
            Some(command) => {
                print!("{}", help(PROGRAM, &command.descriptor));
                Ok(())
            }
            None => Err(CommandError::Invocation(format!("unknown command '{name}'"))),
        },
        _ => {
            print_overview(context.registry);
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn feed_root(bound: &BoundCommand, config: &CliConfig) -> Result<PathBuf, CommandError> {
    bound
        .text("feed")
        .map(PathBuf::from)
        .or_else(|| config.feed.clone())
        .ok_or_else(|| {
            CommandError::Invocation(format!(
                "no feed configured; pass --feed or set 'feed' in {}",
                CliConfig::FILE_NAME
            ))
        })
}

fn target_dir(bound: &BoundCommand, config: &CliConfig) -> PathBuf {
    bound
        .text("dir")
        .map(PathBuf::from)
        .or_else(|| config.target.clone())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn log_credentials(bound: &BoundCommand) {
    // Remote listing implementations authenticate with these; the local
    // directory feed has no use for them.
    if let Some(credentials) = bound.credentials("credentials") {
        debug!(username = %credentials.username, "feed credentials supplied");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_builds_every_schema() {
        let registry = Registry::new();
        let names: Vec<&str> = registry
            .commands
            .iter()
            .map(|command| command.descriptor.name())
            .collect();
        assert_eq!(names, vec!["install", "versions", "extract", "info", "help"]);
    }

    #[test]
    fn test_install_usage_line() {
        assert_eq!(
            usage(PROGRAM, &install_descriptor()),
            "bale install <id> [<version>] [--feed=<feed>] [--credentials=<credentials>] \
             [--dir=<dir>] [--prerelease] [--overwrite] [--timestamps]",
        );
    }

    #[test]
    fn test_feed_root_prefers_argument_over_config() {
        let descriptor = versions_descriptor();
        let bound = parse_tokens(
            &descriptor,
            &["tool.lib".to_string(), "--feed=/from/arg".to_string()],
        )
        .unwrap();
        let config = CliConfig {
            feed: Some(PathBuf::from("/from/config")),
            ..CliConfig::default()
        };

        assert_eq!(feed_root(&bound, &config).unwrap(), PathBuf::from("/from/arg"));

        let bound = parse_tokens(&descriptor, &["tool.lib".to_string()]).unwrap();
        assert_eq!(
            feed_root(&bound, &config).unwrap(),
            PathBuf::from("/from/config")
        );
    }

    #[test]
    fn test_feed_root_missing_everywhere_is_invocation_error() {
        let descriptor = versions_descriptor();
        let bound = parse_tokens(&descriptor, &["tool.lib".to_string()]).unwrap();
        let err = feed_root(&bound, &CliConfig::default()).unwrap_err();
        assert!(err.to_string().contains("no feed configured"));
    }
}
