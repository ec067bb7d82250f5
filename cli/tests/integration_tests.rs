use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const BIN: &str = env!("CARGO_BIN_EXE_bale");

/// Lays out a feed with one package and two versions and returns its root.
fn write_feed(dir: &Path) -> PathBuf {
    let feed = dir.join("feed");
    for (version, payload) in [("1.0.0", "old payload"), ("1.2.0", "new payload")] {
        let package = feed.join("tool.lib").join(version);
        fs::create_dir_all(package.join("content/a")).unwrap();
        fs::write(
            package.join("manifest.json"),
            format!(r#"{{"group":"tools","name":"tool.lib","version":"{version}"}}"#),
        )
        .unwrap();
        fs::write(package.join("content/a/b.txt"), payload).unwrap();
    }
    feed
}

fn run(args: &[&str], cwd: &Path) -> Output {
    Command::new(BIN)
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("failed to run bale binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_install_resolves_latest_and_extracts() {
    let dir = tempfile::tempdir().unwrap();
    let feed = write_feed(dir.path());
    let feed_arg = format!("--feed={}", feed.display());
    let dir_arg = format!("--dir={}", dir.path().join("vendor").display());

    let output = run(
        &["install", "tool.lib", &feed_arg, &dir_arg, "--timestamps"],
        dir.path(),
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let printed = stdout(&output);
    assert!(printed.contains("Package: tools:tool.lib"));
    assert!(printed.contains("Version: 1.2.0"));
    assert!(printed.contains("Added 1 file(s) and 1 directory(ies)"));
    assert_eq!(
        fs::read_to_string(dir.path().join("vendor/a/b.txt")).unwrap(),
        "new payload"
    );
}

#[test]
fn test_install_explicit_version() {
    let dir = tempfile::tempdir().unwrap();
    let feed = write_feed(dir.path());
    let feed_arg = format!("--feed={}", feed.display());
    let dir_arg = format!("--dir={}", dir.path().join("vendor").display());

    let output = run(
        &["install", "tool.lib", "1.0.0", &feed_arg, &dir_arg],
        dir.path(),
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Version: 1.0.0"));
    assert_eq!(
        fs::read_to_string(dir.path().join("vendor/a/b.txt")).unwrap(),
        "old payload"
    );
}

#[test]
fn test_install_rerun_without_overwrite_fails() {
    let dir = tempfile::tempdir().unwrap();
    let feed = write_feed(dir.path());
    let feed_arg = format!("--feed={}", feed.display());
    let dir_arg = format!("--dir={}", dir.path().join("vendor").display());
    let args: [&str; 4] = ["install", "tool.lib", &feed_arg, &dir_arg];

    assert!(run(&args, dir.path()).status.success());
    let second = run(&args, dir.path());

    assert_eq!(second.status.code(), Some(1));
    assert!(stderr(&second).contains("error:"));
}

#[test]
fn test_versions_lists_all_descending() {
    let dir = tempfile::tempdir().unwrap();
    let feed = write_feed(dir.path());
    let feed_arg = format!("--feed={}", feed.display());

    let output = run(&["versions", "tool.lib", &feed_arg, "--all"], dir.path());

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "1.2.0\n1.0.0\n");
}

#[test]
fn test_unknown_package_reports_feed_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let feed = write_feed(dir.path());
    let feed_arg = format!("--feed={}", feed.display());

    let output = run(&["versions", "absent.pkg", &feed_arg], dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("the package feed could not be found"));
}

#[test]
fn test_feed_defaults_come_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let feed = write_feed(dir.path());
    fs::write(
        dir.path().join("bale.yml"),
        format!("feed: {}\n", feed.display()),
    )
    .unwrap();

    let output = run(&["versions", "tool.lib"], dir.path());

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "1.2.0\n");
}

#[test]
fn test_info_prints_manifest_summary() {
    let dir = tempfile::tempdir().unwrap();
    let feed = write_feed(dir.path());
    let package = feed.join("tool.lib/1.2.0");

    let output = run(&["info", package.to_str().unwrap()], dir.path());

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "Package: tools:tool.lib\nVersion: 1.2.0\n");
}

#[test]
fn test_help_prints_command_usage() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(&["help", "install"], dir.path());

    assert!(output.status.success());
    let printed = stdout(&output);
    assert!(printed.starts_with("bale install <id> [<version>]"));
    assert!(printed.contains("id - Package id to install"));
}

#[test]
fn test_missing_required_argument_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(&["install"], dir.path());

    assert_eq!(output.status.code(), Some(2));
    let printed = stderr(&output);
    assert!(printed.contains("missing required argument 'id'"));
    assert!(printed.contains("bale install <id>"));
}

#[test]
fn test_unknown_command_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(&["publish"], dir.path());

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("unknown command 'publish'"));
}

#[test]
fn test_malformed_credentials_reported_with_argument_name() {
    let dir = tempfile::tempdir().unwrap();
    let feed = write_feed(dir.path());
    let feed_arg = format!("--feed={}", feed.display());

    let output = run(
        &["versions", "tool.lib", &feed_arg, "--credentials=alice"],
        dir.path(),
    );

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains(
        "invalid value for 'credentials': must be in the format \"username:password\""
    ));
}
