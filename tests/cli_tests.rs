use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command as StdCommand;

use assert_cmd::Command;
use predicates::prelude::*;
use serial_test::serial;
use tempfile::TempDir;

fn caplog(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("caplog").unwrap();
    cmd.env_clear()
        .env("HOME", home)
        .env("PATH", std::env::var("PATH").unwrap())
        .env("GIT_AUTHOR_NAME", "caplog test")
        .env("GIT_AUTHOR_EMAIL", "caplog@example.com")
        .env("GIT_COMMITTER_NAME", "caplog test")
        .env("GIT_COMMITTER_EMAIL", "caplog@example.com");
    cmd
}

fn logbook_entries(home: &Path) -> Vec<PathBuf> {
    let logbook = home.join(".caplog/capbook/logbook");
    let mut entries: Vec<PathBuf> = fs::read_dir(logbook)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.is_file())
        .collect();
    entries.sort();
    entries
}

#[test]
fn get_dir_prints_the_default_repository() {
    let home = TempDir::new().unwrap();

    caplog(home.path())
        .arg("--get-dir")
        .assert()
        .success()
        .stdout(predicate::str::contains(".caplog/capbook"));
}

#[test]
fn help_lists_every_option() {
    let home = TempDir::new().unwrap();

    caplog(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("usage: caplog"))
        .stdout(predicate::str::contains("[-t --tag]"))
        .stdout(predicate::str::contains("Save log entry to sub-directory"));
}

#[test]
fn unknown_option_fails_with_usage_on_stderr() {
    let home = TempDir::new().unwrap();

    caplog(home.path())
        .arg("--bogus")
        .assert()
        .failure()
        .stderr(predicate::str::contains("usage: caplog"))
        .stderr(predicate::str::contains("unknown option: bogus"));
}

#[test]
fn too_many_positionals_fail() {
    let home = TempDir::new().unwrap();

    caplog(home.path())
        .args(["first", "second"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 1 argument, got 2"));
}

#[test]
#[serial]
fn message_argument_is_written_and_committed() {
    let home = TempDir::new().unwrap();

    caplog(home.path())
        .arg("fixed the flaky scheduler test")
        .assert()
        .success();

    let entries = logbook_entries(home.path());
    assert_eq!(entries.len(), 1);

    let body = fs::read_to_string(&entries[0]).unwrap();
    assert!(body.contains("fixed the flaky scheduler test"));
    assert!(body.ends_with('\n'));

    let repo = home.path().join(".caplog/capbook");
    let log = StdCommand::new("git")
        .current_dir(&repo)
        .args(["log", "--format=%s"])
        .output()
        .unwrap();
    let subjects = String::from_utf8(log.stdout).unwrap();
    assert!(subjects.contains("log:"), "no commit recorded: {subjects}");
}

#[test]
#[serial]
fn tags_are_appended_to_the_first_line() {
    let home = TempDir::new().unwrap();

    caplog(home.path())
        .args(["-t", "build", "--tag", "ci", "pinned the toolchain"])
        .assert()
        .success();

    let entries = logbook_entries(home.path());
    let body = fs::read_to_string(&entries[0]).unwrap();
    let first_line = body.lines().next().unwrap();
    assert!(first_line.ends_with("pinned the toolchain #build #ci"));
}

#[test]
#[serial]
fn page_option_writes_into_a_sub_directory() {
    let home = TempDir::new().unwrap();

    caplog(home.path())
        .args(["--page", "reading", "started the profiling chapter"])
        .assert()
        .success();

    let page_dir = home.path().join(".caplog/capbook/logbook/reading");
    assert_eq!(fs::read_dir(page_dir).unwrap().count(), 1);
}

#[test]
fn empty_editor_capture_is_rejected() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join(".caplog.toml"), "editor = \"true\"\n").unwrap();

    caplog(home.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no data provided"));
}

#[test]
fn config_option_persists_settings() {
    let home = TempDir::new().unwrap();

    caplog(home.path())
        .args(["-c", "editor", "nano"])
        .assert()
        .success();

    let written = fs::read_to_string(home.path().join(".caplog.toml")).unwrap();
    assert!(written.contains("editor = \"nano\""));

    caplog(home.path())
        .args(["-c", "git.local_repository", "~/journals"])
        .assert()
        .success();

    caplog(home.path())
        .arg("-g")
        .assert()
        .success()
        .stdout(predicate::str::contains("journals"));
}

#[test]
fn config_option_rejects_odd_pairs_and_unknown_keys() {
    let home = TempDir::new().unwrap();

    caplog(home.path())
        .args(["-c", "editor"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 2 arguments, got 1"));

    caplog(home.path())
        .args(["-c", "shell", "zsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid configuration key"));
}
