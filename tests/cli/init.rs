use std::fs;

use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::{locsync, project};

#[test]
fn test_init_creates_config() {
    let dir = project();

    locsync(dir.path()).arg("init").assert().success();

    let content = fs::read_to_string(dir.path().join(".locsyncrc.json")).unwrap();
    assert!(content.contains("\"catalog\""));
    assert!(content.contains("\"language\""));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let dir = project();
    fs::write(dir.path().join(".locsyncrc.json"), "{}").unwrap();

    locsync(dir.path())
        .arg("init")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_no_command_prints_help() {
    let dir = project();

    locsync(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}
