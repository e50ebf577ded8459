mod apply;
mod extract;
mod init;

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use tempfile::TempDir;

/// A temporary project directory the CLI runs in.
///
/// A `.git` marker stops config discovery from walking above the temp dir.
pub fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    dir
}

pub fn locsync(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("locsync").unwrap();
    cmd.current_dir(dir).env_remove("LOCSYNC_LANGUAGE");
    cmd
}
