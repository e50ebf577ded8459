use std::fs;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::Value;

use crate::{locsync, project};

fn seed_catalog(dir: &std::path::Path) {
    fs::write(
        dir.join("translations.json"),
        r#"[
  {
    "source": "Hello",
    "language": "es",
    "translation": null,
    "isDraft": true
  },
  {
    "source": "Open",
    "domain": "ui",
    "language": "es",
    "translation": null
  }
]
"#,
    )
    .unwrap();
}

#[test]
fn test_apply_updates_catalog() {
    let dir = project();
    seed_catalog(dir.path());
    fs::write(
        dir.path().join("updates.json"),
        r#"[
  { "source": "Hello", "translation": "Hola", "isDraft": false },
  { "source": "Open", "domain": "ui", "translation": "Abrir", "isDraft": false }
]"#,
    )
    .unwrap();

    locsync(dir.path())
        .args(["apply", "updates.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Applied 2 updates"));

    let content = fs::read_to_string(dir.path().join("translations.json")).unwrap();
    let entries: Vec<Value> = serde_json::from_str(&content).unwrap();
    assert_eq!(entries[0]["translation"], "Hola");
    assert_eq!(entries[0].get("isDraft"), None);
    assert_eq!(entries[1]["translation"], "Abrir");
}

#[test]
fn test_apply_is_transactional() {
    let dir = project();
    seed_catalog(dir.path());
    let before = fs::read_to_string(dir.path().join("translations.json")).unwrap();
    fs::write(
        dir.path().join("updates.json"),
        r#"[
  { "source": "Hello", "translation": "Hola" },
  { "source": "Missing", "translation": "??" }
]"#,
    )
    .unwrap();

    locsync(dir.path())
        .args(["apply", "updates.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No catalog entry matches"));

    let after = fs::read_to_string(dir.path().join("translations.json")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_apply_missing_updates_file() {
    let dir = project();
    seed_catalog(dir.path());

    locsync(dir.path())
        .args(["apply", "nope.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("updates file"));
}
