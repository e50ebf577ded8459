use std::fs;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::Value;

use crate::{locsync, project};

#[test]
fn test_extract_writes_catalog() {
    let dir = project();
    fs::write(
        dir.path().join("app.js"),
        "const hi = _(\"Hello\");\nconst open = _d(\"ui\", \"Open\");\n",
    )
    .unwrap();

    locsync(dir.path())
        .args(["extract", "--language", "es"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 catalog entries"));

    let content = fs::read_to_string(dir.path().join("translations.json")).unwrap();
    let entries: Vec<Value> = serde_json::from_str(&content).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["source"], "Hello");
    assert_eq!(entries[0]["language"], "es");
    assert_eq!(entries[0]["translation"], Value::Null);
    assert_eq!(entries[1]["domain"], "ui");
    assert!(
        entries[0]["ref"]
            .as_str()
            .unwrap()
            .contains("app.js")
    );
}

#[test]
fn test_extract_requires_language() {
    let dir = project();
    fs::write(dir.path().join("app.js"), "_(\"Hello\")\n").unwrap();

    locsync(dir.path())
        .arg("extract")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No target language configured"));
}

#[test]
fn test_extract_language_from_config() {
    let dir = project();
    fs::write(dir.path().join(".locsyncrc.json"), r#"{ "language": "fr" }"#).unwrap();
    fs::write(dir.path().join("app.js"), "_(\"Hello\")\n").unwrap();

    locsync(dir.path()).arg("extract").assert().success();

    let content = fs::read_to_string(dir.path().join("translations.json")).unwrap();
    assert!(content.contains("\"language\": \"fr\""));
}

#[test]
fn test_extract_is_idempotent() {
    let dir = project();
    fs::write(
        dir.path().join("app.js"),
        "_(\"Hello\")\n_(\"Hello\")\n_n(n, \"one\", \"%s items\")\n",
    )
    .unwrap();

    locsync(dir.path())
        .args(["extract", "--language", "es"])
        .assert()
        .success();
    let first = fs::read_to_string(dir.path().join("translations.json")).unwrap();

    locsync(dir.path())
        .args(["extract", "--language", "es"])
        .assert()
        .success();
    let second = fs::read_to_string(dir.path().join("translations.json")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_extract_reports_insufficient_parameters() {
    let dir = project();
    fs::write(dir.path().join("app.js"), "_d(\"ui\")\n").unwrap();

    locsync(dir.path())
        .args(["extract", "--language", "es"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("insufficient-parameters"))
        .stderr(predicate::str::contains("app.js [1,1]"));

    // The offending record is excluded, the catalog is still written.
    let content = fs::read_to_string(dir.path().join("translations.json")).unwrap();
    assert_eq!(content.trim(), "[]");
}

#[test]
fn test_extract_warns_on_non_literal() {
    let dir = project();
    fs::write(dir.path().join("app.js"), "_(userName)\n_(\"kept\")\n").unwrap();

    locsync(dir.path())
        .args(["extract", "--language", "es"])
        .assert()
        .success()
        .stderr(predicate::str::contains("non-literal-argument"));

    let content = fs::read_to_string(dir.path().join("translations.json")).unwrap();
    assert!(content.contains("kept"));
    assert!(!content.contains("userName"));
}

#[test]
fn test_extract_prunes_unless_keep_unused() {
    let dir = project();
    fs::write(
        dir.path().join("translations.json"),
        r#"[{ "source": "Stale", "translation": "Rancio", "language": "es" }]"#,
    )
    .unwrap();
    fs::write(dir.path().join("app.js"), "_(\"Fresh\")\n").unwrap();

    locsync(dir.path())
        .args(["extract", "--language", "es", "--keep-unused"])
        .assert()
        .success();
    let kept = fs::read_to_string(dir.path().join("translations.json")).unwrap();
    assert!(kept.contains("Stale"));

    locsync(dir.path())
        .args(["extract", "--language", "es"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 pruned"));
    let pruned = fs::read_to_string(dir.path().join("translations.json")).unwrap();
    assert!(!pruned.contains("Stale"));
}

#[test]
fn test_extract_show_prints_catalog() {
    let dir = project();
    fs::write(dir.path().join("app.js"), "_(\"Hello\")\n").unwrap();

    locsync(dir.path())
        .args(["extract", "--language", "es", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"source\": \"Hello\""));
}

#[test]
fn test_extract_strict_rejects_unterminated() {
    let dir = project();
    fs::write(dir.path().join("app.js"), "const s = \"open\n").unwrap();

    locsync(dir.path())
        .args(["extract", "--language", "es", "--strict"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("quoted literal"));
}

#[test]
fn test_extract_fails_on_malformed_catalog() {
    let dir = project();
    fs::write(dir.path().join("translations.json"), "{ not json").unwrap();
    fs::write(dir.path().join("app.js"), "_(\"Hello\")\n").unwrap();

    locsync(dir.path())
        .args(["extract", "--language", "es"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("catalog"));
}
