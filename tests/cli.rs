use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// The binary, run inside `dir` with no user configuration and no network.
fn dxeditor(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("dxeditor").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("config"))
        .env_remove("DXEDITOR_LOG")
        .arg("--offline");
    cmd
}

#[test]
fn test_highlight_plain_text() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("note.txt"), "comb\n").unwrap();

    dxeditor(&dir)
        .args(["--no-color", "note.txt"])
        .assert()
        .success()
        .stdout("co[m][b]\n");
}

#[test]
fn test_highlight_json() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("note.txt"), "a bad day").unwrap();

    dxeditor(&dir)
        .args(["--format", "json", "note.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"#2563EB\""))
        .stdout(predicate::str::contains("\"#DC2626\""))
        .stdout(predicate::str::contains("\"start\": 2"));
}

#[test]
fn test_missing_file_is_reported() {
    let dir = TempDir::new().unwrap();

    dxeditor(&dir)
        .arg("missing.txt")
        .assert()
        .success()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn test_no_files() {
    let dir = TempDir::new().unwrap();

    dxeditor(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No files specified"));
}

#[test]
fn test_suggest_word() {
    let dir = TempDir::new().unwrap();

    dxeditor(&dir)
        .args(["--no-color", "suggest", "nigth"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Did you mean: night?"));

    dxeditor(&dir)
        .args(["--no-color", "suggest", "qqqqqqq"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No suggestions found"));
}

#[test]
fn test_suggest_at_cursor_json() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("note.txt"), "the knigt rode").unwrap();

    dxeditor(&dir)
        .args(["--format", "json", "suggest", "--file", "note.txt", "--cursor", "6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"correction\""))
        .stdout(predicate::str::contains("\"proposed\": \"knight\""))
        .stdout(predicate::str::contains("\"original_start\": 4"));
}

#[test]
fn test_fix_rewrites_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("note.txt");
    fs::write(&path, "the knigt rode at nigth\n").unwrap();

    dxeditor(&dir)
        .args(["--no-color", "fix", "note.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("corrections applied to 1 file"));

    let fixed = fs::read_to_string(&path).unwrap();
    assert!(fixed.starts_with("the knight"));
    assert!(fixed.contains("night\n"));
}

#[test]
fn test_rules_from_local_config() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".dxeditor.toml"),
        r##"
rules = [
    { pattern = "(x)", color = "#111111" },
    { pattern = '\b(w)r', color = "#222222" },
]
"##,
    )
    .unwrap();

    dxeditor(&dir)
        .args(["--no-color", "rules"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. ■ #111111    (x)"))
        .stdout(predicate::str::contains(r"2. ■ #222222    \b(w)r"));
}

#[test]
fn test_invalid_rule_is_rejected() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".dxeditor.toml"),
        r##"rules = [{ pattern = "a.*b", color = "#111111" }]"##,
    )
    .unwrap();

    dxeditor(&dir).arg("rules").assert().failure();
}
