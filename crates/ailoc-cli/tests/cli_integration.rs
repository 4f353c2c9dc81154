use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

const SOURCE: &str = r#"{
  "auth": {
    "login": {
      "title": "Entrar",
      "button": "Login"
    }
  },
  "nav": {
    "home": "Home"
  }
}
"#;

fn bin_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ailoc-cli").expect("ailoc-cli built");
    cmd.current_dir(dir);
    cmd.env_remove("OPENAI_API_KEY");
    cmd
}

fn write_source(dir: &Path) -> PathBuf {
    let input = dir.join("en.json");
    std::fs::write(&input, SOURCE).unwrap();
    input
}

fn last_json_line(stdout: &[u8]) -> serde_json::Value {
    let out = String::from_utf8_lossy(stdout).to_string();
    let line = out
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .expect("have json line");
    serde_json::from_str(line).expect("json output")
}

#[test]
fn dry_run_reports_plan_without_credential_or_output() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_source(tmp.path());
    let out_dir = tmp.path().join("locales");

    let mut cmd = bin_cmd(tmp.path());
    cmd.args(["--quiet", "translate", "--dry-run", "--format", "json"])
        .args(["--input"])
        .arg(&input)
        .args(["--from", "en", "--to", "de,fr"])
        .args(["--out-dir"])
        .arg(&out_dir);

    let assert = cmd.assert().success();
    let plan = last_json_line(&assert.get_output().stdout);
    assert_eq!(plan["strings"], 3);
    assert_eq!(plan["sections"], 2);
    assert_eq!(plan["languages"][0]["lang"], "de");
    assert_eq!(plan["languages"][0]["pending"], 3);
    assert_eq!(plan["languages"][1]["lang"], "fr");

    assert!(!out_dir.exists(), "dry-run must not create output files");
}

#[test]
fn translate_without_credential_fails_before_doing_work() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_source(tmp.path());
    let out_dir = tmp.path().join("locales");

    let mut cmd = bin_cmd(tmp.path());
    cmd.args(["--quiet", "translate"])
        .args(["--input"])
        .arg(&input)
        .args(["--from", "en", "--to", "de"])
        .args(["--out-dir"])
        .arg(&out_dir);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("OPENAI_API_KEY"));
    assert!(!out_dir.exists());
}

#[test]
fn missing_input_file_is_a_clear_error() {
    let tmp = tempfile::tempdir().unwrap();

    let mut cmd = bin_cmd(tmp.path());
    cmd.args(["--quiet", "translate", "--dry-run"])
        .args(["--input", "nope.json", "--to", "de"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn missing_reports_keys_absent_from_every_locale() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_source(tmp.path());
    // de covers nav.home only; auth keys were never translated anywhere.
    std::fs::write(
        tmp.path().join("de.json"),
        r#"{ "nav": { "home": "Start" } }
"#,
    )
    .unwrap();

    let mut cmd = bin_cmd(tmp.path());
    cmd.args(["--quiet", "missing", "--format", "json"])
        .args(["--input"])
        .arg(&input)
        .args(["--locales"])
        .arg(tmp.path());

    let assert = cmd.assert().success();
    let report = last_json_line(&assert.get_output().stdout);
    assert_eq!(
        report["missing"],
        serde_json::json!(["auth.login.title", "auth.login.button"])
    );
    assert_eq!(report["compared"].as_array().unwrap().len(), 1);
}

#[test]
fn missing_strict_exits_nonzero_when_uncovered() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_source(tmp.path());
    std::fs::write(
        tmp.path().join("de.json"),
        r#"{ "nav": { "home": "Start" } }
"#,
    )
    .unwrap();

    let mut cmd = bin_cmd(tmp.path());
    cmd.args(["--quiet", "--no-color", "missing", "--strict"])
        .args(["--input"])
        .arg(&input)
        .args(["--locales"])
        .arg(tmp.path());

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("auth.login.title"));
}

#[test]
fn missing_is_clean_when_one_locale_covers_everything() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_source(tmp.path());
    std::fs::write(
        tmp.path().join("de.json"),
        r#"{
  "auth": { "login": { "title": "Anmelden", "button": "Einloggen" } },
  "nav": { "home": "Start" }
}
"#,
    )
    .unwrap();

    let mut cmd = bin_cmd(tmp.path());
    cmd.args(["--quiet", "missing", "--strict", "--format", "json"])
        .args(["--input"])
        .arg(&input)
        .args(["--locales"])
        .arg(tmp.path());

    let assert = cmd.assert().success();
    let report = last_json_line(&assert.get_output().stdout);
    assert_eq!(report["missing"].as_array().unwrap().len(), 0);
}

#[test]
fn schema_dumps_report_schemas() {
    let tmp = tempfile::tempdir().unwrap();
    let out_dir = tmp.path().join("schemas");

    let mut cmd = bin_cmd(tmp.path());
    cmd.args(["--quiet", "schema", "--out-dir"]).arg(&out_dir);

    cmd.assert().success();
    assert!(out_dir.join("translation_plan.schema.json").is_file());
    assert!(out_dir.join("translate_summary.schema.json").is_file());
    assert!(out_dir.join("missing_report.schema.json").is_file());
}
