use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let wf = dir.path().join("workflows").join("deploy");
    fs::create_dir_all(wf.join("src")).unwrap();
    fs::write(
        wf.join("conf.yaml"),
        r#"name: deploy
expr: "0 */5 * * * *"
stts: true
steps:
  - name: build
    script: build.sh
    depends: []
  - name: test
    script: test.sh
    depends: [build, lint]
  - name: ship
    script: ship.sh
    depends: [test, ship]
"#,
    )
    .unwrap();
    fs::write(wf.join("src").join("build.sh"), "cargo build --release\n").unwrap();
    dir
}

fn orchestrium(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("orchestrium").unwrap();
    cmd.arg("--config")
        .arg(dir.path().join("missing-config.yml"))
        .arg("--root")
        .arg(dir.path().join("workflows"))
        .env("RUST_LOG", "error");
    cmd
}

#[test]
fn test_cron_valid() {
    let dir = workspace();
    orchestrium(&dir)
        .args(["cron", "0 */5 * * * *"])
        .assert()
        .success()
        .stdout(predicate::str::contains("expression: 0 */5 * * * *"))
        .stdout(predicate::str::contains("Run every 5 minutes"));
}

#[test]
fn test_cron_invalid_field() {
    let dir = workspace();
    orchestrium(&dir)
        .args(["cron", "0 60 * * * *"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Minutes       60         invalid"))
        .stdout(predicate::str::contains("Invalid values"));
}

#[test]
fn test_cron_preset_and_set() {
    let dir = workspace();
    orchestrium(&dir)
        .args(["cron", "--preset", "daily-9am", "--set", "dow=1-5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("expression: 0 0 9 * * 1-5"))
        .stdout(predicate::str::contains("Run at 09:00, Monday through Friday"));
}

#[test]
fn test_cron_unknown_field() {
    let dir = workspace();
    orchestrium(&dir)
        .args(["cron", "* * * * * *", "--set", "year=2030"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown field 'year'"));
}

#[test]
fn test_layout_text() {
    let dir = workspace();
    orchestrium(&dir)
        .args(["layout", "deploy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Level 0: build"))
        .stdout(predicate::str::contains("Level 2: ship"))
        .stdout(predicate::str::contains("build -> test"))
        .stdout(predicate::str::contains(
            "warning: dependency 'lint' not found (referenced by 'test')",
        ))
        .stdout(predicate::str::contains("warning: step 'ship' depends on itself"));
}

#[test]
fn test_layout_json() {
    let dir = workspace();
    let output = orchestrium(&dir)
        .args(["layout", "deploy", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["nodes"].as_array().unwrap().len(), 3);
    assert_eq!(json["edges"].as_array().unwrap().len(), 2);
    assert_eq!(json["nodes"][2]["position"]["x"], 700.0);
    assert_eq!(json["diagnostics"][0]["kind"], "dangling_reference");
    assert_eq!(json["diagnostics"][1]["kind"], "self_reference");
}

#[test]
fn test_layout_unknown_workflow() {
    let dir = workspace();
    orchestrium(&dir)
        .args(["layout", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("workflow 'nope' not found"));
}

#[test]
fn test_list() {
    let dir = workspace();
    orchestrium(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("deploy\tdeploy\trunning\t0 */5 * * * *\tvalid"));
}

#[test]
fn test_next_runs() {
    let dir = workspace();
    let output = orchestrium(&dir)
        .args(["next", "0 0 * * * *", "-n", "3"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|l| l.ends_with(":00:00")));
}

#[test]
fn test_next_count_bounds() {
    let dir = workspace();
    orchestrium(&dir)
        .args(["next", "0 0 0 31 2 *", "-n", "18446744073709551615"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid value"));

    orchestrium(&dir)
        .args(["next", "0 0 0 31 2 *", "-n", "1000"])
        .assert()
        .success()
        .stdout("No upcoming runs\n");
}

#[test]
fn test_presets() {
    let dir = workspace();
    orchestrium(&dir)
        .arg("presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("weekdays-9am"))
        .stdout(predicate::str::contains("0 0 9 * * 1-5"));
}

#[test]
fn test_files_and_show() {
    let dir = workspace();
    orchestrium(&dir)
        .args(["files", "deploy"])
        .assert()
        .success()
        .stdout("build.sh\n");

    orchestrium(&dir)
        .args(["show", "deploy", "build.sh"])
        .assert()
        .success()
        .stdout("cargo build --release\n");

    orchestrium(&dir)
        .args(["show", "deploy", "../conf.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("access denied"));
}
