use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

const TABLE: &str = r#"{
    "name": "tool",
    "summary": "Example tool",
    "options": [
        { "short": "-v", "long": "--verbose", "description": "Print more", "attributes": ["optional"] },
        { "short": "-o", "long": "--out", "description": "Output file", "kind": "single" },
        { "short": "-i", "kind": "multi", "attributes": ["multi-value", "optional"] },
        { "long": "run", "kind": "multi", "attributes": ["sub-module"],
          "command": { "name": "run", "options": [ { "long": "--name", "kind": "single" } ] } }
    ]
}"#;

fn make_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before UNIX_EPOCH")
        .as_nanos();
    let pid = std::process::id();
    let dir = std::env::temp_dir().join(format!("optenv-integ-{prefix}-{pid}-{nanos}"));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

fn write_table(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("table.json");
    fs::write(&path, contents).expect("failed to write table");
    path
}

fn optenv() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_optenv"));
    cmd.env("RUST_LOG", "warn");
    cmd
}

#[test]
fn help_renders_option_lines() {
    let dir = make_temp_dir("help");
    let table = write_table(&dir, TABLE);

    let out = optenv()
        .arg("help")
        .arg(&table)
        .output()
        .expect("failed to run optenv help");
    assert!(
        out.status.success(),
        "optenv help failed:\nstatus: {}\nstderr:\n{}",
        out.status,
        String::from_utf8_lossy(&out.stderr),
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("tool - Example tool\n"), "unexpected help:\n{stdout}");
    assert!(stdout.contains("  -v|--verbose\tPrint more (Optional)\n"));
    assert!(stdout.contains("  -o|--out\tOutput file\n"));
    assert!(stdout.contains("  |run\t(SubModule)\n"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn parse_reports_json() {
    let dir = make_temp_dir("parse-json");
    let table = write_table(&dir, TABLE);

    let out = optenv()
        .arg("parse")
        .arg(&table)
        .arg("--json")
        .arg("--")
        .args(["-i", "a", "b", "--out", "x", "run", "--name", "demo"])
        .output()
        .expect("failed to run optenv parse");
    assert!(
        out.status.success(),
        "optenv parse failed:\nstatus: {}\nstderr:\n{}",
        out.status,
        String::from_utf8_lossy(&out.stderr),
    );

    let report: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("report is not JSON");
    assert_eq!(report["ok"], true);
    assert_eq!(report["invocations"][0]["option"], "-i");
    assert_eq!(report["invocations"][0]["values"], serde_json::json!(["a", "b"]));
    assert_eq!(report["invocations"][1]["option"], "--out");
    assert_eq!(
        report["invocations"][2]["subcommand"]["invocations"][0]["values"],
        serde_json::json!(["demo"])
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn parse_fails_on_missing_required_option() {
    let dir = make_temp_dir("parse-missing");
    let table = write_table(&dir, TABLE);

    let out = optenv()
        .arg("parse")
        .arg(&table)
        .arg("--")
        .args(["-v", "--bogus"])
        .output()
        .expect("failed to run optenv parse");
    assert!(!out.status.success(), "expected failure");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("error: Parameter --out is required"),
        "unexpected report:\n{stdout}"
    );
    assert!(!stdout.contains("--bogus"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn check_rejects_duplicate_names() {
    let dir = make_temp_dir("check-dup");
    let table = write_table(
        &dir,
        r#"{ "name": "dup", "options": [ { "short": "-a" }, { "short": "-a", "kind": "single" } ] }"#,
    );

    let out = optenv()
        .arg("check")
        .arg(&table)
        .output()
        .expect("failed to run optenv check");
    assert!(!out.status.success(), "expected check to fail");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("more than once"), "unexpected stderr:\n{stderr}");

    let ok_table = write_table(&dir, TABLE);
    let out = optenv()
        .arg("check")
        .arg(&ok_table)
        .output()
        .expect("failed to run optenv check");
    assert!(out.status.success());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_table_is_an_error() {
    let dir = make_temp_dir("missing");
    let out = optenv()
        .arg("help")
        .arg(dir.join("nope.json"))
        .output()
        .expect("failed to run optenv help");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("option table not found"), "unexpected stderr:\n{stderr}");

    let _ = fs::remove_dir_all(&dir);
}
