//! Integration tests for the dashctl binary
//!
//! Runs the built binary end to end and checks output and exit codes:
//! 0 granted, 1 denied, 2 error.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

const DASHCTL: &str = env!("CARGO_BIN_EXE_dashctl");

const CATALOG: &str = r#"
apiVersion: dashboard/v1
kind: RoleCatalog
roles:
  - name: Manager
    key: manager
    permissions: ["products:read", "orders:update"]
  - name: Employee
    key: employee
    permissions: ["orders:read", "products:read"]
"#;

fn dashctl(args: &[&str]) -> Output {
    Command::new(DASHCTL)
        .args(args)
        .output()
        .expect("Failed to run dashctl")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_can_granted_exits_zero() {
    let output = dashctl(&[
        "can",
        "--permissions",
        "products:read,orders:read",
        "--resource",
        "products",
        "--action",
        "read",
    ]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "granted");
}

#[test]
fn test_can_without_permissions_denied_exits_one() {
    let output = dashctl(&["can", "--resource", "products", "--action", "read"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output).trim(), "denied");
}

#[test]
fn test_can_json_output_shape() {
    let output = dashctl(&[
        "can",
        "--permissions",
        "products:read",
        "--resource",
        "products",
        "--action",
        "read",
        "--format",
        "json",
    ]);
    assert_eq!(output.status.code(), Some(0));

    let value: serde_json::Value = serde_json::from_str(stdout(&output).trim()).unwrap();
    assert_eq!(value["granted"], true);
    assert_eq!(value["resource"], "products");
    assert_eq!(value["action"], "read");
}

#[test]
fn test_at_least_tie_and_anonymous() {
    let output = dashctl(&["at-least", "--role", "spc", "--min", "manager"]);
    assert_eq!(output.status.code(), Some(0));

    let output = dashctl(&["at-least", "--min", "employee", "--format", "json"]);
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_str(stdout(&output).trim()).unwrap();
    assert_eq!(value["granted"], false);
    assert!(value["role"].is_null());
}

#[test]
fn test_has_role_deny() {
    let output = dashctl(&["has-role", "--role", "employee", "--allowed", "admin,manager"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output).trim(), "denied");
}

#[test]
fn test_unknown_role_is_usage_error() {
    let output = dashctl(&["at-least", "--role", "root", "--min", "employee"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("admin"), "possible values should be listed");
}

#[test]
fn test_help_lists_possible_values_and_exit_codes() {
    let output = dashctl(&["can", "--help"]);
    assert_eq!(output.status.code(), Some(0));
    let help = stdout(&output);
    assert!(help.contains("products"));
    assert!(help.contains("delete"));

    let output = dashctl(&["--help"]);
    assert!(stdout(&output).contains("Exit codes: 0 granted, 1 denied, 2 error"));
}

#[test]
fn test_catalog_expand_prints_flat_list() {
    let temp = TempDir::new().unwrap();
    let path = write_file(&temp, "roles.yaml", CATALOG);
    let path = path.to_str().unwrap();

    let output = dashctl(&["catalog", "expand", path, "--keys", "manager,employee"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let lines: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    assert_eq!(lines, vec!["products:read", "orders:update", "orders:read"]);

    let output = dashctl(&["catalog", "expand", path, "--keys", "employee", "--format", "json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["keys"], serde_json::json!(["employee"]));
    assert_eq!(value["permissions"], serde_json::json!(["orders:read", "products:read"]));
}

#[test]
fn test_catalog_validate_ok() {
    let temp = TempDir::new().unwrap();
    let path = write_file(&temp, "roles.yaml", CATALOG);

    let output = dashctl(&["catalog", "validate", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Roles: 2"));
}

#[test]
fn test_invalid_catalog_exits_two_not_denied() {
    let temp = TempDir::new().unwrap();
    let path = write_file(&temp, "bad.yaml", "apiVersion: dashboard/v1\n");

    let output = dashctl(&["catalog", "validate", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error:"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_missing_catalog_exits_two() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nofile.yaml");

    let output = dashctl(&["catalog", "expand", missing.to_str().unwrap(), "--keys", "manager"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("File not found"));
}

#[test]
fn test_session_file_grant_deny_and_error() {
    let temp = TempDir::new().unwrap();
    let session = write_file(
        &temp,
        "session.json",
        r#"{"user": {"role": "employee", "permissions": ["orders:read"]}}"#,
    );
    let session = session.to_str().unwrap();

    let output = dashctl(&["session", session, "--resource", "orders", "--action", "read"]);
    assert_eq!(output.status.code(), Some(0));

    let output = dashctl(&["session", session, "--resource", "orders", "--action", "delete"]);
    assert_eq!(output.status.code(), Some(1));

    let broken = write_file(&temp, "broken.json", "{not json");
    let output = dashctl(&[
        "session",
        broken.to_str().unwrap(),
        "--resource",
        "orders",
        "--action",
        "read",
    ]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid session JSON"));
}
