//! CLI 集成测试
//!
//! 测试命令行接口的各种功能和参数组合

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// 获取编译后的二进制文件路径
fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_api-diff"))
}

const OLD_SURFACE: &str = r#"{
  "name": "demo-1.0",
  "packages": [
    {
      "name": "com.demo",
      "types": [
        {
          "name": "Base",
          "methods": [ { "name": "start", "return_type": "void" } ]
        },
        {
          "name": "Service",
          "extends": "com.demo.Base",
          "constructors": [ { "signature": "" } ],
          "methods": [
            { "name": "call", "return_type": "int", "params": [ { "name": "id", "type_name": "int" } ] }
          ],
          "fields": [ { "name": "TIMEOUT", "type_name": "int", "value": "30" } ]
        }
      ]
    }
  ]
}"#;

const NEW_SURFACE: &str = r#"{
  "name": "demo-1.1",
  "packages": [
    {
      "name": "com.demo",
      "types": [
        {
          "name": "Base",
          "methods": [
            { "name": "start", "return_type": "void", "modifiers": { "visibility": "protected" } }
          ]
        },
        {
          "name": "Service",
          "extends": "com.demo.Base",
          "constructors": [ { "signature": "" } ],
          "methods": [
            { "name": "call", "return_type": "long", "params": [ { "name": "id", "type_name": "int" } ] },
            { "name": "stop", "return_type": "void" }
          ],
          "fields": [
            { "name": "TIMEOUT", "type_name": "int", "value": "60", "modifiers": { "is_deprecated": true } }
          ]
        }
      ]
    }
  ]
}"#;

/// 在临时目录中写入新旧两个接口面
fn write_surfaces() -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let old = temp_dir.path().join("old.json");
    let new = temp_dir.path().join("new.json");
    std::fs::write(&old, OLD_SURFACE).expect("Failed to write old surface");
    std::fs::write(&new, NEW_SURFACE).expect("Failed to write new surface");
    (temp_dir, old, new)
}

fn run(old: &Path, new: &Path, extra: &[&str]) -> Output {
    Command::new(get_binary_path())
        .env_remove("RUST_LOG")
        .arg("--old")
        .arg(old)
        .arg("--new")
        .arg(new)
        .args(extra)
        .output()
        .expect("Failed to execute command")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not valid JSON")
}

#[test]
fn test_help_output() {
    let output = Command::new(get_binary_path())
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("api-diff"));
    assert!(stdout.contains("--old"));
    assert!(stdout.contains("--exclude-member"));
    assert!(stdout.contains("--order"));
}

#[test]
fn test_version_output() {
    let output = Command::new(get_binary_path())
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("0.1.0"));
}

#[test]
fn test_missing_arguments() {
    let output = Command::new(get_binary_path())
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("required"));
}

#[test]
fn test_nonexistent_surface_file() {
    let (_dir, old, _new) = write_surfaces();
    let output = run(&old, Path::new("/nonexistent/new.json"), &[]);

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Surface file does not exist"));
}

#[test]
fn test_invalid_json_fails() {
    let (dir, old, _new) = write_surfaces();
    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "{ not json").unwrap();

    let output = run(&old, &broken, &[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Failed to parse"));
}

#[test]
fn test_diff_output_reports_changes() {
    let (_dir, old, new) = write_surfaces();
    let diff = stdout_json(&run(&old, &new, &[]));

    assert_eq!(diff["old_api_name"], "demo-1.0");
    assert_eq!(diff["new_api_name"], "demo-1.1");
    let package = &diff["packages_changed"][0];
    assert_eq!(package["name"], "com.demo");

    let service = package["types_changed"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["name"] == "Service")
        .expect("Service should be changed");
    assert_eq!(service["methods_added"][0]["name"], "stop");

    let changed: Vec<&str> = service["methods_changed"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(changed, vec!["call", "start"]);
    assert_eq!(
        service["fields_changed"][0]["modifiers_change"],
        "Change in value from 30 to 60. Now deprecated."
    );
}

#[test]
fn test_incompatible_flag_drops_deprecation_notes() {
    let (_dir, old, new) = write_surfaces();
    let diff = stdout_json(&run(&old, &new, &["--incompatible"]));
    let service = diff["packages_changed"][0]["types_changed"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["name"] == "Service")
        .unwrap()
        .clone();
    assert_eq!(
        service["fields_changed"][0]["modifiers_change"],
        "Change in value from 30 to 60."
    );
}

#[test]
fn test_stats_format() {
    let (_dir, old, new) = write_surfaces();
    let stats = stdout_json(&run(&old, &new, &["--format", "stats"]));
    assert_eq!(stats["packages_changed"], 1);
    assert_eq!(stats["types_changed"], 2);
    assert_eq!(stats["members_added"], 1);
    assert_eq!(stats["members_changed"], 4);
}

#[test]
fn test_output_file_option() {
    let (dir, old, new) = write_surfaces();
    let target = dir.path().join("reports").join("diff.json");
    let output = run(
        &old,
        &new,
        &["--order", "magnitude", "-o", target.to_str().unwrap()],
    );

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(written["packages_changed"][0]["name"], "com.demo");
}

#[test]
fn test_identical_surfaces() {
    let (_dir, old, _new) = write_surfaces();
    let diff = stdout_json(&run(&old, &old, &[]));
    assert_eq!(diff["packages_changed"].as_array().unwrap().len(), 0);
    assert_eq!(diff["magnitude"], 0.0);
}
