//! Integration tests for the drf-compose binary
//!
//! Runs the compiled CLI against compose files in a temporary directory with
//! scaffolding and formatting disabled.

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const FIXTURE_JSON: &str = include_str!("../../../fixtures/drf-compose.json");
const FIXTURE_YAML: &str = include_str!("../../../fixtures/drf-compose.yaml");

fn scenario_a() -> Value {
    json!({
        "name": "blog",
        "app_with_model": [{
            "app_name": "post",
            "models": [{"name": "Post", "fields": [{"name": "title", "type": "char"}]}]
        }]
    })
}

fn write_compose(dir: &Path, file_name: &str, content: &str) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, content).unwrap();
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_drf-compose"))
        .args(["--skip-scaffold", "--no-format", "-q"])
        .args(args)
        .output()
        .expect("failed to run drf-compose")
}

fn run_source(source: &Path, extra: &[&str]) -> Output {
    let source = source.to_str().unwrap();
    let mut args = vec!["--source", source];
    args.extend_from_slice(extra);
    run(&args)
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_scenario_a_generates_project() {
    let temp = TempDir::new().unwrap();
    let source = write_compose(temp.path(), "drf-compose.json", &scenario_a().to_string());

    let output = run_source(&source, &[]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let settings = fs::read_to_string(temp.path().join("blog/blog/settings.py")).unwrap();
    assert!(settings.contains(r#""apps.post","#));

    let models = fs::read_to_string(temp.path().join("blog/apps/post/models.py")).unwrap();
    assert!(models.contains("title = models.CharField("));
}

#[test]
fn test_scenario_b_missing_name_creates_nothing() {
    let temp = TempDir::new().unwrap();
    let mut compose = scenario_a();
    compose.as_object_mut().unwrap().remove("name");
    let source = write_compose(temp.path(), "drf-compose.json", &compose.to_string());

    let output = run_source(&source, &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("project name is required"));

    let entries: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
    assert_eq!(entries.len(), 1, "only the compose file should exist");
}

#[test]
fn test_scenario_c_second_run_fails() {
    let temp = TempDir::new().unwrap();
    let source = write_compose(temp.path(), "drf-compose.json", &scenario_a().to_string());

    assert_eq!(run_source(&source, &[]).status.code(), Some(0));

    let output = run_source(&source, &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("already exists"));
}

#[test]
fn test_invalid_json_fails() {
    let temp = TempDir::new().unwrap();
    let source = write_compose(temp.path(), "drf-compose.json", "{\"name\": ");

    let output = run_source(&source, &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!temp.path().join("blog").exists());
}

#[test]
fn test_app_with_model_must_be_a_list() {
    let temp = TempDir::new().unwrap();
    let compose = json!({"name": "blog", "app_with_model": "post"});
    let source = write_compose(temp.path(), "drf-compose.json", &compose.to_string());

    let output = run_source(&source, &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("app_with_model is expected to be a list"));
    assert!(!temp.path().join("blog").exists());
}

#[test]
fn test_missing_source_is_an_argument_error() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing.json");

    let output = run_source(&missing, &[]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_yaml_fixture() {
    let temp = TempDir::new().unwrap();
    let source = write_compose(temp.path(), "drf-compose.yaml", FIXTURE_YAML);

    let output = run_source(&source, &["--yaml"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(temp
        .path()
        .join("delight_blog/apps/authentication/manager.py")
        .is_file());
}

#[test]
fn test_yaml_without_flag_is_a_parse_error() {
    let temp = TempDir::new().unwrap();
    let source = write_compose(temp.path(), "drf-compose.yaml", FIXTURE_YAML);

    let output = run_source(&source, &[]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_output_dir_override() {
    let source_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    let source = write_compose(source_dir.path(), "drf-compose.json", FIXTURE_JSON);

    let output = run_source(&source, &["-o", output_dir.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    assert!(!source_dir.path().join("delight_blog").exists());
    assert!(output_dir
        .path()
        .join("delight_blog/delight_blog/urls.py")
        .is_file());
}

#[test]
fn test_missing_scaffolder_fails() {
    let temp = TempDir::new().unwrap();
    let source = write_compose(temp.path(), "drf-compose.json", &scenario_a().to_string());

    let output = Command::new(env!("CARGO_BIN_EXE_drf-compose"))
        .args(["--no-format", "-q", "--source", source.to_str().unwrap()])
        .args(["--django-admin", "drf-compose-test-tool-that-does-not-exist"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Required command not found"));
}

#[test]
fn test_app_name_outside_project_is_rejected() {
    let temp = TempDir::new().unwrap();
    let mut compose = scenario_a();
    compose["app_with_model"][0]["app_name"] = json!("../../escaped");
    let source = write_compose(temp.path(), "drf-compose.json", &compose.to_string());

    let output = run_source(&source, &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("app_name must be a single directory name"));

    let entries: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
    assert_eq!(entries.len(), 1, "only the compose file should exist");
}

#[test]
fn test_duplicate_app_names_are_rejected() {
    let temp = TempDir::new().unwrap();
    let mut compose = scenario_a();
    compose["auth_app"] = json!({"app_name": "post", "model_name": "CustomUser"});
    let source = write_compose(temp.path(), "drf-compose.json", &compose.to_string());

    let output = run_source(&source, &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("app_name 'post' is declared more than once"));
    assert!(!temp.path().join("blog").exists());
}

#[test]
fn test_default_verbosity_keeps_log_lines_off_stderr() {
    let temp = TempDir::new().unwrap();
    let source = write_compose(temp.path(), "drf-compose.json", FIXTURE_JSON);

    let output = Command::new(env!("CARGO_BIN_EXE_drf-compose"))
        .args(["--skip-scaffold", "--no-format", "--source", source.to_str().unwrap()])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let log = stderr(&output);
    assert!(!log.contains("INFO"), "stderr: {}", log);
    assert!(!log.contains("DEBUG"), "stderr: {}", log);
    assert!(String::from_utf8_lossy(&output.stdout).contains("Project delight_blog created"));
}

#[test]
fn test_verbose_run_logs_generation_steps() {
    let temp = TempDir::new().unwrap();
    let source = write_compose(temp.path(), "drf-compose.json", &scenario_a().to_string());

    let output = Command::new(env!("CARGO_BIN_EXE_drf-compose"))
        .args(["--skip-scaffold", "--no-format", "-v", "--source", source.to_str().unwrap()])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("Generating project blog"));
}
