//! End-to-end tests for the `strata` binary.
//!
//! Each test builds a throwaway project in a temp dir and runs the binary
//! with that directory as its working directory.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PROJECT_CONFIG: &str = r#"
[stacks]
name_pattern = "{tenant}-{stage}"
"#;

const PROD_STACK: &str = r#"
components:
  terraform:
    vpc:
      command: echo
      vars:
        tenant: acme
        stage: prod
        cidr: 10.0.0.0/16
    broken:
      command: "false"
      vars:
        tenant: acme
        stage: prod
  helmfile:
    nginx:
      command: echo
      vars:
        namespace: core
        tenant: acme
        stage: prod
"#;

/// A project with one stack file nested so that it is found by pattern.
fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "strata.toml", PROJECT_CONFIG);
    write(temp.path(), "stacks/acme/prod.yaml", PROD_STACK);
    fs::create_dir_all(temp.path().join("components/terraform/vpc")).unwrap();
    fs::create_dir_all(temp.path().join("components/terraform/broken")).unwrap();
    temp
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn strata(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("strata").unwrap();
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("STRATA_STACKS__NAME_PATTERN")
        .env_remove("STRATA_BASE_PATH");
    cmd
}

// ── help / version ────────────────────────────────────────────────────────────

#[test]
fn help_lists_tool_commands() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("terraform"))
        .stdout(predicate::str::contains("helmfile"))
        .stdout(predicate::str::contains("describe"));
}

#[test]
fn version_matches_package() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_arguments_is_usage_error() {
    let temp = TempDir::new().unwrap();
    strata(temp.path()).assert().code(2);
}

// ── describe ──────────────────────────────────────────────────────────────────

#[test]
fn describe_component_prints_yaml() {
    let temp = project();
    strata(temp.path())
        .args(["describe", "component", "vpc", "-s", "acme-prod"])
        .assert()
        .success()
        .stdout(predicate::str::contains("context_prefix: acme-prod"))
        .stdout(predicate::str::contains("stack: acme/prod"))
        .stdout(predicate::str::contains("cidr: 10.0.0.0/16"));
}

#[test]
fn describe_component_prints_json() {
    let temp = project();
    let output = strata(temp.path())
        .args([
            "describe", "component", "nginx", "-s", "acme-prod", "--type", "helmfile", "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["component"], "nginx");
    assert_eq!(value["vars"]["namespace"], "core");
}

#[test]
fn describe_by_file_name_uses_directory_mode() {
    let temp = project();
    strata(temp.path())
        .args(["describe", "component", "vpc", "-s", "acme/prod"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stack: acme/prod"));
}

// ── terraform / helmfile ──────────────────────────────────────────────────────

#[test]
fn terraform_dry_run_prints_plan_without_writing() {
    let temp = project();
    strata(temp.path())
        .args(["terraform", "plan", "vpc", "-s", "acme-prod", "--dry-run=true"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Variables for the component 'vpc' in the stack 'acme/prod':",
        ))
        .stdout(predicate::str::contains(
            "echo plan -var-file acme-prod-vpc.terraform.tfvars.json",
        ))
        .stdout(predicate::str::contains("Dry run"));

    assert!(
        !temp
            .path()
            .join("components/terraform/vpc/acme-prod-vpc.terraform.tfvars.json")
            .exists()
    );
}

#[cfg(unix)]
#[test]
fn terraform_plan_writes_varfile_and_runs_command() {
    let temp = project();
    strata(temp.path())
        .args(["terraform", "plan", "vpc", "-s", "acme-prod", "-refresh=false"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Executing command: echo plan"))
        .stdout(predicate::str::contains(
            "plan -var-file acme-prod-vpc.terraform.tfvars.json -refresh=false",
        ));

    let varfile = temp
        .path()
        .join("components/terraform/vpc/acme-prod-vpc.terraform.tfvars.json");
    let vars: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(varfile).unwrap()).unwrap();
    assert_eq!(vars["cidr"], "10.0.0.0/16");
}

#[test]
fn write_varfile_runs_nothing() {
    let temp = project();
    strata(temp.path())
        .args(["terraform", "write", "varfile", "vpc", "-s", "acme-prod"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Executing command").not());

    assert!(
        temp.path()
            .join("components/terraform/vpc/acme-prod-vpc.terraform.tfvars.json")
            .exists()
    );
}

#[cfg(unix)]
#[test]
fn failing_tool_exit_code_is_passed_through() {
    let temp = project();
    strata(temp.path())
        .args(["terraform", "plan", "broken", "-s", "acme-prod"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("exited with code 1"));
}

#[test]
fn helmfile_dry_run_exports_context() {
    let temp = project();
    strata(temp.path())
        .args([
            "helmfile",
            "diff",
            "nginx",
            "-s",
            "acme-prod",
            "--dry-run=true",
            "--global-options=--quiet",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("NAMESPACE=core"))
        .stdout(predicate::str::contains("echo --quiet diff"));
}

#[test]
fn quiet_hides_variables() {
    let temp = project();
    strata(temp.path())
        .args(["-q", "terraform", "plan", "vpc", "-s", "acme-prod", "--dry-run=true"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn no_color_accepts_conventional_values() {
    let temp = project();
    for value in ["1", "", "yes", "0"] {
        strata(temp.path())
            .env("NO_COLOR", value)
            .args(["terraform", "plan", "vpc", "-s", "acme-prod", "--dry-run=true"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Executing command: echo plan"));
    }
}

#[test]
fn no_color_output_has_no_escape_codes() {
    let temp = project();
    strata(temp.path())
        .args(["describe", "component", "vpc", "-s", "acme-prod"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{1b}[").not());
}

// ── error exit codes ──────────────────────────────────────────────────────────

#[test]
fn missing_stack_flag_is_user_error() {
    let temp = project();
    strata(temp.path())
        .args(["terraform", "plan", "vpc"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("'stack' is required"));
}

#[test]
fn unknown_stack_is_not_found() {
    let temp = project();
    strata(temp.path())
        .args(["terraform", "plan", "vpc", "-s", "acme-dev"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains(
            "Could not find config for the component 'vpc' in the stack 'acme-dev'",
        ));
}

#[test]
fn missing_component_dir_is_not_found() {
    let temp = project();
    fs::remove_dir_all(temp.path().join("components/terraform/vpc")).unwrap();
    strata(temp.path())
        .args(["terraform", "plan", "vpc", "-s", "acme-prod"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn missing_name_pattern_is_configuration_error() {
    let temp = project();
    write(temp.path(), "empty.toml", "");
    strata(temp.path())
        .args(["-c", "empty.toml", "terraform", "plan", "vpc", "-s", "acme-prod"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("stack name pattern must be provided"));
}

#[test]
fn name_pattern_from_environment() {
    let temp = project();
    write(temp.path(), "empty.toml", "");
    strata(temp.path())
        .env("STRATA_STACKS__NAME_PATTERN", "{tenant}-{stage}")
        .args(["-c", "empty.toml", "describe", "component", "vpc", "-s", "acme-prod"])
        .assert()
        .success();
}

#[test]
fn stacks_dir_flag_overrides_config() {
    let temp = project();
    fs::rename(temp.path().join("stacks"), temp.path().join("conf")).unwrap();
    strata(temp.path())
        .args([
            "terraform",
            "plan",
            "vpc",
            "-s",
            "acme-prod",
            "--stacks-dir",
            "conf",
            "--dry-run=true",
        ])
        .assert()
        .success();
}

#[test]
fn missing_stacks_dir_is_configuration_error() {
    let temp = project();
    fs::remove_dir_all(temp.path().join("stacks")).unwrap();
    strata(temp.path())
        .args(["terraform", "plan", "vpc", "-s", "acme-prod"])
        .assert()
        .code(4);
}

// ── completions / config ──────────────────────────────────────────────────────

#[test]
fn bash_completions_mention_binary() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("strata"));
}

#[test]
fn config_get_reads_project_file() {
    let temp = project();
    strata(temp.path())
        .args(["config", "get", "stacks.name_pattern"])
        .assert()
        .success()
        .stdout("{tenant}-{stage}\n");
}

#[test]
fn config_path_prefers_project_file() {
    let temp = project();
    strata(temp.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout("strata.toml\n");
}

#[test]
fn config_get_unknown_key_fails() {
    let temp = project();
    strata(temp.path())
        .args(["config", "get", "nope"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}
