//! Integration tests for the gridgen binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

const ANGULAR_JSON: &str = r#"{
  "version": 1,
  "newProjectRoot": "projects",
  "projects": {
    "material": {
      "root": "projects/material",
      "sourceRoot": "projects/material/src",
      "projectType": "application",
      "prefix": "app"
    }
  },
  "defaultProject": "material"
}"#;

const APP_MODULE: &str = "\
import { BrowserModule } from '@angular/platform-browser';
import { NgModule } from '@angular/core';

import { AppComponent } from './app.component';

@NgModule({
  declarations: [
    AppComponent
  ],
  imports: [
    BrowserModule
  ],
  providers: [],
  bootstrap: [AppComponent]
})
export class AppModule { }
";

const MODULE_PATH: &str = "projects/material/src/app/app.module.ts";
const COMPONENT_DIR: &str = "projects/material/src/app/users";

fn workspace() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("projects/material/src/app")).unwrap();
    fs::write(temp.path().join("angular.json"), ANGULAR_JSON).unwrap();
    fs::write(temp.path().join(MODULE_PATH), APP_MODULE).unwrap();
    temp
}

/// The binary, isolated from the user's configuration and log filter.
fn gridgen(cwd: &Path) -> Command {
    let mut cmd = cargo::cargo_bin_cmd!("gridgen");
    cmd.current_dir(cwd)
        .env("XDG_CONFIG_HOME", cwd.join(".xdg"))
        .env("HOME", cwd)
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

fn module(temp: &TempDir) -> String {
    fs::read_to_string(temp.path().join(MODULE_PATH)).unwrap()
}

#[test]
fn test_help_flag() {
    let temp = TempDir::new().unwrap();
    gridgen(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_version_flag() {
    let temp = TempDir::new().unwrap();
    gridgen(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_generate_help_lists_options() {
    let temp = TempDir::new().unwrap();
    gridgen(temp.path())
        .args(["generate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--inline-template"))
        .stdout(predicate::str::contains("--skip-import"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_generate_creates_files_and_registers_component() {
    let temp = workspace();

    gridgen(temp.path())
        .args(["generate", "users"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "CREATE projects/material/src/app/users/users.component.ts",
        ))
        .stdout(predicate::str::contains(format!("UPDATE {MODULE_PATH}")));

    let dir = temp.path().join(COMPONENT_DIR);
    for file in [
        "users.component.ts",
        "users.component.html",
        "users.component.css",
        "users.component.spec.ts",
    ] {
        assert!(dir.join(file).is_file(), "{file} missing");
    }

    let module = module(&temp);
    assert!(module.contains("import { UsersComponent } from './users/users.component';"));
    assert!(module.contains("import { PblNgridModule } from '@pebula/ngrid';"));
    assert!(module.contains("    UsersComponent\n  ],"));
}

#[test]
fn test_alias_and_root_flag() {
    let temp = workspace();
    let elsewhere = TempDir::new().unwrap();

    gridgen(elsewhere.path())
        .args(["g", "orders", "--root"])
        .arg(temp.path())
        .args(["--style", "scss", "--skip-tests"])
        .assert()
        .success();

    let dir = temp.path().join("projects/material/src/app/orders");
    assert!(dir.join("orders.component.scss").is_file());
    assert!(!dir.join("orders.component.spec.ts").exists());
}

#[test]
fn test_dry_run_writes_nothing() {
    let temp = workspace();

    gridgen(temp.path())
        .args(["generate", "users", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("NgModule.declarations"));

    assert!(!temp.path().join(COMPONENT_DIR).exists());
    assert_eq!(module(&temp), APP_MODULE);
}

#[test]
fn test_dry_run_json_is_the_plan() {
    let temp = workspace();

    let out = gridgen(temp.path())
        .args(["--output-format", "json", "generate", "users", "--dry-run"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["dry_run"], true);
    let mutations = report["plan"]["mutations"].as_array().unwrap();
    let creates = mutations.iter().filter(|m| m["type"] == "create").count();
    assert_eq!(creates, 4);
    assert!(mutations.iter().any(|m| m["type"] == "insert"));
}

#[test]
fn test_json_summary_after_apply() {
    let temp = workspace();

    let out = gridgen(temp.path())
        .args(["--output-format", "json", "generate", "users", "--inline-style"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["created"].as_array().unwrap().len(), 3);
    assert_eq!(report["modified"][0], MODULE_PATH);
}

#[test]
fn test_second_generate_needs_force() {
    let temp = workspace();
    gridgen(temp.path()).args(["generate", "users"]).assert().success();

    gridgen(temp.path())
        .args(["generate", "users"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("--force"));

    gridgen(temp.path())
        .args(["generate", "users", "--force", "--yes"])
        .assert()
        .success();

    assert_eq!(module(&temp).matches("UsersComponent").count(), 2);
}

#[test]
fn test_skip_import_leaves_module_untouched() {
    let temp = workspace();
    gridgen(temp.path())
        .args(["generate", "users", "--skip-import"])
        .assert()
        .success();
    assert_eq!(module(&temp), APP_MODULE);
}

#[test]
fn test_quiet_flag() {
    let temp = workspace();
    gridgen(temp.path())
        .args(["-q", "generate", "users"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_verbose_flag_logs_to_stderr() {
    let temp = workspace();
    gridgen(temp.path())
        .args(["-v", "generate", "users"])
        .assert()
        .success()
        .stderr(predicate::str::contains("INFO"));
}

#[test]
fn test_config_file_changes_library() {
    let temp = workspace();
    let config = temp.path().join("gridgen.toml");
    fs::write(
        &config,
        "[library]\nmodule_symbol = \"AcmeGridModule\"\nimport_specifier = \"@acme/grid\"\n",
    )
    .unwrap();

    gridgen(temp.path())
        .arg("--config")
        .arg(&config)
        .args(["generate", "users"])
        .assert()
        .success();

    let module = module(&temp);
    assert!(module.contains("import { AcmeGridModule } from '@acme/grid';"));
    assert!(!module.contains("PblNgridModule"));
}

#[test]
fn test_environment_overrides_default_style() {
    let temp = workspace();
    gridgen(temp.path())
        .env("GRIDGEN_DEFAULTS__STYLE", "less")
        .args(["generate", "users"])
        .assert()
        .success();
    assert!(
        temp.path()
            .join(COMPONENT_DIR)
            .join("users.component.less")
            .is_file()
    );
}

#[test]
fn test_init_local_then_config_get() {
    let temp = TempDir::new().unwrap();

    gridgen(temp.path())
        .args(["init", "--local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration created"));
    assert!(temp.path().join(".gridgen.toml").is_file());

    gridgen(temp.path())
        .args(["config", "get", "library.import_specifier"])
        .assert()
        .success()
        .stdout(predicate::str::diff("@pebula/ngrid\n"));
}

#[test]
fn test_config_list() {
    let temp = TempDir::new().unwrap();
    gridgen(temp.path())
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]"))
        .stdout(predicate::str::contains("module_symbol"));
}

#[test]
fn test_shell_completions() {
    let temp = TempDir::new().unwrap();
    gridgen(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gridgen"));
}
