//! Integration tests for all CLI commands
//!
//! Each test runs in its own temporary directory with `HOME` pointed at it,
//! so no user configuration leaks in.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const NOTEBOOK: &str = r##"{
  "metadata": {"kernelspec": {"name": "python3", "language": "python"}},
  "nbformat": 4,
  "cells": [
    {"cell_type": "markdown", "source": ["# Survival rates\n", "![chart](images/survival.png)"]},
    {"cell_type": "code", "execution_count": 1, "source": ["df.head()"],
     "outputs": [{"output_type": "execute_result", "execution_count": 1,
                  "data": {"text/plain": ["   age  fare"]}, "metadata": {}}]}
  ]
}"##;

/// Helper to create a CLI command isolated in `dir`
fn cli(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_folio"));
    cmd.current_dir(dir).env("HOME", dir).env_remove("RUST_LOG");
    cmd
}

fn workspace_with_notebook() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("notebooks")).unwrap();
    fs::write(dir.path().join("notebooks/survival.ipynb"), NOTEBOOK).unwrap();
    dir
}

// ============ RENDER COMMAND TESTS ============

#[test]
fn test_render_help() {
    let dir = TempDir::new().unwrap();
    cli(dir.path())
        .args(["render", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Render a published notebook by slug"));
}

#[test]
fn test_render_unknown_slug_exits_not_found() {
    let dir = TempDir::new().unwrap();
    cli(dir.path())
        .args(["render", "no-such-notebook"])
        .assert()
        .code(3)
        .stdout(predicate::str::contains("No notebook is published under"))
        .stderr(predicate::str::contains("No notebook named 'no-such-notebook'"));
}

#[test]
fn test_render_configured_slug() {
    let dir = workspace_with_notebook();
    let root = dir.path().display().to_string();
    fs::write(
        dir.path().join(".folio.toml"),
        format!(
            "[render]\nhighlight = false\n\n[fetch]\ndocument_root = \"{root}\"\n\n\
             [notebooks.survival]\ntitle = \"Survival Study\"\nurl = \"notebooks/survival.ipynb\"\n"
        ),
    )
    .unwrap();
    let output = dir.path().join("survival.html");

    cli(dir.path())
        .args(["render", "survival", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("Rendered 2 blocks"));

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.contains("<title>Survival Study</title>"));
    assert!(html.contains("src=\"/notebooks/images/survival.png\""));
    assert!(html.contains("In [1]:"));
    assert!(html.contains("Out [1]:"));
}

#[test]
fn test_render_load_failure_writes_error_page() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().display().to_string();
    fs::write(
        dir.path().join(".folio.toml"),
        format!("[fetch]\ndocument_root = \"{root}\"\n"),
    )
    .unwrap();

    cli(dir.path())
        .args(["render", "titanic-survival"])
        .assert()
        .code(5)
        .stdout(predicate::str::contains("role=\"alert\""))
        .stdout(predicate::str::contains("Titanic Survival Analysis"))
        .stderr(predicate::str::contains("Failed to load notebook"));
}

// ============ CONVERT COMMAND TESTS ============

#[test]
fn test_convert_local_file_to_stdout() {
    let dir = workspace_with_notebook();
    cli(dir.path())
        .args([
            "convert",
            "notebooks/survival.ipynb",
            "--no-highlight",
            "--asset-prefix",
            "/static/img/",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<!DOCTYPE html>"))
        .stdout(predicate::str::contains("<title>survival</title>"))
        .stdout(predicate::str::contains("src=\"/static/img/survival.png\""))
        .stdout(predicate::str::contains("df.head()"));
}

#[test]
fn test_convert_with_title() {
    let dir = workspace_with_notebook();
    cli(dir.path())
        .args(["convert", "notebooks/survival.ipynb", "--title", "Passengers"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<h1 class=\"nb-title\">Passengers</h1>"));
}

#[test]
fn test_convert_invalid_json_exits_load_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("broken.ipynb"), "{ not json").unwrap();
    cli(dir.path())
        .args(["convert", "broken.ipynb"])
        .assert()
        .code(5)
        .stdout(predicate::str::contains("could not be loaded"));
}

#[test]
fn test_convert_refuses_to_overwrite() {
    let dir = workspace_with_notebook();
    let output = dir.path().join("out.html");
    fs::write(&output, "existing").unwrap();

    cli(dir.path())
        .args(["convert", "notebooks/survival.ipynb", "-o"])
        .arg(&output)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(fs::read_to_string(&output).unwrap(), "existing");

    cli(dir.path())
        .args(["-q", "convert", "notebooks/survival.ipynb", "--force", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
    assert!(fs::read_to_string(&output).unwrap().contains("Survival rates"));
}

// ============ LIST COMMAND TESTS ============

#[test]
fn test_list_shows_builtin_and_configured_notebooks() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".folio.toml"),
        "[notebooks.churn]\ntitle = \"Customer Churn\"\nurl = \"notebooks/churn.ipynb\"\n",
    )
    .unwrap();

    cli(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("titanic-survival"))
        .stdout(predicate::str::contains("Customer Churn"))
        .stdout(predicate::str::contains(
            "https://folio-rs.github.io/notebooks/churn.ipynb",
        ));
}

// ============ CONFIG COMMAND TESTS ============

#[test]
fn test_config_init_creates_file_once() {
    let dir = TempDir::new().unwrap();
    cli(dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));
    let content = fs::read_to_string(dir.path().join(".folio.toml")).unwrap();
    assert!(content.contains("[render]"));

    cli(dir.path())
        .args(["config", "init"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--force"));

    cli(dir.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_config_show_project_overrides_user() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    fs::write(
        home.path().join(".folio.toml"),
        "[render]\ntheme = \"base16-ocean.dark\"\nasset_prefix = \"/user\"\n",
    )
    .unwrap();
    fs::write(
        project.path().join(".folio.toml"),
        "[render]\nasset_prefix = \"/project\"\n",
    )
    .unwrap();

    cli(project.path())
        .env("HOME", home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("asset_prefix = \"/project\""))
        .stdout(predicate::str::contains("theme = \"base16-ocean.dark\""))
        .stdout(predicate::str::contains("/user").not());
}

#[test]
fn test_config_path() {
    let dir = TempDir::new().unwrap();
    cli(dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".folio.toml"))
        .stdout(predicate::str::contains("not found"));
}

// ============ COMPLETIONS TESTS ============

#[test]
fn test_completions_bash() {
    let dir = TempDir::new().unwrap();
    cli(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("folio"));
}
