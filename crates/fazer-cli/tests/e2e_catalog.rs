//! E2E CLI tests covering:
//! - `fz catalog` JSON and text contracts with filters and sort
//! - `fz show` detail contract and unknown-id errors
//! - `fz categories`, `fz config`, `fz completions`
//! - File catalogs via `--catalog` and project config, including export/reload
//!
//! Each test runs `fz` as a subprocess in an isolated temp directory.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

/// Build a Command targeting the `fz` binary, rooted in `dir`.
fn fz_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fz"));
    cmd.current_dir(dir);
    cmd.env("FAZER_LOG", "error");
    cmd.env("HOME", dir);
    cmd.env("XDG_CONFIG_HOME", dir.join(".config"));
    cmd.env_remove("FORMAT");
    cmd.env_remove("DEBUG");
    cmd
}

/// Run `fz <args> --json` and parse stdout.
fn fz_json(dir: &Path, args: &[&str]) -> Value {
    let output = fz_cmd(dir)
        .args(args)
        .arg("--json")
        .output()
        .expect("fz should not crash");
    assert!(
        output.status.success(),
        "fz {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("--json should produce valid JSON")
}

fn ids(list: &Value) -> Vec<String> {
    list.as_array()
        .expect("array")
        .iter()
        .map(|row| row["id"].as_str().expect("id").to_string())
        .collect()
}

const SMALL_CATALOG: &str = r#"{
  "products": [
    {"id": "a", "name": "Arc Cell", "price": 40, "category": "Power",
     "image": "img", "description": "Pocket fusion cell.", "long_description": "ld",
     "rating": 3.9, "review_count": 2},
    {"id": "b", "name": "Beam Visor", "price": 700, "category": "Optics",
     "image": "img", "description": "Heads-up visor.", "long_description": "ld",
     "rating": 4.6, "review_count": 11, "is_new": true}
  ]
}"#;

// ---------------------------------------------------------------------------
// catalog
// ---------------------------------------------------------------------------

#[test]
fn catalog_json_defaults_to_rating_order() {
    let dir = TempDir::new().unwrap();
    let list = fz_json(dir.path(), &["catalog"]);
    assert_eq!(ids(&list), ["1", "4", "2", "3", "5"]);
    let first = &list[0];
    assert_eq!(first["name"], "Neural Link X1");
    assert_eq!(first["price"], 2499);
    assert_eq!(first["category"], "Wearables");
    assert_eq!(first["is_bestseller"], true);
}

#[test]
fn catalog_sort_and_category_filters() {
    let dir = TempDir::new().unwrap();
    let list = fz_json(dir.path(), &["catalog", "--sort", "price-asc"]);
    assert_eq!(ids(&list), ["5", "3", "2", "4", "1"]);

    let list = fz_json(dir.path(), &["catalog", "--category", "audio"]);
    assert_eq!(ids(&list), ["3"]);
}

#[test]
fn catalog_search_is_case_insensitive() {
    let dir = TempDir::new().unwrap();
    let list = fz_json(dir.path(), &["catalog", "-s", "NEURAL"]);
    assert_eq!(ids(&list), ["1"]);

    let list = fz_json(dir.path(), &["catalog", "--search", "no-such-module"]);
    assert!(list.as_array().unwrap().is_empty());
}

#[test]
fn catalog_text_mode_has_header_row() {
    let dir = TempDir::new().unwrap();
    fz_cmd(dir.path())
        .args(["--format", "text", "catalog", "--category", "optics"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ID\tNAME\tPRICE\tCATEGORY\tRATING\n"))
        .stdout(predicate::str::contains("4\tAero Glass Pro\t1599\tOptics\t4.8"));
}

#[test]
fn catalog_rejects_unknown_category() {
    let dir = TempDir::new().unwrap();
    fz_cmd(dir.path())
        .args(["catalog", "--category", "snacks"])
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

#[test]
fn show_json_contract() {
    let dir = TempDir::new().unwrap();
    let item = fz_json(dir.path(), &["show", "4"]);
    assert_eq!(item["name"], "Aero Glass Pro");
    assert_eq!(item["specs"][0]["label"], "Resolution");
    assert_eq!(item["reviews"].as_array().unwrap().len(), 2);
    assert_eq!(item["review_average"], 4.5);
    assert_eq!(item["related"], serde_json::json!(["1", "2", "3", "5"]));
}

#[test]
fn show_unknown_id_reports_error_code() {
    let dir = TempDir::new().unwrap();
    fz_cmd(dir.path())
        .args(["show", "42", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E2001"));
}

// ---------------------------------------------------------------------------
// categories / config / completions
// ---------------------------------------------------------------------------

#[test]
fn categories_lists_filters_with_counts() {
    let dir = TempDir::new().unwrap();
    let report = fz_json(dir.path(), &["categories"]);
    let categories = report["categories"].as_array().unwrap();
    assert_eq!(categories[0]["name"], "All");
    assert_eq!(categories[0]["products"], 5);
    assert!(categories.iter().all(|c| c["name"] != "Protection"));
    assert_eq!(
        report["sort_options"],
        serde_json::json!(["rating", "price-asc", "price-desc"])
    );
}

#[test]
fn project_config_sets_shop_defaults() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join(".fazer")).unwrap();
    fs::write(
        dir.path().join(".fazer/config.toml"),
        "[shop]\ndefault_sort = \"price-desc\"\n",
    )
    .unwrap();

    let list = fz_json(dir.path(), &["catalog"]);
    // 2499, 1599, 899, 349, 129
    assert_eq!(ids(&list), ["1", "4", "2", "3", "5"]);

    let config = fz_json(dir.path(), &["config"]);
    assert_eq!(config["project"]["shop"]["default_sort"], "price-desc");
    assert_eq!(config["project"]["cart"]["min_quantity"], 1);
}

#[test]
fn malformed_project_config_fails() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join(".fazer")).unwrap();
    fs::write(dir.path().join(".fazer/config.toml"), "[shop\n").unwrap();
    fz_cmd(dir.path())
        .args(["catalog", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"error_code\": \"E1001\""))
        .stderr(predicate::str::contains("config.toml"));
}

#[test]
fn missing_explicit_config_reports_code_in_human_mode() {
    let dir = TempDir::new().unwrap();
    fz_cmd(dir.path())
        .args(["--format", "text", "--config", "nope.toml", "categories"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: "))
        .stderr(predicate::str::contains("nope.toml"))
        .stderr(predicate::str::contains("suggestion: Check the --config path"));
}

#[test]
fn completions_mention_binary_name() {
    let dir = TempDir::new().unwrap();
    fz_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fz"));
}

// ---------------------------------------------------------------------------
// file catalogs
// ---------------------------------------------------------------------------

#[test]
fn catalog_flag_loads_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("shop.json"), SMALL_CATALOG).unwrap();

    let list = fz_json(dir.path(), &["--catalog", "shop.json", "catalog"]);
    assert_eq!(ids(&list), ["b", "a"]);
    assert_eq!(list[0]["is_new"], true);
    assert_eq!(list[1]["is_bestseller"], false);
}

#[test]
fn catalog_path_from_project_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("shop.json"), SMALL_CATALOG).unwrap();
    fs::create_dir_all(dir.path().join(".fazer")).unwrap();
    fs::write(
        dir.path().join(".fazer/config.toml"),
        "[catalog]\npath = \"shop.json\"\n",
    )
    .unwrap();

    let item = fz_json(dir.path(), &["show", "a"]);
    assert_eq!(item["name"], "Arc Cell");
    assert_eq!(item["related"], serde_json::json!(["b"]));
}

#[test]
fn invalid_catalog_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let duplicated = SMALL_CATALOG.replace("\"id\": \"b\"", "\"id\": \"a\"");
    fs::write(dir.path().join("dup.json"), duplicated).unwrap();

    fz_cmd(dir.path())
        .args(["--catalog", "dup.json", "catalog", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E1004"));

    fz_cmd(dir.path())
        .args(["--catalog", "missing.toml", "catalog", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E1002"));
}

#[test]
fn exported_catalog_reloads() {
    let dir = TempDir::new().unwrap();
    let output = fz_cmd(dir.path())
        .args(["catalog", "--export", "toml"])
        .output()
        .unwrap();
    assert!(output.status.success());
    fs::write(dir.path().join("exported.toml"), &output.stdout).unwrap();

    let list = fz_json(dir.path(), &["--catalog", "exported.toml", "catalog"]);
    assert_eq!(ids(&list), ["1", "4", "2", "3", "5"]);

    let item = fz_json(dir.path(), &["--catalog", "exported.toml", "show", "1"]);
    assert_eq!(item["reviews"][0]["date"], "2024-03-15");
}
