use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn catalog_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("catalog");
    path
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let config_content = format!(
        r#"[db]
backend = "sqlite"
path = "{}/data/catalog.sqlite"

[server]
bind = "127.0.0.1:0"
log_filter = "warn"
"#,
        root.display()
    );

    let config_path = config_dir.join("catalog.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_catalog(config_path: &Path, args: &[&str]) -> Output {
    Command::new(catalog_binary())
        .arg("--config")
        .arg(config_path)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute catalog")
}

#[test]
fn test_init_creates_database() {
    let (tmp, config_path) = setup_test_env();

    let output = run_catalog(&config_path, &["init"]);
    assert!(
        output.status.success(),
        "init failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("Database initialized"));
    assert!(tmp.path().join("data/catalog.sqlite").exists());
}

#[test]
fn test_init_is_idempotent() {
    let (_tmp, config_path) = setup_test_env();

    for _ in 0..2 {
        let output = run_catalog(&config_path, &["init"]);
        assert!(
            output.status.success(),
            "init failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

#[test]
fn test_init_with_missing_config() {
    let tmp = TempDir::new().unwrap();
    let output = run_catalog(&tmp.path().join("nope.toml"), &["init"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read config file"));
}

#[test]
fn test_init_rejects_empty_bind() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("catalog.toml");
    fs::write(&config_path, "[server]\nbind = \"\"\n").unwrap();

    let output = run_catalog(&config_path, &["init"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("server.bind"));
}

#[test]
fn test_enums_without_config() {
    let tmp = TempDir::new().unwrap();
    let output = run_catalog(&tmp.path().join("absent.toml"), &["enums", "handguards"]);
    assert!(
        output.status.success(),
        "enums failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json["barrelNutTypes"]
        .as_array()
        .unwrap()
        .contains(&serde_json::json!("Standard Mil-Spec")));
}

#[test]
fn test_enums_unknown_category() {
    let (_tmp, config_path) = setup_test_env();
    let output = run_catalog(&config_path, &["enums", "stocks"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown category"));
}

#[test]
fn test_schema_lists_collections() {
    let (_tmp, config_path) = setup_test_env();
    let output = run_catalog(&config_path, &["schema"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in [
        "ar15_grip_groups",
        "ar15_grips",
        "ar15_handguard_groups",
        "ar15_handguards",
        "ar15_trigger_guard_groups",
        "ar15_trigger_guards",
    ] {
        assert!(stdout.contains(name), "schema output missing {}", name);
    }
    assert!(stdout.contains("unique:  upc"));
    assert!(stdout.contains("handguards v1: "));
}
