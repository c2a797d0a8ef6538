//! End-to-end tests for the `monument-designer` catalog commands.

use std::process::Command;

mod fixtures;
use fixtures::catalog_tree;

/// Path to the monument-designer binary
fn designer_bin() -> String {
    std::env::var("CARGO_BIN_EXE_monument-designer")
        .unwrap_or_else(|_| "target/debug/monument-designer".to_string())
}

fn run(args: &[&str]) -> std::process::Output {
    Command::new(designer_bin())
        .args(args)
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_inspect_json() {
    let temp_dir = catalog_tree();
    let root = temp_dir.path().join("public");
    let output = run(&["inspect", "5", "--xml-root", root.to_str().unwrap(), "--json"]);

    assert_eq!(
        output.status.code(),
        Some(0),
        "Inspect should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let result: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Should parse JSON output");
    assert_eq!(result["product_id"], "5");
    assert_eq!(result["name"], "Bronze Plaque");
    assert_eq!(result["product_type"], "plaques");
    assert_eq!(result["has_base"], false);
    assert_eq!(result["buckets"]["inscriptions"], 1);
    assert_eq!(result["materials"], 2);
}

#[test]
fn test_inspect_human_readable() {
    let temp_dir = catalog_tree();
    let root = temp_dir.path().join("public");
    let output = run(&["inspect", "5", "--xml-root", root.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Bronze Plaque"));
    assert!(stdout.contains("materials"));
}

#[test]
fn test_materials_json() {
    let temp_dir = catalog_tree();
    let root = temp_dir.path().join("public");
    let output = run(&["materials", "5", "--xml-root", root.to_str().unwrap(), "--json"]);

    assert_eq!(output.status.code(), Some(0));
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let materials = result.as_array().unwrap();
    assert_eq!(materials.len(), 2);
    assert_eq!(materials[1]["m2"], 1.0);
}

#[test]
fn test_sections_json() {
    let temp_dir = catalog_tree();
    let root = temp_dir.path().join("public");
    let output = run(&["sections", "5", "--xml-root", root.to_str().unwrap(), "--json"]);

    assert_eq!(output.status.code(), Some(0));
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = result
        .as_array()
        .unwrap()
        .iter()
        .map(|view| view["section"].as_str().unwrap())
        .collect();
    assert!(ids.contains(&"borders"));
    assert!(ids.contains(&"settings"));
}

#[test]
fn test_missing_catalog_document_fails_with_io_code() {
    let temp_dir = catalog_tree();
    let root = temp_dir.path().join("public");
    let output = run(&["inspect", "42", "--xml-root", root.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("catalog-id-42.xml"), "stderr: {stderr}");
}

#[test]
fn test_invalid_language_is_rejected() {
    let temp_dir = catalog_tree();
    let root = temp_dir.path().join("public");
    let output = run(&["inspect", "5", "--xml-root", root.to_str().unwrap(), "--lang", "english"]);

    assert_eq!(output.status.code(), Some(1));
}
