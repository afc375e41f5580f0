//! CLI integration tests
//!
//! These tests verify the CLI commands work correctly by running the binary.

#![cfg(feature = "cli")]

use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

fn xsdgen_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_xsdgen"))
}

fn fixtures_dir() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path
}

#[test]
fn test_cli_generate_directory() {
    let out = TempDir::new().unwrap();
    let output = Command::new(xsdgen_bin())
        .args(["generate", fixtures_dir().join("flat").to_str().unwrap()])
        .args(["--package", "flat"])
        .args(["--output-dir", out.path().to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "generate should succeed");
    assert!(out.path().join("flat.json").exists());
}

#[test]
fn test_cli_generate_print() {
    let output = Command::new(xsdgen_bin())
        .args(["generate", fixtures_dir().join("flat/alpha.xsd").to_str().unwrap()])
        .args(["--package", "alpha", "--print"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "generate --print should succeed");
    assert!(stdout.contains("\"package\": \"alpha\""));
    assert!(stdout.contains("\"name\": \"Alpha\""));
}

#[test]
fn test_cli_wsdl_directory_is_rejected() {
    let output = Command::new(xsdgen_bin())
        .args(["generate", fixtures_dir().join("service").to_str().unwrap()])
        .args(["--package", "stock", "--wsdl", "--print"])
        .output()
        .expect("Failed to execute command");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("configuration error"));
}

#[test]
fn test_cli_unknown_output_format() {
    let output = Command::new(xsdgen_bin())
        .args(["generate", fixtures_dir().join("flat/alpha.xsd").to_str().unwrap()])
        .args(["--package", "alpha", "--output", "cobol", "--print"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}

#[test]
fn test_cli_config_file() {
    let out = TempDir::new().unwrap();
    let config = out.path().join("xsdgen.toml");
    std::fs::write(
        &config,
        format!(
            "package = \"configured\"\noutput_dir = {:?}\n",
            out.path().join("gen").to_str().unwrap()
        ),
    )
    .unwrap();

    let output = Command::new(xsdgen_bin())
        .args(["generate", fixtures_dir().join("flat/beta.xsd").to_str().unwrap()])
        .args(["--config", config.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "generate --config should succeed");
    assert!(out.path().join("gen").join("configured.json").exists());
}

#[test]
fn test_cli_download() {
    let out = TempDir::new().unwrap();
    let output = Command::new(xsdgen_bin())
        .args(["download", fixtures_dir().join("shop/orders/order.xsd").to_str().unwrap()])
        .args(["--package", "mirror"])
        .args(["--output-dir", out.path().to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "download should succeed");
    let root = out.path().join("mirror");
    assert!(root.join("order.xsd").exists());
    assert!(root.join("address.xsd").exists());
}
