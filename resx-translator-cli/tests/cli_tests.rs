use assert_cmd::Command;
use resx_translator_cli::config::{ENDPOINT_ENV, KEY_ENV, REGION_ENV};
use std::fs;
use tempfile::TempDir;

const VALID_RESX: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<root>
  <resheader name="resmimetype">
    <value>text/microsoft-resx</value>
  </resheader>
  <resheader name="version">
    <value>2.0</value>
  </resheader>
  <data name="Greeting" xml:space="preserve">
    <value>Hello</value>
    <comment>Shown on the start page</comment>
  </data>
  <data name="Farewell" xml:space="preserve">
    <value>Goodbye</value>
  </data>
</root>
"#;

const OLD_RESX: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<root>
  <resheader name="version">
    <value>1.3</value>
  </resheader>
  <data name="Greeting"><value>Hello</value></data>
</root>
"#;

fn resxlate() -> Command {
    let mut cmd = Command::cargo_bin("resxlate").unwrap();
    cmd.env_remove(KEY_ENV)
        .env_remove(REGION_ENV)
        .env_remove(ENDPOINT_ENV)
        .env_remove("RUST_LOG");
    cmd
}

fn write_input(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn test_validate_accepts_version_2() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir, "Strings.resx", VALID_RESX);

    let output = resxlate().args(["validate", "-i", &input]).output().unwrap();

    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2 record(s)"));
    assert!(stdout.contains("2 translatable"));
}

#[test]
fn test_validate_rejects_old_version() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir, "Strings.resx", OLD_RESX);

    let output = resxlate().args(["validate", "-i", &input]).output().unwrap();

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("2.0"));
}

#[test]
fn test_validate_missing_file() {
    let output = resxlate()
        .args(["validate", "-i", "does-not-exist.resx"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("File does not exist"));
}

#[test]
fn test_view_lists_records() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir, "Strings.resx", VALID_RESX);

    let output = resxlate().args(["view", "-i", &input]).output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("version: 2.0"));
    assert!(stdout.contains("Record 1: Greeting"));
    assert!(stdout.contains("Comment: Shown on the start page"));
    assert!(stdout.contains("Record 2: Farewell"));
}

#[test]
fn test_view_truncates_long_values() {
    let temp_dir = TempDir::new().unwrap();
    let long_value = "x".repeat(80);
    let content = VALID_RESX.replace("Goodbye", &long_value);
    let input = write_input(&temp_dir, "Strings.resx", &content);

    let truncated = resxlate().args(["view", "-i", &input]).output().unwrap();
    let stdout = String::from_utf8_lossy(&truncated.stdout);
    assert!(stdout.contains(&format!("{}...", "x".repeat(50))));
    assert!(!stdout.contains(&long_value));

    let full = resxlate()
        .args(["view", "-i", &input, "--full"])
        .output()
        .unwrap();
    assert!(String::from_utf8_lossy(&full.stdout).contains(&long_value));
}

#[test]
fn test_translate_rejects_same_languages() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir, "Strings.resx", VALID_RESX);
    let out = temp_dir.path().join("Strings.en.resx");

    let output = resxlate()
        .args([
            "translate",
            "-i",
            &input,
            "-o",
            out.to_str().unwrap(),
            "--from",
            "en",
            "--to",
            "en",
            "--key",
            "k",
            "--region",
            "westeurope",
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("same"));
    assert!(!out.exists());
}

#[test]
fn test_translate_rejects_invalid_language() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir, "Strings.resx", VALID_RESX);
    let out = temp_dir.path().join("out.resx");

    let output = resxlate()
        .args([
            "translate",
            "-i",
            &input,
            "-o",
            out.to_str().unwrap(),
            "--from",
            "en",
            "--to",
            "not a language",
            "--key",
            "k",
            "--region",
            "westeurope",
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid language code"));
    assert!(!out.exists());
}

#[test]
fn test_translate_requires_credentials() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir, "Strings.resx", VALID_RESX);
    let out = temp_dir.path().join("out.resx");

    let output = resxlate()
        .current_dir(temp_dir.path())
        .args([
            "translate",
            "-i",
            &input,
            "-o",
            out.to_str().unwrap(),
            "--from",
            "en",
            "--to",
            "fr",
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("subscription key is empty"));
    assert!(!out.exists());
}

#[test]
fn test_translate_rejects_http_endpoint() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir, "Strings.resx", VALID_RESX);
    let out = temp_dir.path().join("out.resx");

    let output = resxlate()
        .env(ENDPOINT_ENV, "http://insecure.example.com")
        .args([
            "translate",
            "-i",
            &input,
            "-o",
            out.to_str().unwrap(),
            "--from",
            "en",
            "--to",
            "fr",
            "--key",
            "k",
            "--region",
            "westeurope",
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Endpoint validation failed"));
}

#[test]
fn test_translate_rejects_unknown_strategy() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir, "Strings.resx", VALID_RESX);
    let out = temp_dir.path().join("out.resx");

    let output = resxlate()
        .args([
            "translate",
            "-i",
            &input,
            "-o",
            out.to_str().unwrap(),
            "--from",
            "en",
            "--to",
            "fr",
            "--strategy",
            "xslt",
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unsupported output strategy"));
}

#[test]
fn test_translate_reads_credentials_from_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir, "Strings.resx", VALID_RESX);
    let out = temp_dir.path().join("out.resx");
    let config = write_input(
        &temp_dir,
        "custom.toml",
        "[service]\nkey = \"file-key\"\nregion = \"westeurope\"\nendpoint = \"ftp://nowhere\"\n",
    );

    let output = resxlate()
        .args([
            "translate",
            "-i",
            &input,
            "-o",
            out.to_str().unwrap(),
            "--from",
            "en",
            "--to",
            "fr",
            "--config",
            &config,
        ])
        .output()
        .unwrap();

    // Credentials came from the file, so the run gets as far as the endpoint check.
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("subscription key is empty"));
    assert!(stderr.contains("https"));
    assert!(!out.exists());
}

#[test]
fn test_translate_reads_credentials_from_environment() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir, "Strings.resx", VALID_RESX);
    let out = temp_dir.path().join("out.resx");
    let config = write_input(
        &temp_dir,
        "endpoint.toml",
        "[service]\nendpoint = \"ftp://nowhere\"\n",
    );

    let output = resxlate()
        .env(KEY_ENV, "env-key")
        .env(REGION_ENV, "westeurope")
        .args([
            "translate",
            "-i",
            &input,
            "-o",
            out.to_str().unwrap(),
            "--from",
            "en",
            "--to",
            "fr",
            "--config",
            &config,
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("subscription key is empty"));
    assert!(!stderr.contains("subscription region is empty"));
    assert!(stderr.contains("https"));
    assert!(!out.exists());
}

#[test]
fn test_missing_config_file_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir, "Strings.resx", VALID_RESX);

    let output = resxlate()
        .args([
            "translate",
            "-i",
            &input,
            "-o",
            temp_dir.path().join("out.resx").to_str().unwrap(),
            "--from",
            "en",
            "--to",
            "fr",
            "--config",
            "missing.toml",
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Config file does not exist"));
}

#[test]
fn test_translate_leaves_no_directory_behind() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir, "Strings.resx", VALID_RESX);
    let nested = temp_dir.path().join("fr");
    let out = nested.join("Strings.resx");

    let output = resxlate()
        .args([
            "translate",
            "-i",
            &input,
            "-o",
            out.to_str().unwrap(),
            "--from",
            "en",
            "--to",
            "fr",
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Output directory does not exist"));
    assert!(!nested.exists());
}

#[test]
fn test_translate_refuses_to_overwrite_input_via_relative_path() {
    let temp_dir = TempDir::new().unwrap();
    write_input(&temp_dir, "Strings.resx", VALID_RESX);

    let output = resxlate()
        .current_dir(temp_dir.path())
        .args([
            "translate",
            "-i",
            "Strings.resx",
            "-o",
            "./Strings.resx",
            "--from",
            "en",
            "--to",
            "fr",
            "--key",
            "k",
            "--region",
            "westeurope",
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("overwrite the input"));
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("Strings.resx")).unwrap(),
        VALID_RESX
    );
}

#[test]
fn test_completions() {
    let output = resxlate().args(["completions", "bash"]).output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("resxlate"));
}
