// Tests for configuration loading

use anyhow::Result;
use std::fs;
use tempfile::TempDir;
use visisec_backend::Config;

#[test]
fn test_load_full_config() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("visisec.toml");
    fs::write(
        &path,
        r#"
[service]
name = "VisiSec Test"

[service.http]
bind = "127.0.0.1"
port = 8080

[session]
max_samples = 50
max_keyframes = 5
default_title = "Weekly"

[upload]
max_bytes = 1024

[llm]
api_base = "http://localhost:11434/v1"
api_key = "test-key"
model = "llama3"
"#,
    )?;

    let cfg = Config::load(path.to_str().unwrap())?;
    assert_eq!(cfg.service.name, "VisiSec Test");
    assert_eq!(cfg.service.http.port, 8080);
    assert_eq!(cfg.session.max_samples, 50);
    assert_eq!(cfg.session.max_keyframes, 5);
    assert_eq!(cfg.session.default_title, "Weekly");
    assert_eq!(cfg.upload.max_bytes, 1024);

    let llm = cfg.llm.expect("llm section present");
    assert_eq!(llm.model, "llama3");
    assert_eq!(llm.timeout_secs, 30);

    Ok(())
}

#[test]
fn test_optional_sections_default() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("minimal.toml");
    fs::write(
        &path,
        r#"
[service]
name = "VisiSec"

[service.http]
bind = "0.0.0.0"
port = 5124
"#,
    )?;

    let cfg = Config::load(path.to_str().unwrap())?;
    assert_eq!(cfg.session.max_samples, 1000);
    assert_eq!(cfg.session.max_keyframes, 100);
    assert_eq!(cfg.session.default_title, "Untitled Meeting");
    assert!(cfg.llm.is_none());

    Ok(())
}

#[test]
fn test_missing_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.toml");
    assert!(Config::load(path.to_str().unwrap()).is_err());
}
