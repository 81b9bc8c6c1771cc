// Environment overrides for configuration loading
//
// Kept in its own test binary: the variables set here are process-wide and
// would leak into the file-only cases in config_tests.rs.

use anyhow::Result;
use std::fs;
use tempfile::TempDir;
use visisec_backend::Config;

#[test]
fn test_env_overrides_file_and_enables_llm() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("visisec.toml");
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

    std::env::set_var("VISISEC__SERVICE__HTTP__PORT", "9090");
    std::env::set_var("VISISEC__LLM__API_KEY", "env-key");

    let cfg = Config::load(path.to_str().unwrap());

    std::env::remove_var("VISISEC__SERVICE__HTTP__PORT");
    std::env::remove_var("VISISEC__LLM__API_KEY");

    let cfg = cfg?;
    assert_eq!(cfg.service.http.port, 9090);
    assert_eq!(cfg.service.name, "VisiSec");

    // No [llm] table in the file; the key alone is enough
    let llm = cfg.llm.expect("llm enabled from environment");
    assert_eq!(llm.api_key, "env-key");
    assert_eq!(llm.api_base, "https://api.openai.com/v1");
    assert_eq!(llm.model, "gpt-4o-mini");
    assert_eq!(llm.timeout_secs, 30);

    Ok(())
}
