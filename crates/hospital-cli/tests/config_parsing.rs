use std::{env, fs};

use hospital_cli::ApiBackend;
use hospital_cli::config::loader::load_config;

#[test]
fn config_parsing_and_env_overrides_and_validation() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("hospital.toml");

    let toml_content = r#"
[api]
base_url = "http://records.internal:5000"
timeout_ms = 5000
backend = "memory"

[logging]
level = "debug"

[auth]
admin_user_id = "ops"
admin_password = "s3cret"
"#;
    fs::write(&path, toml_content).expect("write toml");

    // 1) Valid config parses
    let cfg = load_config(path.to_str()).expect("should parse config");
    assert_eq!(cfg.api.base_url, "http://records.internal:5000");
    assert_eq!(cfg.api.timeout_ms, 5000);
    assert_eq!(cfg.api.backend, ApiBackend::Memory);
    assert_eq!(cfg.logging.level, "debug");
    assert_eq!(cfg.admin_credentials().user_id, "ops");
    assert_eq!(cfg.admin_credentials().password, "s3cret");

    // 2) Env override wins over file
    unsafe {
        env::set_var("HOSPITAL__API__TIMEOUT_MS", "750");
    }
    let cfg_env = load_config(path.to_str()).expect("should parse config with env overrides");
    assert_eq!(cfg_env.api.timeout_ms, 750);
    unsafe {
        env::remove_var("HOSPITAL__API__TIMEOUT_MS");
    }

    // 3) Missing sections fall back to defaults
    let sparse_path = dir.path().join("sparse.toml");
    fs::write(&sparse_path, "[logging]\nlevel = \"info\"\n").expect("write sparse toml");
    let sparse = load_config(sparse_path.to_str()).expect("sparse config");
    assert_eq!(sparse.api.base_url, "http://localhost:5000");
    assert_eq!(sparse.api.backend, ApiBackend::Http);
    assert_eq!(sparse.admin_credentials().user_id, "admin");

    // 4) Invalid values are rejected
    let invalid_path = dir.path().join("invalid.toml");
    fs::write(&invalid_path, "[api]\ntimeout_ms = 0\n").expect("write invalid toml");
    let err = load_config(invalid_path.to_str()).expect_err("expected validation error");
    assert!(err.to_string().contains("timeout_ms must be > 0"));

    let bad_backend = dir.path().join("backend.toml");
    fs::write(&bad_backend, "[api]\nbackend = \"postgres\"\n").expect("write toml");
    assert!(load_config(bad_backend.to_str()).is_err());
}
