// ABOUTME: Tests for configuration file loading, validation, and layered merging
// ABOUTME: Covers TOML parsing, XDG path resolution, environment overrides, and resolved settings

use icoconv_core::Quota;
use icoconv_server::config::{Config, ConfigConversion, ConfigRateLimit};
use secrecy::ExposeSecret;
use serial_test::serial;
use std::path::Path;
use tempfile::TempDir;

const ENV_VARS: &[&str] = &[
    "XDG_CONFIG_HOME",
    "SECRET_KEY",
    "ICOCONV_SECRET_KEY",
    "ICOCONV_MAX_UPLOAD_BYTES",
    "PORT",
];

fn clear_env() {
    for var in ENV_VARS {
        std::env::remove_var(var);
    }
}

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Should create config dir");
    }
    std::fs::write(&path, content).expect("Should write config");
    path
}

#[test]
fn test_config_deserialize_complete() {
    let toml_content = r#"
        bind = "127.0.0.1"
        port = 3000
        workers = 8
        max_upload_bytes = 1048576
        public_url = "https://ico.example.com"
        trust_forwarded_for = true
        secret_key = "hunter2"

        [rate_limit]
        per_minute = 5
        per_hour = 30
        per_day = 100

        [conversion]
        clamp_oversized = false
        glow = false
    "#;

    let config: Config = toml::from_str(toml_content).expect("Should parse valid TOML");

    assert_eq!(config.bind.as_deref(), Some("127.0.0.1"));
    assert_eq!(config.port, Some(3000));
    assert_eq!(config.workers, Some(8));
    assert_eq!(config.max_upload_bytes, Some(1_048_576));
    assert_eq!(config.trust_forwarded_for, Some(true));
    assert_eq!(
        config.secret_key.as_ref().map(|s| s.expose_secret()),
        Some("hunter2")
    );
    assert_eq!(
        config.rate_limit,
        Some(ConfigRateLimit {
            per_minute: Some(5),
            per_hour: Some(30),
            per_day: Some(100),
        })
    );
    assert_eq!(
        config.conversion,
        Some(ConfigConversion {
            clamp_oversized: Some(false),
            glow: Some(false),
        })
    );

    let settings = config.into_settings().expect("Should resolve settings");
    assert_eq!(settings.address(), "127.0.0.1:3000");
    assert_eq!(
        settings.quotas,
        vec![
            Quota::per_minute(5),
            Quota::per_hour(30),
            Quota::per_day(100)
        ]
    );
    assert!(!settings.conversion.glow);
    assert!(!settings.conversion.clamp_oversized);
}

#[test]
fn test_config_deserialize_empty() {
    let config: Config = toml::from_str("").expect("Should parse empty config");

    assert!(config.bind.is_none());
    assert!(config.port.is_none());
    assert!(config.secret_key.is_none());
    assert!(config.rate_limit.is_none());
    assert!(config.conversion.is_none());
}

#[test]
fn test_config_validation_errors() {
    let result: Result<Config, _> = toml::from_str(r#"public_url = "not a url""#);
    assert!(result.is_err(), "Should reject unparseable public_url");

    let result: Result<Config, _> = toml::from_str(r#"port = 99999"#);
    assert!(result.is_err(), "Should reject out-of-range port");

    let result: Result<Config, _> = toml::from_str("port = 80\n[invalid");
    assert!(result.is_err(), "Should reject invalid TOML");
}

#[test]
fn test_load_from_paths_precedence() {
    let temp_dir = TempDir::new().expect("Should create temp dir");

    let base = write(
        &temp_dir,
        "base.toml",
        r#"
        port = 3000
        bind = "127.0.0.1"

        [rate_limit]
        per_minute = 5
    "#,
    );
    let overlay = write(
        &temp_dir,
        "overlay.toml",
        r#"
        port = 4000

        [rate_limit]
        per_day = 10
    "#,
    );
    let missing = temp_dir.path().join("missing.toml");

    let config = Config::load_from_paths(&[base.as_path(), missing.as_path(), overlay.as_path()])
        .expect("Should load config hierarchy");

    assert_eq!(config.port, Some(4000));
    assert_eq!(config.bind.as_deref(), Some("127.0.0.1"));
    let rate_limit = config.rate_limit.expect("Should merge rate limits");
    assert_eq!(rate_limit.per_minute, Some(5));
    assert_eq!(rate_limit.per_day, Some(10));
}

#[test]
fn test_load_from_file_reports_path() {
    let temp_dir = TempDir::new().expect("Should create temp dir");
    let broken = write(&temp_dir, "broken.toml", "workers = \"many\"");

    let err = Config::load_from_file(&broken).expect_err("Should fail to parse");
    assert!(format!("{:#}", err).contains("broken.toml"));
}

#[test]
fn test_load_from_file_rejects_zero_quota() {
    let temp_dir = TempDir::new().expect("Should create temp dir");
    let path = write(&temp_dir, "zero.toml", "[rate_limit]\nper_minute = 0\n");

    assert!(Config::load_from_file(&path).is_err());
}

#[test]
#[serial]
fn test_load_layers_xdg_explicit_and_env() {
    clear_env();
    let temp_dir = TempDir::new().expect("Should create temp dir");
    write(
        &temp_dir,
        "icoconv/config.toml",
        r#"
        port = 3000
        workers = 2
        max_upload_bytes = 2048
    "#,
    );
    let explicit = write(&temp_dir, "explicit.toml", "workers = 6\n");

    std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    std::env::set_var("PORT", "9090");

    let config = Config::load(Some(Path::new(&explicit))).expect("Should load layered config");
    clear_env();

    assert_eq!(config.port, Some(9090));
    assert_eq!(config.workers, Some(6));
    assert_eq!(config.max_upload_bytes, Some(2048));
}

#[test]
#[serial]
fn test_secret_key_from_environment() {
    clear_env();
    std::env::set_var("SECRET_KEY", "from-env");

    let config = Config::default().apply_env();
    clear_env();

    let settings = config.into_settings().expect("Should resolve settings");
    assert_eq!(
        settings.secret_key.as_ref().map(|s| s.expose_secret()),
        Some("from-env")
    );
}

#[test]
#[serial]
fn test_get_config_paths_order() {
    clear_env();
    let temp_dir = TempDir::new().expect("Should create temp dir");
    std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());

    let paths = Config::get_config_paths();
    clear_env();

    let xdg = temp_dir.path().join("icoconv").join("config.toml");
    let xdg_index = paths.iter().position(|p| p == &xdg).expect("XDG path listed");
    let local_index = paths
        .iter()
        .position(|p| p.ends_with("icoconv.toml"))
        .expect("Working directory path listed");
    assert!(xdg_index < local_index);
}
