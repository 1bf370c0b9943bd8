//! Configuration loading and credential resolution tests
//!
//! Tests that touch process environment are marked #[serial] so they do
//! not race each other.

use moodcover_common::config::{
    load_toml_config, parse_toml_config, ConfigSource, resolve_credential, Credentials, CredentialsConfig,
};
use serial_test::serial;
use std::env;

const TEST_VAR: &str = "MOODCOVER_TEST_CREDENTIAL";

#[test]
#[serial]
fn test_env_overrides_toml() {
    env::set_var(TEST_VAR, "env-key");

    let resolved = resolve_credential(TEST_VAR, Some("toml-key"));
    assert_eq!(resolved.as_deref(), Some("env-key"));

    env::remove_var(TEST_VAR);
}

#[test]
#[serial]
fn test_toml_fallback_when_env_missing() {
    env::remove_var(TEST_VAR);

    let resolved = resolve_credential(TEST_VAR, Some("toml-key"));
    assert_eq!(resolved.as_deref(), Some("toml-key"));
}

#[test]
#[serial]
fn test_blank_env_falls_through_to_toml() {
    env::set_var(TEST_VAR, "   ");

    let resolved = resolve_credential(TEST_VAR, Some("toml-key"));
    assert_eq!(resolved.as_deref(), Some("toml-key"));

    env::remove_var(TEST_VAR);
}

#[test]
#[serial]
fn test_missing_everywhere_is_none() {
    env::remove_var(TEST_VAR);

    assert!(resolve_credential(TEST_VAR, None).is_none());
    assert!(resolve_credential(TEST_VAR, Some("")).is_none());
}

#[test]
#[serial]
fn test_credentials_resolve_reads_toml_section() {
    for var in [
        "SPOTIPY_CLIENT_ID",
        "SPOTIPY_CLIENT_SECRET",
        "HUGGINGFACE_API_KEY",
        "SONOTELLER_API_KEY",
    ] {
        env::remove_var(var);
    }

    let section = CredentialsConfig {
        spotify_client_id: Some("client".to_string()),
        spotify_client_secret: None,
        huggingface_api_key: Some("hf".to_string()),
        sonoteller_api_key: None,
    };
    let creds = Credentials::resolve(&section);

    assert_eq!(creds.spotify_client_id.as_deref(), Some("client"));
    assert!(creds.spotify_client_secret.is_none());
    assert_eq!(creds.huggingface_api_key.as_deref(), Some("hf"));

    let configured: Vec<_> = creds
        .summary()
        .into_iter()
        .filter(|(_, set)| *set)
        .map(|(name, _)| name)
        .collect();
    assert_eq!(configured, vec!["SPOTIPY_CLIENT_ID", "HUGGINGFACE_API_KEY"]);
}

#[test]
fn test_load_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[server]
port = 8080

[logging]
level = "debug"

[analysis]
profile = "extended"
tempo_correction = false
tempo_bands = [170.0, 140.0, 110.0, 80.0]

[endpoints]
deezer_api_url = "http://127.0.0.1:9000"
"#,
    )
    .unwrap();

    let loaded = load_toml_config(Some(&path)).unwrap();
    assert_eq!(loaded.source, ConfigSource::File(path.clone()));
    let config = loaded.config;
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.bind, "127.0.0.1");
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.analysis.profile.as_deref(), Some("extended"));
    assert_eq!(config.analysis.tempo_correction, Some(false));
    assert_eq!(
        config.analysis.tempo_bands,
        Some(vec![170.0, 140.0, 110.0, 80.0])
    );
    assert_eq!(
        config.endpoints.deezer_api_url.as_deref(),
        Some("http://127.0.0.1:9000")
    );
}

#[test]
fn test_explicit_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let err = load_toml_config(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("Config file not found"));
}

#[test]
fn test_malformed_toml_is_config_error() {
    let err = parse_toml_config("[server\nport = ").unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
fn test_loaded_file_source_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();

    let loaded = load_toml_config(Some(&path)).unwrap();
    assert_eq!(loaded.config.logging.level, "warn");
    match &loaded.source {
        ConfigSource::File(p) => assert_eq!(p, &path),
        other => panic!("unexpected source {:?}", other),
    }
}

#[test]
#[serial]
fn test_missing_default_file_reports_defaults() {
    let home = tempfile::tempdir().unwrap();
    let previous_home = env::var_os("HOME");
    let previous_xdg = env::var_os("XDG_CONFIG_HOME");
    env::set_var("HOME", home.path());
    env::set_var("XDG_CONFIG_HOME", home.path().join(".config"));

    let loaded = load_toml_config(None).unwrap();

    match previous_home {
        Some(v) => env::set_var("HOME", v),
        None => env::remove_var("HOME"),
    }
    match previous_xdg {
        Some(v) => env::set_var("XDG_CONFIG_HOME", v),
        None => env::remove_var("XDG_CONFIG_HOME"),
    }

    assert_eq!(loaded.config.server.port, 5730);
    assert!(matches!(
        loaded.source,
        ConfigSource::DefaultsMissingFile(_) | ConfigSource::DefaultsNoConfigDir
    ));
}
