mod support;

use std::io::Write;

use flight_search::config::{AppConfig, CONFIG_ENV};
use flight_search::ConfigError;

use support::with_scoped_env;

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file
}

#[test]
fn test_load_reads_explicit_file_and_env_overrides() {
    let file = config_file(
        r#"
mock_upstreams = false

[server]
host = "127.0.0.1"
port = 9000

[search]
cache_ttl_secs = 30

[[providers]]
kind = "garuda"
base_url = "http://garuda.internal"
"#,
    );
    let path = file.path().to_str().unwrap();

    let config = with_scoped_env(
        &[(CONFIG_ENV, Some(path)), ("HOST", None), ("PORT", Some("9191"))],
        AppConfig::load,
    )
    .unwrap();

    assert!(!config.mock_upstreams);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 9191);
    assert_eq!(config.search.cache_ttl_secs, 30);
    assert_eq!(config.search.aggregation_timeout_ms, 5000);
    assert_eq!(config.providers.len(), 1);
    assert_eq!(config.providers[0].timeout_ms, 2000);
}

#[test]
fn test_load_rejects_bad_port() {
    let file = config_file("");
    let path = file.path().to_str().unwrap();

    let err = with_scoped_env(
        &[(CONFIG_ENV, Some(path)), ("HOST", None), ("PORT", Some("http"))],
        AppConfig::load,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_load_rejects_empty_base_url() {
    let file = config_file(
        r#"
[[providers]]
kind = "lion"
base_url = "  "
"#,
    );
    let path = file.path().to_str().unwrap();

    let err = with_scoped_env(&[(CONFIG_ENV, Some(path)), ("PORT", None)], AppConfig::load)
        .unwrap_err();
    assert!(err.to_string().contains("lion"));
}

#[test]
fn test_load_missing_explicit_file() {
    let err = with_scoped_env(
        &[(CONFIG_ENV, Some("/nonexistent/flight-search.toml"))],
        AppConfig::load,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}
