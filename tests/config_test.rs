//! Integration tests for configuration loading

use quakemap::infra::config::{Config, DEFAULT_FAULT_LINES_URL};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_config_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();

    let config_content = r#"
[map]
access_token = "pk.test-token"
container_id = "quake-map"
center = [61.2, -149.9]
zoom = 5

[feeds]
earthquakes = "file:///var/lib/quakemap/all_day.geojson"
timeout_ms = 2500

[server]
bind_address = "0.0.0.0"
port = 9090
"#;

    temp_file.write_all(config_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = Config::from_file(temp_file.path()).unwrap();

    assert_eq!(config.access_token(), "pk.test-token");
    assert_eq!(config.container_id(), "quake-map");
    assert_eq!(config.center(), [61.2, -149.9]);
    assert_eq!(config.zoom(), 5);
    assert_eq!(config.earthquakes_url(), "file:///var/lib/quakemap/all_day.geojson");
    assert_eq!(config.fault_lines_url(), DEFAULT_FAULT_LINES_URL);
    assert_eq!(config.feed_timeout_ms(), 2500);
    assert_eq!(config.bind_address(), "0.0.0.0");
    assert_eq!(config.server_port(), 9090);
    assert_eq!(config.config_file(), temp_file.path().display().to_string());
}

#[test]
fn test_load_from_path_fallback() {
    let config = Config::load_from_path("/nonexistent/config.toml");
    assert_eq!(config.container_id(), "map");
    assert_eq!(config.zoom(), 4);
    assert_eq!(config.config_file(), "default");
}

#[test]
fn test_malformed_file_is_an_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[map]\nzoom = \"four\"\n").unwrap();
    temp_file.flush().unwrap();

    let err = Config::from_file(temp_file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config file"));
}
