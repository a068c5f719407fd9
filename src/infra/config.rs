//! Configuration loading from TOML files
//!
//! Config file is selected via:
//! 1. --config <path> command line argument
//! 2. CONFIG_FILE environment variable
//! 3. Default: config/dev.toml
//!
//! The Mapbox access token can be overridden with MAPBOX_ACCESS_TOKEN.

use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use tracing::warn;

pub const ACCESS_TOKEN_ENV: &str = "MAPBOX_ACCESS_TOKEN";
pub const CONFIG_FILE_ENV: &str = "CONFIG_FILE";
pub const DEFAULT_CONFIG_PATH: &str = "config/dev.toml";

pub const DEFAULT_EARTHQUAKES_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson";
pub const DEFAULT_FAULT_LINES_URL: &str =
    "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_plates.json";
pub const DEFAULT_TILE_URL: &str =
    "https://api.tiles.mapbox.com/v4/{id}/{z}/{x}/{y}.png?access_token={accessToken}";
pub const DEFAULT_LEAFLET_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist";

#[derive(Debug, Clone, Deserialize)]
pub struct MapConfig {
    #[serde(default)]
    pub access_token: String,
    #[serde(default = "default_container_id")]
    pub container_id: String,
    #[serde(default = "default_center")]
    pub center: [f64; 2],
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    #[serde(default = "default_title")]
    pub title: String,
    /// Tile URL template with `{id}`, `{z}`, `{x}`, `{y}` and `{accessToken}`
    #[serde(default = "default_tile_url")]
    pub tile_url: String,
    /// Base URL serving leaflet.js and leaflet.css
    #[serde(default = "default_leaflet_url")]
    pub leaflet_url: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            container_id: default_container_id(),
            center: default_center(),
            zoom: default_zoom(),
            title: default_title(),
            tile_url: default_tile_url(),
            leaflet_url: default_leaflet_url(),
        }
    }
}

fn default_container_id() -> String {
    "map".to_string()
}

fn default_center() -> [f64; 2] {
    [37.09, -95.71]
}

fn default_zoom() -> u8 {
    4
}

fn default_title() -> String {
    "Earthquakes - past 7 days".to_string()
}

fn default_tile_url() -> String {
    DEFAULT_TILE_URL.to_string()
}

fn default_leaflet_url() -> String {
    DEFAULT_LEAFLET_URL.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedsConfig {
    #[serde(default = "default_earthquakes_url")]
    pub earthquakes: String,
    #[serde(default = "default_fault_lines_url")]
    pub fault_lines: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            earthquakes: default_earthquakes_url(),
            fault_lines: default_fault_lines_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_earthquakes_url() -> String {
    DEFAULT_EARTHQUAKES_URL.to_string()
}

fn default_fault_lines_url() -> String {
    DEFAULT_FAULT_LINES_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_address: default_bind_address(), port: default_server_port() }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub feeds: FeedsConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Main configuration struct passed into the renderer and server
#[derive(Debug, Clone)]
pub struct Config {
    access_token: String,
    container_id: String,
    center: [f64; 2],
    zoom: u8,
    title: String,
    tile_url: String,
    leaflet_url: String,
    earthquakes_url: String,
    fault_lines_url: String,
    feed_timeout_ms: u64,
    bind_address: String,
    server_port: u16,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_toml(TomlConfig::default(), "default")
    }
}

impl Config {
    fn from_toml(toml_config: TomlConfig, config_file: &str) -> Self {
        Self {
            access_token: toml_config.map.access_token,
            container_id: toml_config.map.container_id,
            center: toml_config.map.center,
            zoom: toml_config.map.zoom,
            title: toml_config.map.title,
            tile_url: toml_config.map.tile_url,
            leaflet_url: toml_config.map.leaflet_url,
            earthquakes_url: toml_config.feeds.earthquakes,
            fault_lines_url: toml_config.feeds.fault_lines,
            feed_timeout_ms: toml_config.feeds.timeout_ms,
            bind_address: toml_config.server.bind_address,
            server_port: toml_config.server.port,
            config_file: config_file.to_string(),
        }
    }

    /// Determine config file path: `--config`, then CONFIG_FILE, then the default
    pub fn resolve_config_path(cli_path: Option<&str>) -> String {
        Self::resolve_config_path_with(cli_path, env::var(CONFIG_FILE_ENV).ok())
    }

    fn resolve_config_path_with(cli_path: Option<&str>, env_path: Option<String>) -> String {
        if let Some(path) = cli_path {
            return path.to_string();
        }

        if let Some(path) = env_path.filter(|p| !p.trim().is_empty()) {
            return path;
        }

        DEFAULT_CONFIG_PATH.to_string()
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str, config_file: &str) -> anyhow::Result<Self> {
        let toml_config: TomlConfig = toml::from_str(content)
            .with_context(|| format!("Failed to parse config file {}", config_file))?;
        Ok(Self::from_toml(toml_config, config_file))
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Load configuration from a path, falling back to defaults if unreadable
    pub fn load_from_path(path: &str) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %format!("{:#}", e), "config_load_failed_using_defaults");
                Self::default()
            }
        }
    }

    /// Load configuration - resolves the path, tries TOML first, falls back to defaults
    pub fn load(cli_path: Option<&str>) -> Self {
        Self::load_from_path(&Self::resolve_config_path(cli_path))
    }

    /// Apply MAPBOX_ACCESS_TOKEN if set and non-empty
    pub fn with_env_overrides(self) -> Self {
        match env::var(ACCESS_TOKEN_ENV) {
            Ok(token) => self.with_access_token_override(Some(token)),
            Err(_) => self,
        }
    }

    fn with_access_token_override(mut self, token: Option<String>) -> Self {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.access_token = token;
        }
        self
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn center(&self) -> [f64; 2] {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tile_url(&self) -> &str {
        &self.tile_url
    }

    pub fn leaflet_url(&self) -> &str {
        &self.leaflet_url
    }

    pub fn earthquakes_url(&self) -> &str {
        &self.earthquakes_url
    }

    pub fn fault_lines_url(&self) -> &str {
        &self.fault_lines_url
    }

    pub fn feed_timeout_ms(&self) -> u64 {
        self.feed_timeout_ms
    }

    pub fn bind_address(&self) -> &str {
        &self.bind_address
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    /// Builder method to point both feeds elsewhere (tests, offline rendering)
    pub fn with_feed_urls(mut self, earthquakes: &str, fault_lines: &str) -> Self {
        self.earthquakes_url = earthquakes.to_string();
        self.fault_lines_url = fault_lines.to_string();
        self
    }

    /// Builder method to set the access token
    pub fn with_access_token(mut self, token: &str) -> Self {
        self.access_token = token.to_string();
        self
    }
}
