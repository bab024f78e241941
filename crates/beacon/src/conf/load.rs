//! Load — config loading from file and environment variables.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::model::ServerConfig;

impl ServerConfig {
    /// Load configuration from file or environment variables
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = std::env::var("BEACON_CONFIG_FILE")
            .unwrap_or_else(|_| "/etc/beacon/server.toml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            tracing::info!("Loading configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            tracing::info!("Config file not found at {}, using environment variables", config_path);
            Self::from_env()
        };

        // Environment variables override file config
        if let Ok(bind) = std::env::var("BEACON_BIND_ADDRESS") {
            config.bind_address = bind;
        }
        if let Ok(streams) = std::env::var("BEACON_MAX_STREAMS") {
            if let Ok(streams) = streams.parse() {
                config.max_concurrent_streams = streams;
            }
        }
        if let Ok(timeout) = std::env::var("BEACON_DRAIN_TIMEOUT_SECS") {
            if let Ok(timeout) = timeout.parse() {
                config.drain_timeout_secs = timeout;
            }
        }

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: ServerConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from environment variables with sensible defaults
    pub fn from_env() -> Self {
        let defaults = ServerConfig::default();
        Self {
            bind_address: std::env::var("BEACON_BIND_ADDRESS")
                .unwrap_or(defaults.bind_address),
            max_concurrent_streams: std::env::var("BEACON_MAX_STREAMS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_concurrent_streams),
            drain_timeout_secs: std::env::var("BEACON_DRAIN_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.drain_timeout_secs),
        }
    }
}
