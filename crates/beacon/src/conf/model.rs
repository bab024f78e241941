//! Model — ServerConfig.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub max_concurrent_streams: usize,
    /// How long the hosting process lets a graceful drain run before it
    /// forces the stop. The handle itself never enforces a deadline.
    pub drain_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:50051".to_string(),
            max_concurrent_streams: 100,
            drain_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.bind_address.is_empty() {
            return Err("bind_address must not be empty".to_string());
        }
        if self.max_concurrent_streams == 0 {
            return Err("max_concurrent_streams must be > 0".to_string());
        }
        if self.drain_timeout_secs == 0 {
            return Err("drain_timeout_secs must be > 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Defaults ─────────────────────────────────────────────────

    #[test]
    fn test_default_bind_address() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.bind_address, "0.0.0.0:50051");
    }

    #[test]
    fn test_default_tuning() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.max_concurrent_streams, 100);
        assert_eq!(cfg.drain_timeout_secs, 30);
    }

    // ── Validation ───────────────────────────────────────────────

    #[test]
    fn test_validate_default_passes() {
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_bind_address() {
        let cfg = ServerConfig {
            bind_address: String::new(),
            ..Default::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.contains("bind_address"), "Error should mention bind_address: {}", err);
    }

    #[test]
    fn test_validate_rejects_zero_streams() {
        let cfg = ServerConfig {
            max_concurrent_streams: 0,
            ..Default::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.contains("max_concurrent_streams"), "Error should mention max_concurrent_streams: {}", err);
    }

    #[test]
    fn test_validate_rejects_zero_drain_timeout() {
        let cfg = ServerConfig {
            drain_timeout_secs: 0,
            ..Default::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.contains("drain_timeout_secs"), "Error should mention drain_timeout_secs: {}", err);
    }

    // ── Serialization ────────────────────────────────────────────

    #[test]
    fn test_toml_round_trip() {
        let cfg = ServerConfig::default();
        let toml_str = toml::to_string(&cfg).expect("Should serialize to TOML");
        let deserialized: ServerConfig = toml::from_str(&toml_str).expect("Should deserialize from TOML");
        assert_eq!(deserialized.bind_address, cfg.bind_address);
        assert_eq!(deserialized.max_concurrent_streams, cfg.max_concurrent_streams);
        assert_eq!(deserialized.drain_timeout_secs, cfg.drain_timeout_secs);
    }

    #[test]
    fn test_deserialize_partial_toml() {
        // Only set bind_address; rest should use defaults via #[serde(default)]
        let toml_str = r#"bind_address = "127.0.0.1:9999""#;
        let cfg: ServerConfig = toml::from_str(toml_str).expect("Should accept partial TOML");
        assert_eq!(cfg.bind_address, "127.0.0.1:9999");
        assert_eq!(cfg.max_concurrent_streams, 100); // default
        assert_eq!(cfg.drain_timeout_secs, 30); // default
    }
}
