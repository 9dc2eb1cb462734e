use std::env;

use thiserror::Error;

// ============================================================================
// Config
// ============================================================================

/// Relay configuration, constructed once at startup from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Provider credential. Absence is not fatal at startup; chat calls fail
    /// with a configuration error until it is set.
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible upstream endpoint.
    pub upstream_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            env::var("NVIDIA_API_KEY").ok(),
            env::var("HOST").ok(),
            env::var("PORT").ok(),
            env::var("NIM_BASE_URL").ok(),
        )
    }

    fn from_vars(
        api_key: Option<String>,
        host: Option<String>,
        port: Option<String>,
        base_url: Option<String>,
    ) -> Result<Self, ConfigError> {
        let port = match port {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidPort { value: raw })?,
            None => default_port(),
        };

        Ok(Self {
            host: host.unwrap_or_else(default_host),
            port,
            api_key: api_key.filter(|k| !k.is_empty()),
            upstream_base_url: base_url.unwrap_or_else(default_upstream_base_url),
        })
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3002
}

fn default_upstream_base_url() -> String {
    "https://integrate.api.nvidia.com/v1".to_string()
}

// ============================================================================
// ConfigError
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT value: {value}")]
    InvalidPort { value: String },
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(None, None, None, None).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3002);
        assert!(config.api_key.is_none());
        assert_eq!(
            config.upstream_base_url,
            "https://integrate.api.nvidia.com/v1"
        );
    }

    #[test]
    fn test_explicit_values() {
        let config = Config::from_vars(
            Some("nvapi-test".to_string()),
            Some("127.0.0.1".to_string()),
            Some("9000".to_string()),
            Some("http://localhost:8000/v1".to_string()),
        )
        .unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.api_key.as_deref(), Some("nvapi-test"));
        assert_eq!(config.upstream_base_url, "http://localhost:8000/v1");
    }

    #[test]
    fn test_empty_api_key_treated_as_missing() {
        let config = Config::from_vars(Some(String::new()), None, None, None).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_invalid_port() {
        let result = Config::from_vars(None, None, Some("not-a-port".to_string()), None);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidPort { ref value }) if value == "not-a-port"
        ));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidPort {
            value: "70000".to_string(),
        };
        assert!(err.to_string().contains("invalid PORT value"));
    }
}
