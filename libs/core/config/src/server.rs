use crate::{env_or_default, env_parse_or_default, ConfigError, FromEnv};
use std::net::Ipv4Addr;
use std::time::Duration;

/// Server configuration for HTTP APIs
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on a single request, after which the server answers 408
    pub request_timeout_secs: u64,
    /// Grace period for in-flight requests once a shutdown signal arrives
    pub shutdown_timeout_secs: u64,
    /// Allowed CORS origins; empty means any origin
    pub cors_allowed_origins: Vec<String>,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self {
            host,
            port,
            ..Self::default()
        }
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

impl FromEnv for ServerConfig {
    /// Reads from environment variables with sensible defaults:
    /// - HOST: defaults to 0.0.0.0 (all interfaces)
    /// - PORT: defaults to 8080
    /// - REQUEST_TIMEOUT_SECS: defaults to 30
    /// - SHUTDOWN_TIMEOUT_SECS: defaults to 10
    /// - CORS_ALLOWED_ORIGIN: comma separated, unset allows any origin
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = env_or_default("HOST", &defaults.host);
        let port = env_parse_or_default("PORT", defaults.port)?;
        let request_timeout_secs =
            env_parse_or_default("REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs)?;
        let shutdown_timeout_secs =
            env_parse_or_default("SHUTDOWN_TIMEOUT_SECS", defaults.shutdown_timeout_secs)?;
        let cors_allowed_origins = env_or_default("CORS_ALLOWED_ORIGIN", "")
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            host,
            port,
            request_timeout_secs,
            shutdown_timeout_secs,
            cors_allowed_origins,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::UNSPECIFIED.to_string(),
            port: 8080,
            request_timeout_secs: 30,
            shutdown_timeout_secs: 10,
            cors_allowed_origins: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 5] = [
        "HOST",
        "PORT",
        "REQUEST_TIMEOUT_SECS",
        "SHUTDOWN_TIMEOUT_SECS",
        "CORS_ALLOWED_ORIGIN",
    ];

    fn unset_all() -> Vec<(&'static str, Option<&'static str>)> {
        VARS.iter().map(|key| (*key, None)).collect()
    }

    #[test]
    fn test_server_config_from_env_with_defaults() {
        temp_env::with_vars(unset_all(), || {
            let config = ServerConfig::from_env().unwrap();
            assert_eq!(config.address(), "0.0.0.0:8080");
            assert_eq!(config.request_timeout(), Duration::from_secs(30));
            assert_eq!(config.shutdown_timeout(), Duration::from_secs(10));
            assert!(config.cors_allowed_origins.is_empty());
        });
    }

    #[test]
    fn test_server_config_from_env_with_custom_values() {
        temp_env::with_vars(
            [
                ("HOST", Some("127.0.0.1")),
                ("PORT", Some("3000")),
                ("REQUEST_TIMEOUT_SECS", Some("5")),
                ("SHUTDOWN_TIMEOUT_SECS", Some("2")),
                (
                    "CORS_ALLOWED_ORIGIN",
                    Some("https://a.example.com, https://b.example.com"),
                ),
            ],
            || {
                let config = ServerConfig::from_env().unwrap();
                assert_eq!(config.address(), "127.0.0.1:3000");
                assert_eq!(config.request_timeout_secs, 5);
                assert_eq!(config.shutdown_timeout_secs, 2);
                assert_eq!(
                    config.cors_allowed_origins,
                    vec!["https://a.example.com", "https://b.example.com"]
                );
            },
        );
    }

    #[test]
    fn test_server_config_from_env_invalid_port() {
        temp_env::with_var("PORT", Some("not_a_number"), || {
            let err = ServerConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("PORT"));
        });
    }

    #[test]
    fn test_server_config_from_env_port_out_of_range() {
        temp_env::with_var("PORT", Some("99999"), || {
            let err = ServerConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("PORT"));
        });
    }

    #[test]
    fn test_server_config_new_keeps_timeout_defaults() {
        let config = ServerConfig::new("localhost".to_string(), 5000);
        assert_eq!(config.address(), "localhost:5000");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.shutdown_timeout_secs, 10);
    }
}
