use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; a value that is present but invalid fails startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Single origin allowed to call the API from a browser.
    pub cors_origin: String,
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let port = match lookup("PORT") {
            Some(v) => v
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got '{v}'"))?,
            None => defaults.port,
        };
        let max_body_bytes = match lookup("MAX_BODY_BYTES") {
            Some(v) => v
                .parse::<usize>()
                .with_context(|| format!("MAX_BODY_BYTES must be a byte count, got '{v}'"))?,
            None => defaults.max_body_bytes,
        };

        Ok(Config {
            port,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            cors_origin: lookup("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            max_body_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.port, 8000);
        assert_eq!(config.max_body_bytes, 1_048_576);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "9090"),
            ("CORS_ORIGIN", "https://cv.example.com"),
            ("MAX_BODY_BYTES", "4096"),
            ("RUST_LOG", "debug"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.cors_origin, "https://cv.example.com");
        assert_eq!(config.max_body_bytes, 4096);
        assert_eq!(config.rust_log, "debug");
    }

    #[test]
    fn test_invalid_port_fails_with_context() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT must be a valid port number"));
    }
}
