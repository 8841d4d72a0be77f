use std::time::Duration;

use seedfin_metadata::resolve::{DEFAULT_LOCALE, DEFAULT_SEASON_PARALLELISM};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing TMDB API key (set SEEDFIN_TMDB_API_KEY or TMDB_API_KEY)")]
    MissingApiKey,
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Server configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub tmdb_api_key: String,
    pub tmdb_base_url: String,
    pub tmdb_language: String,
    pub tmdb_timeout: Duration,
    pub season_concurrency: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8097".to_string(),
            tmdb_api_key: String::new(),
            tmdb_base_url: seedfin_metadata::tmdb::BASE_URL.to_string(),
            tmdb_language: DEFAULT_LOCALE.to_string(),
            tmdb_timeout: Duration::from_secs(10),
            season_concurrency: DEFAULT_SEASON_PARALLELISM,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let tmdb_api_key = get("SEEDFIN_TMDB_API_KEY")
            .or_else(|| get("TMDB_API_KEY"))
            .ok_or(ConfigError::MissingApiKey)?;

        let season_concurrency = match get("SEEDFIN_SEASON_CONCURRENCY") {
            Some(v) => match v.trim().parse::<usize>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "SEEDFIN_SEASON_CONCURRENCY",
                        value: v,
                    });
                }
            },
            None => defaults.season_concurrency,
        };

        let tmdb_timeout = match get("SEEDFIN_TMDB_TIMEOUT_SECS") {
            Some(v) => match v.trim().parse::<u64>() {
                Ok(secs) if secs >= 1 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "SEEDFIN_TMDB_TIMEOUT_SECS",
                        value: v,
                    });
                }
            },
            None => defaults.tmdb_timeout,
        };

        Ok(Self {
            bind: get("SEEDFIN_BIND").unwrap_or(defaults.bind),
            tmdb_api_key,
            tmdb_base_url: get("SEEDFIN_TMDB_BASE_URL").unwrap_or(defaults.tmdb_base_url),
            tmdb_language: get("SEEDFIN_TMDB_LANGUAGE").unwrap_or(defaults.tmdb_language),
            tmdb_timeout,
            season_concurrency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply() {
        let cfg = ServerConfig::from_lookup(lookup(&[("TMDB_API_KEY", "abc")])).unwrap();
        assert_eq!(cfg.tmdb_api_key, "abc");
        assert_eq!(cfg.bind, "0.0.0.0:8097");
        assert_eq!(cfg.tmdb_language, "ru-RU");
        assert_eq!(cfg.season_concurrency, 4);
        assert_eq!(cfg.tmdb_timeout, Duration::from_secs(10));
    }

    #[test]
    fn prefixed_key_wins() {
        let cfg = ServerConfig::from_lookup(lookup(&[
            ("TMDB_API_KEY", "generic"),
            ("SEEDFIN_TMDB_API_KEY", "specific"),
            ("SEEDFIN_TMDB_LANGUAGE", "en-US"),
            ("SEEDFIN_SEASON_CONCURRENCY", "8"),
        ]))
        .unwrap();
        assert_eq!(cfg.tmdb_api_key, "specific");
        assert_eq!(cfg.tmdb_language, "en-US");
        assert_eq!(cfg.season_concurrency, 8);
    }

    #[test]
    fn missing_key_is_an_error() {
        let err = ServerConfig::from_lookup(lookup(&[("SEEDFIN_TMDB_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn bad_numbers_are_rejected() {
        let err = ServerConfig::from_lookup(lookup(&[
            ("TMDB_API_KEY", "abc"),
            ("SEEDFIN_SEASON_CONCURRENCY", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "SEEDFIN_SEASON_CONCURRENCY",
                ..
            }
        ));
    }
}
