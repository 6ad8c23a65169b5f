// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;
use std::time::Duration;

use factotum_ws_core::EnvLookup;
use factotum_ws_query::PageLimits;
use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_BIND: &str = "0.0.0.0:8001";
pub const DEFAULT_DATABASE: &str = "factotum.sqlite3";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("page sizes must be > 0")]
    ZeroPageSize,
    #[error("default page size {default} exceeds max page size {max}")]
    DefaultAboveMax { default: u64, max: u64 },
    #[error("max_connections must be > 0")]
    ZeroConnections,
    #[error("sql timeout must be > 0")]
    ZeroTimeout,
    #[error("public base url must start with http:// or https://: {0}")]
    BaseUrl(String),
    #[error("database path must not be empty")]
    EmptyDatabasePath,
}

/// Request-facing settings.
#[derive(Debug, Clone, Serialize)]
pub struct ApiConfig {
    pub page_limits: PageLimits,
    /// Overrides the scheme and host taken from the request when building links.
    pub public_base_url: Option<String>,
    /// Empty admits any `Host`.
    pub allowed_hosts: Vec<String>,
    /// Empty allows any origin.
    pub cors_allowed_origins: Vec<String>,
    /// Exposes internal error causes in 500 bodies.
    pub debug: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            page_limits: PageLimits::default(),
            public_base_url: None,
            allowed_hosts: Vec::new(),
            cors_allowed_origins: Vec::new(),
            debug: false,
        }
    }
}

impl ApiConfig {
    pub fn from_env<F: Fn(&str) -> Option<String>>(env: &EnvLookup<F>) -> Self {
        let defaults = PageLimits::default();
        Self {
            page_limits: PageLimits {
                default_page_size: env.u64("PAGE_SIZE", defaults.default_page_size),
                max_page_size: env.u64("MAX_PAGE_SIZE", defaults.max_page_size),
            },
            public_base_url: env
                .get("PUBLIC_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string()),
            allowed_hosts: env.list("ALLOWED_HOSTS"),
            cors_allowed_origins: env.list("CORS_ALLOWED_ORIGINS"),
            debug: env.bool("DEBUG", false),
        }
    }
}

/// Read-only SQLite access settings.
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub max_connections: usize,
    pub sql_timeout: Duration,
    pub sqlite_pragma_cache_kib: i64,
    pub sqlite_pragma_mmap_bytes: i64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATABASE),
            max_connections: 16,
            sql_timeout: Duration::from_millis(2_000),
            sqlite_pragma_cache_kib: 16 * 1024,
            sqlite_pragma_mmap_bytes: 256 * 1024 * 1024,
        }
    }
}

impl DatabaseConfig {
    pub fn from_env<F: Fn(&str) -> Option<String>>(env: &EnvLookup<F>) -> Self {
        let defaults = Self::default();
        Self {
            path: PathBuf::from(env.string("DATABASE", DEFAULT_DATABASE)),
            max_connections: env.usize("MAX_CONNECTIONS", defaults.max_connections),
            sql_timeout: env.duration_ms("SQL_TIMEOUT_MS", 2_000),
            sqlite_pragma_cache_kib: env.i64("SQLITE_CACHE_KIB", defaults.sqlite_pragma_cache_kib),
            sqlite_pragma_mmap_bytes: env.i64(
                "SQLITE_MMAP_BYTES",
                defaults.sqlite_pragma_mmap_bytes,
            ),
        }
    }
}

pub fn validate_startup_config_contract(
    api: &ApiConfig,
    db: &DatabaseConfig,
) -> Result<(), ConfigError> {
    let limits = api.page_limits;
    if limits.default_page_size == 0 || limits.max_page_size == 0 {
        return Err(ConfigError::ZeroPageSize);
    }
    if limits.default_page_size > limits.max_page_size {
        return Err(ConfigError::DefaultAboveMax {
            default: limits.default_page_size,
            max: limits.max_page_size,
        });
    }
    if db.max_connections == 0 {
        return Err(ConfigError::ZeroConnections);
    }
    if db.sql_timeout.is_zero() {
        return Err(ConfigError::ZeroTimeout);
    }
    if db.path.as_os_str().is_empty() {
        return Err(ConfigError::EmptyDatabasePath);
    }
    if let Some(url) = &api.public_base_url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::BaseUrl(url.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> EnvLookup<impl Fn(&str) -> Option<String>> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        EnvLookup::from_fn(move |name: &str| map.get(name).cloned())
    }

    #[test]
    fn defaults_pass_the_startup_contract() {
        assert_eq!(
            validate_startup_config_contract(&ApiConfig::default(), &DatabaseConfig::default()),
            Ok(())
        );
    }

    #[test]
    fn env_overrides_are_read_with_prefix_fallback() {
        let e = env(&[
            ("FACTOTUM_WS_MAX_PAGE_SIZE", "1000"),
            ("PAGE_SIZE", "50"),
            ("DATABASE", "/srv/factotum.sqlite3"),
            ("FACTOTUM_WS_PUBLIC_BASE_URL", "https://api.example.org/"),
            ("ALLOWED_HOSTS", "api.example.org,.example.org"),
            ("DEBUG", "yes"),
        ]);
        let api = ApiConfig::from_env(&e);
        assert_eq!(api.page_limits.max_page_size, 1000);
        assert_eq!(api.page_limits.default_page_size, 50);
        assert_eq!(api.public_base_url.as_deref(), Some("https://api.example.org"));
        assert_eq!(api.allowed_hosts.len(), 2);
        assert!(api.debug);
        let db = DatabaseConfig::from_env(&e);
        assert_eq!(db.path, PathBuf::from("/srv/factotum.sqlite3"));
        assert_eq!(db.max_connections, 16);
    }

    #[test]
    fn startup_contract_rejects_inconsistent_limits() {
        let api = ApiConfig {
            page_limits: PageLimits {
                default_page_size: 600,
                max_page_size: 500,
            },
            ..ApiConfig::default()
        };
        assert_eq!(
            validate_startup_config_contract(&api, &DatabaseConfig::default()),
            Err(ConfigError::DefaultAboveMax {
                default: 600,
                max: 500
            })
        );

        let db = DatabaseConfig {
            max_connections: 0,
            ..DatabaseConfig::default()
        };
        assert_eq!(
            validate_startup_config_contract(&ApiConfig::default(), &db),
            Err(ConfigError::ZeroConnections)
        );

        let api = ApiConfig {
            public_base_url: Some("ftp://x".to_string()),
            ..ApiConfig::default()
        };
        let err = validate_startup_config_contract(&api, &DatabaseConfig::default())
            .expect_err("bad scheme");
        assert!(err.to_string().contains("http://"));
    }
}
