use std::env;
use std::net::SocketAddr;

use crate::error::AppError;
use crate::pagination::validate_default_limit;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://courses.db?mode=rwc";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub default_page_limit: i64,
}

impl AppConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; missing keys fall back
    /// to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("BIND_ADDR is invalid: {}", e)))?;

        let default_page_limit = match lookup("PAGINATOR_LIMIT_DEFAULT") {
            Some(raw) => raw.trim().parse::<i64>().map_err(|e| {
                AppError::Config(format!("PAGINATOR_LIMIT_DEFAULT is invalid: {}", e))
            })?,
            None => DEFAULT_PAGE_LIMIT,
        };
        let default_page_limit = validate_default_limit(default_page_limit)?;

        Ok(Self {
            database_url,
            bind_addr,
            default_page_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::error::ErrorKind;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.default_page_limit, DEFAULT_PAGE_LIMIT);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("PAGINATOR_LIMIT_DEFAULT", "25"),
        ])
        .unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.default_page_limit, 25);
    }

    #[test]
    fn bad_page_limit_is_fatal() {
        for raw in ["0", "-4", "ten"] {
            let err = config_from(&[("PAGINATOR_LIMIT_DEFAULT", raw)]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Config, "{raw}");
        }
    }

    #[test]
    fn bad_bind_addr_is_fatal() {
        let err = config_from(&[("BIND_ADDR", "localhost")]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
