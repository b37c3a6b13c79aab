//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

/// Frontend serving mode configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum FrontendMode {
    /// Proxy requests to a development server (e.g., Dioxus dx serve).
    Proxy { target: String },
    /// Serve the built Mini App from a directory.
    Static { dir: String },
    /// No frontend serving - API only.
    Disabled,
}

impl FrontendMode {
    /// Parse frontend mode from environment variables.
    ///
    /// Environment variables:
    /// - `MATRESHKA_FRONTEND_MODE`: "proxy" | "static" | "disabled" (default: "disabled")
    /// - `MATRESHKA_PROXY_TARGET`: Target URL for proxy mode (default: "http://localhost:8080")
    /// - `MATRESHKA_STATIC_DIR`: Directory for static mode (default: "./public")
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mode = lookup("MATRESHKA_FRONTEND_MODE")
            .unwrap_or_else(|| "disabled".to_string())
            .to_lowercase();

        match mode.as_str() {
            "proxy" => {
                let target = lookup("MATRESHKA_PROXY_TARGET")
                    .unwrap_or_else(|| "http://localhost:8080".to_string());
                FrontendMode::Proxy { target }
            }
            "static" => {
                let dir = lookup("MATRESHKA_STATIC_DIR").unwrap_or_else(|| "./public".to_string());
                FrontendMode::Static { dir }
            }
            _ => FrontendMode::Disabled,
        }
    }
}

/// Origin allowed when `MATRESHKA_CORS_ORIGINS` is unset.
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Origins allowed to call the API from a browser.
#[derive(Debug, Clone, PartialEq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

impl CorsOrigins {
    fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        if origins.iter().any(|o| o == "*") {
            CorsOrigins::Any
        } else if origins.is_empty() {
            CorsOrigins::List(vec![DEFAULT_CORS_ORIGIN.to_string()])
        } else {
            CorsOrigins::List(origins)
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub db_path: PathBuf,
    /// Upsert the built-in server catalog on startup.
    pub seed_servers: bool,
    pub cors_origins: CorsOrigins,
    pub frontend: FrontendMode,
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    ///
    /// - `MATRESHKA_BIND` (default `0.0.0.0:8000`)
    /// - `MATRESHKA_DB_PATH` (default `matreshka_db_data`)
    /// - `MATRESHKA_SEED_SERVERS` (default `true`)
    /// - `MATRESHKA_CORS_ORIGINS`: comma-separated list, `*` for any
    ///   (default `http://localhost:3000`)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind = lookup("MATRESHKA_BIND").unwrap_or_else(|| "0.0.0.0:8000".to_string());
        let bind: SocketAddr = bind
            .parse()
            .with_context(|| format!("invalid MATRESHKA_BIND address: {bind}"))?;

        let seed_servers = match lookup("MATRESHKA_SEED_SERVERS") {
            Some(raw) => parse_flag(&raw)
                .with_context(|| format!("invalid MATRESHKA_SEED_SERVERS value: {raw}"))?,
            None => true,
        };

        Ok(Self {
            bind,
            db_path: lookup("MATRESHKA_DB_PATH")
                .unwrap_or_else(|| "matreshka_db_data".to_string())
                .into(),
            seed_servers,
            cors_origins: CorsOrigins::parse(&lookup("MATRESHKA_CORS_ORIGINS").unwrap_or_default()),
            frontend: FrontendMode::from_lookup(&lookup),
        })
    }

    /// API-only configuration around a database directory, for embedding and tests.
    pub fn for_database(db_path: impl Into<PathBuf>) -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 0)),
            db_path: db_path.into(),
            seed_servers: true,
            cors_origins: CorsOrigins::Any,
            frontend: FrontendMode::Disabled,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = ServerConfig::from_lookup(env(&[])).unwrap();
        assert_eq!(config.bind, SocketAddr::from(([0, 0, 0, 0], 8000)));
        assert_eq!(config.db_path, PathBuf::from("matreshka_db_data"));
        assert!(config.seed_servers);
        assert_eq!(
            config.cors_origins,
            CorsOrigins::List(vec![DEFAULT_CORS_ORIGIN.to_string()])
        );
        assert_eq!(config.frontend, FrontendMode::Disabled);
    }

    #[test]
    fn reads_overrides() {
        let config = ServerConfig::from_lookup(env(&[
            ("MATRESHKA_BIND", "127.0.0.1:9000"),
            ("MATRESHKA_DB_PATH", "/var/lib/matreshka"),
            ("MATRESHKA_SEED_SERVERS", "off"),
            ("MATRESHKA_CORS_ORIGINS", "https://web.telegram.org, https://example.com"),
            ("MATRESHKA_FRONTEND_MODE", "STATIC"),
            ("MATRESHKA_STATIC_DIR", "dist"),
        ]))
        .unwrap();

        assert_eq!(config.bind, SocketAddr::from(([127, 0, 0, 1], 9000)));
        assert_eq!(config.db_path, PathBuf::from("/var/lib/matreshka"));
        assert!(!config.seed_servers);
        assert_eq!(
            config.cors_origins,
            CorsOrigins::List(vec![
                "https://web.telegram.org".to_string(),
                "https://example.com".to_string(),
            ])
        );
        assert_eq!(config.frontend, FrontendMode::Static { dir: "dist".to_string() });
    }

    #[test]
    fn wildcard_anywhere_in_the_list_allows_any_origin() {
        assert_eq!(CorsOrigins::parse("https://a.example, *"), CorsOrigins::Any);
        assert_eq!(CorsOrigins::parse("*"), CorsOrigins::Any);
        assert_eq!(
            CorsOrigins::parse(" , "),
            CorsOrigins::List(vec![DEFAULT_CORS_ORIGIN.to_string()])
        );
    }

    #[test]
    fn rejects_bad_bind_address_and_flag() {
        assert!(ServerConfig::from_lookup(env(&[("MATRESHKA_BIND", "nowhere")])).is_err());
        assert!(ServerConfig::from_lookup(env(&[("MATRESHKA_SEED_SERVERS", "maybe")])).is_err());
    }

    #[test]
    fn proxy_mode_has_a_default_target() {
        let mode = FrontendMode::from_lookup(env(&[("MATRESHKA_FRONTEND_MODE", "proxy")]));
        assert_eq!(
            mode,
            FrontendMode::Proxy {
                target: "http://localhost:8080".to_string()
            }
        );
    }
}
