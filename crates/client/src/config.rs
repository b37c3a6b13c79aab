//! Client configuration.

use std::time::Duration;

/// Base URL used when `MATRESHKA_API_URL` is not set at build time.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Settings the HTTP layer is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL every API path is joined onto.
    pub api_base_url: String,
    /// Request timeout. Only honored on native targets; the browser's fetch
    /// has no per-request timeout.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Configuration baked in at compile time.
    ///
    /// Build with `MATRESHKA_API_URL=https://api.example.com` to point the app
    /// at another backend.
    pub fn from_build_env() -> Self {
        Self {
            api_base_url: resolve_base_url(option_env!("MATRESHKA_API_URL")),
            timeout: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}

fn resolve_base_url(configured: Option<&str>) -> String {
    match configured.map(str::trim) {
        Some(url) if !url.is_empty() => url.trim_end_matches('/').to_string(),
        _ => DEFAULT_API_URL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_or_blank_url_falls_back_to_localhost() {
        assert_eq!(resolve_base_url(None), DEFAULT_API_URL);
        assert_eq!(resolve_base_url(Some("  ")), DEFAULT_API_URL);
    }

    #[test]
    fn configured_url_drops_trailing_slash() {
        assert_eq!(
            resolve_base_url(Some("https://vpn.example.com/")),
            "https://vpn.example.com"
        );
    }

    #[test]
    fn builder_overrides() {
        let config = ClientConfig::default()
            .with_base_url("http://127.0.0.1:9000")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.api_base_url, "http://127.0.0.1:9000");
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }
}
