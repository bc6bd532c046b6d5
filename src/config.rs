use std::env;

use crate::error::{Result, TryOnError};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/";
pub const DEFAULT_API_URL: &str = "https://try-on-diffusion.p.rapidapi.com";
pub const DEFAULT_API_KEY: &str = "sample_key";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 7860;
pub const DEFAULT_CONCURRENCY_LIMIT: usize = 2;

#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] but reads values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        ClientConfig {
            base_url: lookup("API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            api_key: lookup("API_KEY").unwrap_or_else(|| DEFAULT_API_KEY.to_string()),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Parses the base URL with one trailing slash removed.
    pub fn parsed_base_url(&self) -> Result<url::Url> {
        let trimmed = self
            .base_url
            .strip_suffix('/')
            .unwrap_or(&self.base_url);

        let parsed = url::Url::parse(trimmed).map_err(|e| {
            TryOnError::Config(format!("invalid base URL {:?}: {}", self.base_url, e))
        })?;

        if parsed.host_str().is_none() {
            return Err(TryOnError::Config(format!(
                "base URL {:?} has no host",
                self.base_url
            )));
        }

        Ok(parsed)
    }
}

#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub host: String,
    pub port: u16,
    pub concurrency_limit: usize,
    pub show_gateway_link: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            concurrency_limit: DEFAULT_CONCURRENCY_LIMIT,
            show_gateway_link: true,
        }
    }
}

impl DemoConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or_default(&lookup, "PORT", DEFAULT_PORT);
        let concurrency_limit = parse_or_default(
            &lookup,
            "TRY_ON_DIFFUSION_DEMO_CONCURRENCY_LIMIT",
            DEFAULT_CONCURRENCY_LIMIT,
        )
        .max(1);
        let show_gateway_link = lookup("TRY_ON_DIFFUSION_DEMO_SHOW_RAPIDAPI_LINK")
            .map_or(true, |val| val == "1");

        DemoConfig {
            host,
            port,
            concurrency_limit,
            show_gateway_link,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_concurrency_limit(mut self, limit: usize) -> Self {
        self.concurrency_limit = limit.max(1);
        self
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

fn parse_or_default<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring {}={:?}, using default {}", key, raw, default);
            default
        }),
        None => default,
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
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn client_config_defaults_from_empty_env() {
        let config = ClientConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.api_key, DEFAULT_API_KEY);
    }

    #[test]
    fn client_config_reads_env() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("API_URL", "http://localhost:9000/"),
            ("API_KEY", "k-123"),
        ]));
        assert_eq!(config.base_url, "http://localhost:9000/");
        assert_eq!(config.api_key, "k-123");
    }

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let config = ClientConfig::new().with_base_url("http://localhost:8000/");
        let url = config.parsed_base_url().unwrap();
        assert_eq!(url.as_str().trim_end_matches('/'), "http://localhost:8000");
        assert_eq!(url.host_str(), Some("localhost"));
    }

    #[test]
    fn invalid_base_url_is_a_config_error() {
        let config = ClientConfig::new().with_base_url("not a url");
        assert!(matches!(
            config.parsed_base_url(),
            Err(TryOnError::Config(_))
        ));
    }

    #[test]
    fn debug_output_hides_api_key() {
        let config = ClientConfig::new().with_api_key("super-secret");
        assert!(!format!("{:?}", config).contains("super-secret"));
    }

    #[test]
    fn demo_config_defaults() {
        let config = DemoConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.concurrency_limit, 2);
        assert!(config.show_gateway_link);
    }

    #[test]
    fn demo_config_reads_env_and_clamps_limit() {
        let config = DemoConfig::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("TRY_ON_DIFFUSION_DEMO_CONCURRENCY_LIMIT", "0"),
            ("TRY_ON_DIFFUSION_DEMO_SHOW_RAPIDAPI_LINK", "0"),
        ]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.concurrency_limit, 1);
        assert!(!config.show_gateway_link);
    }

    #[test]
    fn demo_config_falls_back_on_garbage() {
        let config = DemoConfig::from_lookup(lookup_from(&[
            ("PORT", "eighty"),
            ("TRY_ON_DIFFUSION_DEMO_CONCURRENCY_LIMIT", "many"),
        ]));
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.concurrency_limit, DEFAULT_CONCURRENCY_LIMIT);
    }
}
