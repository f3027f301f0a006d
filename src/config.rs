use crate::error::{GeneratorError, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_ENDPOINT: &str = "/generate-image";

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub base_url: String,
    pub endpoint_path: String,
    pub timeout: Option<Duration>,
    pub default_style: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint_path: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
            default_style: None,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let base_url =
            env::var("GENERATOR_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let endpoint_path =
            env::var("GENERATOR_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let timeout = env::var("GENERATOR_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        let default_style = env::var("GENERATOR_DEFAULT_STYLE")
            .ok()
            .filter(|s| !s.trim().is_empty());

        GeneratorConfig {
            base_url,
            endpoint_path,
            timeout,
            default_style,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_endpoint(mut self, path: impl Into<String>) -> Self {
        self.endpoint_path = path.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_default_style(mut self, style: impl Into<String>) -> Self {
        self.default_style = Some(style.into());
        self
    }

    /// Full URL of the generation endpoint.
    pub fn endpoint_url(&self) -> Result<String> {
        let base = self.base_url.trim().trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(GeneratorError::Config(format!(
                "base URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }

        let path = self.endpoint_path.trim();
        if path.is_empty() {
            return Ok(base.to_string());
        }
        Ok(format!("{}/{}", base, path.trim_start_matches('/')))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint_url() {
        let config = GeneratorConfig::new();
        assert_eq!(
            config.endpoint_url().unwrap(),
            "http://127.0.0.1:5000/generate-image"
        );
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_endpoint_url_normalises_slashes() {
        let config = GeneratorConfig::new()
            .with_base_url("https://studio.example.com/")
            .with_endpoint("generate-image");
        assert_eq!(
            config.endpoint_url().unwrap(),
            "https://studio.example.com/generate-image"
        );
    }

    #[test]
    fn test_rejects_base_url_without_scheme() {
        let config = GeneratorConfig::new().with_base_url("localhost:5000");
        assert!(matches!(
            config.endpoint_url(),
            Err(GeneratorError::Config(_))
        ));
    }

    #[test]
    fn test_builders() {
        let config = GeneratorConfig::new()
            .with_timeout(Duration::from_secs(30))
            .with_default_style("anime");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.default_style.as_deref(), Some("anime"));
    }
}
