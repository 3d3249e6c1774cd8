//! HTTP client carrying the cookie-based session
//!
//! Every request is sent through one `reqwest::Client` with a cookie store, so
//! the session cookie set by the login call rides along on all later calls.

use reqwest::{Client, Response};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

use crate::constants::DEFAULT_BASE_URL;
use crate::error::{ClientError, Result};

/// Configuration for the HTTP client
#[derive(Clone, Debug)]
pub struct HttpClientConfig {
    /// Service base URL (e.g. "https://frontend-take-home-service.fetch.com")
    pub base_url: String,
    /// Connection timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// Read timeout in milliseconds
    pub read_timeout_ms: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_ms: 5000,
            read_timeout_ms: 30000,
            user_agent: concat!("pawmatch/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config for a single base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Default::default()
        }
    }

    /// Set timeouts
    pub fn with_timeouts(mut self, connect_ms: u64, read_ms: u64) -> Self {
        self.connect_timeout_ms = connect_ms;
        self.read_timeout_ms = read_ms;
        self
    }

    /// Set the User-Agent header
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }
}

/// HTTP client with a session cookie jar
pub struct PawHttpClient {
    client: Client,
    base_url: Url,
}

impl PawHttpClient {
    /// Create a new HTTP client
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        let client = Client::builder()
            .cookie_store(true)
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.read_timeout_ms))
            .user_agent(config.user_agent)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Base URL relative links are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build full URL for an API path
    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.build_url(path);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    /// Make a GET request with query parameters
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T> {
        let url = self.build_url(path);
        debug!("GET {}", url);
        let response = self.client.get(&url).query(query).send().await?;
        self.handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.build_url(path);
        debug!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await?;
        self.handle_response(response).await
    }

    /// Make a POST request with JSON body, ignoring the response body
    pub async fn post_json_no_content<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<()> {
        let url = self.build_url(path);
        debug!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await?;
        self.ensure_success(response).await
    }

    /// Make a POST request without a body, ignoring the response body
    pub async fn post_empty(&self, path: &str) -> Result<()> {
        let url = self.build_url(path);
        debug!("POST {}", url);
        let response = self.client.post(&url).send().await?;
        self.ensure_success(response).await
    }

    /// Handle response and parse JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let bytes = response.bytes().await?;
            Ok(serde_json::from_slice(&bytes)?)
        } else {
            let body = response.text().await.unwrap_or_default();
            error!("Request failed with status {}: {}", status, body);
            Err(ClientError::from_status(status, body))
        }
    }

    /// Fail on non-success status, discarding the body otherwise
    async fn ensure_success(&self, response: Response) -> Result<()> {
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            error!("Request failed with status {}: {}", status, body);
            Err(ClientError::from_status(status, body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = HttpClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.connect_timeout_ms, 5000);
        assert_eq!(config.read_timeout_ms, 30000);
        assert!(config.user_agent.starts_with("pawmatch/"));
    }

    #[test]
    fn test_config_builder() {
        let config = HttpClientConfig::new("http://localhost:8080")
            .with_timeouts(3000, 15000)
            .with_user_agent("tester");

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.connect_timeout_ms, 3000);
        assert_eq!(config.read_timeout_ms, 15000);
        assert_eq!(config.user_agent, "tester");
    }

    #[test]
    fn test_build_url() {
        let client = PawHttpClient::new(HttpClientConfig::new("http://localhost:8080")).unwrap();
        assert_eq!(
            client.build_url("/dogs/search"),
            "http://localhost:8080/dogs/search"
        );
    }

    #[test]
    fn test_build_url_with_prefix() {
        let client =
            PawHttpClient::new(HttpClientConfig::new("http://localhost:8080/api/")).unwrap();
        assert_eq!(
            client.build_url("/dogs/breeds"),
            "http://localhost:8080/api/dogs/breeds"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = PawHttpClient::new(HttpClientConfig::new("not a url"));
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }
}
