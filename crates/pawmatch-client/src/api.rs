//! API client for the dog adoption service
//!
//! Provides typed methods for each service endpoint. `DogApi` is the seam the
//! session layer talks to, so it can be driven by a test double.

use async_trait::async_trait;
use url::Url;

use crate::constants::api_path;
use crate::error::Result;
use crate::http::{HttpClientConfig, PawHttpClient};
use crate::model::{Dog, LoginRequest, MatchResult, SearchQuery, SearchResponse};

/// Operations offered by the dog adoption service
#[async_trait]
pub trait DogApi: Send + Sync {
    /// Exchange name and email for a session cookie
    async fn login(&self, name: &str, email: &str) -> Result<()>;

    /// End the session
    async fn logout(&self) -> Result<()>;

    /// All known breed names
    async fn breeds(&self) -> Result<Vec<String>>;

    /// One page of dog ids matching the query
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse>;

    /// Full records for the given ids, in service order
    async fn dogs(&self, ids: &[String]) -> Result<Vec<Dog>>;

    /// Let the service pick one dog out of the given ids
    async fn match_dogs(&self, ids: &[String]) -> Result<MatchResult>;

    /// Base URL that `next`/`prev` links are relative to
    fn base_url(&self) -> &Url;
}

/// API client wrapper providing typed access to the service
pub struct PawApiClient {
    http_client: PawHttpClient,
}

impl PawApiClient {
    /// Create a new API client with the given HTTP client
    pub fn new(http_client: PawHttpClient) -> Self {
        Self { http_client }
    }

    /// Create a new API client from configuration
    pub fn from_config(config: HttpClientConfig) -> Result<Self> {
        Ok(Self::new(PawHttpClient::new(config)?))
    }
}

#[async_trait]
impl DogApi for PawApiClient {
    async fn login(&self, name: &str, email: &str) -> Result<()> {
        self.http_client
            .post_json_no_content(api_path::AUTH_LOGIN, &LoginRequest { name, email })
            .await
    }

    async fn logout(&self) -> Result<()> {
        self.http_client.post_empty(api_path::AUTH_LOGOUT).await
    }

    async fn breeds(&self) -> Result<Vec<String>> {
        self.http_client.get(api_path::DOG_BREEDS).await
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse> {
        self.http_client
            .get_with_query(api_path::DOG_SEARCH, &query.to_query_pairs())
            .await
    }

    async fn dogs(&self, ids: &[String]) -> Result<Vec<Dog>> {
        self.http_client.post_json(api_path::DOGS, ids).await
    }

    async fn match_dogs(&self, ids: &[String]) -> Result<MatchResult> {
        self.http_client.post_json(api_path::DOG_MATCH, ids).await
    }

    fn base_url(&self) -> &Url {
        self.http_client.base_url()
    }
}
