//! HTTP client for the GitHub REST API.

use crate::models::{Profile, RepoSummary};
use async_trait::async_trait;
use folio_core::{FolioError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

/// Read-only view of the GitHub API consumed by the aggregator.
///
/// `events` returns the raw JSON payload: a malformed (non-array) body is
/// not an error at this layer — the aggregator degrades it to an empty
/// event list.
#[async_trait]
pub trait GithubApi: Send + Sync {
    async fn user(&self, handle: &str) -> Result<Profile>;
    async fn repos(&self, handle: &str) -> Result<Vec<RepoSummary>>;
    async fn events(&self, handle: &str) -> Result<Value>;
    /// Language-name -> byte-count mapping; only the key set is used.
    async fn languages(&self, url: &str) -> Result<HashMap<String, u64>>;
}

/// reqwest-backed client. An optional bearer token raises the rate limit
/// and unlocks the per-repository language endpoints.
pub struct GithubClient {
    client: reqwest::Client,
    api_base: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(api_base: impl Into<String>, token: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let mut req = self.client.get(url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    async fn fetch_json<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> Result<T> {
        let resp = req
            .send()
            .await
            .map_err(|e| FolioError::UpstreamFetch(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FolioError::UpstreamFetch(format!(
                "upstream returned HTTP {}",
                status.as_u16()
            )));
        }
        resp.json()
            .await
            .map_err(|e| FolioError::UpstreamFetch(e.to_string()))
    }
}

#[async_trait]
impl GithubApi for GithubClient {
    async fn user(&self, handle: &str) -> Result<Profile> {
        let url = format!("{}/users/{}", self.api_base, handle);
        self.fetch_json(self.get(&url)).await
    }

    async fn repos(&self, handle: &str) -> Result<Vec<RepoSummary>> {
        let url = format!("{}/users/{}/repos", self.api_base, handle);
        self.fetch_json(self.get(&url)).await
    }

    async fn events(&self, handle: &str) -> Result<Value> {
        let url = format!("{}/users/{}/events", self.api_base, handle);
        // Bypass intermediary caches so the activity feed is live.
        let req = self
            .get(&url)
            .query(&[("per_page", "100")])
            .header(reqwest::header::CACHE_CONTROL, "no-cache");
        self.fetch_json(req).await
    }

    async fn languages(&self, url: &str) -> Result<HashMap<String, u64>> {
        self.fetch_json(self.get(url)).await
    }
}
