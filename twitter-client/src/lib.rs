pub mod error;
pub mod types;

pub use error::{Result, TwitterError};
pub use types::{CountBucket, CountsMeta, CountsResponse, Granularity, SearchMeta, SearchResponse, Tweet};

use serde::de::DeserializeOwned;

pub const DEFAULT_BASE_URL: &str = "https://api.twitter.com/2";

const USER_AGENT: &str = "whatday/0.1";

#[derive(Debug, Clone)]
pub struct TwitterClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl TwitterClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Point the client at another API root, e.g. a mock server.
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: token.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Recent posts (last 7 days) matching `query`, newest first.
    pub async fn search_recent(&self, query: &str, max_results: u32) -> Result<Vec<Tweet>> {
        let params = [("query", query.to_string()), ("max_results", max_results.to_string())];
        let response: SearchResponse = self.get("/tweets/search/recent", &params).await?;

        tracing::debug!(query, results = response.data.len(), "Recent search completed");
        Ok(response.data)
    }

    /// Mention counts for `query` over the last 7 days.
    pub async fn count_recent(&self, query: &str, granularity: Granularity) -> Result<CountsResponse> {
        let params = [("query", query.to_string()), ("granularity", granularity.as_str().to_string())];
        let response: CountsResponse = self.get("/tweets/counts/recent", &params).await?;

        tracing::debug!(query, total = response.meta.total_tweet_count, "Recent counts completed");
        Ok(response)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .query(params)
            .send()
            .await?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(TwitterError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
