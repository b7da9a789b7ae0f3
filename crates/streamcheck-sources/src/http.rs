use crate::error::SourceError;
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use tracing::trace;

/// Raw result of a GET: status plus body text
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        self.status == StatusCode::OK
    }
}

/// Thin GET-only wrapper around a base URL and a fixed header set.
///
/// Non-200 statuses come back as values; only transport errors are returned
/// as `Err`. The path is appended as-is (no percent-encoding is applied
/// here), so callers encode query values themselves.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>, user_agent: &str) -> Result<Self, SourceError> {
        Self::with_headers(base_url, user_agent, HeaderMap::new())
    }

    pub fn with_headers(
        base_url: impl Into<String>,
        user_agent: &str,
        headers: HeaderMap,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .build()
            .map_err(|e| SourceError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Join base URL and path with exactly one `/`
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub async fn get(&self, path: &str) -> Result<HttpResponse, SourceError> {
        let url = self.url_for(path);
        trace!(url = %url, "GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| SourceError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| SourceError::Transport { url, source })?;

        Ok(HttpResponse { status, body })
    }
}
