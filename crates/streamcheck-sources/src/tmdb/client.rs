use crate::error::SourceError;
use crate::http::HttpClient;
use crate::lookup::Lookup;
use crate::tmdb::api::{self, SearchResponse, WatchProvidersResponse};
use crate::traits::MetadataProvider;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use tracing::error;

/// TMDB v3 API client authenticated with a bearer token
pub struct TmdbClient {
    http: HttpClient,
}

impl TmdbClient {
    pub fn new(base_url: &str, api_key: &str, user_agent: &str) -> Result<Self, SourceError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|_| {
                SourceError::Config("TMDB API key contains invalid characters".to_string())
            })?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        Ok(Self {
            http: HttpClient::with_headers(base_url, user_agent, headers)?,
        })
    }

    /// GET `path` and decode a 200 body; every other outcome is `Failed`
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SourceError> {
        let url = self.http.url_for(path);
        let response = match self.http.get(path).await {
            Ok(response) => response,
            Err(e) => {
                error!("Request to TMDB failed: {}", e);
                return Err(e);
            }
        };

        if !response.is_success() {
            error!(
                "Error from endpoint {}, status code: {}",
                url,
                response.status.as_u16()
            );
            return Err(SourceError::Status {
                url,
                status: response.status.as_u16(),
            });
        }

        serde_json::from_str(&response.body).map_err(|e| SourceError::InvalidResponse {
            url,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl MetadataProvider for TmdbClient {
    fn provider_name(&self) -> &str {
        "tmdb"
    }

    async fn find_identifier(&self, title: &str) -> Lookup<u64> {
        match self.get_json::<SearchResponse>(&api::search_path(title)).await {
            Ok(response) => api::first_identifier(&response).into(),
            Err(e) => Lookup::Failed(e),
        }
    }

    async fn fetch_platforms(&self, identifier: u64, country: &str) -> Lookup<Vec<String>> {
        match self
            .get_json::<WatchProvidersResponse>(&api::watch_providers_path(identifier))
            .await
        {
            Ok(response) => api::flatrate_providers(&response, country).into(),
            Err(e) => Lookup::Failed(e),
        }
    }
}
