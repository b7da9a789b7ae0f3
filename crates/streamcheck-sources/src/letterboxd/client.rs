use crate::error::SourceError;
use crate::http::HttpClient;
use crate::letterboxd::parser::ListingPage;
use tracing::{debug, error};

/// Fetches and parses a user's public watchlist pages
#[derive(Clone)]
pub struct LetterboxdClient {
    http: HttpClient,
    username: String,
}

impl LetterboxdClient {
    pub fn new(
        base_url: &str,
        username: impl Into<String>,
        user_agent: &str,
    ) -> Result<Self, SourceError> {
        Ok(Self {
            http: HttpClient::new(base_url, user_agent)?,
            username: username.into(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn page_path(&self, page: usize) -> String {
        format!("{}/watchlist/page/{}", self.username, page)
    }

    /// Fetch one page. Non-200 statuses and transport errors are returned as
    /// errors; the caller decides whether that ends the run.
    pub async fn fetch_page(&self, page: usize) -> Result<ListingPage, SourceError> {
        let path = self.page_path(page);
        let response = match self.http.get(&path).await {
            Ok(response) => response,
            Err(e) => {
                error!("Error while getting watchlist page {}: {}", page, e);
                return Err(e);
            }
        };

        if !response.is_success() {
            error!(
                "Error while getting watchlist page {}, status code: {}",
                page,
                response.status.as_u16()
            );
            return Err(SourceError::Status {
                url: self.http.url_for(&path),
                status: response.status.as_u16(),
            });
        }

        debug!(page = page, bytes = response.body.len(), "Fetched watchlist page");
        ListingPage::parse(&response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_page_parses_listing() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/wombatbat/watchlist/page/2"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<html><body><h1 class="section-heading">wombatbat WANTS TO SEE 30 FILMS</h1>
                <ul><li class="poster-container"><div><img alt="Heat"/></div></li></ul></body></html>"#,
            ))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = LetterboxdClient::new(&mock_server.uri(), "wombatbat", "test").unwrap();
        let page = client.fetch_page(2).await.unwrap();
        assert_eq!(page.titles, vec!["Heat"]);
        assert_eq!(page.entry_count(), Some(30));
    }

    #[tokio::test]
    async fn test_fetch_page_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/nobody/watchlist/page/1"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = LetterboxdClient::new(&mock_server.uri(), "nobody", "test").unwrap();
        let err = client.fetch_page(1).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }
}
