//! Wikipedia content fetcher over the MediaWiki Action API.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use synoptic_core::{defaults, ArticleContent, ArticleSource};

/// Default MediaWiki Action API endpoint.
pub const DEFAULT_API_URL: &str = defaults::WIKIPEDIA_API_URL;

/// Wikipedia article source.
///
/// Lookups are by exact title — no search fallback, no "did you mean"
/// auto-correction. Redirects are not followed either, so a redirect
/// page's own text is what comes back for a redirect title.
pub struct WikipediaClient {
    client: Client,
    api_url: String,
    timeout_secs: u64,
}

impl WikipediaClient {
    /// Create a client against the default English Wikipedia endpoint.
    pub fn new() -> Self {
        Self::with_api_url(DEFAULT_API_URL.to_string())
    }

    /// Create a client against a custom Action API endpoint.
    pub fn with_api_url(api_url: String) -> Self {
        let timeout_secs = std::env::var("SYNOPTIC_FETCH_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::FETCH_TIMEOUT_SECS);

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(defaults::WIKIPEDIA_USER_AGENT),
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(headers)
            .build()
            .expect("Failed to create HTTP client");

        info!("Initializing Wikipedia client: url={}", api_url);

        Self {
            client,
            api_url,
            timeout_secs,
        }
    }

    /// Create from environment variables.
    pub fn from_env() -> Self {
        let api_url =
            std::env::var("SYNOPTIC_WIKI_API").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::with_api_url(api_url)
    }

    async fn query_page(&self, subject: &str) -> Result<QueryResponse, String> {
        let response = self
            .client
            .get(&self.api_url)
            .timeout(Duration::from_secs(self.timeout_secs))
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("formatversion", "2"),
                ("prop", "extracts|pageprops|links"),
                ("explaintext", "1"),
                ("ppprop", "disambiguation"),
                ("plnamespace", "0"),
                ("pllimit", "10"),
                ("titles", subject),
            ])
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(format!("Wikipedia returned {}: {}", status, body));
        }

        response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    }
}

impl Default for WikipediaClient {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Action API response types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct QueryResponse {
    query: Option<QueryBody>,
}

#[derive(Deserialize)]
struct QueryBody {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Deserialize)]
struct Page {
    title: String,
    #[serde(default)]
    missing: bool,
    extract: Option<String>,
    pageprops: Option<PageProps>,
    #[serde(default)]
    links: Vec<PageLink>,
}

impl Page {
    fn is_disambiguation(&self) -> bool {
        self.pageprops
            .as_ref()
            .is_some_and(|p| p.disambiguation.is_some())
    }
}

#[derive(Deserialize)]
struct PageProps {
    disambiguation: Option<String>,
}

#[derive(Deserialize)]
struct PageLink {
    title: String,
}

#[async_trait]
impl ArticleSource for WikipediaClient {
    #[instrument(skip(self), fields(subsystem = "wiki", component = "wikipedia", op = "fetch"))]
    async fn fetch(&self, subject: &str) -> ArticleContent {
        let start = Instant::now();

        let response = match self.query_page(subject).await {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "Wikipedia lookup failed");
                return ArticleContent::NetworkError;
            }
        };

        let page = match response
            .query
            .map(|q| q.pages)
            .unwrap_or_default()
            .into_iter()
            .next()
        {
            Some(p) if !p.missing => p,
            _ => {
                debug!("Page missing");
                return ArticleContent::NotFound {
                    subject: subject.to_string(),
                };
            }
        };

        if page.is_disambiguation() {
            let candidates: Vec<String> = page
                .links
                .into_iter()
                .take(defaults::AMBIGUOUS_CANDIDATES)
                .map(|l| l.title)
                .collect();
            debug!(candidate_count = candidates.len(), "Title is ambiguous");
            return ArticleContent::Ambiguous {
                subject: page.title,
                candidates,
            };
        }

        let body = page.extract.unwrap_or_default();
        debug!(
            response_len = body.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Fetch complete"
        );
        ArticleContent::Text(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn page_response(body: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(body)
    }

    fn client_for(server: &MockServer) -> WikipediaClient {
        WikipediaClient::with_api_url(format!("{}/w/api.php", server.uri()))
    }

    // =========================================================================
    // Response Deserialization Tests
    // =========================================================================

    #[test]
    fn deserialize_page_with_extract() {
        let json = r#"{"query": {"pages": [{"title": "Ada Lovelace", "extract": "Ada was a mathematician."}]}}"#;
        let response: QueryResponse = serde_json::from_str(json).unwrap();
        let pages = response.query.unwrap().pages;
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].title, "Ada Lovelace");
        assert!(!pages[0].missing);
        assert_eq!(pages[0].extract.as_deref(), Some("Ada was a mathematician."));
    }

    #[test]
    fn deserialize_missing_page() {
        let json = r#"{"query": {"pages": [{"title": "Xyzzy", "missing": true}]}}"#;
        let response: QueryResponse = serde_json::from_str(json).unwrap();
        let pages = response.query.unwrap().pages;
        assert!(pages[0].missing);
        assert!(pages[0].extract.is_none());
    }

    #[test]
    fn deserialize_disambiguation_marker() {
        let json = r#"{"query": {"pages": [{"title": "Python", "pageprops": {"disambiguation": ""}, "links": [{"title": "Pythonidae"}]}]}}"#;
        let response: QueryResponse = serde_json::from_str(json).unwrap();
        let page = &response.query.unwrap().pages[0];
        assert!(page.is_disambiguation());
        assert_eq!(page.links.len(), 1);
    }

    #[test]
    fn deserialize_empty_query() {
        let json = r#"{"batchcomplete": true}"#;
        let response: QueryResponse = serde_json::from_str(json).unwrap();
        assert!(response.query.is_none());
    }

    // =========================================================================
    // Fetch Behavior Tests
    // =========================================================================

    #[tokio::test]
    async fn fetch_returns_article_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("titles", "Ada Lovelace"))
            .respond_with(page_response(json!({
                "query": {"pages": [{
                    "title": "Ada Lovelace",
                    "extract": "Ada Lovelace was an English mathematician."
                }]}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let content = client.fetch("Ada Lovelace").await;
        assert_eq!(
            content,
            ArticleContent::Text("Ada Lovelace was an English mathematician.".to_string())
        );
    }

    #[tokio::test]
    async fn fetch_maps_missing_page_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .respond_with(page_response(json!({
                "query": {"pages": [{"title": "Xyzzy", "missing": true}]}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let content = client.fetch("Xyzzy").await;
        assert_eq!(
            content,
            ArticleContent::NotFound {
                subject: "Xyzzy".to_string()
            }
        );
    }

    #[tokio::test]
    async fn fetch_maps_disambiguation_to_ambiguous_with_capped_candidates() {
        let server = MockServer::start().await;
        let links: Vec<_> = (1..=7)
            .map(|i| json!({"title": format!("Python {}", i)}))
            .collect();
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .respond_with(page_response(json!({
                "query": {"pages": [{
                    "title": "Python",
                    "extract": "Python may refer to:",
                    "pageprops": {"disambiguation": ""},
                    "links": links
                }]}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        match client.fetch("Python").await {
            ArticleContent::Ambiguous {
                subject,
                candidates,
            } => {
                assert_eq!(subject, "Python");
                assert_eq!(candidates.len(), defaults::AMBIGUOUS_CANDIDATES);
                assert_eq!(candidates[0], "Python 1");
                assert_eq!(candidates[4], "Python 5");
            }
            other => panic!("Expected Ambiguous, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn fetch_maps_server_error_to_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream broke"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert_eq!(client.fetch("Anything").await, ArticleContent::NetworkError);
    }

    #[tokio::test]
    async fn fetch_maps_unreachable_host_to_network_error() {
        // Port 9 (discard) is not listening; connection is refused.
        let client = WikipediaClient::with_api_url("http://127.0.0.1:9/w/api.php".to_string());
        assert_eq!(client.fetch("Anything").await, ArticleContent::NetworkError);
    }

    #[tokio::test]
    async fn fetch_maps_invalid_body_to_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert_eq!(client.fetch("Anything").await, ArticleContent::NetworkError);
    }

    #[tokio::test]
    async fn fetch_with_empty_extract_yields_empty_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .respond_with(page_response(json!({
                "query": {"pages": [{"title": "Stub"}]}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert_eq!(
            client.fetch("Stub").await,
            ArticleContent::Text(String::new())
        );
    }
}
