use crate::store::{Article, ArticleDraft};
use futures::StreamExt;
use reqwest::redirect::Policy;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Upper bound on any response body we are willing to buffer.
const MAX_BODY_SIZE: usize = 2 * 1024 * 1024; // 2MB

/// Per-request deadline, covering connect plus body.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request timed out after 15s")]
    Timeout,
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),
    #[error("Invalid UTF-8 in response")]
    InvalidUtf8,
    #[error("Malformed response body: {0}")]
    MalformedBody(#[from] serde_json::Error),
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("Insecure base URL: HTTPS required (except localhost)")]
    InsecureBaseUrl,
}

// ============================================================================
// Wire Envelopes
// ============================================================================

/// `GET /api/articles` success shape: `{ "data": [Article, ...] }`.
#[derive(Debug, Deserialize)]
struct ListEnvelope {
    data: Vec<Article>,
}

/// `POST /api/articles` success shape: `{ "data": { "id": 42 } }`.
#[derive(Debug, Deserialize)]
struct CreatedEnvelope {
    data: CreatedId,
}

#[derive(Debug, Deserialize)]
struct CreatedId {
    id: i64,
}

// ============================================================================
// Client
// ============================================================================

/// Create a redirect policy with loop detection and limited hops.
///
/// - Limits redirects to 3 hops maximum
/// - Detects redirect loops (same URL appearing twice in chain)
fn create_redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() >= 3 {
            return attempt.error("Too many redirects (max 3)");
        }

        let url = attempt.url();
        for prev in attempt.previous() {
            if prev.as_str() == url.as_str() {
                return attempt.error("Redirect loop detected");
            }
        }

        tracing::debug!(to = %url, hop = attempt.previous().len() + 1, "Following redirect");
        attempt.follow()
    })
}

/// Thin client over the articles REST endpoint.
///
/// Cheap to clone; `reqwest::Client` is internally reference-counted.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for the given base URL (the collection lives at
    /// `{base_url}/api/articles`).
    ///
    /// The scheme must be HTTPS; plain HTTP is accepted only for
    /// localhost/127.0.0.1, which covers local backends and test servers.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let parsed =
            url::Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl(e.to_string()))?;

        match parsed.scheme() {
            "https" => {}
            "http" => {
                let is_localhost =
                    matches!(parsed.host_str(), Some("localhost") | Some("127.0.0.1"));
                if !is_localhost {
                    tracing::error!(base_url = %base_url, "Rejecting non-HTTPS base URL (HTTPS required except for localhost)");
                    return Err(ApiError::InsecureBaseUrl);
                }
            }
            other => {
                return Err(ApiError::InvalidBaseUrl(format!(
                    "unsupported scheme '{}'",
                    other
                )));
            }
        }

        let client = reqwest::Client::builder()
            .redirect(create_redirect_policy())
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/api/articles", self.base_url)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/api/articles/{}", self.base_url, id)
    }

    /// Fetch the full collection.
    pub async fn list(&self) -> Result<Vec<Article>, ApiError> {
        let response = self.send(self.client.get(self.collection_url())).await?;
        let body = read_limited_text(response, MAX_BODY_SIZE).await?;
        let envelope: ListEnvelope = serde_json::from_str(&body)?;
        Ok(envelope.data)
    }

    /// Create an article and return the server-assigned id.
    pub async fn create(&self, draft: &ArticleDraft) -> Result<i64, ApiError> {
        let response = self
            .send(self.client.post(self.collection_url()).json(draft))
            .await?;
        let body = read_limited_text(response, MAX_BODY_SIZE).await?;
        let envelope: CreatedEnvelope = serde_json::from_str(&body)?;
        Ok(envelope.data.id)
    }

    /// Replace an article on the server. The response body is ignored.
    pub async fn update(&self, article: &Article) -> Result<(), ApiError> {
        self.send(self.client.put(self.item_url(article.id)).json(article))
            .await?;
        Ok(())
    }

    /// Delete an article on the server. The response body is ignored.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.send(self.client.delete(self.item_url(id))).await?;
        Ok(())
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = tokio::time::timeout(REQUEST_TIMEOUT, request.send())
            .await
            .map_err(|_| ApiError::Timeout)?
            .map_err(ApiError::Network)?;

        if !response.status().is_success() {
            return Err(ApiError::HttpStatus(response.status().as_u16()));
        }
        Ok(response)
    }
}

async fn read_limited_text(response: reqwest::Response, limit: usize) -> Result<String, ApiError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(ApiError::ResponseTooLarge(limit));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(ApiError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(ApiError::ResponseTooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }

    String::from_utf8(bytes).map_err(|_| ApiError::InvalidUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json_string, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_article(id: i64) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "title": format!("Article {}", id),
            "content": "Article content.",
            "created_at": "2021-10-04T15:02:45.000000Z",
            "updated_at": "2021-10-04T15:02:45.000000Z"
        })
    }

    #[tokio::test]
    async fn test_list_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/articles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [sample_article(1), sample_article(2)]
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri()).unwrap();
        let articles = client.list().await.unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].id, 1);
        assert_eq!(articles[1].title, "Article 2");
    }

    #[tokio::test]
    async fn test_list_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri()).unwrap();
        let result = client.list().await;

        assert!(matches!(result, Err(ApiError::HttpStatus(500))));
    }

    #[tokio::test]
    async fn test_list_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri()).unwrap();
        let result = client.list().await;

        assert!(matches!(result, Err(ApiError::MalformedBody(_))));
    }

    #[tokio::test]
    async fn test_create_returns_server_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/articles"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({ "data": { "id": 42 } })),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri()).unwrap();
        let draft = ArticleDraft {
            title: "New".to_string(),
            content: "Body".to_string(),
            created_at: "2021-10-04T15:02:45.000000Z".to_string(),
        };

        assert_eq!(client.create(&draft).await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_update_sends_full_record() {
        let server = MockServer::start().await;
        let article = Article {
            id: 7,
            title: "Edited".to_string(),
            content: "Edited body".to_string(),
            created_at: "2021-10-04T15:02:45.000000Z".to_string(),
            updated_at: "2021-10-05T09:00:00.000000Z".to_string(),
        };
        Mock::given(method("PUT"))
            .and(path("/api/articles/7"))
            .and(body_json_string(serde_json::to_string(&article).unwrap()))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri()).unwrap();
        client.update(&article).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_targets_item_path() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/articles/7"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri()).unwrap();
        client.delete(7).await.unwrap();
    }

    #[tokio::test]
    async fn test_http_base_url_rejected() {
        let result = ApiClient::new("http://evil.com");
        assert!(matches!(result, Err(ApiError::InsecureBaseUrl)));
    }

    #[test]
    fn test_localhost_http_allowed() {
        assert!(ApiClient::new("http://localhost:8000").is_ok());
        assert!(ApiClient::new("http://127.0.0.1:8000").is_ok());
    }

    #[test]
    fn test_https_allowed() {
        assert!(ApiClient::new("https://api.example.com").is_ok());
    }

    #[test]
    fn test_invalid_url_rejected() {
        assert!(matches!(
            ApiClient::new("not-a-url"),
            Err(ApiError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            ApiClient::new("ftp://example.com"),
            Err(ApiError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_trailing_slash_normalized() {
        let client = ApiClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.collection_url(), "http://localhost:8000/api/articles");
        assert_eq!(client.item_url(5), "http://localhost:8000/api/articles/5");
    }
}
