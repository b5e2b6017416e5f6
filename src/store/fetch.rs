use super::LoadError;
use futures::StreamExt;
use reqwest::redirect::Policy;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Upper bound on the article list body, local or remote.
pub const MAX_ARTICLES_SIZE: usize = 10 * 1024 * 1024; // 10MB

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for article sources: bounded redirects, 30s timeout.
pub fn http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .redirect(redirect_policy())
        .timeout(REQUEST_TIMEOUT)
        .build()
}

/// At most 3 hops, and never the same URL twice.
fn redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() >= 3 {
            return attempt.error("Too many redirects (max 3)");
        }

        let url = attempt.url();
        if attempt.previous().iter().any(|prev| prev.as_str() == url.as_str()) {
            return attempt.error("Redirect loop detected");
        }

        tracing::debug!(
            to = %url,
            hop = attempt.previous().len() + 1,
            "Following redirect"
        );
        attempt.follow()
    })
}

pub(super) async fn read_file(path: &Path) -> Result<String, LoadError> {
    let meta = tokio::fs::metadata(path).await?;
    if meta.len() > MAX_ARTICLES_SIZE as u64 {
        return Err(LoadError::TooLarge(MAX_ARTICLES_SIZE));
    }
    let bytes = tokio::fs::read(path).await?;
    String::from_utf8(bytes).map_err(|_| LoadError::InvalidUtf8)
}

/// GET the article list. Single attempt: failures are reported, not retried.
pub(super) async fn fetch_text(client: &reqwest::Client, url: &Url) -> Result<String, LoadError> {
    tracing::debug!(url = %url, "Fetching article list");

    let response = tokio::time::timeout(REQUEST_TIMEOUT, client.get(url.clone()).send())
        .await
        .map_err(|_| LoadError::Timeout)?
        .map_err(|e| {
            if e.is_timeout() {
                LoadError::Timeout
            } else {
                LoadError::Network(e)
            }
        })?;

    if !response.status().is_success() {
        return Err(LoadError::HttpStatus(response.status().as_u16()));
    }

    read_limited_text(response, MAX_ARTICLES_SIZE).await
}

async fn read_limited_text(response: reqwest::Response, limit: usize) -> Result<String, LoadError> {
    // Fast path: trust an oversized Content-Length
    if let Some(len) = response.content_length() {
        if len > limit as u64 {
            return Err(LoadError::TooLarge(limit));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(LoadError::TooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }

    String::from_utf8(bytes).map_err(|_| LoadError::InvalidUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ArticleStore;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TWO_ARTICLES: &str = r#"[
        {"id": 1, "title": "Guide", "excerpt": "", "category": "guides", "date": "2024-01-01"},
        {"id": 2, "title": "Case", "excerpt": "", "category": "cases", "date": "2024-03-01"}
    ]"#;

    fn source_url(server: &MockServer) -> Url {
        Url::parse(&format!("{}/articles/articles.json", server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/articles/articles.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(TWO_ARTICLES)
                    .insert_header("Content-Type", "application/json"),
            )
            .mount(&mock_server)
            .await;

        let client = reqwest::Client::new();
        let body = fetch_text(&client, &source_url(&mock_server)).await.unwrap();
        let store = ArticleStore::from_json(&body).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.articles()[0].id, "2");
    }

    #[tokio::test]
    async fn test_fetch_404_is_single_attempt() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = reqwest::Client::new();
        let result = fetch_text(&client, &source_url(&mock_server)).await;
        match result {
            Err(LoadError::HttpStatus(404)) => {}
            other => panic!("Expected HttpStatus(404), got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_500_not_retried() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = reqwest::Client::new();
        let result = fetch_text(&client, &source_url(&mock_server)).await;
        assert!(matches!(result, Err(LoadError::HttpStatus(500))));
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(64)))
            .mount(&mock_server)
            .await;

        let client = reqwest::Client::new();
        let response = client.get(source_url(&mock_server)).send().await.unwrap();
        let result = read_limited_text(response, 16).await;
        assert!(matches!(result, Err(LoadError::TooLarge(16))));
    }

    #[tokio::test]
    async fn test_read_file_missing() {
        let result = read_file(Path::new("/nonexistent/traffy/articles.json")).await;
        assert!(matches!(result, Err(LoadError::Io(_))));
    }

    #[test]
    fn test_http_client_builds() {
        assert!(http_client().is_ok());
    }
}
