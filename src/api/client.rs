// Catalog API HTTP client.
// Handles authentication headers, base URL resolution, and response status mapping.

use reqwest::{
    Client, Response, StatusCode, Url,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{LibraryError, Result};

/// HTTP client for the library catalog API.
#[derive(Debug, Clone)]
pub struct LibraryClient {
    client: Client,
    base_url: Url,
}

impl LibraryClient {
    /// Create a client from resolved configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();

        if let Some(token) = &config.token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| LibraryError::Config(format!("invalid API token: {}", e)))?,
            );
        }
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("bookshelf"));

        let base_url = Url::parse(config.base_url.trim_end_matches('/')).map_err(|e| {
            LibraryError::Config(format!("invalid API URL {:?}: {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(LibraryError::Config(format!(
                "API URL {:?} cannot carry a path",
                config.base_url
            )));
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(LibraryError::Api)?;

        Ok(Self { client, base_url })
    }

    /// Create a client from `BOOKSHELF_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(&ClientConfig::from_env()?)
    }

    /// Base URL every endpoint is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for a path below the base URL.
    ///
    /// Each segment is percent-encoded on its own, so ids containing `/`, `?`
    /// or `#` stay inside their segment.
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base URL can carry a path.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Make a GET request to the catalog API.
    pub async fn get(&self, segments: &[&str]) -> Result<Response> {
        let url = self.url(segments);
        tracing::debug!(%url, "GET");
        let response = self.client.get(url).send().await.map_err(LibraryError::Api)?;
        check_response(response).await
    }

    /// Make a POST request with an empty body.
    pub async fn post(&self, segments: &[&str]) -> Result<Response> {
        let url = self.url(segments);
        tracing::debug!(%url, "POST");
        let response = self.client.post(url).send().await.map_err(LibraryError::Api)?;
        check_response(response).await
    }
}

/// Check response status and convert errors.
async fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::UNAUTHORIZED => Err(LibraryError::Unauthorized),
        StatusCode::FORBIDDEN => Err(LibraryError::Forbidden(response.url().to_string())),
        StatusCode::NOT_FOUND => Err(LibraryError::NotFound(response.url().to_string())),
        status => Err(LibraryError::Other(format!(
            "HTTP {}: {}",
            status,
            response.text().await.unwrap_or_default()
        ))),
    }
}

/// Decode a JSON response body.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}


#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> ClientConfig {
        ClientConfig {
            base_url: base_url.to_string(),
            ..ClientConfig::default()
        }
    }

    async fn status_error(status: &str, body: &str) -> (LibraryError, String) {
        let (base_url, server) = stub::serve_once(status, body).await;
        let client = LibraryClient::new(&config(&base_url)).unwrap();

        let err = client.get(&["books"]).await.unwrap_err();
        (err, server.await.unwrap())
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = LibraryClient::new(&config("http://localhost:8080/api/")).unwrap();

        assert_eq!(client.base_url().as_str(), "http://localhost:8080/api");
        assert_eq!(client.url(&["books"]).as_str(), "http://localhost:8080/api/books");
        assert_eq!(
            client.url(&["books", "b1", "like"]).as_str(),
            "http://localhost:8080/api/books/b1/like"
        );
    }

    #[test]
    fn test_url_encodes_reserved_characters_in_segment() {
        let client = LibraryClient::new(&config("http://localhost:8080/api")).unwrap();

        let url = client.url(&["books", "a/b?x#y", "like"]);

        assert_eq!(url.path(), "/api/books/a%2Fb%3Fx%23y/like");
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());
    }

    #[test]
    fn test_token_with_newline_is_rejected() {
        let cfg = ClientConfig {
            token: Some("bad\ntoken".to_string()),
            ..ClientConfig::default()
        };

        let err = LibraryClient::new(&cfg).unwrap_err();
        assert!(matches!(err, LibraryError::Config(_)));
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let (base_url, server) = stub::serve_once("200 OK", "{}").await;
        let client = LibraryClient::new(&config(&base_url)).unwrap();

        let response = client.get(&["books"]).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(server.await.unwrap(), "GET /api/books HTTP/1.1");
    }

    #[tokio::test]
    async fn test_401_maps_to_unauthorized() {
        let (err, _) = status_error("401 Unauthorized", "").await;
        assert!(matches!(err, LibraryError::Unauthorized));
    }

    #[tokio::test]
    async fn test_403_maps_to_forbidden_with_url() {
        let (err, _) = status_error("403 Forbidden", "").await;
        match err {
            LibraryError::Forbidden(url) => assert!(url.ends_with("/api/books"), "{url}"),
            other => panic!("expected Forbidden, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_404_maps_to_not_found_with_url() {
        let (err, _) = status_error("404 Not Found", "").await;
        match err {
            LibraryError::NotFound(url) => assert!(url.ends_with("/api/books"), "{url}"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_other_status_carries_body() {
        let (err, request_line) = status_error("503 Service Unavailable", "down").await;

        match err {
            LibraryError::Other(message) => {
                assert_eq!(message, "HTTP 503 Service Unavailable: down")
            }
            other => panic!("expected Other, got {other:?}"),
        }
        assert_eq!(request_line, "GET /api/books HTTP/1.1");
    }
}
