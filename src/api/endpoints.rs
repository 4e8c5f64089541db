// Catalog API endpoint functions.
// Provides typed methods for the book list and like-toggle endpoints.

use serde::Deserialize;

use crate::error::Result;

use super::client::{LibraryClient, read_json};
use super::types::CachedBook;

/// Response wrapper for the book list.
#[derive(Debug, Deserialize)]
struct BooksResponse {
    data: Vec<CachedBook>,
}

/// Response body of a like toggle.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LikeResponse {
    is_liked: bool,
}

impl LibraryClient {
    /// Fetch the full book catalog.
    pub async fn list_books(&self) -> Result<Vec<CachedBook>> {
        let response = self.get(&["books"]).await?;
        let body: BooksResponse = read_json(response).await?;
        Ok(body.data)
    }

    /// Toggle the liked flag of a book, returning the new state.
    pub async fn toggle_like(&self, book_id: &str) -> Result<bool> {
        let response = self.post(&["books", book_id, "like"]).await?;
        let body: LikeResponse = read_json(response).await?;
        Ok(body.is_liked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::stub;
    use crate::config::ClientConfig;
    use crate::error::LibraryError;

    fn client(base_url: &str) -> LibraryClient {
        LibraryClient::new(&ClientConfig {
            base_url: base_url.to_string(),
            ..ClientConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_list_books_requests_books_path() {
        let (base_url, server) = stub::serve_once(
            "200 OK",
            r#"{"data":[{"id":"b1","title":"A"},{"id":"b2","title":"B"}]}"#,
        )
        .await;

        let books = client(&base_url).list_books().await.unwrap();

        let ids: Vec<_> = books.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["b1", "b2"]);
        assert_eq!(server.await.unwrap(), "GET /api/books HTTP/1.1");
    }

    #[tokio::test]
    async fn test_list_books_surfaces_server_error() {
        let (base_url, server) = stub::serve_once("503 Service Unavailable", "down").await;

        let err = client(&base_url).list_books().await.unwrap_err();

        assert!(matches!(err, LibraryError::Other(ref m) if m == "HTTP 503 Service Unavailable: down"));
        assert_eq!(server.await.unwrap(), "GET /api/books HTTP/1.1");
    }

    #[tokio::test]
    async fn test_list_books_malformed_body_is_json_error() {
        let (base_url, _server) = stub::serve_once("200 OK", r#"{"data": "nope"}"#).await;

        let err = client(&base_url).list_books().await.unwrap_err();

        assert!(matches!(err, LibraryError::Json(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_toggle_like_posts_to_like_path() {
        let (base_url, server) = stub::serve_once("200 OK", r#"{"isLiked":true}"#).await;

        let liked = client(&base_url).toggle_like("b1").await.unwrap();

        assert!(liked);
        assert_eq!(server.await.unwrap(), "POST /api/books/b1/like HTTP/1.1");
    }

    #[tokio::test]
    async fn test_toggle_like_keeps_reserved_id_in_one_segment() {
        let (base_url, server) = stub::serve_once("200 OK", r#"{"isLiked":false}"#).await;

        let liked = client(&base_url).toggle_like("a/b?x").await.unwrap();

        assert!(!liked);
        assert_eq!(server.await.unwrap(), "POST /api/books/a%2Fb%3Fx/like HTTP/1.1");
    }

    #[tokio::test]
    async fn test_toggle_like_unknown_book_is_not_found() {
        let (base_url, _server) = stub::serve_once("404 Not Found", "").await;

        let err = client(&base_url).toggle_like("missing").await.unwrap_err();

        assert!(matches!(err, LibraryError::NotFound(ref url) if url.ends_with("/books/missing/like")));
    }
}
