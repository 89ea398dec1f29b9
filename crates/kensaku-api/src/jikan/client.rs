use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use super::error::JikanError;
use super::types::{JikanAnime, JikanErrorBody, JikanManga, JikanResponse};
use crate::traits::{MediaKind, MediaLookup, MediaRecord};

const USER_AGENT: &str = concat!("kensaku/", env!("CARGO_PKG_VERSION"));

/// Jikan v4 REST client (unauthenticated, read-only).
#[derive(Debug, Clone)]
pub struct JikanClient {
    base_url: String,
    http: Client,
}

impl JikanClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, JikanError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { base_url, http })
    }

    /// Full resource URL for a lookup.
    pub fn resource_url(&self, kind: MediaKind, id: u64) -> String {
        format!("{}/{}/{id}", self.base_url, kind.path_segment())
    }

    /// Check the HTTP response for errors, pulling `message` out of the body on failure.
    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, JikanError> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<JikanErrorBody>(&body)
            .ok()
            .and_then(|b| b.message);
        tracing::warn!(status, message = message.as_deref(), "Jikan API error");
        Err(JikanError::Api { status, message })
    }

    async fn get_data<T: DeserializeOwned>(&self, url: &str) -> Result<T, JikanError> {
        let resp = self.http.get(url).send().await?;
        let resp = Self::check_response(resp).await?;
        let body: JikanResponse<T> = resp
            .json()
            .await
            .map_err(|e| JikanError::Parse(e.to_string()))?;
        Ok(body.data)
    }

    pub async fn get_anime(&self, id: u64) -> Result<MediaRecord, JikanError> {
        let url = self.resource_url(MediaKind::Anime, id);
        let anime: JikanAnime = self.get_data(&url).await?;
        Ok(anime.into_record(id))
    }

    pub async fn get_manga(&self, id: u64) -> Result<MediaRecord, JikanError> {
        let url = self.resource_url(MediaKind::Manga, id);
        let manga: JikanManga = self.get_data(&url).await?;
        Ok(manga.into_record(id))
    }
}

impl MediaLookup for JikanClient {
    async fn lookup(&self, kind: MediaKind, id: u64) -> Result<MediaRecord, JikanError> {
        tracing::debug!(%kind, id, "Jikan lookup");
        match kind {
            MediaKind::Anime => self.get_anime(id).await,
            MediaKind::Manga => self.get_manga(id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one HTTP response on a random local port and return
    /// the base URL plus a handle yielding the request line that was received.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            let request = String::from_utf8_lossy(&buf).to_string();
            request.lines().next().unwrap_or_default().to_string()
        });
        (format!("http://{addr}/v4"), handle)
    }

    fn client(base: &str) -> JikanClient {
        JikanClient::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_resource_url_trims_trailing_slash() {
        let c = client("https://api.jikan.moe/v4/");
        assert_eq!(
            c.resource_url(MediaKind::Anime, 5114),
            "https://api.jikan.moe/v4/anime/5114"
        );
        assert_eq!(
            c.resource_url(MediaKind::Manga, 2),
            "https://api.jikan.moe/v4/manga/2"
        );
    }

    #[tokio::test]
    async fn test_lookup_success() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"data":{"mal_id":5114,"title":"Fullmetal Alchemist: Brotherhood","genres":[],"score":9.1,"episodes":64,"year":2009,"synopsis":"..."}}"#,
        )
        .await;

        let record = client(&base).lookup(MediaKind::Anime, 5114).await.unwrap();
        assert_eq!(record.title, "Fullmetal Alchemist: Brotherhood");
        assert_eq!(record.episodes, Some(64));

        let request_line = server.await.unwrap();
        assert_eq!(request_line, "GET /v4/anime/5114 HTTP/1.1");
    }

    #[tokio::test]
    async fn test_lookup_not_found_carries_message() {
        let (base, _server) = serve_once(
            "404 Not Found",
            r#"{"status":404,"type":"BadResponseException","message":"Resource does not exist."}"#,
        )
        .await;

        let err = client(&base)
            .lookup(MediaKind::Anime, 999999)
            .await
            .unwrap_err();
        match err {
            JikanError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message.as_deref(), Some("Resource does not exist."));
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_lookup_error_with_non_json_body() {
        let (base, _server) = serve_once("502 Bad Gateway", "<html>bad gateway</html>").await;

        let err = client(&base).lookup(MediaKind::Manga, 1).await.unwrap_err();
        assert_eq!(err.status(), Some(502));
        assert!(matches!(err, JikanError::Api { message: None, .. }));
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_parse_error() {
        let (base, _server) = serve_once("200 OK", r#"{"unexpected": true}"#).await;

        let err = client(&base).lookup(MediaKind::Anime, 1).await.unwrap_err();
        assert!(matches!(err, JikanError::Parse(_)));
    }
}
