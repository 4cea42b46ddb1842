//! ImgBB API client.
//!
//! Async HTTP client using `reqwest`. The API key travels in the form body
//! next to the base64 image, so one client can serve several keys.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use crate::types::RawResponse;

const DEFAULT_BASE_URL: &str = "https://api.imgbb.com/1";

/// Default transport timeout for one upload request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Errors from the ImgBB client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("invalid API key")]
    InvalidKey,
}

/// ImgBB API client.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    expiration: Option<u32>,
}

impl Client {
    /// Creates a new client with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("product-wizard/", env!("CARGO_PKG_VERSION"))),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            expiration: None,
        })
    }

    /// Sets a custom base URL (compatible mirrors, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Asks the host to delete uploads after `seconds` (60–15552000).
    pub fn with_expiration(mut self, seconds: u32) -> Self {
        self.expiration = Some(seconds);
        self
    }

    /// Uploads one base64-encoded image.
    ///
    /// The HTTP status line is ignored: ImgBB reports failures in the JSON
    /// body, which is parsed whatever the status. No retry is done here.
    pub async fn upload(&self, encoded_image: &str, api_key: &str) -> Result<RawResponse, Error> {
        if api_key.is_empty() {
            return Err(Error::InvalidKey);
        }

        let url = format!("{}/upload", self.base_url);
        let expiration = self.expiration.map(|s| s.to_string());
        let mut form: Vec<(&str, &str)> = vec![("key", api_key), ("image", encoded_image)];
        if let Some(exp) = expiration.as_deref() {
            form.push(("expiration", exp));
        }

        let resp = self.http.post(&url).form(&form).send().await?;
        let http_status = resp.status();
        let body = resp.bytes().await?;

        debug!(
            http_status = http_status.as_u16(),
            bytes = body.len(),
            "upload response received"
        );

        parse_response(&body)
    }
}

/// Parses an upload response body.
pub fn parse_response(body: &[u8]) -> Result<RawResponse, Error> {
    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UploadOutcome;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::sync::oneshot;

    /// Reads one HTTP request (headers plus `Content-Length` body).
    async fn read_request(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 8192];
        loop {
            let n = stream.read(&mut chunk).await.unwrap_or(0);
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|l| {
                        let (name, value) = l.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Starts a mock HTTP server that answers once with `status` and `body`
    /// and hands back the raw request it received.
    async fn mock_server(
        status: u16,
        body: &str,
    ) -> (String, oneshot::Receiver<String>, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let url = format!("http://127.0.0.1:{port}");
        let body = body.to_string();
        let (req_tx, req_rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let request = read_request(&mut stream).await;
                let _ = req_tx.send(request);

                let resp = format!(
                    "HTTP/1.1 {status} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = stream.write_all(resp.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        (url, req_rx, handle)
    }

    #[tokio::test]
    async fn upload_returns_url() {
        let json = r#"{"data":{"id":"abc","url":"https://i.ibb.co/abc/shirt.png"},"success":true,"status":200}"#;
        let (url, req_rx, handle) = mock_server(200, json).await;

        let client = Client::new(DEFAULT_TIMEOUT).unwrap().with_base_url(url);
        let resp = client.upload("aGVsbG8=", "test-key").await.unwrap();

        assert_eq!(
            resp.outcome().unwrap(),
            UploadOutcome::Success {
                url: "https://i.ibb.co/abc/shirt.png".into()
            }
        );

        let request = req_rx.await.unwrap();
        assert!(request.starts_with("POST /upload "));
        assert!(request.contains("key=test-key"));
        // `=` padding is form-encoded.
        assert!(request.contains("image=aGVsbG8%3D"));
        assert!(!request.contains("expiration="));

        handle.abort();
    }

    #[tokio::test]
    async fn upload_sends_expiration() {
        let json = r#"{"data":{"url":"https://i.ibb.co/x.png"},"status":200}"#;
        let (url, req_rx, handle) = mock_server(200, json).await;

        let client = Client::new(DEFAULT_TIMEOUT)
            .unwrap()
            .with_base_url(format!("{url}/"))
            .with_expiration(600);
        client.upload("AA==", "k").await.unwrap();

        let request = req_rx.await.unwrap();
        assert!(request.contains("expiration=600"));

        handle.abort();
    }

    #[tokio::test]
    async fn upload_parses_error_body_on_http_error() {
        let json = r#"{"status_code":400,"error":{"message":"Invalid API v1 key.","code":100},"status_txt":"Bad Request"}"#;
        let (url, _req_rx, handle) = mock_server(400, json).await;

        let client = Client::new(DEFAULT_TIMEOUT).unwrap().with_base_url(url);
        let resp = client.upload("AA==", "bad-key").await.unwrap();

        assert_eq!(resp.status, 400);
        assert_eq!(
            resp.outcome().unwrap(),
            UploadOutcome::Failure {
                reason: "Invalid API v1 key.".into()
            }
        );

        handle.abort();
    }

    #[tokio::test]
    async fn upload_malformed_body_is_json_error() {
        let (url, _req_rx, handle) = mock_server(502, "<html>Bad Gateway</html>").await;

        let client = Client::new(DEFAULT_TIMEOUT).unwrap().with_base_url(url);
        let err = client.upload("AA==", "k").await.unwrap_err();
        assert!(matches!(err, Error::Json(_)), "unexpected error: {err}");

        handle.abort();
    }

    #[tokio::test]
    async fn upload_connection_refused_is_http_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = Client::new(Duration::from_secs(5))
            .unwrap()
            .with_base_url(format!("http://127.0.0.1:{port}"));
        let err = client.upload("AA==", "k").await.unwrap_err();
        assert!(matches!(err, Error::Http(_)), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn upload_rejects_empty_key() {
        let client = Client::new(DEFAULT_TIMEOUT).unwrap();
        let err = client.upload("AA==", "").await.unwrap_err();
        assert!(matches!(err, Error::InvalidKey));
    }

    #[test]
    fn parse_response_rejects_wrong_shape() {
        assert!(parse_response(br#"{"ok":true}"#).is_err());
        assert!(parse_response(b"").is_err());
        assert!(parse_response(br#"{"status":200}"#).is_ok());
    }

    #[test]
    fn with_base_url_trims_trailing_slash() {
        let client = Client::new(DEFAULT_TIMEOUT)
            .unwrap()
            .with_base_url("http://localhost:9000/1/");
        assert_eq!(client.base_url, "http://localhost:9000/1");
    }
}
