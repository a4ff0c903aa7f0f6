//! Where a citation payload comes from: a file, stdin, or the REST backend.
//!
//! REST fetches are a plain `GET` of a chat message URL with an optional
//! bearer token. Retry strategy:
//!
//! - HTTP 429 or 5xx → retry with exponential backoff
//! - HTTP 4xx (not 429) → fail immediately
//! - Network error → retry

use anyhow::{bail, Context, Result};
use reqwest::StatusCode;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::AsyncReadExt;

use crate::config::ApiConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadSource {
    Stdin,
    File(PathBuf),
    Url(String),
}

impl PayloadSource {
    /// `-` is stdin, `http://` / `https://` is a URL, anything else a path.
    pub fn parse(arg: &str) -> Self {
        if arg == "-" {
            PayloadSource::Stdin
        } else if arg.starts_with("http://") || arg.starts_with("https://") {
            PayloadSource::Url(arg.to_string())
        } else {
            PayloadSource::File(PathBuf::from(arg))
        }
    }
}

impl std::fmt::Display for PayloadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadSource::Stdin => write!(f, "<stdin>"),
            PayloadSource::File(path) => write!(f, "{}", path.display()),
            PayloadSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Read the raw payload text.
pub async fn load_payload(source: &PayloadSource, api: &ApiConfig) -> Result<String> {
    tracing::debug!("loading payload from {}", source);
    match source {
        PayloadSource::Stdin => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("Failed to read payload from stdin")?;
            Ok(buf)
        }
        PayloadSource::File(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read payload file: {}", path.display())),
        PayloadSource::Url(url) => fetch_payload(url, api).await,
    }
}

/// Rate limiting and server errors are worth another attempt; any other
/// non-success status is final.
fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

async fn fetch_payload(url: &str, api: &ApiConfig) -> Result<String> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(api.timeout_secs))
        .build()?;
    let token = api.token();

    let mut last_err = None;

    for attempt in 0..=api.max_retries {
        if attempt > 0 {
            // Exponential backoff: 1s, 2s, 4s, 8s, ...
            let delay = Duration::from_secs(1 << (attempt - 1).min(5));
            tracing::info!("retrying {} in {:?} (attempt {})", url, delay, attempt + 1);
            tokio::time::sleep(delay).await;
        }

        let mut request = client.get(url).header("Accept", "application/json");
        if let Some(ref token) = token {
            request = request.bearer_auth(token);
        }

        match request.send().await {
            Ok(response) => {
                let status = response.status();

                if status.is_success() {
                    return response
                        .text()
                        .await
                        .with_context(|| format!("Failed to read response body from {}", url));
                }

                let body_text = response.text().await.unwrap_or_default();

                if is_retryable(status) {
                    tracing::warn!("{} returned {}", url, status);
                    last_err = Some(anyhow::anyhow!("API error {}: {}", status, body_text));
                    continue;
                }

                bail!("API error {}: {}", status, body_text);
            }
            Err(e) => {
                tracing::warn!("request to {} failed: {}", url, e);
                last_err = Some(e.into());
                continue;
            }
        }
    }

    Err(last_err.unwrap_or_else(|| anyhow::anyhow!("Fetching {} failed after retries", url)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpListener;

    fn api(max_retries: u32) -> ApiConfig {
        ApiConfig {
            timeout_secs: 5,
            max_retries,
            token_env: String::new(),
        }
    }

    /// Serve `responses` in order, one connection each, and report how many
    /// requests were answered.
    async fn serve(responses: Vec<(u16, &'static str)>) -> (String, tokio::task::JoinHandle<usize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/chats/7/messages/42", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let mut served = 0;
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = socket.read(&mut buf).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&buf[..n]);
                }
                let response = format!(
                    "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.unwrap();
                served += 1;
            }
            served
        });

        (url, handle)
    }

    #[test]
    fn test_parse_source_kinds() {
        assert_eq!(PayloadSource::parse("-"), PayloadSource::Stdin);
        assert_eq!(
            PayloadSource::parse("https://api.example.com/messages/1"),
            PayloadSource::Url("https://api.example.com/messages/1".into())
        );
        assert_eq!(
            PayloadSource::parse("message.json"),
            PayloadSource::File(PathBuf::from("message.json"))
        );
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(is_retryable(StatusCode::SERVICE_UNAVAILABLE));
        assert!(!is_retryable(StatusCode::NOT_FOUND));
        assert!(!is_retryable(StatusCode::UNAUTHORIZED));
        assert!(!is_retryable(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_fetch_retries_server_error() {
        let (url, server) = serve(vec![(503, "busy"), (200, r#"{"citations":[]}"#)]).await;
        let text = load_payload(&PayloadSource::Url(url), &api(1)).await.unwrap();
        assert_eq!(text, r#"{"citations":[]}"#);
        assert_eq!(server.await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_fetch_client_error_not_retried() {
        let (url, server) = serve(vec![(404, "no such message")]).await;
        let err = load_payload(&PayloadSource::Url(url), &api(1))
            .await
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("API error 404"), "unexpected error: {}", msg);
        assert!(msg.contains("no such message"));
        assert_eq!(server.await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_fetch_gives_up_after_retries() {
        let (url, server) = serve(vec![(500, "boom")]).await;
        let err = load_payload(&PayloadSource::Url(url), &api(0))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("API error 500"));
        assert_eq!(server.await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/m", listener.local_addr().unwrap());
        drop(listener);
        assert!(load_payload(&PayloadSource::Url(url), &api(0)).await.is_err());
    }

    #[tokio::test]
    async fn test_missing_file_is_error() {
        let source = PayloadSource::File(PathBuf::from("/nonexistent/message.json"));
        let err = load_payload(&source, &ApiConfig::default()).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read payload file"));
    }

    #[tokio::test]
    async fn test_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.json");
        std::fs::write(&path, "[]").unwrap();
        let text = load_payload(&PayloadSource::File(path), &ApiConfig::default())
            .await
            .unwrap();
        assert_eq!(text, "[]");
    }
}
