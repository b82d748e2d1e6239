use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use super::provider::ScoreboardSource;

/// Failure talking to the upstream scoreboard.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connect, DNS or timeout failure
    #[error("{0}")]
    Transport(#[source] reqwest::Error),
    #[error("upstream returned {0}")]
    Status(StatusCode),
    #[error("upstream body is not JSON: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Scoreboard source backed by ESPN's public site API.
pub struct EspnScoreboard {
    http: Client,
    /// Full scoreboard URL; overridable for tests
    url: String,
}

impl EspnScoreboard {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(EspnScoreboard {
            http,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl ScoreboardSource for EspnScoreboard {
    fn name(&self) -> &str {
        "ESPN"
    }

    async fn fetch_scoreboard(&self) -> Result<Value, FetchError> {
        debug!("Fetching scoreboard from {}", self.url);

        let resp = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        // Only a plain 200 counts; the body of anything else is dropped.
        if resp.status() != StatusCode::OK {
            return Err(FetchError::Status(resp.status()));
        }

        let body = resp.bytes().await.map_err(FetchError::Transport)?;
        serde_json::from_slice(&body).map_err(FetchError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode as AxumStatus, routing::get, Json, Router};
    use serde_json::json;

    /// Serve `app` on an ephemeral local port and return its base URL.
    async fn spawn_upstream(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/scoreboard", addr)
    }

    #[tokio::test]
    async fn test_fetch_ok() {
        let app = Router::new().route(
            "/scoreboard",
            get(|| async { Json(json!({"events": [{"id": "1"}]})) }),
        );
        let url = spawn_upstream(app).await;
        let source = EspnScoreboard::new(&url, Duration::from_secs(5)).unwrap();

        let body = source.fetch_scoreboard().await.unwrap();
        assert_eq!(body["events"][0]["id"], "1");
    }

    #[tokio::test]
    async fn test_fetch_non_200() {
        let app = Router::new().route(
            "/scoreboard",
            get(|| async { (AxumStatus::SERVICE_UNAVAILABLE, "down") }),
        );
        let url = spawn_upstream(app).await;
        let source = EspnScoreboard::new(&url, Duration::from_secs(5)).unwrap();

        let err = source.fetch_scoreboard().await.unwrap_err();
        assert!(matches!(err, FetchError::Status(s) if s == StatusCode::SERVICE_UNAVAILABLE));
    }

    #[tokio::test]
    async fn test_fetch_invalid_json() {
        let app = Router::new().route("/scoreboard", get(|| async { "<html>oops</html>" }));
        let url = spawn_upstream(app).await;
        let source = EspnScoreboard::new(&url, Duration::from_secs(5)).unwrap();

        let err = source.fetch_scoreboard().await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        let app = Router::new().route(
            "/scoreboard",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({"events": []}))
            }),
        );
        let url = spawn_upstream(app).await;
        let source = EspnScoreboard::new(&url, Duration::from_millis(200)).unwrap();

        let err = source.fetch_scoreboard().await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(ref e) if e.is_timeout()));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = format!("http://{}/scoreboard", addr);
        let source = EspnScoreboard::new(&url, Duration::from_secs(2)).unwrap();
        let err = source.fetch_scoreboard().await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
