//! open-notify HTTP client behind the `IssApi` seam.

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::types::{
    ApiFailure, AstrosResponse, CrewMember, NowResponse, Observer, Pass, PassResponse, Position,
};
use crate::config::ApiCfg;

/// Network or decoding failure for a single API query.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP status {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("malformed response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("timestamp out of range: {0}")]
    Timestamp(i64),
}

/// The three queries the tracker needs from the outside world.
#[async_trait]
pub trait IssApi: Send + Sync {
    /// Current ground position.
    async fn position(&self) -> Result<Position, FetchError>;
    /// People currently in orbit, in API order.
    async fn crew(&self) -> Result<Vec<CrewMember>, FetchError>;
    /// Upcoming passes over `observer`, ascending by rise time.
    async fn passes(&self, observer: Observer) -> Result<Vec<Pass>, FetchError>;
}

/// reqwest-backed implementation of [`IssApi`].
#[derive(Clone)]
pub struct OpenNotifyClient {
    http: Client,
    base_url: String,
}

impl OpenNotifyClient {
    /// Build a client with the configured base URL and request timeout.
    pub fn new(cfg: &ApiCfg) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET `path` and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {url}");
        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl IssApi for OpenNotifyClient {
    async fn position(&self) -> Result<Position, FetchError> {
        let now: NowResponse = self.get_json("/iss-now.json").await?;
        Position::try_from(now)
    }

    async fn crew(&self) -> Result<Vec<CrewMember>, FetchError> {
        let astros: AstrosResponse = self.get_json("/astros.json").await?;
        Ok(astros.people)
    }

    async fn passes(&self, observer: Observer) -> Result<Vec<Pass>, FetchError> {
        let path = format!(
            "/iss-pass.json?lat={}&lon={}",
            observer.latitude, observer.longitude
        );
        let resp: PassResponse = self.get_json(&path).await?;
        Vec::<Pass>::try_from(resp)
    }
}

/// Turn a non-2xx response into a `FetchError`, keeping the API's own
/// `message: reason` text when the body carries one.
fn status_error(status: StatusCode, body: &str) -> FetchError {
    let message = match serde_json::from_str::<ApiFailure>(body) {
        Ok(f) if !f.message.is_empty() => format!("{}: {}", f.message, f.reason),
        _ => body.trim().to_string(),
    };
    FetchError::Status { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_uses_api_message_and_reason() {
        let err = status_error(
            StatusCode::BAD_REQUEST,
            r#"{"message":"failure","reason":"Latitude must be number between -80.0 and 80.0"}"#,
        );
        assert_eq!(
            err.to_string(),
            "HTTP status 400 Bad Request: failure: Latitude must be number between -80.0 and 80.0"
        );
    }

    #[test]
    fn status_error_falls_back_to_raw_body() {
        let err = status_error(StatusCode::BAD_GATEWAY, "  upstream down\n");
        match err {
            FetchError::Status { status, message } => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert_eq!(message, "upstream down");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let cfg = ApiCfg {
            base_url: "http://api.open-notify.org/".into(),
            timeout_secs: 5,
        };
        let client = OpenNotifyClient::new(&cfg).unwrap();
        assert_eq!(client.base_url, "http://api.open-notify.org");
    }

    #[tokio::test]
    #[ignore] // Requires network connection
    async fn test_fetch_live_crew() {
        let client = OpenNotifyClient::new(&ApiCfg::default()).unwrap();
        let result = client.crew().await;
        assert!(result.is_ok() || result.is_err());
    }
}
