//! reqwest-backed [`CompletionProvider`]

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use tracing::{debug, warn};

use crate::application::ports::{CompletionProvider, CompletionRequest, ProviderError};

/// Connection settings for the provider endpoint
#[derive(Clone)]
pub struct UpstreamSettings {
    pub url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for UpstreamSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamSettings")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Posts completion requests to the provider with a bearer credential.
pub struct HttpCompletionProvider {
    client: Client,
    settings: UpstreamSettings,
}

impl HttpCompletionProvider {
    pub fn new(settings: UpstreamSettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(settings.timeout)
            .build()?;

        Ok(Self { client, settings })
    }
}

#[async_trait]
impl CompletionProvider for HttpCompletionProvider {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<serde_json::Value, ProviderError> {
        debug!(model = %request.model, url = %self.settings.url, "Forwarding completion request");

        let response = self
            .client
            .post(&self.settings.url)
            .header(AUTHORIZATION, format!("Bearer {}", self.settings.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Upstream provider rejected request");
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    /// Serve `app` on an ephemeral port and return its base URL
    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/v1", addr)
    }

    fn provider(url: String) -> HttpCompletionProvider {
        HttpCompletionProvider::new(UpstreamSettings {
            url,
            api_key: "upstream-key".into(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "gpt-4".into(),
            prompt: "Write a poem about winter".into(),
            max_tokens: 100,
        }
    }

    #[tokio::test]
    async fn forwards_body_and_bearer_credential() {
        let app = Router::new().route(
            "/v1",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(json!({ "echo": body, "auth": auth }))
            }),
        );
        let url = serve(app).await;

        let body = provider(url).complete(&request()).await.unwrap();
        assert_eq!(body["auth"], "Bearer upstream-key");
        assert_eq!(body["echo"]["model"], "gpt-4");
        assert_eq!(body["echo"]["prompt"], "Write a poem about winter");
        assert_eq!(body["echo"]["max_tokens"], 100);
    }

    #[tokio::test]
    async fn non_json_body_is_returned_as_string() {
        let app = Router::new().route("/v1", post(|| async { "plain text" }));
        let url = serve(app).await;

        let body = provider(url).complete(&request()).await.unwrap();
        assert_eq!(body, Value::String("plain text".into()));
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let app = Router::new().route(
            "/v1",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
        );
        let url = serve(app).await;

        let err = provider(url).complete(&request()).await.unwrap_err();
        assert!(matches!(err, ProviderError::Status { status: 429, .. }));
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = provider(format!("http://{}/v1", addr))
            .complete(&request())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Transport(_)));
    }
}
