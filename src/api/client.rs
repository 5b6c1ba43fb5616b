//! HTTP client for the lineups REST API.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::errors::ApiError;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every endpoint is appended to, e.g. `http://localhost:5000/api`.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Read/write access to JSON resources.
///
/// Implemented by [`ApiClient`] over HTTP; fetch bindings and the creation
/// form only see this trait.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// Read the resource at `endpoint` and return its JSON body.
    async fn fetch_resource(&self, endpoint: &str) -> Result<Value, ApiError>;

    /// Write `body` as JSON to `endpoint` and return the JSON response.
    async fn submit_resource(&self, endpoint: &str, body: &Value) -> Result<Value, ApiError>;
}

/// Single-attempt HTTP client. No retries, no caching.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a new API client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::TransportFailed {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an endpoint path such as `/maps` or `/lineups?mapId=m1`.
    pub fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }

    async fn read_json(url: &str, response: reqwest::Response) -> Result<Value, ApiError> {
        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "API call failed");
            return Err(ApiError::RequestFailed {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            warn!(%url, error = %e, "Failed to read response body");
            ApiError::TransportFailed {
                message: e.to_string(),
            }
        })?;

        serde_json::from_slice(&bytes).map_err(|e| {
            warn!(%url, error = %e, "Response body is not JSON");
            ApiError::InvalidBody {
                message: e.to_string(),
            }
        })
    }
}

#[async_trait]
impl ResourceClient for ApiClient {
    async fn fetch_resource(&self, endpoint: &str) -> Result<Value, ApiError> {
        let url = self.url(endpoint);
        debug!(%url, "GET");

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(%url, error = %e, "API fetch error");
            ApiError::from(e)
        })?;

        Self::read_json(&url, response).await
    }

    async fn submit_resource(&self, endpoint: &str, body: &Value) -> Result<Value, ApiError> {
        let url = self.url(endpoint);
        debug!(%url, "POST");

        // `.json()` sets `Content-Type: application/json`.
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!(%url, error = %e, "API POST error");
                ApiError::from(e)
            })?;

        Self::read_json(&url, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        http::StatusCode,
        routing::{get, post},
    };
    use serde_json::json;
    use tokio::net::TcpListener;

    /// Serve `router` on a dynamic localhost port and return its base URL.
    async fn spawn_server(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/api", addr)
    }

    fn test_router() -> Router {
        Router::new()
            .route("/api/ok", get(|| async { Json(json!({"a": 1})) }))
            .route("/api/missing", get(|| async { StatusCode::NOT_FOUND }))
            .route("/api/broken", get(|| async { "<html>not json</html>" }))
            .route(
                "/api/lineups",
                post(|Json(mut body): Json<Value>| async move {
                    body["_id"] = json!("new-id");
                    (StatusCode::CREATED, Json(body))
                }),
            )
    }

    async fn client_for(router: Router) -> ApiClient {
        let base = spawn_server(router).await;
        ApiClient::new(&ClientConfig::new(base)).unwrap()
    }

    #[test]
    fn test_url_joins_base_and_endpoint() {
        let client = ApiClient::new(&ClientConfig::new("http://localhost:5000/api/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000/api");
        assert_eq!(client.url("/maps"), "http://localhost:5000/api/maps");
        assert_eq!(client.url("maps/m1"), "http://localhost:5000/api/maps/m1");
    }

    #[tokio::test]
    async fn test_fetch_success_returns_json_body() {
        let client = client_for(test_router()).await;
        let value = client.fetch_resource("/ok").await.unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[tokio::test]
    async fn test_fetch_404_is_request_failed() {
        let client = client_for(test_router()).await;
        let err = client.fetch_resource("/missing").await.unwrap_err();
        assert_eq!(err, ApiError::RequestFailed { status: 404 });
    }

    #[tokio::test]
    async fn test_fetch_unknown_route_is_request_failed() {
        let client = client_for(test_router()).await;
        let err = client.fetch_resource("/nowhere").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_fetch_non_json_body_is_invalid_body() {
        let client = client_for(test_router()).await;
        let err = client.fetch_resource("/broken").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidBody { .. }));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_transport_failed() {
        // Reserve a port, then release it so nothing is listening there.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiClient::new(
            &ClientConfig::new(format!("http://{}", addr)).with_timeout(Duration::from_secs(5)),
        )
        .unwrap();
        let err = client.fetch_resource("/maps").await.unwrap_err();
        assert!(matches!(err, ApiError::TransportFailed { .. }));
    }

    #[tokio::test]
    async fn test_submit_posts_json_and_returns_created() {
        let client = client_for(test_router()).await;
        let created = client
            .submit_resource("/lineups", &json!({"title": "Window smoke"}))
            .await
            .unwrap();
        assert_eq!(created["_id"], "new-id");
        assert_eq!(created["title"], "Window smoke");
    }

    #[tokio::test]
    async fn test_submit_error_status_is_request_failed() {
        let client = client_for(test_router()).await;
        // GET-only route: POST is answered with 405.
        let err = client.submit_resource("/ok", &json!({})).await.unwrap_err();
        assert_eq!(err, ApiError::RequestFailed { status: 405 });
    }
}
