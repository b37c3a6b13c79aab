//! HTTP API client and the MatreshkaVPN operation facade.

use async_trait::async_trait;
use matreshka_shared::{
    user_stats_path, ActionResponse, ApiError, AuthRequest, AuthResponse, ConnectRequest,
    DisconnectRequest, Identity, Plan, ServerList, SubscribeRequest, SubscribeResponse, UserStats,
    AUTH_PATH, CONNECT_PATH, DISCONNECT_PATH, JSON_CONTENT_TYPE, SERVERS_PATH, SUBSCRIBE_PATH,
};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;

/// Method, body and extra headers of a single request.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Vec<u8>>,
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            body: None,
            headers: Vec::new(),
        }
    }

    /// A POST carrying `body` encoded as JSON.
    pub fn post_json<T: Serialize>(body: &T) -> Result<Self, ApiError> {
        let bytes = serde_json::to_vec(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(Self {
            method: Method::POST,
            body: Some(bytes),
            headers: Vec::new(),
        })
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

/// Default JSON headers overlaid with the caller's headers.
///
/// Header names are case-insensitive, so a caller's `content-type` replaces
/// the default `Content-Type`.
pub fn merge_headers(extra: &[(String, String)]) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

    for (name, value) in extra {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ApiError::Decode(format!("invalid header name {name:?}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| ApiError::Decode(format!("invalid header value for {name}: {e}")))?;
        headers.insert(name, value);
    }

    Ok(headers)
}

/// HTTP client for the MatreshkaVPN API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client from the given configuration
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: build_http_client(config),
            base_url: config.api_base_url.clone(),
        }
    }

    /// Set the base URL for API requests
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if self.base_url.is_empty() {
            if path.starts_with('/') {
                path.to_string()
            } else {
                format!("/{path}")
            }
        } else {
            let base = self.base_url.trim_end_matches('/');
            let path = path.trim_start_matches('/');
            format!("{base}/{path}")
        }
    }

    /// Send one request and decode the JSON response body.
    ///
    /// Single attempt: no retry, no caching.
    pub async fn request<TRes: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<TRes, ApiError> {
        let url = self.url(path);
        let headers = merge_headers(&options.headers)?;

        let mut rb = self.client.request(options.method, &url).headers(headers);
        if let Some(body) = options.body {
            rb = rb.body(body);
        }

        let resp = rb.send().await.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
            });
        }

        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("failed to read body: {e}")))?;

        if text.is_empty() {
            serde_json::from_str("null").map_err(|e| ApiError::Decode(e.to_string()))
        } else {
            serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
        }
    }

    /// Make a GET request
    pub async fn get_json<TRes: DeserializeOwned>(&self, path: &str) -> Result<TRes, ApiError> {
        self.request(path, RequestOptions::get()).await
    }

    /// Make a POST request with JSON body
    pub async fn post_json<TReq: Serialize, TRes: DeserializeOwned>(
        &self,
        path: &str,
        body: &TReq,
    ) -> Result<TRes, ApiError> {
        self.request(path, RequestOptions::post_json(body)?).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(&ClientConfig::default())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_http_client(config: &ClientConfig) -> Client {
    let mut builder = Client::builder();
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().unwrap_or_else(|e| {
        crate::log_warn!("Falling back to default HTTP client: {}", e);
        Client::new()
    })
}

#[cfg(target_arch = "wasm32")]
fn build_http_client(_config: &ClientConfig) -> Client {
    Client::new()
}

/// The six remote operations of the MatreshkaVPN API.
///
/// Every call is a single attempt; failures are returned, never retried.
#[async_trait(?Send)]
pub trait VpnApi {
    /// `POST /api/auth`
    async fn authenticate(&self, identity: &Identity) -> Result<AuthResponse, ApiError>;
    /// `GET /api/servers`
    async fn list_servers(&self) -> Result<ServerList, ApiError>;
    /// `POST /api/connect`
    async fn connect(&self, telegram_id: i64, server_id: &str) -> Result<ActionResponse, ApiError>;
    /// `POST /api/disconnect`
    async fn disconnect(&self, telegram_id: i64) -> Result<ActionResponse, ApiError>;
    /// `POST /api/subscribe`
    async fn subscribe(&self, telegram_id: i64, plan: Plan) -> Result<SubscribeResponse, ApiError>;
    /// `GET /api/user/{id}/stats`
    async fn user_stats(&self, telegram_id: i64) -> Result<UserStats, ApiError>;
}

#[async_trait(?Send)]
impl VpnApi for ApiClient {
    async fn authenticate(&self, identity: &Identity) -> Result<AuthResponse, ApiError> {
        self.post_json(AUTH_PATH, &AuthRequest::from(identity)).await
    }

    async fn list_servers(&self) -> Result<ServerList, ApiError> {
        self.get_json(SERVERS_PATH).await
    }

    async fn connect(&self, telegram_id: i64, server_id: &str) -> Result<ActionResponse, ApiError> {
        let body = ConnectRequest {
            telegram_id,
            server_id: server_id.to_string(),
        };
        self.post_json(CONNECT_PATH, &body).await
    }

    async fn disconnect(&self, telegram_id: i64) -> Result<ActionResponse, ApiError> {
        self.post_json(DISCONNECT_PATH, &DisconnectRequest { telegram_id }).await
    }

    async fn subscribe(&self, telegram_id: i64, plan: Plan) -> Result<SubscribeResponse, ApiError> {
        self.post_json(SUBSCRIBE_PATH, &SubscribeRequest::new(telegram_id, plan))
            .await
    }

    async fn user_stats(&self, telegram_id: i64) -> Result<UserStats, ApiError> {
        self.get_json(&user_stats_path(telegram_id)).await
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use axum::{extract::Path, http::StatusCode, routing::get, routing::post, Json, Router};
    use serde_json::{json, Value};

    async fn serve(router: Router) -> ApiClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        ApiClient::default().with_base_url(format!("http://{addr}"))
    }

    fn identity() -> Identity {
        Identity {
            id: 42,
            first_name: "Анна".into(),
            last_name: Some("Петрова".into()),
            username: Some("anna".into()),
            language_code: Some("ru".into()),
            is_premium: false,
        }
    }

    #[test]
    fn merge_headers_defaults_to_json() {
        let headers = merge_headers(&[]).unwrap();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), JSON_CONTENT_TYPE);
    }

    #[test]
    fn merge_headers_caller_wins_case_insensitively() {
        let extra = vec![
            ("content-type".to_string(), "text/plain".to_string()),
            ("X-Init-Data".to_string(), "query_id=1".to_string()),
        ];
        let headers = merge_headers(&extra).unwrap();
        assert_eq!(headers.get_all(CONTENT_TYPE).iter().count(), 1);
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "text/plain");
        assert_eq!(headers.get("x-init-data").unwrap(), "query_id=1");
    }

    #[test]
    fn merge_headers_rejects_invalid_names() {
        let extra = vec![("bad header".to_string(), "x".to_string())];
        assert!(matches!(merge_headers(&extra), Err(ApiError::Decode(_))));
    }

    #[test]
    fn url_joins_base_and_path() {
        let client = ApiClient::default().with_base_url("http://localhost:8000/");
        assert_eq!(client.url("/api/servers"), "http://localhost:8000/api/servers");
        assert_eq!(client.url("api/auth"), "http://localhost:8000/api/auth");

        let relative = ApiClient::default().with_base_url("");
        assert_eq!(relative.url("api/auth"), "/api/auth");
    }

    #[tokio::test]
    async fn every_operation_surfaces_http_status() {
        let client = serve(Router::new().fallback(|| async { StatusCode::SERVICE_UNAVAILABLE })).await;
        let expected = ApiError::Http { status: 503 };

        assert_eq!(client.authenticate(&identity()).await.unwrap_err(), expected);
        assert_eq!(client.list_servers().await.unwrap_err(), expected);
        assert_eq!(client.connect(42, "minsk-1").await.unwrap_err(), expected);
        assert_eq!(client.disconnect(42).await.unwrap_err(), expected);
        assert_eq!(client.subscribe(42, Plan::Monthly).await.unwrap_err(), expected);
        assert_eq!(client.user_stats(42).await.unwrap_err(), expected);
    }

    #[tokio::test]
    async fn connect_sends_json_body_and_header() {
        let router = Router::new().route(
            CONNECT_PATH,
            post(|headers: axum::http::HeaderMap, Json(body): Json<Value>| async move {
                let content_type = headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                assert_eq!(body, json!({"telegram_id": 42, "server_id": "minsk-1"}));
                Json(json!({"success": true, "message": content_type}))
            }),
        );
        let client = serve(router).await;

        let resp = client.connect(42, "minsk-1").await.unwrap();
        assert!(resp.success);
        assert_eq!(resp.message, JSON_CONTENT_TYPE);
    }

    #[tokio::test]
    async fn caller_headers_override_defaults_on_the_wire() {
        let router = Router::new().route(
            "/echo",
            post(|headers: axum::http::HeaderMap| async move {
                let values: Vec<String> = headers
                    .get_all("content-type")
                    .iter()
                    .filter_map(|v| v.to_str().ok().map(str::to_string))
                    .collect();
                Json(json!({ "content_type": values }))
            }),
        );
        let client = serve(router).await;

        let options = RequestOptions::post_json(&json!({}))
            .unwrap()
            .with_header("Content-Type", "application/vnd.matreshka+json");
        let echoed: Value = client.request("/echo", options).await.unwrap();
        assert_eq!(echoed["content_type"], json!(["application/vnd.matreshka+json"]));
    }

    #[tokio::test]
    async fn stats_use_id_path_segment() {
        let router = Router::new().route(
            "/api/user/{telegram_id}/stats",
            get(|Path(id): Path<i64>| async move {
                Json(json!({
                    "total_connections": id,
                    "total_time": 120,
                    "servers_used": 1,
                    "recent_connections": []
                }))
            }),
        );
        let client = serve(router).await;

        let stats = client.user_stats(7).await.unwrap();
        assert_eq!(stats.total_connections, 7);
        assert_eq!(stats.total_time, 120);
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let router = Router::new().route(SERVERS_PATH, get(|| async { "<html>oops</html>" }));
        let client = serve(router).await;

        assert!(matches!(client.list_servers().await, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiClient::default().with_base_url(format!("http://{addr}"));
        assert!(matches!(client.list_servers().await, Err(ApiError::Transport(_))));
    }
}
