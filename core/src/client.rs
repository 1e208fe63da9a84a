//! Request construction, transport and response resolution for the catalog
//! API.
//!
//! # Design
//! Every endpoint funnels into the same three steps:
//! `build_request` (pure) → `execute` (the only network I/O) →
//! `parse_response` (pure, never fails). `call` chains them and resolves to a
//! `Result`, so a transport failure is observable instead of silently
//! dropped. `call_with_callback` keeps a fire-and-forget surface on top of
//! that for hosts that prefer callbacks.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::query::{build_query, QueryParam};
use crate::types::ApiResult;

/// Receives the outcome of a request started with `call_with_callback`.
pub type Callback = Box<dyn FnOnce(Result<ApiResult, ApiError>) + Send + 'static>;

/// Async client for the catalog API.
///
/// Cloning is cheap: the configuration is shared and `reqwest::Client`
/// is reference counted internally.
#[derive(Debug, Clone)]
pub struct SpigetClient {
    config: Arc<ClientConfig>,
    http: reqwest::Client,
}

impl SpigetClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.timeout())
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| ApiError::InvalidConfig(e.to_string()))?;
        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the GET request for `path` (relative to the version prefix)
    /// with `params` appended in order.
    pub fn build_request(&self, path: &str, params: &[QueryParam]) -> Result<HttpRequest, ApiError> {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            return Err(ApiError::MissingArgument("path"));
        }
        let full_path = format!("/{}/{path}{}", self.config.version, build_query(params));
        Ok(HttpRequest {
            url: format!("{}{full_path}", self.config.base_url()),
            path: full_path,
            headers: vec![("User-Agent".to_string(), self.config.user_agent.clone())],
        })
    }

    pub fn parse_response(&self, response: HttpResponse) -> ApiResult {
        ApiResult::from_body(response.body)
    }

    /// Perform the GET and buffer the whole body, chunk by chunk in arrival
    /// order. Non-2xx statuses, redirects included, are returned as data.
    pub async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self.http.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let mut response = builder.send().await?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
                (name.as_str().to_string(), value)
            })
            .collect();

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            body.extend_from_slice(&chunk);
        }

        Ok(HttpResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }

    /// Issue one GET for `path` and resolve the body as JSON or raw text.
    pub async fn call(&self, path: &str, params: &[QueryParam]) -> Result<ApiResult, ApiError> {
        let request = self.build_request(path, params)?;
        self.send(request).await
    }

    /// Start a request in the background and hand its outcome to `callback`
    /// exactly once. Without a callback the outcome is discarded.
    ///
    /// Argument errors are returned immediately and nothing is spawned. Must
    /// be called from within a tokio runtime.
    pub fn call_with_callback(
        &self,
        path: &str,
        params: &[QueryParam],
        callback: Option<Callback>,
    ) -> Result<JoinHandle<()>, ApiError> {
        let request = self.build_request(path, params)?;
        self.spawn(request, callback)
    }

    pub(crate) fn spawn(&self, request: HttpRequest, callback: Option<Callback>) -> Result<JoinHandle<()>, ApiError> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| ApiError::NoRuntime)?;
        let client = self.clone();
        Ok(runtime.spawn(async move {
            let result = client.send(request).await;
            if let Some(callback) = callback {
                callback(result);
            }
        }))
    }

    pub(crate) async fn send(&self, request: HttpRequest) -> Result<ApiResult, ApiError> {
        match self.execute(&request).await {
            Ok(response) => {
                debug!(path = %request.path, status = response.status, "catalog response");
                Ok(self.parse_response(response))
            }
            Err(err) => {
                warn!(path = %request.path, error = %err, "catalog request failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> SpigetClient {
        SpigetClient::new(ClientConfig::new("localhost", 3000).with_user_agent("test-agent/1.0")).unwrap()
    }

    #[test]
    fn build_request_without_params() {
        let req = client().build_request("resources/WorldEdit", &[]).unwrap();
        assert_eq!(req.path, "/v1/resources/WorldEdit");
        assert_eq!(req.url, "http://localhost:3000/v1/resources/WorldEdit");
        assert_eq!(req.headers, vec![("User-Agent".to_string(), "test-agent/1.0".to_string())]);
    }

    #[test]
    fn build_request_with_params() {
        let params = [QueryParam::new("size", 5u32), QueryParam::new("page", 2u32)];
        let req = client().build_request("authors", &params).unwrap();
        assert_eq!(req.path, "/v1/authors?size=5&page=2");
    }

    #[test]
    fn leading_slash_is_tolerated() {
        let req = client().build_request("/categories", &[]).unwrap();
        assert_eq!(req.path, "/v1/categories");
    }

    #[test]
    fn empty_path_is_rejected() {
        let err = client().build_request("", &[]).unwrap_err();
        assert!(matches!(err, ApiError::MissingArgument("path")));
        let err = client().build_request("/", &[]).unwrap_err();
        assert!(matches!(err, ApiError::MissingArgument("path")));
    }

    #[test]
    fn custom_version_prefix() {
        let config = ClientConfig::new("localhost", 3000).with_version("v2");
        let client = SpigetClient::new(config).unwrap();
        let req = client.build_request("categories", &[]).unwrap();
        assert_eq!(req.path, "/v2/categories");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = SpigetClient::new(ClientConfig::new(" ", 3000)).unwrap_err();
        assert!(matches!(err, ApiError::InvalidConfig(_)));
    }

    #[test]
    fn parse_response_json() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: r#"{"id":"123","name":"WorldEdit"}"#.to_string(),
        };
        let result = client().parse_response(response);
        assert_eq!(result, ApiResult::Json(json!({"id": "123", "name": "WorldEdit"})));
    }

    #[test]
    fn parse_response_ignores_status() {
        let response = HttpResponse {
            status: 404,
            headers: Vec::new(),
            body: "<html>Not Found</html>".to_string(),
        };
        let result = client().parse_response(response);
        assert_eq!(result, ApiResult::Text("<html>Not Found</html>".to_string()));
    }

    #[test]
    fn callback_outside_runtime_fails() {
        let err = client()
            .call_with_callback("categories", &[], None)
            .unwrap_err();
        assert!(matches!(err, ApiError::NoRuntime));
    }

    #[test]
    fn callback_with_bad_path_fails_before_runtime_check() {
        let err = client().call_with_callback("", &[], None).unwrap_err();
        assert!(matches!(err, ApiError::MissingArgument("path")));
    }
}
