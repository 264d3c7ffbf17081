use std::{collections::HashMap, sync::Arc};

use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value as Json};

use crate::{
    common::HttpMethod,
    config::GatewayConfig,
    envelope::ResponseError,
    error::{ConfigError, RequestError},
};

/// Sends JSON requests to the credential backend and normalizes its failures.
///
/// The gateway holds no per-request state, so one instance can serve any
/// number of concurrent calls. Timeouts and connection reuse belong to the
/// underlying [`Client`].
#[derive(uniffi::Object)]
pub struct RequestGateway {
    client: Client,
    host: String,
}

impl RequestGateway {
    /// Builds a gateway and its HTTP client from configuration.
    pub fn from_config(config: GatewayConfig) -> Result<Self, ConfigError> {
        let client = config.build_client()?;
        Ok(Self::with_client(config, client))
    }

    /// Builds a gateway around a client the caller has already configured.
    pub fn with_client(config: GatewayConfig, client: Client) -> Self {
        Self {
            client,
            host: config.host().to_string(),
        }
    }

    /// Sends a request and returns the parsed JSON body.
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `path` - Root-relative path, appended to the configured host
    /// * `body` - Serialized as the JSON request body for every method,
    ///   including GET. No body is sent when `None`.
    ///
    /// # Returns
    /// * The response body, unchanged, when the status is below 400 and the
    ///   body carries no `errors`
    /// * [`RequestError::HttpStatus`] for statuses of 400 and above
    /// * [`RequestError::Backend`] built from the first entry of a non-empty
    ///   `errors` list
    /// * [`RequestError::Parse`] when the body is not JSON, whatever the status
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Map<String, Json>>,
    ) -> Result<Json, RequestError> {
        if !path.starts_with('/') {
            return Err(RequestError::InvalidPath(path.to_string()));
        }

        let url = format!("{}{}", self.host, path);

        tracing::info!(%method, %url, "calling backend");
        tracing::debug!(
            body = %body
                .and_then(|body| serde_json::to_string(body).ok())
                .unwrap_or_default(),
            "request body"
        );

        let mut request = self
            .client
            .request(method.into(), &url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(%method, %url, "request failed: {e}");
            RequestError::Transport(e.to_string())
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            tracing::warn!(%url, status = status.as_u16(), "failed to read response: {e}");
            RequestError::Transport(e.to_string())
        })?;

        interpret_response(status, &bytes)
    }

    /// Sends a request and narrows the body to `T`.
    ///
    /// Failures of the request itself are reported exactly as by
    /// [`RequestGateway::request`]; a body that parses but does not match `T`
    /// yields [`RequestError::UnexpectedShape`].
    pub async fn send_as<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Map<String, Json>>,
    ) -> Result<T, RequestError> {
        let json = self.request(method, path, body).await?;
        serde_json::from_value(json).map_err(RequestError::unexpected_shape)
    }
}

#[uniffi::export(async_runtime = "tokio")]
impl RequestGateway {
    /// Creates a new RequestGateway instance
    ///
    /// # Arguments
    /// * `host` - The base URL of the credential backend
    #[uniffi::constructor]
    pub fn new(host: String) -> Result<Arc<Self>, ConfigError> {
        Ok(Arc::new(Self::from_config(GatewayConfig::new(host)?)?))
    }

    pub fn host(&self) -> String {
        self.host.clone()
    }

    /// Sends a request to the backend. See [`RequestGateway::request`].
    pub async fn send(
        &self,
        method: HttpMethod,
        path: String,
        body: Option<HashMap<String, Json>>,
    ) -> Result<Json, RequestError> {
        let body: Option<Map<String, Json>> = body.map(|body| body.into_iter().collect());
        self.request(method, &path, body.as_ref()).await
    }
}

/// Applies the backend's failure rules to a fully read response.
fn interpret_response(status: StatusCode, body: &[u8]) -> Result<Json, RequestError> {
    let json: Json = serde_json::from_slice(body).map_err(|e| {
        tracing::warn!(status = status.as_u16(), "response is not valid JSON: {e}");
        RequestError::Parse(e.to_string())
    })?;

    if status.as_u16() >= 400 {
        tracing::warn!(status = status.as_u16(), "failed with {json}");
        return Err(RequestError::HttpStatus {
            status: status.as_u16(),
            message: status_message(&json),
        });
    }

    if let Some(errors) = json.get("errors").and_then(Json::as_array) {
        if let Some(first) = errors.first() {
            let error = ResponseError {
                error_code: text_field(first, "errorCode"),
                error_message: text_field(first, "errorMessage"),
            };
            tracing::warn!(
                error_code = %error.error_code,
                dropped = errors.len() - 1,
                "failed with errorMessage: {}",
                error.error_message
            );
            return Err(error.into());
        }
    }

    Ok(json)
}

/// The body's `message`, else its `error`, skipping falsy values.
fn status_message(json: &Json) -> Option<String> {
    ["message", "error"]
        .into_iter()
        .filter_map(|key| json.get(key))
        .find(|value| is_truthy(value))
        .map(|value| match value {
            Json::String(s) => s.clone(),
            other => other.to_string(),
        })
}

fn is_truthy(value: &Json) -> bool {
    match value {
        Json::Null => false,
        Json::Bool(b) => *b,
        Json::Number(n) => n.as_f64().map_or(true, |n| n != 0.0),
        Json::String(s) => !s.is_empty(),
        Json::Array(_) | Json::Object(_) => true,
    }
}

fn text_field(value: &Json, key: &str) -> String {
    match value.get(key) {
        Some(Json::String(s)) => s.clone(),
        Some(Json::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
