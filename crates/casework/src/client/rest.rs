use std::time::Duration;

use axum::body::Bytes;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use reqwest::{Method, RequestBuilder};
use serde_json::Value;

use crate::config::CaseApiConfig;

/// Failures raised by the outbound HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to build http client: {0}")]
    Build(String),
    #[error("{method} {path} failed: {source}")]
    Transport {
        method: &'static str,
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{method} {path} returned unexpected status {status}")]
    UpstreamStatus {
        method: &'static str,
        path: String,
        status: u16,
    },
    #[error("{method} {path} returned an undecodable body: {source}")]
    Decode {
        method: &'static str,
        path: String,
        #[source]
        source: reqwest::Error,
    },
}

/// A streamed upstream response forwarded to the caller chunk by chunk.
pub struct PipedResponse {
    pub content_type: Option<String>,
    pub body: BoxStream<'static, Result<Bytes, ClientError>>,
}

impl std::fmt::Debug for PipedResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipedResponse")
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// Authenticated wrapper over the remote case-management API.
///
/// Every request carries the caller's bearer token; the service-name
/// header is attached only when one is configured.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    service_name: Option<String>,
}

impl RestClient {
    pub fn new(config: &CaseApiConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|err| ClientError::Build(err.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            service_name: config.service_name.clone(),
        })
    }

    fn request(&self, method: Method, path: &str, token: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        let mut builder = self.http.request(method, url).bearer_auth(token);
        if let Some(name) = &self.service_name {
            builder = builder.header("X-Service-Name", name);
        }
        builder
    }

    pub async fn get(&self, path: &str, token: &str) -> Result<Value, ClientError> {
        self.exchange("GET", self.request(Method::GET, path, token), path)
            .await
    }

    pub async fn post(&self, path: &str, token: &str, body: &Value) -> Result<Value, ClientError> {
        let builder = self
            .request(Method::POST, path, token)
            .json(&sanitize_body(body));
        self.exchange("POST", builder, path).await
    }

    pub async fn put(&self, path: &str, token: &str, body: &Value) -> Result<Value, ClientError> {
        let builder = self
            .request(Method::PUT, path, token)
            .json(&sanitize_body(body));
        self.exchange("PUT", builder, path).await
    }

    async fn exchange(
        &self,
        method: &'static str,
        builder: RequestBuilder,
        path: &str,
    ) -> Result<Value, ClientError> {
        let response = builder.send().await.map_err(|source| ClientError::Transport {
            method,
            path: path.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UpstreamStatus {
                method,
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        if status == reqwest::StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        response.json().await.map_err(|source| ClientError::Decode {
            method,
            path: path.to_string(),
            source,
        })
    }

    /// Forwards a remote binary response to the caller without buffering.
    /// A non-2xx upstream is logged with the method, path, and status,
    /// then surfaced as an error; it is always fatal to the request.
    pub async fn pipe(&self, path: &str, token: &str) -> Result<PipedResponse, ClientError> {
        let response = self
            .request(Method::GET, path, token)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                method: "GET",
                path: path.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(
                method = "GET",
                path,
                status = status.as_u16(),
                "upstream refused piped download"
            );
            return Err(ClientError::UpstreamStatus {
                method: "GET",
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let path = path.to_string();
        let body = response
            .bytes_stream()
            .map_err(move |source| ClientError::Transport {
                method: "GET",
                path: path.clone(),
                source,
            })
            .boxed();

        Ok(PipedResponse { content_type, body })
    }
}

/// Drops `null` and empty-string members from an outgoing JSON body so
/// partially-filled forms round-trip cleanly through the remote API.
pub fn sanitize_body(body: &Value) -> Value {
    match body {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, value)| !matches!(value, Value::Null))
                .filter(|(_, value)| !matches!(value, Value::String(text) if text.is_empty()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        ),
        other => other.clone(),
    }
}
