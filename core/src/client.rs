//! Stateless request builder and response parser for the shop API.
//!
//! # Design
//! `ApiClient` holds only the origin and the `/api` prefix. A call is split
//! into `build_request`, which produces an `HttpRequest`, and
//! `parse_response`, which turns an `HttpResponse` into the call outcome.
//! The round-trip itself is the `Transport`'s job, so everything here is
//! deterministic and testable without a server.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub const CONTENT_TYPE: &str = "Content-Type";
pub const ACCEPT: &str = "Accept";
pub const APPLICATION_JSON: &str = "application/json";

/// Builds requests against `<origin><prefix>/<endpoint>` and decodes their
/// responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClient {
    origin: String,
    api_prefix: String,
}

impl ApiClient {
    /// Client for `origin` with the default `/api` prefix.
    pub fn new(origin: &str) -> Self {
        Self::from_config(&ClientConfig::new(origin))
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        let prefix = config.api_prefix.trim_matches('/');
        Self {
            origin: config.origin.trim_end_matches('/').to_string(),
            api_prefix: if prefix.is_empty() {
                String::new()
            } else {
                format!("/{prefix}")
            },
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Absolute URL for `endpoint`. Leading slashes on the endpoint collapse
    /// to exactly one.
    pub fn api_url(&self, endpoint: &str) -> String {
        let endpoint = endpoint.trim_start_matches('/');
        format!("{}{}/{endpoint}", self.origin, self.api_prefix)
    }

    /// JSON request for `endpoint`. `body`, when present, is serialized as
    /// the request payload for any method except GET and HEAD, which reject
    /// it.
    pub fn build_request<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        method: HttpMethod,
        body: Option<&T>,
    ) -> Result<HttpRequest, ApiError> {
        if body.is_some() && matches!(method, HttpMethod::Get | HttpMethod::Head) {
            return Err(ApiError::InvalidRequest(format!("{method} request cannot have a body")));
        }
        let body = body
            .map(|b| serde_json::to_string(b).map_err(|e| ApiError::Serialization(e.to_string())))
            .transpose()?;
        Ok(HttpRequest {
            method,
            url: self.api_url(endpoint),
            headers: vec![
                (CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string()),
                (ACCEPT.to_string(), APPLICATION_JSON.to_string()),
            ],
            body,
        })
    }

    /// Decode a response into the call outcome.
    ///
    /// `Ok(None)` for 204 or an explicit `Content-Length: 0`, whatever the
    /// body holds. A missing `Content-Length` is not treated as empty.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Option<Value>, ApiError> {
        self.parse_json(response)
    }

    /// Typed variant of [`ApiClient::parse_response`].
    pub fn parse_json<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<Option<T>, ApiError> {
        check_status(&response)?;
        if is_empty_response(&response) {
            return Ok(None);
        }
        serde_json::from_str(&response.body)
            .map(Some)
            .map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}

fn is_empty_response(response: &HttpResponse) -> bool {
    response.status == 204 || response.header("Content-Length") == Some("0")
}

/// Map a non-2xx response to `RequestFailure` with the derived message.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::RequestFailure {
        status: response.status,
        message: failure_message(response),
    })
}

/// Message for a failed response: the body's `message` or `error` field when
/// it is a JSON object, the raw text when it is not JSON, and
/// `"<status> - <statusText>"` when neither yields anything.
pub fn failure_message(response: &HttpResponse) -> String {
    let fallback = || response.status_line();
    match serde_json::from_str::<Value>(&response.body) {
        Ok(Value::Object(fields)) => ["message", "error"]
            .iter()
            .filter_map(|key| fields.get(*key))
            .find_map(truthy_text)
            .unwrap_or_else(fallback),
        Ok(Value::Null) => response.body.clone(),
        Ok(_) => fallback(),
        Err(_) if response.body.is_empty() => fallback(),
        Err(_) => response.body.clone(),
    }
}

/// Text of a JSON field that counts as set: non-empty strings verbatim,
/// non-zero numbers, `true`, arrays and objects as JSON text.
///
/// Arrays and objects keep their JSON form (`["name too short"]`) rather
/// than a browser's string coercion, which would flatten an array to
/// `name too short` and an object to `[object Object]`.
fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
