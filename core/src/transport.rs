//! Executes `HttpRequest` values over the network.
//!
//! # Design
//! `Transport` is the seam between the sans-IO client and real I/O. Hosts
//! that already own an HTTP stack implement it themselves; `UreqTransport`
//! is the blocking default. Non-2xx statuses are returned as data so the
//! client can derive the error message from the body. A body present on the
//! request is sent whatever the method.

use ureq::Agent;

use crate::error::ApiError;
use crate::http::{reason_phrase, HttpMethod, HttpRequest, HttpResponse};

/// Performs one HTTP round-trip. A status code of any value is a successful
/// round-trip; only failures to obtain a response are errors.
pub trait Transport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a `ureq` agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;
        let agent = &self.agent;

        let result = match method {
            HttpMethod::Get | HttpMethod::Delete | HttpMethod::Head | HttpMethod::Options => {
                let builder = match method {
                    HttpMethod::Get => agent.get(&url),
                    HttpMethod::Delete => agent.delete(&url),
                    HttpMethod::Head => agent.head(&url),
                    _ => agent.options(&url),
                };
                let builder = with_headers(builder, &headers);
                match body {
                    Some(body) => builder.force_send_body().send(body.as_bytes()),
                    None => builder.call(),
                }
            }
            HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch => {
                let builder = match method {
                    HttpMethod::Post => agent.post(&url),
                    HttpMethod::Put => agent.put(&url),
                    _ => agent.patch(&url),
                };
                let builder = with_headers(builder, &headers);
                match body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        // error pages are not always UTF-8; decode lossily like a browser would
        let bytes = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status
                .canonical_reason()
                .unwrap_or_else(|| reason_phrase(status.as_u16()))
                .to_string(),
            headers,
            body,
        })
    }
}
