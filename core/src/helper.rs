//! One JSON call with user feedback.
//!
//! # Design
//! `RequestHelper` wraps `ApiClient` and a `Transport` with the two side
//! effects every page wants: a busy indicator around the call and a
//! notification when it fails. Both are injected. A call is a single
//! attempt; the indicator is hidden exactly once after the outcome is known,
//! on every exit path, and failures are reported before being returned.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::busy::{BusyGuard, BusyIndicator, NoBusyIndicator};
use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::report::{ErrorReporter, TracingReporter};
use crate::transport::{Transport, UreqTransport};

pub struct RequestHelper<T = UreqTransport> {
    client: ApiClient,
    transport: T,
    busy: Arc<dyn BusyIndicator>,
    reporter: Arc<dyn ErrorReporter>,
}

impl RequestHelper<UreqTransport> {
    /// Helper for `config` over the default blocking transport.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(ApiClient::from_config(config), UreqTransport::new())
    }
}

impl<T: Transport> RequestHelper<T> {
    /// No busy indicator; failures are reported through `tracing`.
    pub fn new(client: ApiClient, transport: T) -> Self {
        Self {
            client,
            transport,
            busy: Arc::new(NoBusyIndicator),
            reporter: Arc::new(TracingReporter),
        }
    }

    pub fn with_busy_indicator(mut self, busy: impl BusyIndicator + 'static) -> Self {
        self.busy = Arc::new(busy);
        self
    }

    pub fn with_reporter(mut self, reporter: impl ErrorReporter + 'static) -> Self {
        self.reporter = Arc::new(reporter);
        self
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Call `endpoint` and return its JSON body, or `None` when the response
    /// has no content.
    pub fn call<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        method: HttpMethod,
        body: Option<&B>,
    ) -> Result<Option<Value>, ApiError> {
        self.call_json(endpoint, method, body)
    }

    /// Typed variant of [`RequestHelper::call`].
    pub fn call_json<R, B>(&self, endpoint: &str, method: HttpMethod, body: Option<&B>) -> Result<Option<R>, ApiError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let _busy = BusyGuard::new(self.busy.as_ref());
        tracing::debug!(%method, endpoint, "api call");

        let outcome = self
            .client
            .build_request(endpoint, method, body)
            .and_then(|request| self.transport.execute(request))
            .and_then(|response| self.client.parse_json(response));

        if let Err(err) = &outcome {
            tracing::error!(%method, endpoint, error = %err, "api call failed");
            self.reporter.report(err);
        }
        outcome
    }

    pub fn get(&self, endpoint: &str) -> Result<Option<Value>, ApiError> {
        self.call::<()>(endpoint, HttpMethod::Get, None)
    }

    pub fn post<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<Option<Value>, ApiError> {
        self.call(endpoint, HttpMethod::Post, Some(body))
    }

    pub fn put<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<Option<Value>, ApiError> {
        self.call(endpoint, HttpMethod::Put, Some(body))
    }

    pub fn delete(&self, endpoint: &str) -> Result<Option<Value>, ApiError> {
        self.call::<()>(endpoint, HttpMethod::Delete, None)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for RequestHelper<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestHelper")
            .field("client", &self.client)
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}
