//! The transport seam between `ApiClient` and the network.
//!
//! # Design
//! `Transport` has a single operation: execute an `HttpRequest` and return
//! whatever the server answered as an `HttpResponse`. A 4xx or 5xx is an
//! ordinary response here; classifying it is `handle_response`'s job. The
//! only failure a transport reports is "no response at all", as an
//! `HttpError` with status 0 and an empty body.
//!
//! `UreqTransport` is the default, blocking implementation. Tests substitute
//! their own `Transport` to script responses without a server.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use ureq::typestate::WithBody;
use ureq::RequestBuilder;

use crate::error::HttpError;
use crate::http::{HttpMethod, HttpRequest};
use crate::response::HttpResponse;
use crate::settings::DEFAULT_TIMEOUT;

/// Executes HTTP requests.
///
/// Implementations must be safe to share between threads and must not treat
/// non-2xx statuses as failures.
pub trait Transport: Send + Sync {
    /// Send `request` and return the server's response.
    ///
    /// # Errors
    ///
    /// Returns an `HttpError` with status 0 and an empty body when no
    /// response could be obtained.
    fn request(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn request(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).request(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn request(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).request(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn request(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).request(request)
    }
}

/// Blocking transport backed by a `ureq` agent.
///
/// Holds only the agent and its timeout, both fixed at construction.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    timeout: Duration,
}

impl UreqTransport {
    /// Create a transport whose requests give up after `timeout`.
    ///
    /// ureq's status-code-as-error behavior is disabled so 4xx/5xx responses
    /// come back as data.
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn execute(
        &self,
        request: &HttpRequest,
    ) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
        let url = request.url.as_str();
        let headers = request.headers.as_slice();
        match request.method {
            HttpMethod::Get => with_headers(self.agent.get(url), headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(url), headers).call(),
            HttpMethod::Post => send(with_headers(self.agent.post(url), headers), request),
            HttpMethod::Put => send(with_headers(self.agent.put(url), headers), request),
            HttpMethod::Patch => send(with_headers(self.agent.patch(url), headers), request),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Transport for UreqTransport {
    fn request(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut response = self.execute(request).map_err(|e| {
            warn!(
                method = %request.method,
                url = %request.url,
                error = %e,
                "request failed before a response arrived"
            );
            HttpError::connection_failed()
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                let value = value.to_str().ok()?;
                Some((name.as_str().trim().to_string(), value.trim().to_string()))
            })
            .collect();

        // No size cap; bytes that are not UTF-8 are replaced, not rejected.
        let bytes = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(|e| {
                warn!(
                    method = %request.method,
                    url = %request.url,
                    status,
                    error = %e,
                    "failed to read response body"
                );
                HttpError::connection_failed()
            })?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        debug!(
            method = %request.method,
            url = %request.url,
            status,
            bytes = body.len(),
            "response received"
        );
        Ok(HttpResponse::new(status, body, headers))
    }
}

fn with_headers<B>(
    mut builder: RequestBuilder<B>,
    headers: &[(String, String)],
) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send(
    builder: RequestBuilder<WithBody>,
    request: &HttpRequest,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match request.json_body() {
        Some(body) => builder.send(body),
        None => builder.send_empty(),
    }
}
