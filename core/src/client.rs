//! Base API client and response handling.
//!
//! # Design
//! `ApiClient` holds an immutable `Config` and a `Transport`. SDKs build on
//! it by composition: wrap an `ApiClient` in a struct and add one method per
//! endpoint that calls a verb helper. Each helper composes an `HttpRequest`
//! (URL, default + caller headers, JSON body), runs it through the
//! transport, and pipes the response through `handle_response`.
//!
//! `handle_response` is the single place that decides success or failure.
//! Status classification comes before body inspection, so a 500 with a
//! malformed body is still a server error rather than a decode error.

use serde_json::Value;
use tracing::{debug, info_span, warn};

use crate::config::Config;
use crate::error::HttpError;
use crate::http::{HttpMethod, HttpRequest};
use crate::response::HttpResponse;
use crate::transport::{Transport, UreqTransport};
use crate::JsonObject;

const ACCEPT: &str = "Accept";
const CONTENT_TYPE: &str = "Content-Type";
const APPLICATION_JSON: &str = "application/json";

/// Synchronous base client shared by SDK endpoint methods.
#[derive(Debug, Clone)]
pub struct ApiClient<T: Transport = UreqTransport> {
    config: Config,
    transport: T,
}

impl ApiClient {
    /// Client using the default `UreqTransport` (30 second timeout).
    pub fn new(config: Config) -> Self {
        Self::with_transport(config, UreqTransport::default())
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// GET `path`, appending `query` as a urlencoded query string when it is
    /// non-empty.
    ///
    /// # Errors
    ///
    /// See [`handle_response`]; also returns the transport's connection
    /// failure.
    pub fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<JsonObject, HttpError> {
        let request = self.build_request(HttpMethod::Get, path, query, headers, JsonObject::new());
        self.send(&request)
    }

    /// POST `payload` as JSON to `path`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub fn post_json(
        &self,
        path: &str,
        payload: JsonObject,
        headers: &[(&str, &str)],
    ) -> Result<JsonObject, HttpError> {
        let request = self.build_request(HttpMethod::Post, path, &[], headers, payload);
        self.send(&request)
    }

    /// PUT `payload` as JSON to `path`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub fn put_json(
        &self,
        path: &str,
        payload: JsonObject,
        headers: &[(&str, &str)],
    ) -> Result<JsonObject, HttpError> {
        let request = self.build_request(HttpMethod::Put, path, &[], headers, payload);
        self.send(&request)
    }

    /// PATCH `payload` as JSON to `path`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub fn patch_json(
        &self,
        path: &str,
        payload: JsonObject,
        headers: &[(&str, &str)],
    ) -> Result<JsonObject, HttpError> {
        let request = self.build_request(HttpMethod::Patch, path, &[], headers, payload);
        self.send(&request)
    }

    /// DELETE `path`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub fn delete(&self, path: &str, headers: &[(&str, &str)]) -> Result<JsonObject, HttpError> {
        let request = self.build_request(HttpMethod::Delete, path, &[], headers, JsonObject::new());
        self.send(&request)
    }

    /// Compose a request against the configured base URI.
    ///
    /// Every request gets `Accept: application/json`; POST, PUT and PATCH
    /// also get `Content-Type: application/json`. Caller headers replace a
    /// default with the same name (compared case-insensitively).
    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, &str)],
        headers: &[(&str, &str)],
        body: JsonObject,
    ) -> HttpRequest {
        let mut url = format!("{}{}", self.config.base_uri(), path);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&encode_query(query));
        }

        let mut request = HttpRequest::new(method, url);
        if method.carries_body() {
            request.headers.push((CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string()));
        }
        request.headers.push((ACCEPT.to_string(), APPLICATION_JSON.to_string()));
        for (name, value) in headers {
            merge_header(&mut request.headers, name, value);
        }
        request.body = body;
        request
    }

    /// Execute `request` and classify the response.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub fn send(&self, request: &HttpRequest) -> Result<JsonObject, HttpError> {
        let span = info_span!("api_request", method = %request.method, url = %request.url);
        let _enter = span.enter();

        debug!("sending request");
        let response = self.transport.request(request)?;
        handle_response(&response)
    }
}

/// Classify `response` into decoded data or an `HttpError`.
///
/// First match wins:
/// 1. status >= 500: `Server error (HTTP {status})`
/// 2. status >= 400: `Client error (HTTP {status})`
/// 3. empty body: an empty object
/// 4. body is not a JSON object: `Unable to decode response as JSON`
/// 5. the decoded object
///
/// # Errors
///
/// Every error carries the response's status code and raw body.
pub fn handle_response(response: &HttpResponse) -> Result<JsonObject, HttpError> {
    let status = response.status();
    let fail = |message: String| {
        warn!(status, %message, "request failed");
        Err(HttpError::new(message, status, response.body()))
    };

    if status >= 500 {
        return fail(format!("Server error (HTTP {status})"));
    }
    if status >= 400 {
        return fail(format!("Client error (HTTP {status})"));
    }
    if response.body().is_empty() {
        debug!(status, "empty response body");
        return Ok(JsonObject::new());
    }

    match serde_json::from_str::<Value>(response.body()) {
        Ok(Value::Object(map)) => {
            debug!(status, fields = map.len(), "decoded response");
            Ok(map)
        }
        _ => fail("Unable to decode response as JSON".to_string()),
    }
}

/// Insert `name: value`, replacing any header with the same name.
fn merge_header(headers: &mut Vec<(String, String)>, name: &str, value: &str) {
    headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
    headers.push((name.to_string(), value.to_string()));
}

/// Encode `pairs` as `application/x-www-form-urlencoded`.
fn encode_query(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 3);
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char);
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}
