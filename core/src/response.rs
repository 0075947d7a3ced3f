//! Normalized HTTP response.
//!
//! # Design
//! `HttpResponse` is produced by a `Transport` and consumed by
//! `handle_response`. Fields are private so a response cannot be altered
//! after the transport hands it over. Headers keep the order the server sent
//! them in; lookups are case-insensitive and return the first match.

use serde_json::Value;

use crate::JsonObject;

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    status: u16,
    body: String,
    headers: Vec<(String, String)>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>, headers: Vec<(String, String)>) -> Self {
        Self {
            status,
            body: body.into(),
            headers,
        }
    }

    /// Rebuild a response from a raw HTTP head (status line followed by
    /// header lines) and a body.
    pub fn from_raw<S: AsRef<str>>(head: &[S], body: impl Into<String>) -> Self {
        Self::new(parse_status_code(head), body, parse_header_lines(head))
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// 2xx.
    pub fn is_successful(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 4xx.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// 5xx and above.
    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }

    /// Decode the body as a JSON object.
    ///
    /// Returns `None` for an empty body, invalid JSON, or JSON whose top level
    /// is not an object.
    pub fn json(&self) -> Option<JsonObject> {
        decode_object(&self.body)
    }

    /// Case-insensitive header lookup; the first match wins.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Decode `text` as a top-level JSON object.
pub(crate) fn decode_object(text: &str) -> Option<JsonObject> {
    if text.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Extract the status code from the first line of a raw HTTP head, e.g.
/// `HTTP/1.1 200 OK`. Anything else yields 0.
pub fn parse_status_code<S: AsRef<str>>(head: &[S]) -> u16 {
    let Some(first) = head.first() else {
        return 0;
    };
    let first: &str = first.as_ref();
    let mut parts = first.split_whitespace();
    let version_ok = parts
        .next()
        .and_then(|proto| proto.strip_prefix("HTTP/"))
        .is_some_and(|version| !version.is_empty());
    if !version_ok {
        return 0;
    }
    // Leading digits only: "200OK" still reads as 200.
    parts
        .next()
        .map(|token| {
            let end = token
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(token.len());
            &token[..end]
        })
        .and_then(|code| code.parse().ok())
        .unwrap_or(0)
}

/// Parse raw header lines into name/value pairs.
///
/// Status lines are skipped. A line is kept only if it contains a colon; the
/// name and value on either side of the first colon are trimmed.
pub fn parse_header_lines<S: AsRef<str>>(head: &[S]) -> Vec<(String, String)> {
    let mut headers = Vec::new();
    for line in head {
        let line: &str = line.as_ref();
        if line.starts_with("HTTP/") {
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> Vec<(String, String)> {
        vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("X-Request-Id".to_string(), "12345".to_string()),
        ]
    }

    #[test]
    fn successful_response() {
        let response = HttpResponse::new(200, r#"{"status": "ok"}"#, Vec::new());
        assert!(response.is_successful());
        assert!(!response.is_client_error());
        assert!(!response.is_server_error());
        assert_eq!(response.status(), 200);
    }

    #[test]
    fn client_error_response() {
        let response = HttpResponse::new(404, r#"{"error": "not found"}"#, Vec::new());
        assert!(!response.is_successful());
        assert!(response.is_client_error());
        assert!(!response.is_server_error());
    }

    #[test]
    fn server_error_response() {
        let response = HttpResponse::new(503, "", Vec::new());
        assert!(!response.is_successful());
        assert!(!response.is_client_error());
        assert!(response.is_server_error());
    }

    #[test]
    fn redirect_is_neither_success_nor_error() {
        let response = HttpResponse::new(301, "", Vec::new());
        assert!(!response.is_successful());
        assert!(!response.is_client_error());
        assert!(!response.is_server_error());
    }

    #[test]
    fn json_decodes_object() {
        let response = HttpResponse::new(200, r#"{"name": "test", "value": 123}"#, Vec::new());
        let json = response.json().unwrap();
        assert_eq!(json["name"], "test");
        assert_eq!(json["value"], 123);
    }

    #[test]
    fn json_none_for_empty_body() {
        assert!(HttpResponse::new(204, "", Vec::new()).json().is_none());
    }

    #[test]
    fn json_none_for_invalid_json() {
        assert!(HttpResponse::new(200, "not valid json", Vec::new()).json().is_none());
    }

    #[test]
    fn json_none_for_non_object() {
        assert!(HttpResponse::new(200, "[1, 2, 3]", Vec::new()).json().is_none());
        assert!(HttpResponse::new(200, "42", Vec::new()).json().is_none());
        assert!(HttpResponse::new(200, r#""text""#, Vec::new()).json().is_none());
    }

    #[test]
    fn header_lookup_ignores_case() {
        let response = HttpResponse::new(200, "", headers());
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.header("CONTENT-TYPE"), Some("application/json"));
        assert_eq!(response.header("X-Request-Id"), Some("12345"));
        assert!(response.header("Non-Existent").is_none());
    }

    #[test]
    fn header_lookup_returns_first_match() {
        let response = HttpResponse::new(
            200,
            "",
            vec![
                ("Set-Cookie".to_string(), "a=1".to_string()),
                ("set-cookie".to_string(), "b=2".to_string()),
            ],
        );
        assert_eq!(response.header("SET-COOKIE"), Some("a=1"));
    }

    #[test]
    fn status_code_from_status_line() {
        assert_eq!(parse_status_code(&["HTTP/1.1 200 OK"]), 200);
        assert_eq!(parse_status_code(&["HTTP/1.0 404 Not Found"]), 404);
        assert_eq!(parse_status_code(&["HTTP/2 503"]), 503);
    }

    #[test]
    fn status_code_takes_leading_digits() {
        assert_eq!(parse_status_code(&["HTTP/1.1 200OK"]), 200);
        assert_eq!(parse_status_code(&["HTTP/1.1 404-Not-Found"]), 404);
        assert_eq!(parse_status_code(&["HTTP/1.1 OK200"]), 0);
    }

    #[test]
    fn status_code_defaults_to_zero() {
        let empty: [&str; 0] = [];
        assert_eq!(parse_status_code(&empty), 0);
        assert_eq!(parse_status_code(&["Content-Type: text/html"]), 0);
        assert_eq!(parse_status_code(&["HTTP/1.1 abc"]), 0);
        assert_eq!(parse_status_code(&["HTTP/1.1"]), 0);
    }

    #[test]
    fn header_lines_are_split_and_trimmed() {
        let head = [
            "HTTP/1.1 200 OK",
            "Content-Type:  application/json ",
            "Location: https://example.com:8443/next",
            "no-colon-here",
        ];
        assert_eq!(
            parse_header_lines(&head),
            vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Location".to_string(), "https://example.com:8443/next".to_string()),
            ]
        );
    }

    #[test]
    fn from_raw_combines_status_and_headers() {
        let response = HttpResponse::from_raw(
            &["HTTP/1.1 201 Created", "X-Request-Id: abc"],
            r#"{"id": 7}"#,
        );
        assert_eq!(response.status(), 201);
        assert_eq!(response.header("x-request-id"), Some("abc"));
        assert_eq!(response.json().unwrap()["id"], 7);
    }
}
