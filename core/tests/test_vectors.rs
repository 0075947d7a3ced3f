//! Replay recorded HTTP exchanges from `test-vectors/` through the response
//! model and `handle_response`.
//!
//! Each case holds the raw status line and header lines as a server sent
//! them, the body, and the expected status, header lookups and pipeline
//! outcome. Comparing parsed JSON (not raw strings) avoids false negatives
//! from field ordering.

use sdk_core::{handle_response, HttpResponse};
use serde_json::Value;

#[test]
fn response_test_vectors() {
    let raw = include_str!("../../test-vectors/responses.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let head: Vec<&str> = case["head"]
            .as_array()
            .unwrap()
            .iter()
            .map(|line| line.as_str().unwrap())
            .collect();
        let body = case["body"].as_str().unwrap();
        let expected = &case["expected"];

        let response = HttpResponse::from_raw(head.as_slice(), body);

        // Status line and headers
        assert_eq!(
            u64::from(response.status()),
            expected["status"].as_u64().unwrap(),
            "{name}: status"
        );
        if let Some(headers) = expected["headers"].as_object() {
            for (header, value) in headers {
                assert_eq!(response.header(header), value.as_str(), "{name}: header {header}");
            }
        }
        if let Some(count) = expected["header_count"].as_u64() {
            assert_eq!(response.headers().len() as u64, count, "{name}: header count");
        }
        assert_eq!(response.body(), body, "{name}: body");

        // Pipeline outcome
        match (expected.get("ok"), expected.get("error")) {
            (Some(ok), None) => {
                let decoded = handle_response(&response).unwrap();
                assert_eq!(Value::Object(decoded), *ok, "{name}: decoded");
            }
            (None, Some(error)) => {
                let err = handle_response(&response).unwrap_err();
                assert_eq!(err.message(), error["message"].as_str().unwrap(), "{name}: message");
                assert_eq!(
                    u64::from(err.status_code()),
                    error["status_code"].as_u64().unwrap(),
                    "{name}: error status"
                );
                assert_eq!(err.response_body(), body, "{name}: error body");
            }
            _ => panic!("{name}: vector must have exactly one of ok/error"),
        }
    }
}
