//! HTTP response assertions.
//!
//! Provides assertion utilities for testing HTTP responses.

use axum_test::TestResponse;
use serde_json::Value;

/// Asserts that the response has the expected status code.
pub fn assert_status(response: &TestResponse, expected: u16) {
    let actual = response.status_code().as_u16();
    assert_eq!(
        actual,
        expected,
        "Expected status {}, got {}: {}",
        expected,
        actual,
        response.text()
    );
}

/// Asserts that the response has a Location header and returns it.
pub fn assert_location(response: &TestResponse) -> String {
    response
        .headers()
        .get("location")
        .expect("Expected Location header")
        .to_str()
        .expect("Location header is not text")
        .to_string()
}

/// Parses the `X-Pagination` header.
pub fn pagination(response: &TestResponse) -> Value {
    let raw = response
        .headers()
        .get("x-pagination")
        .expect("Expected X-Pagination header")
        .to_str()
        .expect("X-Pagination header is not text");
    serde_json::from_str(raw).expect("X-Pagination header is not JSON")
}

/// Asserts the `Allow` header.
pub fn assert_allow(response: &TestResponse, expected: &str) {
    let allow = response
        .headers()
        .get("allow")
        .expect("Expected Allow header")
        .to_str()
        .expect("Allow header is not text");
    assert_eq!(allow, expected);
}

/// Asserts a problem body with the given status.
pub fn assert_problem(response: &TestResponse, expected: u16) -> Value {
    assert_status(response, expected);
    let body: Value = response.json();
    assert_eq!(body["status"], expected);
    assert!(body["title"].is_string(), "Problem body lacks a title");
    body
}

/// Asserts a 422 whose errors include `member`, returning its messages.
pub fn assert_validation_error(response: &TestResponse, member: &str) -> Vec<String> {
    let body = assert_problem(response, 422);
    let messages = body["errors"][member]
        .as_array()
        .unwrap_or_else(|| panic!("No validation errors for '{}': {}", member, body));
    messages
        .iter()
        .map(|m| m.as_str().unwrap_or_default().to_string())
        .collect()
}

/// Returns the `rel` values of a links array.
pub fn relations(links: &Value) -> Vec<String> {
    links
        .as_array()
        .expect("Expected a links array")
        .iter()
        .map(|l| l["rel"].as_str().unwrap_or_default().to_string())
        .collect()
}

/// Returns the names of an item list.
pub fn names(items: &Value) -> Vec<String> {
    items
        .as_array()
        .expect("Expected an array")
        .iter()
        .map(|c| c["name"].as_str().unwrap_or_default().to_string())
        .collect()
}
