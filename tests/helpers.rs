//! Shared helpers for integration tests: JSON DoH mock endpoints.

#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dns_sentry::resolver::ResolverEndpoint;

/// Builds a JSON DoH body with the given DNS status and A-record values.
pub fn doh_body(status: i32, values: &[&str]) -> Value {
    doh_body_typed(status, &values.iter().map(|v| (1u16, *v)).collect::<Vec<_>>())
}

/// Builds a JSON DoH body with explicit (type code, data) answer entries.
pub fn doh_body_typed(status: i32, entries: &[(u16, &str)]) -> Value {
    let answers: Vec<Value> = entries
        .iter()
        .map(|(code, data)| {
            json!({
                "name": "example.com.",
                "type": code,
                "TTL": 300,
                "data": data,
            })
        })
        .collect();
    json!({ "Status": status, "Answer": answers })
}

/// Starts a mock resolver answering `domain` with the given A-record values.
pub async fn mock_resolver(domain: &str, values: &[&str]) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dns-query"))
        .and(query_param("name", domain))
        .respond_with(ResponseTemplate::new(200).set_body_json(doh_body(0, values)))
        .mount(&server)
        .await;
    server
}

/// Starts a mock resolver that fails every query with the given HTTP status.
pub async fn failing_resolver(http_status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dns-query"))
        .respond_with(ResponseTemplate::new(http_status))
        .mount(&server)
        .await;
    server
}

/// Endpoint pointing at a mock server's `/dns-query` path.
pub fn endpoint_for(server: &MockServer, name: &str) -> ResolverEndpoint {
    ResolverEndpoint::new(name, format!("{}/dns-query", server.uri()))
}
