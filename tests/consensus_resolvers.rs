//! Integration tests for the DoH client and consensus engine against mock
//! resolver endpoints.

mod helpers;

use helpers::{doh_body, doh_body_typed, endpoint_for, failing_resolver, mock_resolver};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dns_sentry::resolver::{query_resolver, resolve_with_consensus};
use dns_sentry::RecordType;

#[tokio::test]
async fn query_sends_cache_defeating_request_and_parses_answers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dns-query"))
        .and(query_param("name", "example.com"))
        .and(query_param("type", "A"))
        .and(header("accept", "application/dns-json"))
        .and(header("cache-control", "no-cache"))
        .respond_with(ResponseTemplate::new(200).set_body_json(doh_body(0, &["93.184.216.34"])))
        .expect(1)
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let values = query_resolver(
        &client,
        &endpoint_for(&server, "mock"),
        "example.com",
        RecordType::A,
    )
    .await
    .expect("query should succeed");

    assert_eq!(values, vec!["93.184.216.34"]);
}

#[tokio::test]
async fn query_filters_answers_by_record_type() {
    // a CNAME chain entry rides along with the A records; only type 1 survives
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dns-query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(doh_body_typed(
            0,
            &[(5, "edge.example-cdn.net."), (1, "93.184.216.34"), (1, "93.184.216.35")],
        )))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let values = query_resolver(
        &client,
        &endpoint_for(&server, "mock"),
        "www.example.com",
        RecordType::A,
    )
    .await
    .unwrap();

    assert_eq!(values, vec!["93.184.216.34", "93.184.216.35"]);
}

#[tokio::test]
async fn query_trims_trailing_dot_on_hostname_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dns-query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(doh_body_typed(
            0,
            &[(2, "ns1.example.com."), (2, "ns2.example.com.")],
        )))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let values = query_resolver(
        &client,
        &endpoint_for(&server, "mock"),
        "example.com",
        RecordType::Ns,
    )
    .await
    .unwrap();

    assert_eq!(values, vec!["ns1.example.com", "ns2.example.com"]);
}

#[tokio::test]
async fn query_fails_on_dns_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dns-query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(doh_body(2, &[])))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let result = query_resolver(
        &client,
        &endpoint_for(&server, "mock"),
        "example.com",
        RecordType::A,
    )
    .await;
    assert!(result.is_err(), "SERVFAIL must surface as an error");
}

#[tokio::test]
async fn query_fails_on_transport_error_and_garbage_body() {
    let broken = failing_resolver(500).await;
    let client = reqwest::Client::new();
    assert!(query_resolver(
        &client,
        &endpoint_for(&broken, "broken"),
        "example.com",
        RecordType::A,
    )
    .await
    .is_err());

    let garbled = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dns-query"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&garbled)
        .await;
    assert!(query_resolver(
        &client,
        &endpoint_for(&garbled, "garbled"),
        "example.com",
        RecordType::A,
    )
    .await
    .is_err());
}

#[tokio::test]
async fn one_failing_resolver_does_not_break_agreement() {
    // two resolvers agree, the third is down: no discrepancy, agreed values win
    let a = mock_resolver("example.com", &["93.184.216.34"]).await;
    let b = failing_resolver(500).await;
    let c = mock_resolver("example.com", &["93.184.216.34"]).await;

    let endpoints = vec![
        endpoint_for(&a, "a"),
        endpoint_for(&b, "b"),
        endpoint_for(&c, "c"),
    ];
    let client = reqwest::Client::new();
    let consensus =
        resolve_with_consensus(&client, &endpoints, "example.com", RecordType::A).await;

    assert!(!consensus.discrepancy);
    assert_eq!(consensus.values, vec!["93.184.216.34"]);
    assert_eq!(consensus.failures, 1);
    assert!(!consensus.all_failed());
    assert_eq!(consensus.per_resolver.len(), 3);
    assert!(consensus.per_resolver[1].values.is_empty());
}

#[tokio::test]
async fn disagreeing_resolvers_flag_discrepancy_and_majority_wins() {
    let a = mock_resolver("example.com", &["93.184.216.34"]).await;
    let b = mock_resolver("example.com", &["192.0.2.66"]).await;
    let c = mock_resolver("example.com", &["93.184.216.34"]).await;

    let endpoints = vec![
        endpoint_for(&a, "a"),
        endpoint_for(&b, "b"),
        endpoint_for(&c, "c"),
    ];
    let client = reqwest::Client::new();
    let consensus =
        resolve_with_consensus(&client, &endpoints, "example.com", RecordType::A).await;

    assert!(consensus.discrepancy);
    assert_eq!(consensus.values, vec!["93.184.216.34"]);
    assert_eq!(consensus.failures, 0);
}

#[tokio::test]
async fn all_resolvers_failing_yields_empty_consensus() {
    let a = failing_resolver(500).await;
    let b = failing_resolver(502).await;

    let endpoints = vec![endpoint_for(&a, "a"), endpoint_for(&b, "b")];
    let client = reqwest::Client::new();
    let consensus =
        resolve_with_consensus(&client, &endpoints, "example.com", RecordType::A).await;

    assert!(consensus.all_failed());
    assert!(consensus.values.is_empty());
    assert!(!consensus.discrepancy);
    assert_eq!(consensus.failures, 2);
}
