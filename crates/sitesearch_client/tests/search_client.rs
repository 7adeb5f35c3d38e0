use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use sitesearch_client::{ClientError, ClientSettings, ReqwestSearchClient, SearchBackend};
use sitesearch_core::{format_path, SearchRequest};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ReqwestSearchClient {
    ReqwestSearchClient::new(ClientSettings::with_base_url(server.uri())).expect("client")
}

fn request(url: &str, query: &str) -> SearchRequest {
    SearchRequest::new(url, query).expect("valid request")
}

#[tokio::test]
async fn posts_form_and_dedupes_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("url=http%3A%2F%2Fx.com"))
        .and(body_string_contains("query=hello+world"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "content": "Hello", "match_score": 92, "html": "<p>Hello</p>", "path": "http://x.com/a" },
            { "content": "Hello", "match_score": 50, "html": "<p>dup</p>", "path": "http://x.com/b" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let results = client_for(&server)
        .search(&request("http://x.com", "hello world"))
        .await
        .expect("search ok");

    assert_eq!(results.len(), 1);
    let first = results.get(0).unwrap();
    assert_eq!(first.content, "Hello");
    assert_eq!(first.match_score, 92.0);
    assert_eq!(first.html, "<p>Hello</p>");
    assert_eq!(format_path(&first.path), "/a");
}

#[tokio::test]
async fn empty_array_is_empty_result_set() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let results = client_for(&server)
        .search(&request("https://example.com", "anything"))
        .await
        .expect("search ok");
    assert!(results.is_empty());
}

#[tokio::test]
async fn malformed_entries_are_dropped_not_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            null,
            { "content": "" },
            { "content": 42 },
            { "content": "b", "match_score": 10, "html": "", "path": "/b" }
        ])))
        .mount(&server)
        .await;

    let results = client_for(&server)
        .search(&request("https://example.com", "q"))
        .await
        .expect("search ok");
    let contents: Vec<_> = results.iter().map(|r| r.content.as_str()).collect();
    assert_eq!(contents, vec!["b"]);
}

#[tokio::test]
async fn non_success_status_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .search(&request("https://example.com", "q"))
        .await
        .unwrap_err();
    match err {
        ClientError::Network { status, .. } => assert_eq!(status, Some(500)),
        other => panic!("expected network error, got {other:?}"),
    }
}

#[tokio::test]
async fn object_body_is_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "detail": "nope" })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .search(&request("https://example.com", "q"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::MalformedResponse { .. }));
}

#[tokio::test]
async fn html_body_is_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html>hi</html>", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .search(&request("https://example.com", "q"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::MalformedResponse { .. }));
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[".repeat(64)))
        .mount(&server)
        .await;

    let settings = ClientSettings {
        max_response_bytes: 16,
        ..ClientSettings::with_base_url(server.uri())
    };
    let err = ReqwestSearchClient::new(settings)
        .unwrap()
        .search(&request("https://example.com", "q"))
        .await
        .unwrap_err();
    match err {
        ClientError::Network { message, status } => {
            assert!(message.contains("too large"), "{message}");
            assert_eq!(status, None);
        }
        other => panic!("expected network error, got {other:?}"),
    }
}

#[tokio::test]
async fn request_timeout_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!([])),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        request_timeout: Some(Duration::from_millis(50)),
        ..ClientSettings::with_base_url(server.uri())
    };
    let err = ReqwestSearchClient::new(settings)
        .unwrap()
        .search(&request("https://example.com", "q"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Network { .. }));
}

#[tokio::test]
async fn unreachable_backend_is_network_error() {
    // Nothing listens on the tcpmux port on test machines.
    let err = ReqwestSearchClient::new(ClientSettings::with_base_url("http://127.0.0.1:1"))
        .unwrap()
        .search(&request("https://example.com", "q"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Network { status: None, .. }));
}

#[test]
fn trailing_slash_base_targets_search_path() {
    let client =
        ReqwestSearchClient::new(ClientSettings::with_base_url("http://127.0.0.1:8000/")).unwrap();
    assert_eq!(client.endpoint().as_str(), "http://127.0.0.1:8000/search");
}
