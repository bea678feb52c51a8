//! Integration tests for `DiscoveryClient` using wiremock HTTP mocks.

use eventscout_upstream::{DiscoveryClient, DiscoveryRequest, EventCatalog, UpstreamError};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> DiscoveryClient {
    DiscoveryClient::with_base_url(5, base_url).expect("client construction should not fail")
}

#[tokio::test]
async fn fetch_passes_path_and_query_through() {
    let server = MockServer::start().await;

    let body = json!({
        "_embedded": { "events": [{ "id": "G5vYZ9", "name": "Show" }] },
        "page": { "size": 20, "totalElements": 1 }
    });

    Mock::given(method("GET"))
        .and(path("/events"))
        .and(query_param("apikey", "tm-key"))
        .and(query_param("keyword", "jazz"))
        .and(query_param("geoPoint", "dr5regw"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let request = DiscoveryRequest::new(["events"])
        .param("apikey", "tm-key")
        .param("keyword", "jazz")
        .param("geoPoint", "dr5regw");

    let payload = test_client(&server.uri())
        .fetch(&request)
        .await
        .expect("should fetch");

    assert_eq!(payload, body);
}

#[tokio::test]
async fn fetch_event_detail_through_trait_object() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/events/vvG1iZ4"))
        .and(query_param("apikey", "tm-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "vvG1iZ4" })))
        .mount(&server)
        .await;

    let catalog: Box<dyn EventCatalog> = Box::new(test_client(&server.uri()));
    let request = DiscoveryRequest::new(["events", "vvG1iZ4"]).param("apikey", "tm-key");
    let payload = catalog.fetch(&request).await.expect("should fetch");

    assert_eq!(payload["id"], "vvG1iZ4");
}

#[tokio::test]
async fn fetch_surfaces_non_success_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/venues/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "errors": [] })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch(&DiscoveryRequest::new(["venues", "missing"]))
        .await
        .expect_err("should fail");

    match err {
        UpstreamError::Http(inner) => {
            assert_eq!(inner.status().map(|s| s.as_u16()), Some(404));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_rejects_non_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch(&DiscoveryRequest::new(["events"]))
        .await
        .expect_err("should fail");

    assert!(
        matches!(err, UpstreamError::Deserialize { ref context, .. } if context == "discovery /events"),
        "unexpected error: {err:?}"
    );
}
