#![allow(clippy::unwrap_used)]
// Integration tests for `ResourceClient` using wiremock.

use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use segmenta_api::{Collection, Error, ResourceClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ResourceClient) {
    let server = MockServer::start().await;
    let client = ResourceClient::with_client(reqwest::Client::new(), &server.uri()).unwrap();
    (server, client)
}

fn api_path(suffix: &str) -> String {
    format!("/api/v2/campaigns/{suffix}")
}

// ── List ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_routers() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("routers")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "mac": "aa:bb:cc:dd:ee:ff", "group_name": "A" },
            { "id": 2, "mac": "11:22:33:44:55:66", "group_name": "" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let routers: Vec<Value> = client.list(Collection::Routers).await.unwrap();

    assert_eq!(routers.len(), 2);
    assert_eq!(routers[0]["mac"], "aa:bb:cc:dd:ee:ff");
    assert_eq!(routers[1]["group_name"], "");
}

#[tokio::test]
async fn test_list_non_array_body_is_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("segments")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;

    let segments: Vec<Value> = client.list(Collection::Segments).await.unwrap();
    assert!(segments.is_empty());
}

#[tokio::test]
async fn test_list_groups() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("groups")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["A", "B", "Pruebas"])))
        .mount(&server)
        .await;

    let groups = client.list_groups().await.unwrap();
    assert_eq!(groups, ["A", "B", "Pruebas"]);
}

// ── Create / update / delete ────────────────────────────────────────

#[tokio::test]
async fn test_create_posts_body_and_returns_server_entity() {
    let (server, client) = setup().await;

    let body = json!({ "name": "Verano", "url": "verano", "active": true });

    Mock::given(method("POST"))
        .and(path(api_path("campaigns")))
        .and(body_json(&body))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 42,
            "name": "Verano",
            "url": "verano",
            "active": true,
            "created_at": "2025-03-01T10:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created: Value = client.create(Collection::Campaigns, &body).await.unwrap();
    assert_eq!(created["id"], 42);
    assert_eq!(created["created_at"], "2025-03-01T10:00:00Z");
}

#[tokio::test]
async fn test_update_puts_to_item_path() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path(api_path("routers/7")))
        .and(body_json(json!({ "group_name": "B" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 7, "group_name": "B" })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client
        .update(Collection::Routers, "7", &json!({ "group_name": "B" }))
        .await
        .unwrap();
    assert_eq!(resp["group_name"], "B");
}

#[tokio::test]
async fn test_update_empty_body_is_null() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path(api_path("segments/3")))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let resp = client
        .update(Collection::Segments, "3", &json!({ "name": "x" }))
        .await
        .unwrap();
    assert!(resp.is_null());
}

#[tokio::test]
async fn test_delete_accepts_body() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(api_path("campaigns/5")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "deleted": true })))
        .expect(1)
        .mount(&server)
        .await;

    client.delete(Collection::Campaigns, "5").await.unwrap();
}

// ── Errors ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_http_error_carries_detail_message() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(api_path("routers/99")))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "detail": "Router not found" })),
        )
        .mount(&server)
        .await;

    let result = client.delete(Collection::Routers, "99").await;

    match result {
        Err(Error::Http { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Router not found");
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_http_error_without_body_uses_status_text() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path(api_path("campaigns/5")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client
        .update(Collection::Campaigns, "5", &json!({ "active": false }))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().contains("500"), "unexpected message: {err}");
}

#[tokio::test]
async fn test_invalid_json_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("routers")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result: Result<Value, _> = client.create(Collection::Routers, &json!({})).await;

    assert!(
        matches!(result, Err(Error::Deserialization { ref body, .. }) if body.contains("oops")),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Port 9 (discard) on localhost is closed in test environments.
    let client = ResourceClient::with_client(reqwest::Client::new(), "http://127.0.0.1:9").unwrap();

    let result: Result<Vec<Value>, _> = client.list(Collection::Routers).await;
    let err = result.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "got: {err:?}");
    assert!(err.is_connect());
}
