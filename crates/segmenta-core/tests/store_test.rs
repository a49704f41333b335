#![allow(clippy::unwrap_used, clippy::float_cmp)]
// Integration tests for `EntityStore` / `Workspace` against a wiremock backend.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use segmenta_core::{
    Campaign, CampaignPatch, ClientConfig, CoreError, EntityId, EntityStore, NewRouter, Resource, Router,
    RouterPatch, TxCounts, Workspace,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup<T: Resource>() -> (MockServer, EntityStore<T>) {
    let server = MockServer::start().await;
    let client = ClientConfig::new(server.uri().parse().unwrap())
        .build_client()
        .unwrap();
    (server, EntityStore::new(client))
}

fn api_path(suffix: &str) -> String {
    format!("/api/v2/campaigns/{suffix}")
}

async fn mount_list(server: &MockServer, collection: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(api_path(collection)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn routers_json() -> serde_json::Value {
    json!([
        { "id": 7, "mac": "aa:bb", "device_name": "r7", "group_name": "A", "latitud": 20.5 },
        { "id": 8, "mac": "cc:dd", "device_name": "r8", "group_name": "" }
    ])
}

// ── fetch_all ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_all_replaces_cache() {
    let (server, store) = setup::<Router>().await;
    mount_list(&server, "routers", routers_json()).await;

    let snapshot = store.fetch_all().await.unwrap();

    assert_eq!(snapshot.len(), 2);
    assert_eq!(store.get(&EntityId::Numeric(7)).unwrap().group(), Some("A"));
    assert!(!store.is_loading());
    assert_eq!(store.last_error(), None);
}

#[tokio::test]
async fn test_fetch_failure_wipes_cache_and_records_error() {
    let (server, store) = setup::<Router>().await;
    store.set_all(serde_json::from_value(routers_json()).unwrap());

    Mock::given(method("GET"))
        .and(path(api_path("routers")))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({ "detail": "down" })))
        .mount(&server)
        .await;

    let err = store.fetch_all().await.unwrap_err();

    assert!(matches!(err, CoreError::Api { status: Some(503), .. }), "got: {err:?}");
    assert!(store.is_empty());
    assert!(store.last_error().unwrap().contains("down"));
    assert!(!store.is_loading());
}

// ── create ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_prepends_server_entity_once() {
    let (server, store) = setup::<Router>().await;
    mount_list(&server, "routers", routers_json()).await;
    store.fetch_all().await.unwrap();

    let expected_body = json!({
        "serial": "SN-9", "mac": "ee:ff", "device_name": "r9", "estacion": "Centro",
        "municipio": "Zapopan", "latitud": 20.7, "longitud": -103.4
    });
    Mock::given(method("POST"))
        .and(path(api_path("routers")))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 99, "serial": "SN-9", "mac": "ee:ff", "device_name": "r9", "group_name": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    // Empty group_name must not reach the server.
    let created = store
        .create(&NewRouter {
            serial: "SN-9".into(),
            mac: "ee:ff".into(),
            device_name: "r9".into(),
            estacion: "Centro".into(),
            municipio: "Zapopan".into(),
            latitud: 20.7,
            longitud: -103.4,
            group_name: String::new(),
        })
        .await
        .unwrap();

    assert_eq!(created.id, EntityId::Numeric(99));
    let snapshot = store.snapshot();
    assert_eq!(snapshot[0].id, EntityId::Numeric(99));
    assert_eq!(snapshot.len(), 3);
    assert_eq!(snapshot.iter().filter(|r| r.id == EntityId::Numeric(99)).count(), 1);
    assert!(!store.is_creating());
}

#[tokio::test]
async fn test_create_failure_leaves_cache_untouched() {
    let (server, store) = setup::<Campaign>().await;
    mount_list(&server, "campaigns", json!([{ "id": 1, "name": "A", "active": true }])).await;
    store.fetch_all().await.unwrap();
    let before = store.snapshot();

    Mock::given(method("POST"))
        .and(path(api_path("campaigns")))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({ "message": "url taken" })))
        .mount(&server)
        .await;

    let err = store.create(&json!({ "name": "B", "url": "a" })).await.unwrap_err();

    assert!(matches!(err, CoreError::Api { status: Some(422), .. }));
    assert!(Arc::ptr_eq(&before, &store.snapshot()));
    assert_eq!(store.last_error().as_deref(), Some("API error: url taken"));
}

// ── update ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_merges_server_response_over_patch() {
    let (server, store) = setup::<Router>().await;
    mount_list(&server, "routers", routers_json()).await;
    store.fetch_all().await.unwrap();

    Mock::given(method("PUT"))
        .and(path(api_path("routers/7")))
        .and(body_json(json!({ "group_name": "B", "device_name": "edge-7" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7, "group_name": "C", "updated_by": "backend"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let patch = RouterPatch {
        group_name: Some("B".into()),
        device_name: Some("edge-7".into()),
        ..RouterPatch::default()
    };
    let merged = store.update(&EntityId::Numeric(7), &patch).await.unwrap().unwrap();

    // Server wins where it speaks; the optimistic patch stays elsewhere.
    assert_eq!(merged.group(), Some("C"));
    assert_eq!(merged.device_name.as_deref(), Some("edge-7"));
    assert_eq!(merged.mac.as_deref(), Some("aa:bb"));
    assert_eq!(merged.extra["updated_by"], json!("backend"));
    assert_eq!(store.get(&EntityId::Numeric(7)).unwrap(), merged);
    assert_eq!(
        store.transactions(),
        TxCounts {
            pending: 0,
            committed: 1,
            rolled_back: 0
        }
    );
}

#[tokio::test]
async fn test_failed_campaign_toggle_restores_previous_array() {
    let (server, store) = setup::<Campaign>().await;
    mount_list(
        &server,
        "campaigns",
        json!([
            { "id": 5, "name": "Verano", "active": true },
            { "id": 6, "name": "Otoño", "active": false }
        ]),
    )
    .await;
    store.fetch_all().await.unwrap();
    let before = store.snapshot();

    Mock::given(method("PUT"))
        .and(path(api_path("campaigns/5")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let patch = CampaignPatch {
        active: Some(false),
        ..CampaignPatch::default()
    };
    let result = store.update(&EntityId::Numeric(5), &patch).await;

    assert!(result.is_err());
    assert!(Arc::ptr_eq(&before, &store.snapshot()));
    assert!(store.get(&EntityId::Numeric(5)).unwrap().is_active());
    assert_eq!(store.transactions().rolled_back, 1);
    assert!(store.last_error().is_some());
    assert!(!store.is_updating());
}

#[tokio::test]
async fn test_failed_update_rollback_reverts_a_concurrent_sibling_update() {
    let (server, store) = setup::<Campaign>().await;
    mount_list(
        &server,
        "campaigns",
        json!([
            { "id": 5, "name": "Verano", "active": true },
            { "id": 6, "name": "Otoño", "active": true }
        ]),
    )
    .await;
    store.fetch_all().await.unwrap();
    let before = store.snapshot();

    Mock::given(method("PUT"))
        .and(path(api_path("campaigns/6")))
        .respond_with(ResponseTemplate::new(500).set_delay(Duration::from_millis(300)))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(api_path("campaigns/5")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 5, "active": false })))
        .mount(&server)
        .await;

    let deactivate = CampaignPatch {
        active: Some(false),
        ..CampaignPatch::default()
    };
    let (slow, fast) = tokio::join!(store.update(&EntityId::Numeric(6), &deactivate), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        let result = store.update(&EntityId::Numeric(5), &deactivate).await;
        assert!(!store.get(&EntityId::Numeric(5)).unwrap().is_active());
        result
    });

    assert!(slow.is_err());
    assert!(!fast.unwrap().unwrap().is_active());

    // The rollback restores the array captured when campaign 6's update
    // began, which predates campaign 5's committed change.
    assert!(Arc::ptr_eq(&before, &store.snapshot()));
    assert!(store.get(&EntityId::Numeric(5)).unwrap().is_active());
    assert!(store.get(&EntityId::Numeric(6)).unwrap().is_active());
    assert_eq!(
        store.transactions(),
        TxCounts {
            pending: 0,
            committed: 1,
            rolled_back: 1,
        }
    );
}

#[tokio::test]
async fn test_update_in_flight_shows_optimistic_state_and_per_id_flag() {
    let (server, store) = setup::<Router>().await;
    mount_list(&server, "routers", routers_json()).await;
    store.fetch_all().await.unwrap();

    Mock::given(method("PUT"))
        .and(path(api_path("routers/8")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": 8, "group_name": "Pruebas" }))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let id = EntityId::Numeric(8);
    let (result, ()) = tokio::join!(store.set_group(&id, "Pruebas"), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(store.is_updating_id(&id));
        assert!(!store.is_updating_id(&EntityId::Numeric(7)));
        assert!(store.is_updating());
        assert_eq!(store.get(&id).unwrap().group(), Some("Pruebas"));
        assert_eq!(store.transactions().pending, 1);
    });

    assert!(result.is_ok());
    assert!(!store.is_updating_id(&id));
    assert_eq!(store.transactions().pending, 0);
}

#[tokio::test]
async fn test_cancelled_update_rolls_back() {
    let (server, store) = setup::<Router>().await;
    mount_list(&server, "routers", routers_json()).await;
    store.fetch_all().await.unwrap();
    let before = store.snapshot();

    Mock::given(method("PUT"))
        .and(path(api_path("routers/7")))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let id = EntityId::Numeric(7);
    let timed_out = tokio::time::timeout(Duration::from_millis(100), store.set_group(&id, "Z")).await;

    assert!(timed_out.is_err());
    assert!(Arc::ptr_eq(&before, &store.snapshot()));
    assert!(!store.is_updating_id(&id));
    assert_eq!(store.transactions().rolled_back, 1);
}

#[tokio::test]
async fn test_mistyped_patch_is_rejected_before_the_request() {
    let (server, store) = setup::<Campaign>().await;
    mount_list(&server, "campaigns", json!([{ "id": 5, "active": true }])).await;
    store.fetch_all().await.unwrap();

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = store
        .update(&EntityId::Numeric(5), &json!({ "active": "sometimes" }))
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::InvalidPayload { .. }));
    assert_eq!(store.transactions(), TxCounts::default());
}

// ── delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_removes_after_confirmation() {
    let (server, store) = setup::<Router>().await;
    mount_list(&server, "routers", routers_json()).await;
    store.fetch_all().await.unwrap();

    Mock::given(method("DELETE"))
        .and(path(api_path("routers/7")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    store.delete(&EntityId::Numeric(7)).await.unwrap();

    assert!(store.get(&EntityId::Numeric(7)).is_none());
    assert_eq!(store.len(), 1);
    assert!(!store.is_deleting(&EntityId::Numeric(7)));
}

#[tokio::test]
async fn test_failed_delete_keeps_entity_unchanged() {
    let (server, store) = setup::<Router>().await;
    mount_list(&server, "routers", routers_json()).await;
    store.fetch_all().await.unwrap();
    let original = store.get(&EntityId::Numeric(8)).unwrap();

    Mock::given(method("DELETE"))
        .and(path(api_path("routers/8")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "gone" })))
        .mount(&server)
        .await;

    let err = store.delete(&EntityId::Numeric(8)).await.unwrap_err();

    assert!(matches!(err, CoreError::NotFound { .. }));
    assert_eq!(store.get(&EntityId::Numeric(8)).unwrap(), original);
    assert!(!store.is_deleting(&EntityId::Numeric(8)));
}

// ── Workspace ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_workspace_refreshes_all_collections() {
    let server = MockServer::start().await;
    mount_list(&server, "routers", routers_json()).await;
    mount_list(&server, "campaigns", json!([{ "id": 5, "name": "Verano" }])).await;
    mount_list(&server, "segments", json!([{ "id": 1, "campaign_id": 5 }])).await;
    mount_list(&server, "groups", json!(["A", "B"])).await;

    let ws = Workspace::from_config(&ClientConfig::new(server.uri().parse().unwrap())).unwrap();
    ws.refresh_all().await.unwrap();

    assert_eq!(ws.routers.len(), 2);
    assert_eq!(ws.segments.len(), 1);
    assert_eq!(ws.campaign_names().get(&EntityId::Numeric(5)).map(String::as_str), Some("Verano"));
    assert_eq!(ws.fetch_groups().await.unwrap(), ["A", "B"]);
}

#[tokio::test]
async fn test_stream_sees_mutations() {
    let (server, store) = setup::<Router>().await;
    mount_list(&server, "routers", routers_json()).await;

    let mut stream = store.subscribe();
    assert!(stream.current().is_empty());

    store.fetch_all().await.unwrap();
    let snap = stream.changed().await.unwrap();
    assert_eq!(snap.len(), 2);
}
