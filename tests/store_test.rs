//! Store behaviour seen from outside the crate: favourites are local, the
//! session is shared with API clients built from it.

mod common;

use common::*;
use serde_json::json;
use spherag::adapters::{MockHttpClient, MockResponse};
use spherag::models::System;
use spherag::state::Store;

fn farms(ids: &[i64]) -> Vec<System> {
    ids.iter()
        .map(|id| serde_json::from_value(system_json(*id)).unwrap())
        .collect()
}

#[test]
fn test_toggle_twice_restores_every_flag() {
    let store = Store::new();
    store.replace_all(farms(&[1, 2, 3]));
    let before = store.systems();

    assert!(store.toggle_favorite(2));
    assert!(store.toggle_favorite(2));

    assert_eq!(store.systems(), before);
}

#[test]
fn test_toggle_touches_only_the_target() {
    let store = Store::new();
    store.replace_all(farms(&[1, 2, 3]));

    store.toggle_favorite(3);

    let flags: Vec<(i64, bool)> = store.systems().iter().map(|s| (s.id, s.favorite)).collect();
    assert_eq!(flags, vec![(1, false), (2, false), (3, true)]);
}

#[test]
fn test_toggle_unknown_id_is_a_no_op() {
    let store = Store::new();
    store.replace_all(farms(&[1, 2]));
    let before = store.systems();

    assert!(!store.toggle_favorite(999));
    assert_eq!(store.systems(), before);
}

#[test]
fn test_append_skips_known_ids() {
    let store = Store::new();
    store.replace_all(farms(&[1, 2]));

    let added = store.append_all(farms(&[2, 3]));

    assert_eq!(added, 1);
    let ids: Vec<i64> = store.systems().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_credential_changes_reach_the_api_client() {
    let http = MockHttpClient::new();
    http.set_default_response(MockResponse::json(200, json!({"records": []})));
    let store = Store::new();
    let api = mock_api(&http, store.session().clone());

    store.set_credential("ana", "fresh");
    api.list_systems(1).await.unwrap();
    store.clear_credential();
    api.list_systems(1).await.unwrap();

    let headers: Vec<Option<String>> = http
        .get_requests()
        .iter()
        .map(|r| r.header("Authorization").map(str::to_string))
        .collect();
    assert_eq!(
        headers,
        vec![Some("Bearer fresh".to_string()), Some("Bearer ".to_string())]
    );
    assert_eq!(store.credential(), None);
}
