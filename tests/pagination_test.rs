//! Paginated loading through ListController against the mock HTTP layer.

mod common;

use std::time::Duration;

use common::*;
use serde_json::json;
use spherag::adapters::{MockHttpClient, MockResponse};
use spherag::api::{AtlasesSource, SystemsSource};
use spherag::state::{ListController, LoadOutcome, Store};

#[tokio::test]
async fn test_twenty_five_farms_take_three_pages() {
    let http = MockHttpClient::new();
    http.set_response(&systems_url(1), MockResponse::json(200, systems_page(1..=10, Some(25))));
    http.set_response(&systems_url(2), MockResponse::json(200, systems_page(11..=20, Some(25))));
    http.set_response(&systems_url(3), MockResponse::json(200, systems_page(21..=25, Some(25))));
    let store = Store::with_session(signed_in_session("tok"));
    let api = mock_api(&http, store.session().clone());
    let controller = ListController::with_list(SystemsSource::new(api), store.systems_list());

    assert_eq!(
        controller.load_initial().await.unwrap(),
        LoadOutcome::Loaded {
            count: 10,
            exhausted: false
        }
    );
    assert_eq!(
        controller.load_more().await.unwrap(),
        LoadOutcome::Appended {
            added: 10,
            exhausted: false
        }
    );
    assert_eq!(
        controller.load_more().await.unwrap(),
        LoadOutcome::Appended {
            added: 5,
            exhausted: true
        }
    );
    assert_eq!(controller.load_more().await.unwrap(), LoadOutcome::Skipped);

    assert_eq!(http.request_count(), 3);
    let ids: Vec<i64> = store.systems().iter().map(|s| s.id).collect();
    assert_eq!(ids, (1..=25).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_concurrent_load_more_sends_one_request() {
    let http = MockHttpClient::new();
    http.set_response(&systems_url(1), MockResponse::json(200, systems_page(1..=10, None)));
    http.set_response(&systems_url(2), MockResponse::json(200, systems_page(11..=20, None)));
    let store = Store::with_session(signed_in_session("tok"));
    let api = mock_api(&http, store.session().clone());
    let controller = ListController::with_list(SystemsSource::new(api), store.systems_list());
    controller.load_initial().await.unwrap();

    http.set_delay(Duration::from_millis(50));
    let (first, second) = tokio::join!(controller.load_more(), controller.load_more());

    let outcomes = [first.unwrap(), second.unwrap()];
    assert!(outcomes.contains(&LoadOutcome::Skipped));
    assert!(outcomes.contains(&LoadOutcome::Appended {
        added: 10,
        exhausted: false
    }));
    assert_eq!(http.request_count(), 2);
    assert_eq!(store.systems().len(), 20);
}

#[tokio::test]
async fn test_server_error_mid_pagination_keeps_position() {
    let http = MockHttpClient::new();
    http.set_response(&systems_url(1), MockResponse::json(200, systems_page(1..=10, None)));
    http.push_response(&systems_url(2), MockResponse::status(500, "down"));
    http.set_response(&systems_url(2), MockResponse::json(200, systems_page(11..=12, None)));
    let store = Store::with_session(signed_in_session("tok"));
    let api = mock_api(&http, store.session().clone());
    let controller = ListController::with_list(SystemsSource::new(api), store.systems_list());
    controller.load_initial().await.unwrap();

    let err = controller.load_more().await.unwrap_err();
    assert_eq!(err.http_status(), Some(500));
    controller.inspect(|list| {
        assert_eq!(list.len(), 10);
        assert_eq!(list.page(), 1);
        assert!(!list.is_exhausted());
        assert!(!list.is_loading_more());
    });

    assert_eq!(
        controller.load_more().await.unwrap(),
        LoadOutcome::Appended {
            added: 2,
            exhausted: true
        }
    );
}

#[tokio::test]
async fn test_no_data_on_first_page_is_empty_list() {
    let http = MockHttpClient::new();
    http.set_default_response(MockResponse::status(204, ""));
    let api = mock_api(&http, signed_in_session("tok"));
    let controller = ListController::new(AtlasesSource::new(api, 7));

    let outcome = controller.load_initial().await.unwrap();

    assert_eq!(outcome, LoadOutcome::Exhausted);
    assert!(controller.items().is_empty());
    assert_eq!(controller.load_more().await.unwrap(), LoadOutcome::Skipped);
    assert_eq!(http.request_count(), 1);
}

#[tokio::test]
async fn test_device_pages_use_their_own_urls() {
    let http = MockHttpClient::new();
    let records: Vec<_> = (0..10).map(|i| atlas_json(&format!("86{}", i))).collect();
    http.set_response(&atlases_url(3, 1), MockResponse::json(200, json!({"records": records})));
    http.set_response(&atlases_url(3, 2), MockResponse::json(200, json!({"records": []})));
    let api = mock_api(&http, signed_in_session("tok"));
    let controller = ListController::new(AtlasesSource::new(api, 3));

    controller.load_initial().await.unwrap();
    assert_eq!(controller.load_more().await.unwrap(), LoadOutcome::Exhausted);

    let urls: Vec<String> = http.get_requests().into_iter().map(|r| r.url).collect();
    assert_eq!(urls, vec![atlases_url(3, 1), atlases_url(3, 2)]);
    assert_eq!(controller.filtered("Atlas 861").len(), 1);
}
