//! Common test utilities for integration tests.
//!
//! Fixtures for farm and device JSON, plus clients wired to a mock HTTP
//! layer with retries turned off.

#![allow(dead_code)]

use serde_json::{json, Value};

use spherag::adapters::MockHttpClient;
use spherag::api::ApiClient;
use spherag::auth::{Credentials, Session};
use spherag::config::{ClientConfig, RetryPolicy};

pub const API_BASE: &str = "http://api.test";
pub const AUTH_URL: &str = "http://auth.test/login";

pub fn test_config(api_base: &str, auth_url: &str) -> ClientConfig {
    ClientConfig::default()
        .with_api_base_url(api_base)
        .with_auth_url(auth_url)
        .with_retry(RetryPolicy::none())
}

/// Session already holding a token.
pub fn signed_in_session(token: &str) -> Session {
    Session::with_credentials(Credentials::new("ana", token))
}

pub fn mock_api(http: &MockHttpClient, session: Session) -> ApiClient<MockHttpClient> {
    ApiClient::new(http.clone(), test_config(API_BASE, AUTH_URL), session)
}

pub fn systems_url(page: u32) -> String {
    format!("{}/System/List?Init={}&Total=true&Limit=10", API_BASE, page)
}

pub fn atlases_url(system_id: i64, page: u32) -> String {
    let total = if page > 1 { "&Total=true" } else { "" };
    format!(
        "{}/Atlas/BySystem/{}?Init={}&Limit=10{}",
        API_BASE, system_id, page, total
    )
}

pub fn system_json(id: i64) -> Value {
    json!({
        "id": id,
        "name": format!("Farm {}", id),
        "timeZone": "Europe/Madrid",
        "country": "ES",
        "latitude": "37.99",
        "longitude": "-1.13"
    })
}

pub fn atlas_json(imei: &str) -> Value {
    json!({
        "imei": imei,
        "name": format!("Atlas {}", imei),
        "type": 1,
        "batteryPercentage": 72.0,
        "signalPercentage": 55.0,
        "atlasStatus": 7,
        "expiredDate": "2030-01-01T00:00:00",
        "connectors": {
            "input": [],
            "output": [
                {"id": 1, "connectorNumber": 1, "name": "Main pump", "type": 1, "latitude": "37.5", "longitude": "-1.5"}
            ],
            "sensor": []
        }
    })
}

/// `{records, total}` page of farms with ids in `ids`.
pub fn systems_page(ids: std::ops::RangeInclusive<i64>, total: Option<u64>) -> Value {
    let records: Vec<Value> = ids.map(system_json).collect();
    match total {
        Some(total) => json!({ "records": records, "total": total }),
        None => json!({ "records": records }),
    }
}
