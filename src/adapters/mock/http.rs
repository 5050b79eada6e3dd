//! Mock HTTP client for testing.
//!
//! Responses are looked up by URL: a queued one-shot response first, then an
//! exact match, then the longest configured prefix, then the default.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::traits::{Headers, HttpClient, HttpError, Method, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Headers,
    pub body: Option<String>,
}

impl RecordedRequest {
    /// Header lookup ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a response (any status)
    Success(Response),
    /// Fail at the transport level
    Error(HttpError),
}

impl MockResponse {
    /// Response with a JSON body.
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        MockResponse::Success(Response::new(status, Bytes::from(body.to_string())))
    }

    /// Response with a raw body.
    pub fn status(status: u16, body: &str) -> Self {
        MockResponse::Success(Response::new(status, Bytes::from(body.to_string())))
    }
}

/// Mock HTTP client for testing.
///
/// ```ignore
/// let client = MockHttpClient::new();
/// client.set_response(
///     "https://api.test/System/List?Init=1&Total=true&Limit=10",
///     MockResponse::json(200, json!({"records": []})),
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    queued: Arc<Mutex<HashMap<String, VecDeque<MockResponse>>>>,
    default_response: Arc<Mutex<Option<MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    delay: Arc<Mutex<Option<Duration>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a response for a URL, matched exactly or as a prefix.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        lock(&self.responses).insert(url.to_string(), response);
    }

    /// Queue a response that is returned once for `url`, ahead of any
    /// response set with [`set_response`](Self::set_response).
    pub fn push_response(&self, url: &str, response: MockResponse) {
        lock(&self.queued)
            .entry(url.to_string())
            .or_default()
            .push_back(response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        *lock(&self.default_response) = Some(response);
    }

    /// Delay every response, to keep requests in flight.
    pub fn set_delay(&self, delay: Duration) {
        *lock(&self.delay) = Some(delay);
    }

    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    pub fn clear_requests(&self) {
        lock(&self.requests).clear();
    }

    fn record_request(&self, method: Method, url: &str, headers: &Headers, body: Option<&str>) {
        lock(&self.requests).push(RecordedRequest {
            method,
            url: url.to_string(),
            headers: headers.clone(),
            body: body.map(str::to_string),
        });
    }

    fn get_response(&self, url: &str) -> Option<MockResponse> {
        if let Some(response) = lock(&self.queued).get_mut(url).and_then(VecDeque::pop_front) {
            return Some(response);
        }

        let responses = lock(&self.responses);
        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }

        let prefix_match = responses
            .iter()
            .filter(|(pattern, _)| url.starts_with(pattern.as_str()))
            .max_by_key(|(pattern, _)| pattern.len())
            .map(|(_, response)| response.clone());
        if prefix_match.is_some() {
            return prefix_match;
        }

        lock(&self.default_response).clone()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&str>,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        self.record_request(method, url, headers, body);

        let delay = *lock(&self.delay);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match self.get_response(url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_with_response() {
        let client = MockHttpClient::new();
        client.set_response("https://example.com/test", MockResponse::status(200, "Hello"));

        let response = client
            .get("https://example.com/test", &Headers::new())
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, Bytes::from("Hello"));

        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Get);
    }

    #[tokio::test]
    async fn test_queued_responses_come_first_and_once() {
        let client = MockHttpClient::new();
        let url = "https://example.com/flaky";
        client.set_response(url, MockResponse::status(200, "ok"));
        client.push_response(url, MockResponse::status(503, "busy"));

        let first = client.get(url, &Headers::new()).await.unwrap();
        let second = client.get(url, &Headers::new()).await.unwrap();
        assert_eq!(first.status, 503);
        assert_eq!(second.status, 200);
    }

    #[tokio::test]
    async fn test_longest_prefix_wins() {
        let client = MockHttpClient::new();
        client.set_response("https://example.com/", MockResponse::status(404, ""));
        client.set_response("https://example.com/Atlas/", MockResponse::status(200, "{}"));

        let response = client
            .get("https://example.com/Atlas/123", &Headers::new())
            .await
            .unwrap();
        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn test_no_response_configured() {
        let client = MockHttpClient::new();
        let result = client.get("https://example.com/missing", &Headers::new()).await;
        assert!(matches!(result, Err(HttpError::Other(_))));
    }

    #[tokio::test]
    async fn test_post_body_and_headers_recorded() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::status(200, ""));

        let mut headers = Headers::new();
        headers.insert("Authorization".to_string(), "Bearer t".to_string());
        client
            .post("https://example.com/login", r#"{"a":1}"#, &headers)
            .await
            .unwrap();

        let requests = client.get_requests();
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].body.as_deref(), Some(r#"{"a":1}"#));
        assert_eq!(requests[0].header("authorization"), Some("Bearer t"));
    }
}
