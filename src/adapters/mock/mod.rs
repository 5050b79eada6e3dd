//! Test doubles for the trait seams.
//!
//! - [`MockHttpClient`] - HTTP client with configurable and queued responses
//! - [`InMemoryCredentials`] - In-memory credential storage

pub mod credentials;
pub mod http;

pub use credentials::InMemoryCredentials;
pub use http::{MockHttpClient, MockResponse, RecordedRequest};
