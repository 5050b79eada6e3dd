//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - HTTP transport (GET, POST, PUT, DELETE)
//! - [`CredentialsProvider`] - persisted sign-in storage
//! - [`PageSource`] - one paginated endpoint, as seen by a list controller

pub mod credentials;
pub mod http;
pub mod source;

pub use credentials::{CredentialsError, CredentialsProvider};
pub use http::{Headers, HttpClient, HttpError, Method, Response};
pub use source::PageSource;
