//! Spherag HTTP API: the status contract, typed endpoints and page sources.

pub mod client;
pub mod endpoints;
pub mod source;

pub use client::{ApiClient, ApiOutcome};
pub use source::{AtlasesSource, SystemsSource};
