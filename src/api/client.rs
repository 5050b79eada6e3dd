//! HTTP client for the Spherag API.
//!
//! [`ApiClient::request`] applies the status contract every endpoint shares:
//!
//! | Status | Outcome |
//! |--------|---------|
//! | 200 | [`ApiOutcome::Data`] with the parsed body |
//! | >= 400 | `Err(NetworkError::HttpStatus)` carrying the raw body |
//! | anything else | [`ApiOutcome::NoData`], which list controllers read as "no more pages" |
//!
//! The bearer token is read from the [`Session`] for every attempt, so a
//! login or logout is visible to the next request without rebuilding the
//! client. A 401 clears the session.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::endpoints;
use crate::auth::{Credentials, LoginRequest, LoginResponse, Session};
use crate::config::ClientConfig;
use crate::error::{AuthError, ErrorContext, NetworkError, SpheragError, SpheragResult};
use crate::models::{Atlas, Page, PageFetch, System};
use crate::traits::{Headers, HttpClient, HttpError, Method, Response};

/// Result of a request that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome {
    /// Status 200 with its JSON body (`Null` when the body was empty).
    Data(Value),
    /// A status that is neither 200 nor an error.
    NoData { status: u16 },
}

/// Client for the data host and the authentication endpoint.
pub struct ApiClient<C: HttpClient> {
    http: Arc<C>,
    config: ClientConfig,
    session: Session,
}

impl<C: HttpClient> Clone for ApiClient<C> {
    fn clone(&self) -> Self {
        Self {
            http: Arc::clone(&self.http),
            config: self.config.clone(),
            session: self.session.clone(),
        }
    }
}

impl<C: HttpClient> std::fmt::Debug for ApiClient<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("authenticated", &self.session.is_authenticated())
            .finish()
    }
}

impl<C: HttpClient> ApiClient<C> {
    pub fn new(http: C, config: ClientConfig, session: Session) -> Self {
        Self {
            http: Arc::new(http),
            config,
            session,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Send `method path` to the data host.
    pub async fn request(
        &self,
        path: &str,
        method: Method,
        body: Option<&Value>,
    ) -> SpheragResult<ApiOutcome> {
        let url = format!("{}{}", self.config.api_base_url, path);
        let body = body.map(Value::to_string);
        let operation = format!("{} {}", method, path);

        let (response, retries) = self
            .send_with_retry(&operation, method, &url, body.as_deref(), true)
            .await?;
        let context = || {
            ErrorContext::new(operation.clone())
                .with_resource(path)
                .with_retry_count(retries)
        };

        match response.status {
            200 => {
                let value = if response.body.is_empty() {
                    Value::Null
                } else {
                    response.json::<Value>().map_err(|e| {
                        SpheragError::from(NetworkError::InvalidResponse {
                            message: e.to_string(),
                        })
                        .with_context(context())
                    })?
                };
                Ok(ApiOutcome::Data(value))
            }
            status if status >= 400 => {
                if status == 401 {
                    warn!("{} returned 401, clearing session", operation);
                    self.session.clear();
                }
                Err(SpheragError::from(NetworkError::HttpStatus {
                    status,
                    message: response.text_lossy(),
                })
                .with_context(context()))
            }
            status => {
                debug!("{} returned {}, no data", operation, status);
                Ok(ApiOutcome::NoData { status })
            }
        }
    }

    /// Exchange a username and password for a token and store it in the session.
    pub async fn login(&self, username: &str, password: &str) -> SpheragResult<LoginResponse> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials.into());
        }

        let body = serde_json::to_string(&LoginRequest {
            username: username.trim(),
            password,
        })?;
        let auth_url = self.config.auth_url.clone();
        let (response, _) = self
            .send_with_retry("login", Method::Post, &auth_url, Some(&body), false)
            .await?;

        let context = || ErrorContext::new("login").with_resource(auth_url.as_str());
        let login = match response.status {
            200 => response.json::<LoginResponse>().map_err(|e| {
                SpheragError::from(NetworkError::InvalidResponse {
                    message: e.to_string(),
                })
                .with_context(context())
            })?,
            401 | 403 => {
                return Err(AuthError::InvalidCredentials {
                    message: response.text_lossy(),
                }
                .into())
            }
            status if status >= 400 => {
                return Err(SpheragError::from(NetworkError::HttpStatus {
                    status,
                    message: response.text_lossy(),
                })
                .with_context(context()))
            }
            status => {
                return Err(SpheragError::from(NetworkError::InvalidResponse {
                    message: format!("login answered with status {}", status),
                })
                .with_context(context()))
            }
        };

        if login.token.is_empty() {
            return Err(SpheragError::from(NetworkError::InvalidResponse {
                message: "login response has an empty token".to_string(),
            })
            .with_context(context()));
        }

        self.session
            .set(Credentials::new(username.trim(), login.token.clone()));
        info!("Signed in as {}", username.trim());
        Ok(login)
    }

    /// Forget the current credential.
    pub fn logout(&self) {
        if let Some(user) = self.session.username() {
            info!("Signed out {}", user);
        }
        self.session.clear();
    }

    /// One page of the user's farms.
    pub async fn list_systems(&self, page: u32) -> SpheragResult<PageFetch<System>> {
        let path = endpoints::systems_page(page, self.config.page_size);
        self.fetch_page(&path, "list_systems").await
    }

    /// One page of a farm's devices.
    pub async fn list_atlases(&self, system_id: i64, page: u32) -> SpheragResult<PageFetch<Atlas>> {
        let path = endpoints::atlases_page(system_id, page, self.config.page_size);
        self.fetch_page(&path, "list_atlases").await
    }

    /// A single device with its connectors. `None` when the server has no data.
    pub async fn get_atlas(&self, imei: &str) -> SpheragResult<Option<Atlas>> {
        let path = endpoints::atlas(imei);
        match self.request(&path, Method::Get, None).await? {
            ApiOutcome::Data(value) => decode(value, "get_atlas", &path).map(Some),
            ApiOutcome::NoData { .. } => Ok(None),
        }
    }

    async fn fetch_page<T: DeserializeOwned>(
        &self,
        path: &str,
        operation: &str,
    ) -> SpheragResult<PageFetch<T>> {
        match self.request(path, Method::Get, None).await? {
            ApiOutcome::Data(value) => {
                let page: Page<T> = decode(value, operation, path)?;
                debug!(
                    "{}: {} records (total {:?})",
                    operation,
                    page.records.len(),
                    page.total
                );
                Ok(PageFetch::Records(page))
            }
            ApiOutcome::NoData { status } => Ok(PageFetch::NoData { status }),
        }
    }

    fn headers(&self, with_bearer: bool) -> Headers {
        let mut headers = Headers::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        if with_bearer {
            if !self.session.is_authenticated() {
                warn!("Sending request without a token");
            }
            headers.insert("Authorization".to_string(), self.session.bearer_header());
        }
        headers
    }

    /// Send, retrying transport failures and retryable statuses with
    /// exponential backoff. Returns the last response whatever its status,
    /// with the number of retries it took.
    async fn send_with_retry(
        &self,
        operation: &str,
        method: Method,
        url: &str,
        body: Option<&str>,
        with_bearer: bool,
    ) -> SpheragResult<(Response, u32)> {
        let policy = &self.config.retry;
        let max_attempts = policy.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let headers = self.headers(with_bearer);
            debug!("{} (attempt {}/{})", operation, attempt, max_attempts);

            let result = match tokio::time::timeout(
                self.config.request_timeout,
                self.http.send(method, url, body, &headers),
            )
            .await
            {
                Ok(Ok(response)) => Ok(response),
                Ok(Err(err)) => Err(convert_http_error(err, url, operation, &self.config)),
                Err(_) => Err(NetworkError::Timeout {
                    operation: operation.to_string(),
                    duration_secs: self.config.request_timeout.as_secs(),
                }),
            };

            let retryable = match &result {
                Ok(response) => is_retryable_status(response.status),
                Err(err) => err.is_retryable(),
            };

            if !retryable || attempt >= max_attempts {
                return result.map(|response| (response, attempt - 1)).map_err(|err| {
                    SpheragError::from(err).with_context(
                        ErrorContext::new(operation)
                            .with_resource(url)
                            .with_retry_count(attempt - 1),
                    )
                });
            }

            let delay = policy.delay_for(attempt);
            match &result {
                Ok(response) => warn!(
                    "{} returned {}, retrying in {:?}",
                    operation, response.status, delay
                ),
                Err(err) => warn!("{} failed: {}, retrying in {:?}", operation, err, delay),
            }
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

fn is_retryable_status(status: u16) -> bool {
    status >= 500 || status == 408 || status == 429
}

fn convert_http_error(
    err: HttpError,
    url: &str,
    operation: &str,
    config: &ClientConfig,
) -> NetworkError {
    match err {
        HttpError::ConnectionFailed(message) => NetworkError::ConnectionFailed {
            url: url.to_string(),
            message,
        },
        HttpError::Timeout(_) => NetworkError::Timeout {
            operation: operation.to_string(),
            duration_secs: config.request_timeout.as_secs(),
        },
        HttpError::Cancelled => NetworkError::Cancelled,
        HttpError::InvalidUrl(message) | HttpError::Other(message) => {
            NetworkError::Other { message }
        }
    }
}

fn decode<T: DeserializeOwned>(value: Value, operation: &str, path: &str) -> SpheragResult<T> {
    serde_json::from_value(value).map_err(|e| {
        SpheragError::from(e).with_context(ErrorContext::new(operation).with_resource(path))
    })
}
