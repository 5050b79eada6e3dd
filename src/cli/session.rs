//! `login` and `logout`, plus restoring the stored session.

use tracing::{debug, info};

use super::CliContext;
use crate::auth::{Credentials, Session};
use crate::cli_output::{icons, print_line};
use crate::error::{classify_io_error, AuthError, SpheragResult, SystemError};
use crate::traits::{CredentialsProvider, HttpClient};

/// Environment variable consulted before prompting for a password.
pub const PASSWORD_ENV: &str = "SPHERAG_PASSWORD";

/// Load stored credentials into `session`. Returns whether any were found.
pub async fn restore_session<P: CredentialsProvider>(
    provider: &P,
    session: &Session,
) -> SpheragResult<bool> {
    match provider.load().await? {
        Some(credentials) => {
            debug!("Restored session for {}", credentials.username);
            session.set(credentials);
            Ok(true)
        }
        None => Ok(false),
    }
}

/// The flag wins over the environment. Empty values count as absent.
pub(crate) fn resolve_password(flag: Option<String>, env: Option<String>) -> Option<String> {
    flag.into_iter()
        .chain(env)
        .find(|password| !password.is_empty())
}

async fn prompt_password() -> SpheragResult<String> {
    let read = tokio::task::spawn_blocking(|| rpassword::prompt_password("Password: "))
        .await
        .map_err(|e| SystemError::IoError {
            operation: "read password".to_string(),
            path: None,
            message: e.to_string(),
        })?;
    read.map_err(|e| classify_io_error(e, None, "read password").into())
}

pub async fn run_login<C, P>(
    ctx: &CliContext<C, P>,
    username: &str,
    password: Option<String>,
) -> SpheragResult<()>
where
    C: HttpClient + 'static,
    P: CredentialsProvider,
{
    let password = match resolve_password(password, std::env::var(PASSWORD_ENV).ok()) {
        Some(password) => password,
        None => prompt_password().await?,
    };

    let response = ctx.api.login(username, &password).await?;
    let credentials = Credentials::new(username.trim(), response.token);
    ctx.credentials.save(&credentials).await?;

    print_line(icons::SUCCESS, &format!("Signed in as {}", credentials.username));
    Ok(())
}

pub async fn run_logout<C, P>(ctx: &CliContext<C, P>) -> SpheragResult<()>
where
    C: HttpClient + 'static,
    P: CredentialsProvider,
{
    let was_signed_in = ctx.store.session().is_authenticated();
    ctx.api.logout();
    ctx.credentials.clear().await?;

    if was_signed_in {
        print_line(icons::SUCCESS, "Signed out");
    } else {
        info!("logout with no stored session");
        print_line(icons::WARNING, "Not signed in");
    }
    Ok(())
}

/// Commands that read data need a stored token.
pub(crate) fn require_session<C, P>(ctx: &CliContext<C, P>) -> SpheragResult<()>
where
    C: HttpClient + 'static,
    P: CredentialsProvider,
{
    if ctx.store.session().is_authenticated() {
        Ok(())
    } else {
        Err(AuthError::NotAuthenticated.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryCredentials, MockHttpClient, MockResponse};
    use crate::config::{ClientConfig, RetryPolicy};
    use serde_json::json;

    const AUTH_URL: &str = "http://auth.test/login";

    fn context(http: &MockHttpClient, creds: &InMemoryCredentials) -> CliContext<MockHttpClient, InMemoryCredentials> {
        let config = ClientConfig::default()
            .with_api_base_url("http://api.test")
            .with_auth_url(AUTH_URL)
            .with_retry(RetryPolicy::none());
        CliContext::new(http.clone(), config, creds.clone())
    }

    #[test]
    fn test_resolve_password_precedence() {
        assert_eq!(
            resolve_password(Some("flag".into()), Some("env".into())),
            Some("flag".to_string())
        );
        assert_eq!(
            resolve_password(None, Some("env".into())),
            Some("env".to_string())
        );
        assert_eq!(
            resolve_password(Some(String::new()), Some("env".into())),
            Some("env".to_string())
        );
        assert_eq!(resolve_password(None, Some(String::new())), None);
    }

    #[tokio::test]
    async fn test_login_saves_credentials() {
        let http = MockHttpClient::new();
        http.set_response(AUTH_URL, MockResponse::json(200, json!({"token": "tok-1"})));
        let creds = InMemoryCredentials::new();
        let ctx = context(&http, &creds);

        run_login(&ctx, " ana ", Some("pw".to_string())).await.unwrap();

        assert_eq!(
            creds.get_credentials(),
            Some(Credentials::new("ana", "tok-1"))
        );
        assert_eq!(ctx.store.session().token(), "tok-1");
    }

    #[tokio::test]
    async fn test_failed_login_saves_nothing() {
        let http = MockHttpClient::new();
        http.set_response(AUTH_URL, MockResponse::status(401, "bad credentials"));
        let creds = InMemoryCredentials::new();
        let ctx = context(&http, &creds);

        assert!(run_login(&ctx, "ana", Some("wrong".to_string())).await.is_err());
        assert!(creds.get_credentials().is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_store_and_file() {
        let http = MockHttpClient::new();
        let creds = InMemoryCredentials::with_credentials(Credentials::new("ana", "tok"));
        let ctx = context(&http, &creds);
        assert!(restore_session(&ctx.credentials, ctx.store.session()).await.unwrap());

        run_logout(&ctx).await.unwrap();

        assert!(!ctx.store.session().is_authenticated());
        assert!(creds.get_credentials().is_none());
    }

    #[tokio::test]
    async fn test_require_session() {
        let http = MockHttpClient::new();
        let creds = InMemoryCredentials::new();
        let ctx = context(&http, &creds);
        let err = require_session(&ctx).unwrap_err();
        assert!(err.requires_reauth());

        ctx.store.set_credential("ana", "tok");
        assert!(require_session(&ctx).is_ok());
    }
}
