use serde::{Deserialize, Serialize};

/// Body posted to the authentication endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Successful login answer. Only `token` is required; the rest is kept as-is.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body() {
        let body = serde_json::to_string(&LoginRequest {
            username: "ana",
            password: "secret",
        })
        .unwrap();
        assert_eq!(body, r#"{"username":"ana","password":"secret"}"#);
    }

    #[test]
    fn test_response_keeps_extra_fields() {
        let resp: LoginResponse =
            serde_json::from_str(r#"{"token": "abc", "expiresIn": 3600}"#).unwrap();
        assert_eq!(resp.token, "abc");
        assert_eq!(resp.extra.get("expiresIn"), Some(&serde_json::json!(3600)));
    }

    #[test]
    fn test_response_without_token_fails() {
        assert!(serde_json::from_str::<LoginResponse>(r#"{"user": "ana"}"#).is_err());
    }
}
