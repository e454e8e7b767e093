//! HTTP Identity Verifier
//!
//! Exchanges one-time codes with the remote verifier:
//! `GET <verifier>/api/auth/verifyToken?privateCode=<code>` answering
//! `{ "valid": bool, "username"?: string }`.

use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::application::config::AuthConfig;
use crate::domain::value_object::{user_name::UserName, verification_code::VerificationCode};
use crate::domain::verifier::{IdentityVerifier, RejectReason, VerificationOutcome};
use crate::error::{AuthError, AuthResult};

/// Wire shape of the verifier's answer
#[derive(Debug, Clone, Deserialize)]
struct VerifyTokenResponse {
    valid: bool,
    #[serde(default)]
    username: Option<String>,
}

/// reqwest-backed identity verifier
#[derive(Clone)]
pub struct HttpIdentityVerifier {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpIdentityVerifier {
    pub fn new(config: &AuthConfig) -> AuthResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.verifier_timeout)
            .build()
            .map_err(|e| AuthError::Configuration(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.verify_endpoint()?,
        })
    }
}

impl IdentityVerifier for HttpIdentityVerifier {
    async fn verify(&self, code: &VerificationCode) -> AuthResult<VerificationOutcome> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("privateCode", code.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let body = response.bytes().await?;
        Ok(interpret_response(&body))
    }
}

/// Turn a successful response body into an outcome
///
/// Anything that is not the documented JSON shape counts as a rejection.
/// The body must be a JSON object: derived `Deserialize` would also accept a
/// positional array such as `[true, "alice"]`.
fn interpret_response(body: &[u8]) -> VerificationOutcome {
    let parsed = match serde_json::from_slice::<Value>(body) {
        Ok(value @ Value::Object(_)) => serde_json::from_value::<VerifyTokenResponse>(value),
        Ok(_) => {
            tracing::warn!("Identity verifier returned a non-object JSON response");
            return VerificationOutcome::Rejected(RejectReason::MalformedResponse);
        }
        Err(e) => Err(e),
    };

    let parsed = match parsed {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(error = %e, "Identity verifier returned a malformed response");
            return VerificationOutcome::Rejected(RejectReason::MalformedResponse);
        }
    };

    if !parsed.valid {
        return VerificationOutcome::Rejected(RejectReason::InvalidCode);
    }

    match parsed.username.as_deref().map(UserName::new) {
        Some(Ok(name)) => VerificationOutcome::Verified(name),
        Some(Err(e)) => {
            tracing::warn!(error = %e, "Identity verifier returned an unusable username");
            VerificationOutcome::Rejected(RejectReason::MalformedResponse)
        }
        None => {
            tracing::warn!("Identity verifier confirmed a code without a username");
            VerificationOutcome::Rejected(RejectReason::MalformedResponse)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use std::collections::HashMap;
    use std::time::Duration;

    #[test]
    fn test_interpret_valid() {
        let outcome = interpret_response(br#"{"valid":true,"username":"alice"}"#);
        assert_eq!(
            outcome,
            VerificationOutcome::Verified(UserName::new("alice").unwrap())
        );
    }

    #[test]
    fn test_interpret_positional_array_is_not_confirmation() {
        assert_eq!(
            interpret_response(br#"[true,"alice"]"#),
            VerificationOutcome::Rejected(RejectReason::MalformedResponse)
        );
    }

    #[test]
    fn test_interpret_keeps_name_verbatim() {
        let long = "x".repeat(65);
        let body = format!(r#"{{"valid":true,"username":" {long} "}}"#);
        assert_eq!(
            interpret_response(body.as_bytes()),
            VerificationOutcome::Verified(UserName::new(format!(" {long} ")).unwrap())
        );
    }

    #[test]
    fn test_interpret_invalid() {
        assert_eq!(
            interpret_response(br#"{"valid":false}"#),
            VerificationOutcome::Rejected(RejectReason::InvalidCode)
        );
        // A username next to valid:false changes nothing
        assert_eq!(
            interpret_response(br#"{"valid":false,"username":"alice"}"#),
            VerificationOutcome::Rejected(RejectReason::InvalidCode)
        );
    }

    #[test]
    fn test_interpret_malformed() {
        let malformed: [&[u8]; 10] = [
            b"",
            b"not json",
            br#"{"username":"alice"}"#,
            br#"{"valid":"true","username":"alice"}"#,
            br#"{"valid":true}"#,
            br#"{"valid":true,"username":""}"#,
            br#"{"valid":true,"username":null}"#,
            br#"[true,"alice"]"#,
            br#"[false]"#,
            br#""alice""#,
        ];
        for body in malformed {
            assert_eq!(
                interpret_response(body),
                VerificationOutcome::Rejected(RejectReason::MalformedResponse),
                "body: {}",
                String::from_utf8_lossy(body)
            );
        }
    }

    async fn verify_token(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
        match params.get("privateCode").map(String::as_str) {
            Some("abc123") => (StatusCode::OK, r#"{"valid":true,"username":"alice"}"#),
            Some("garbage") => (StatusCode::OK, "<html>oops</html>"),
            Some("array") => (StatusCode::OK, r#"[true,"alice"]"#),
            Some("boom") => (StatusCode::INTERNAL_SERVER_ERROR, "error"),
            Some("slow") => {
                tokio::time::sleep(Duration::from_secs(5)).await;
                (StatusCode::OK, r#"{"valid":true,"username":"late"}"#)
            }
            _ => (StatusCode::OK, r#"{"valid":false}"#),
        }
    }

    /// Start a fake verifier on an ephemeral port and return its base URL
    async fn spawn_fake_verifier() -> Url {
        let app = Router::new().route("/api/auth/verifyToken", get(verify_token));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Url::parse(&format!("http://{addr}/")).unwrap()
    }

    async fn verifier(timeout: Duration) -> HttpIdentityVerifier {
        let config = AuthConfig {
            verifier_base_url: spawn_fake_verifier().await,
            verifier_timeout: timeout,
            ..AuthConfig::default()
        };
        HttpIdentityVerifier::new(&config).unwrap()
    }

    fn code(value: &str) -> VerificationCode {
        VerificationCode::from_query(Some(value.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_verified_code() {
        let verifier = verifier(Duration::from_secs(5)).await;
        let outcome = verifier.verify(&code("abc123")).await.unwrap();
        assert_eq!(
            outcome,
            VerificationOutcome::Verified(UserName::new("alice").unwrap())
        );
    }

    #[tokio::test]
    async fn test_rejected_code() {
        let verifier = verifier(Duration::from_secs(5)).await;
        let outcome = verifier.verify(&code("bad")).await.unwrap();
        assert_eq!(outcome, VerificationOutcome::Rejected(RejectReason::InvalidCode));
    }

    #[tokio::test]
    async fn test_non_json_body_is_rejection() {
        let verifier = verifier(Duration::from_secs(5)).await;
        let outcome = verifier.verify(&code("garbage")).await.unwrap();
        assert_eq!(
            outcome,
            VerificationOutcome::Rejected(RejectReason::MalformedResponse)
        );
    }

    #[tokio::test]
    async fn test_array_body_is_rejection() {
        let verifier = verifier(Duration::from_secs(5)).await;
        let outcome = verifier.verify(&code("array")).await.unwrap();
        assert_eq!(
            outcome,
            VerificationOutcome::Rejected(RejectReason::MalformedResponse)
        );
    }

    #[tokio::test]
    async fn test_error_status_is_unavailable() {
        let verifier = verifier(Duration::from_secs(5)).await;
        let err = verifier.verify(&code("boom")).await.unwrap_err();
        assert!(matches!(err, AuthError::VerifierUnavailable(_)));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_timeout() {
        let verifier = verifier(Duration::from_millis(200)).await;
        let err = verifier.verify(&code("slow")).await.unwrap_err();
        assert!(matches!(err, AuthError::VerifierTimeout));
        assert_eq!(err.status_code(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[tokio::test]
    async fn test_unreachable_verifier() {
        // Bind then drop to get a port nobody listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = AuthConfig {
            verifier_base_url: Url::parse(&format!("http://{addr}/")).unwrap(),
            ..AuthConfig::default()
        };
        let verifier = HttpIdentityVerifier::new(&config).unwrap();

        let err = verifier.verify(&code("abc123")).await.unwrap_err();
        assert!(matches!(err, AuthError::VerifierUnavailable(_)));
        assert!(!err.to_string().contains("abc123"));
    }
}
