//! HTTP Handlers

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{AuthFlowInput, AuthFlowOutcome, AuthFlowUseCase, TokenCodec};
use crate::domain::verifier::IdentityVerifier;
use crate::error::AuthResult;
use crate::presentation::dto::AuthQuery;
use crate::presentation::views;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<V>
where
    V: IdentityVerifier + Clone + Send + Sync + 'static,
{
    pub verifier: Arc<V>,
    pub codec: Arc<TokenCodec>,
    pub config: Arc<AuthConfig>,
}

impl<V> AuthAppState<V>
where
    V: IdentityVerifier + Clone + Send + Sync + 'static,
{
    pub fn new(verifier: V, config: AuthConfig) -> Self {
        let codec = TokenCodec::new(config.secret_bytes(), config.session_ttl);
        Self {
            verifier: Arc::new(verifier),
            codec: Arc::new(codec),
            config: Arc::new(config),
        }
    }
}

/// GET /
pub async fn index<V>(State(state): State<AuthAppState<V>>) -> impl IntoResponse
where
    V: IdentityVerifier + Clone + Send + Sync + 'static,
{
    views::index_page(&state.config.app_display_name)
}

/// GET /auth
pub async fn auth<V>(
    State(state): State<AuthAppState<V>>,
    headers: HeaderMap,
    query: Result<Query<AuthQuery>, QueryRejection>,
) -> AuthResult<Response>
where
    V: IdentityVerifier + Clone + Send + Sync + 'static,
{
    let use_case = AuthFlowUseCase::new(
        state.verifier.clone(),
        state.codec.clone(),
        state.config.clone(),
    );

    // An unreadable query string (e.g. a repeated privateCode) carries no usable code
    let private_code = match query {
        Ok(Query(query)) => query.private_code,
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "Ignoring malformed query string");
            None
        }
    };

    let input = AuthFlowInput {
        session_token: extract_session_cookie(&headers, &state.config.session_cookie_name),
        private_code,
    };

    let response = match use_case.execute(input).await? {
        AuthFlowOutcome::Authenticated { claims, token } => (
            [(header::CACHE_CONTROL, HeaderValue::from_static("no-store"))],
            views::authenticated_page(claims.name.as_str(), &token),
        )
            .into_response(),
        AuthFlowOutcome::NeedsRedirect { location } => found(location.as_str()),
        AuthFlowOutcome::VerifiedSuccess { issued } => {
            let cookie = platform::cookie::set_cookie_header(
                &state.config.session_cookie(),
                &issued.token,
            );
            (
                [
                    (header::SET_COOKIE, cookie),
                    (header::CACHE_CONTROL, HeaderValue::from_static("no-store")),
                ],
                views::verified_page(issued.claims.name.as_str()),
            )
                .into_response()
        }
        AuthFlowOutcome::VerifiedFailure { reason } => {
            views::verification_failed_page(reason).into_response()
        }
    };

    Ok(response)
}

/// GET /logout
///
/// Only the client's copy is removed; the token itself stays valid until it
/// expires.
pub async fn logout<V>(State(state): State<AuthAppState<V>>, headers: HeaderMap) -> Response
where
    V: IdentityVerifier + Clone + Send + Sync + 'static,
{
    if extract_session_cookie(&headers, &state.config.session_cookie_name).is_some() {
        tracing::info!("User signed out");
    }

    let cookie = platform::cookie::delete_cookie_header(&state.config.session_cookie());
    let mut response = found("/");
    response.headers_mut().insert(header::SET_COOKIE, cookie);
    response
}

// ============================================================================
// Helper Functions
// ============================================================================

/// 302 Found
fn found(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(location) => (StatusCode::FOUND, [(header::LOCATION, location)]).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Redirect location is not a valid header value");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn extract_session_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    platform::cookie::extract_cookie(headers, name)
}
