//! Auth Router

use axum::{Router, routing::get};
use tower_http::services::ServeFile;

use crate::application::config::AuthConfig;
use crate::domain::verifier::IdentityVerifier;
use crate::error::AuthResult;
use crate::infra::http_verifier::HttpIdentityVerifier;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router backed by the HTTP identity verifier
pub fn auth_router(config: AuthConfig) -> AuthResult<Router> {
    config.validate()?;
    let verifier = HttpIdentityVerifier::new(&config)?;
    Ok(auth_router_generic(verifier, config))
}

/// Create a generic Auth router for any verifier implementation
pub fn auth_router_generic<V>(verifier: V, config: AuthConfig) -> Router
where
    V: IdentityVerifier + Clone + Send + Sync + 'static,
{
    let favicon = ServeFile::new(config.favicon_path());
    let state = AuthAppState::new(verifier, config);

    Router::new()
        .route("/", get(handlers::index::<V>))
        .route("/auth", get(handlers::auth::<V>))
        .route("/logout", get(handlers::logout::<V>))
        .route_service("/favicon.ico", favicon)
        .with_state(state)
}
