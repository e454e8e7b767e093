//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod settings;

use auth::{AuthConfig, auth_router};
use axum::Router;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use std::any::Any;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;

    tracing::info!(
        public_base_url = %settings.auth.public_base_url,
        verifier_base_url = %settings.auth.verifier_base_url,
        cookie_secure = settings.auth.cookie_secure,
        asset_dir = %settings.auth.asset_dir.display(),
        "Configuration loaded"
    );
    if !settings.auth.favicon_path().is_file() {
        tracing::warn!(
            path = %settings.auth.favicon_path().display(),
            "Favicon not found, /favicon.ico will answer 404"
        );
    }

    let app = build_app(settings.auth)?;

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Auth routes wrapped in the server-wide layers
fn build_app(config: AuthConfig) -> anyhow::Result<Router> {
    Ok(with_layers(auth_router(config)?))
}

fn with_layers(router: Router) -> Router {
    router
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
}

/// Panics become an opaque 500 problem response
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "Request handler panicked");

    AppError::internal("Internal Server Error").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use secrecy::SecretString;
    use tower::ServiceExt;

    async fn explode() -> &'static str {
        panic!("secret internal detail")
    }

    #[tokio::test]
    async fn test_panic_becomes_opaque_500() {
        let app = with_layers(Router::new().route("/explode", get(explode)));

        let response = app
            .oneshot(Request::get("/explode").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(!body.contains("secret internal detail"));
    }

    #[tokio::test]
    async fn test_build_app_serves_index() {
        let config = AuthConfig {
            session_secret: SecretString::from("test".to_string()),
            ..AuthConfig::default()
        };
        let app = build_app(config).unwrap();

        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
