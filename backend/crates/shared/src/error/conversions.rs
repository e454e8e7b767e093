//! Error conversions - HTTP rendering of [`AppError`]
//!
//! Turns an [`AppError`] into an RFC 7807 problem response. Only the kind,
//! message and action reach the client; the source stays server-side.

#[cfg(feature = "axum")]
use super::app_error::AppError;

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
            "action": self.action(),
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(all(test, feature = "axum"))]
mod tests {
    use super::*;
    use crate::error::kind::ErrorKind;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn test_problem_body_hides_source() {
        let err = AppError::new(ErrorKind::GatewayTimeout, "Gateway Timeout")
            .with_action("Please try signing in again later")
            .with_source(std::io::Error::other("10.0.0.7:443 timed out"));

        let response = err.into_response();
        assert_eq!(response.status().as_u16(), 504);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], 504);
        assert_eq!(body["title"], "Gateway Timeout");
        assert_eq!(body["action"], "Please try signing in again later");
        assert!(!String::from_utf8_lossy(&bytes).contains("10.0.0.7"));
    }
}
