//! API DTOs (Data Transfer Objects)

use serde::Deserialize;

/// Query string of GET /auth
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthQuery {
    /// One-time code handed back by the identity verifier
    #[serde(default)]
    pub private_code: Option<String>,
}
