//! Session Claims Entity
//!
//! The payload carried by a session token. Nothing about a session lives on
//! the server: the claims travel inside the signed token held by the client.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_object::user_name::UserName;

/// Session token claims
///
/// Timestamps are Unix seconds, as required for the JWT `iat` and `exp` claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Verified username
    pub name: UserName,
    /// Issued at
    pub iat: i64,
    /// Expiration
    pub exp: i64,
}

impl SessionClaims {
    /// Create claims for a session starting at `issued_at`
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(name: UserName, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            name,
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> UserName {
        UserName::new("alice").unwrap()
    }

    #[test]
    fn test_new_sets_window() {
        let now = Utc::now();
        let claims = SessionClaims::new(alice(), now, Duration::days(7));

        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 3600);
    }

    #[test]
    fn test_claims_json_shape() {
        let claims = SessionClaims {
            name: alice(),
            iat: 1_700_000_000,
            exp: 1_700_604_800,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "alice", "iat": 1_700_000_000, "exp": 1_700_604_800})
        );
    }
}
