//! Token Codec
//!
//! Signs and verifies session tokens (JWT, HS256). Stateless apart from the
//! keys derived from the configured secret.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::domain::entity::session_claims::SessionClaims;
use crate::domain::value_object::user_name::UserName;
use crate::error::AuthResult;

/// Result of checking a presented token
///
/// Every failure (malformed, bad signature, expired, bad claims) collapses
/// into `Invalid`; callers treat it exactly like a missing token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenVerification {
    Valid(SessionClaims),
    Invalid,
}

/// A freshly signed token and the claims inside it
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: SessionClaims,
}

/// Session token codec
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: chrono::Duration,
}

impl TokenCodec {
    pub fn new(secret: &[u8], ttl: std::time::Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::days(7)),
        }
    }

    /// Sign a token for `name`, valid from now for the configured TTL
    pub fn issue(&self, name: UserName) -> AuthResult<IssuedToken> {
        self.issue_at(name, Utc::now())
    }

    /// Sign a token as if issued at `issued_at`
    pub fn issue_at(&self, name: UserName, issued_at: DateTime<Utc>) -> AuthResult<IssuedToken> {
        let claims = SessionClaims::new(name, issued_at, self.ttl);
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(IssuedToken { token, claims })
    }

    /// Check signature, structure and expiry of a presented token
    pub fn verify(&self, token: &str) -> TokenVerification {
        match decode::<SessionClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => TokenVerification::Valid(data.claims),
            Err(e) => {
                tracing::debug!(reason = ?e.kind(), "Session token rejected");
                TokenVerification::Invalid
            }
        }
    }
}
