//! Auth Flow Use Case
//!
//! Decides, for one request to the authentication endpoint, which of the four
//! terminal outcomes applies:
//!
//! ```text
//! CheckingSession --valid token--> Authenticated
//!        |
//!        v
//! CheckingCode --no code--> NeedsRedirect
//!        |
//!        v
//! VerifyingCode --valid--> VerifiedSuccess
//!               --invalid--> VerifiedFailure
//! ```

use std::sync::Arc;

use url::Url;

use crate::application::config::AuthConfig;
use crate::application::token_codec::{IssuedToken, TokenCodec, TokenVerification};
use crate::domain::entity::session_claims::SessionClaims;
use crate::domain::value_object::verification_code::VerificationCode;
use crate::domain::verifier::{IdentityVerifier, RejectReason, VerificationOutcome};
use crate::error::AuthResult;

/// Input DTO for the auth flow
#[derive(Debug, Clone, Default)]
pub struct AuthFlowInput {
    /// Raw value of the session cookie, if any
    pub session_token: Option<String>,
    /// Raw `privateCode` query value, if any
    pub private_code: Option<String>,
}

/// Terminal outcome of the auth flow
#[derive(Debug, Clone)]
pub enum AuthFlowOutcome {
    /// The cookie carried a valid session token
    Authenticated { claims: SessionClaims, token: String },
    /// No session and no code: send the user to the verifier
    NeedsRedirect { location: Url },
    /// The code was confirmed and a new session token was signed
    VerifiedSuccess { issued: IssuedToken },
    /// The code was not accepted
    VerifiedFailure { reason: RejectReason },
}

/// Auth flow use case
pub struct AuthFlowUseCase<V>
where
    V: IdentityVerifier,
{
    verifier: Arc<V>,
    codec: Arc<TokenCodec>,
    config: Arc<AuthConfig>,
}

impl<V> AuthFlowUseCase<V>
where
    V: IdentityVerifier,
{
    pub fn new(verifier: Arc<V>, codec: Arc<TokenCodec>, config: Arc<AuthConfig>) -> Self {
        Self {
            verifier,
            codec,
            config,
        }
    }

    pub async fn execute(&self, input: AuthFlowInput) -> AuthResult<AuthFlowOutcome> {
        // CheckingSession
        if let Some(token) = input.session_token {
            if let TokenVerification::Valid(claims) = self.codec.verify(&token) {
                return Ok(AuthFlowOutcome::Authenticated { claims, token });
            }
        }

        // CheckingCode
        let Some(code) = VerificationCode::from_query(input.private_code) else {
            tracing::debug!("No session and no verification code, redirecting to verifier");
            return Ok(AuthFlowOutcome::NeedsRedirect {
                location: self.config.authorize_url()?,
            });
        };

        // VerifyingCode
        match self.verifier.verify(&code).await? {
            VerificationOutcome::Verified(name) => {
                let issued = self.codec.issue(name)?;
                tracing::info!(user = %issued.claims.name, "User verified, session issued");
                Ok(AuthFlowOutcome::VerifiedSuccess { issued })
            }
            VerificationOutcome::Rejected(reason) => {
                tracing::debug!(reason = ?reason, "Verification code rejected");
                Ok(AuthFlowOutcome::VerifiedFailure { reason })
            }
        }
    }
}
