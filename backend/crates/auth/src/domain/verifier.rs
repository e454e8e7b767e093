//! Identity Verifier Trait
//!
//! Interface to the external service that confirms one-time codes.
//! Implementation is in infrastructure layer.

use crate::domain::value_object::{user_name::UserName, verification_code::VerificationCode};
use crate::error::AuthResult;

/// Outcome of exchanging a one-time code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// The verifier confirmed the code and named the user
    Verified(UserName),
    /// The code was not accepted
    Rejected(RejectReason),
}

/// Why a code was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The verifier answered `valid: false`
    InvalidCode,
    /// The verifier answered, but not with the expected JSON shape
    MalformedResponse,
}

/// Identity verifier trait
///
/// `Err` is reserved for failures to get an answer at all (transport errors,
/// timeouts, non-success statuses). A well-formed "no" is `Ok(Rejected)`.
#[trait_variant::make(IdentityVerifier: Send)]
pub trait LocalIdentityVerifier {
    async fn verify(&self, code: &VerificationCode) -> AuthResult<VerificationOutcome>;
}
