//! Domain Layer
//!
//! Contains the session claims, value objects, and the verifier trait.

pub mod entity;
pub mod value_object;
pub mod verifier;

// Re-exports
pub use entity::session_claims::SessionClaims;
pub use value_object::{user_name::UserName, verification_code::VerificationCode};
pub use verifier::{IdentityVerifier, RejectReason, VerificationOutcome};
