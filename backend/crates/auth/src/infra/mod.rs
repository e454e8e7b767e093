//! Infrastructure Layer
//!
//! External service integrations.

pub mod http_verifier;

pub use http_verifier::HttpIdentityVerifier;
