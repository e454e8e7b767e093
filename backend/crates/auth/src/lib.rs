//! Auth (Authentication Handshake) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Session claims, value objects, identity verifier trait
//! - `application/` - Auth flow use case, token codec, configuration
//! - `infra/` - HTTP client for the identity verifier
//! - `presentation/` - HTTP handlers, views, router
//!
//! ## Flow
//! 1. `/auth` without a session or code redirects to the identity verifier
//! 2. The verifier sends the user back with a one-time `privateCode`
//! 3. The code is exchanged for a username and a signed session token is set
//!    as the `jwt` cookie
//! 4. Later requests carrying a valid token see the authenticated view
//!
//! ## Security Model
//! - Session tokens are HS256 JWTs; nothing is stored server-side
//! - Invalid, tampered or expired tokens are treated as "not signed in"
//! - Cookies are HttpOnly, Secure, SameSite=Lax, Path=/
//! - Logout only removes the client's copy of the token

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::http_verifier::HttpIdentityVerifier;
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{app_error::AppError, kind::ErrorKind};
