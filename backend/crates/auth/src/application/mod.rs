//! Application Layer
//!
//! Use cases and application services.

pub mod auth_flow;
pub mod config;
pub mod token_codec;

// Re-exports
pub use auth_flow::{AuthFlowInput, AuthFlowOutcome, AuthFlowUseCase};
pub use config::AuthConfig;
pub use token_codec::{IssuedToken, TokenCodec, TokenVerification};
