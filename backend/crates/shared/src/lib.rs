//! Shared Kernel - Domain-crossing minimal core
//!
//! The smallest vocabulary every crate in the workspace agrees on:
//! - Error classification ([`error::kind::ErrorKind`])
//! - The unified application error ([`error::app_error::AppError`])
//! - Conversions from common library errors
//!
//! **Design Principle**: only things whose meaning is identical in every
//! crate belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
