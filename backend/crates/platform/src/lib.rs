//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cookie management (Set-Cookie building, Cookie header parsing)
//! - Encoding helpers (Base64)

pub mod cookie;
pub mod crypto;
