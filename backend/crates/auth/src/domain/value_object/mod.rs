//! Value Object Module

pub mod user_name;
pub mod verification_code;
