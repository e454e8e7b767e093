//! One-Time Verification Code Value Object
//!
//! Opaque single-use string handed back by the Identity Verifier through the
//! `privateCode` query parameter. It is never stored and never logged.

use std::fmt;

#[derive(Clone, PartialEq, Eq)]
pub struct VerificationCode(String);

impl VerificationCode {
    /// Build from the raw query value. Missing and blank values are absent.
    pub fn from_query(raw: Option<String>) -> Option<Self> {
        raw.filter(|code| !code.trim().is_empty()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VerificationCode(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query() {
        let code = VerificationCode::from_query(Some("abc123".to_string())).unwrap();
        assert_eq!(code.as_str(), "abc123");

        assert!(VerificationCode::from_query(None).is_none());
        assert!(VerificationCode::from_query(Some(String::new())).is_none());
        assert!(VerificationCode::from_query(Some("  ".to_string())).is_none());
    }

    #[test]
    fn test_debug_hides_value() {
        let code = VerificationCode::from_query(Some("secret-code".to_string())).unwrap();
        assert!(!format!("{code:?}").contains("secret-code"));
    }
}
