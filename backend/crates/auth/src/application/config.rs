//! Application Configuration
//!
//! Configuration for the Auth application layer. Built once at startup and
//! shared read-only between requests.

use std::path::PathBuf;
use std::time::Duration;

use platform::cookie::CookieConfig;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::{AuthError, AuthResult};

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Path of the authentication endpoint, relative to the public base URL
pub const AUTH_ENDPOINT: &str = "auth";

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Secret used to sign and verify session tokens
    pub session_secret: SecretString,
    /// Session token and cookie lifetime (1 week)
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Externally visible base URL of this service
    pub public_base_url: Url,
    /// Base URL of the identity verifier
    pub verifier_base_url: Url,
    /// Application name shown by the identity verifier
    pub app_display_name: String,
    /// Upper bound for one verification request
    pub verifier_timeout: Duration,
    /// Directory holding static assets (favicon)
    pub asset_dir: PathBuf,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "jwt".to_string(),
            session_secret: SecretString::from(String::new()),
            session_ttl: Duration::from_secs(7 * 24 * 3600), // 1 week
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            public_base_url: Url::parse("http://localhost:3000/").expect("static URL is valid"),
            verifier_base_url: Url::parse("https://verify.example.com/")
                .expect("static URL is valid"),
            app_display_name: "Handshake Demo".to_string(),
            verifier_timeout: Duration::from_secs(10),
            asset_dir: PathBuf::from("static"),
        }
    }
}

impl AuthConfig {
    /// Reject configurations the handshake cannot run with
    ///
    /// Routes are mounted at the root, so the public base URL must not carry
    /// a path of its own.
    pub fn validate(&self) -> AuthResult<()> {
        if !self.has_secret() {
            return Err(AuthError::Configuration(
                "session secret must not be empty".to_string(),
            ));
        }
        self.callback_url()?;
        self.verify_endpoint()?;
        Ok(())
    }

    /// Raw secret bytes for the token codec
    pub fn secret_bytes(&self) -> &[u8] {
        self.session_secret.expose_secret().as_bytes()
    }

    pub fn has_secret(&self) -> bool {
        !self.session_secret.expose_secret().is_empty()
    }

    /// Get session TTL in seconds
    pub fn session_ttl_secs(&self) -> i64 {
        self.session_ttl.as_secs() as i64
    }

    /// Cookie attributes shared by the set and clear responses
    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.session_ttl_secs()),
        }
    }

    /// This service's own authentication endpoint, e.g. `https://app.example/auth`
    pub fn callback_url(&self) -> AuthResult<Url> {
        if self.public_base_url.path() != "/" {
            return Err(AuthError::Configuration(format!(
                "public base URL must not have a path: {}",
                self.public_base_url
            )));
        }
        Ok(as_directory(&self.public_base_url).join(AUTH_ENDPOINT)?)
    }

    /// Authorization page of the identity verifier, including the redirect-back
    /// URL (base64) and the application display name.
    pub fn authorize_url(&self) -> AuthResult<Url> {
        let callback = self.callback_url()?;
        let mut url = as_directory(&self.verifier_base_url).join("auth/")?;
        url.query_pairs_mut()
            .append_pair(
                "redirect",
                &platform::crypto::to_base64(callback.as_str().as_bytes()),
            )
            .append_pair("name", &self.app_display_name);
        Ok(url)
    }

    /// Verification endpoint of the identity verifier (without the code)
    pub fn verify_endpoint(&self) -> AuthResult<Url> {
        Ok(as_directory(&self.verifier_base_url).join("api/auth/verifyToken")?)
    }

    pub fn favicon_path(&self) -> PathBuf {
        self.asset_dir.join("favicon.ico")
    }
}

/// `Url::join` replaces the last path segment unless the base ends with `/`.
fn as_directory(base: &Url) -> Url {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.set_query(None);
    base.set_fragment(None);
    base
}
