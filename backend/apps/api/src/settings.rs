//! Startup Settings
//!
//! Reads process environment into [`AuthConfig`] plus the listen port.
//! Any invalid value aborts startup.

use anyhow::{Context, bail};
use auth::AuthConfig;
use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

const DEFAULT_PORT: u16 = 3000;
/// Assets ship next to this crate, independent of the working directory
const DEFAULT_ASSET_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

#[derive(Debug)]
pub struct Settings {
    pub auth: AuthConfig,
    pub port: u16,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = AuthConfig::default();

        let Some(secret) = var("AUTH_SESSION_SECRET") else {
            bail!("AUTH_SESSION_SECRET must be set in environment");
        };

        let public_base_url = match var("PUBLIC_BASE_URL") {
            Some(raw) => parse_public_base_url(&raw)?,
            None => defaults.public_base_url.clone(),
        };
        let verifier_base_url = match var("VERIFIER_BASE_URL") {
            Some(raw) => parse_url("VERIFIER_BASE_URL", &raw)?,
            None => defaults.verifier_base_url.clone(),
        };
        let verifier_timeout = match var("VERIFIER_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("VERIFIER_TIMEOUT_SECS is not a number: {raw}"))?;
                if secs == 0 {
                    bail!("VERIFIER_TIMEOUT_SECS must be greater than zero");
                }
                Duration::from_secs(secs)
            }
            None => defaults.verifier_timeout,
        };
        let cookie_secure = match var("COOKIE_SECURE") {
            Some(raw) => parse_bool("COOKIE_SECURE", &raw)?,
            None => defaults.cookie_secure,
        };
        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT is not a valid port: {raw}"))?,
            None => DEFAULT_PORT,
        };

        let auth = AuthConfig {
            session_secret: SecretString::from(secret),
            public_base_url,
            verifier_base_url,
            app_display_name: var("APP_DISPLAY_NAME").unwrap_or(defaults.app_display_name),
            verifier_timeout,
            cookie_secure,
            asset_dir: var("ASSET_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSET_DIR)),
            ..AuthConfig::default()
        };

        auth.validate()
            .context("Auth configuration is not usable")?;

        Ok(Self { auth, port })
    }
}

fn parse_url(key: &str, raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("{key} is not a valid URL: {raw}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("{key} must be an http(s) URL: {raw}");
    }
    Ok(url)
}

/// The service mounts its routes at the root, so the base URL has no path
fn parse_public_base_url(raw: &str) -> anyhow::Result<Url> {
    let url = parse_url("PUBLIC_BASE_URL", raw)?;
    if url.path() != "/" {
        bail!("PUBLIC_BASE_URL must not contain a path: {raw}");
    }
    Ok(url)
}

fn parse_bool(key: &str, raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => bail!("{key} must be true or false: {raw}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> anyhow::Result<Settings> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = settings(&[("AUTH_SESSION_SECRET", "s3cret")]).unwrap();

        assert_eq!(settings.port, 3000);
        assert!(settings.auth.has_secret());
        assert!(settings.auth.cookie_secure);
        assert_eq!(settings.auth.verifier_timeout, Duration::from_secs(10));
        assert_eq!(
            settings.auth.public_base_url.as_str(),
            "http://localhost:3000/"
        );
        assert!(settings.auth.asset_dir.is_absolute());
        assert!(settings.auth.favicon_path().is_file());
    }

    #[test]
    fn test_missing_or_blank_secret_fails() {
        assert!(settings(&[]).is_err());
        assert!(settings(&[("AUTH_SESSION_SECRET", "   ")]).is_err());
    }

    #[test]
    fn test_overrides() {
        let settings = settings(&[
            ("AUTH_SESSION_SECRET", "s3cret"),
            ("PUBLIC_BASE_URL", "https://app.example.org/"),
            ("VERIFIER_BASE_URL", "https://id.example.org/base/"),
            ("APP_DISPLAY_NAME", "My App"),
            ("VERIFIER_TIMEOUT_SECS", "3"),
            ("COOKIE_SECURE", "false"),
            ("ASSET_DIR", "/srv/static"),
            ("PORT", "8080"),
        ])
        .unwrap();

        assert_eq!(settings.port, 8080);
        assert_eq!(
            settings.auth.callback_url().unwrap().as_str(),
            "https://app.example.org/auth"
        );
        assert_eq!(
            settings.auth.verify_endpoint().unwrap().as_str(),
            "https://id.example.org/base/api/auth/verifyToken"
        );
        assert_eq!(settings.auth.app_display_name, "My App");
        assert_eq!(settings.auth.verifier_timeout, Duration::from_secs(3));
        assert!(!settings.auth.cookie_secure);
        assert_eq!(settings.auth.asset_dir, PathBuf::from("/srv/static"));
    }

    #[test]
    fn test_invalid_values_fail() {
        let cases = [
            ("PUBLIC_BASE_URL", "not a url"),
            ("VERIFIER_BASE_URL", "ftp://example.com"),
            ("VERIFIER_TIMEOUT_SECS", "ten"),
            ("VERIFIER_TIMEOUT_SECS", "0"),
            ("COOKIE_SECURE", "maybe"),
            ("PORT", "70000"),
            ("PUBLIC_BASE_URL", "https://app.example.com/demo"),
            ("PUBLIC_BASE_URL", "https://app.example.com/demo/"),
        ];
        for (key, value) in cases {
            let result = settings(&[("AUTH_SESSION_SECRET", "s3cret"), (key, value)]);
            assert!(result.is_err(), "{key}={value} should be rejected");
        }
    }
}
