//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::rate_limit::RateLimitConfig;

use crate::error::{AuthError, AuthResult};

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session secret key for HMAC signing (32 bytes)
    pub session_secret: [u8; 32],
    /// Session TTL (1 week, sliding)
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Absolute origin used in emailed links
    pub site_url: String,
    /// New accounts must follow the confirmation link before signing in
    pub require_email_confirmation: bool,
    /// Lifetime of confirmation links and magic-link codes
    pub one_time_token_ttl: Duration,
    /// Magic-link requests per client IP
    pub magic_link_rate_limit: RateLimitConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "pv_session".to_string(),
            session_secret: [0u8; 32],
            session_ttl: Duration::from_secs(7 * 24 * 3600),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
            site_url: "http://localhost:3000".to_string(),
            require_email_confirmation: true,
            one_time_token_ttl: Duration::from_secs(3600),
            magic_link_rate_limit: RateLimitConfig::new(5, 600),
        }
    }
}

impl AuthConfig {
    /// Create config with a random session secret (for development)
    pub fn with_random_secret() -> Self {
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&platform::crypto::random_bytes(32));
        Self {
            session_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie, no email confirmation)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            require_email_confirmation: false,
            ..Self::with_random_secret()
        }
    }

    pub fn session_ttl_ms(&self) -> i64 {
        self.session_ttl.as_millis() as i64
    }

    pub fn session_ttl_chrono(&self) -> AuthResult<chrono::Duration> {
        chrono::Duration::from_std(self.session_ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid session TTL: {e}")))
    }

    pub fn one_time_token_ttl_chrono(&self) -> AuthResult<chrono::Duration> {
        chrono::Duration::from_std(self.one_time_token_ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid token TTL: {e}")))
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Session cookie attributes; Max-Age follows the session TTL
    pub fn cookie_config(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.session_ttl.as_secs()),
        }
    }

    /// `site_url` joined with an absolute path
    pub fn absolute_url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.site_url.trim_end_matches('/'), path_and_query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_config() {
        let config = AuthConfig::development();
        assert!(!config.cookie_secure);
        assert!(!config.require_email_confirmation);
        assert_ne!(config.session_secret, [0u8; 32]);
    }

    #[test]
    fn test_cookie_config_uses_session_ttl() {
        let cookie = AuthConfig::default().cookie_config();
        assert_eq!(cookie.name, "pv_session");
        assert_eq!(cookie.max_age_secs, Some(7 * 24 * 3600));
    }

    #[test]
    fn test_absolute_url_joins_without_double_slash() {
        let config = AuthConfig {
            site_url: "https://promptvault.dev/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.absolute_url("/auth/callback?code=x"),
            "https://promptvault.dev/auth/callback?code=x"
        );
    }
}
