//! Server configuration from the environment
//!
//! `.env` is loaded first (see `main`), so every variable below can live
//! there during development.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, bail};
use auth::AuthConfig;
use base64::Engine;
use base64::engine::general_purpose;
use vault::VaultConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000";
const DEFAULT_SITE_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    /// Directory served at `/avatars`
    pub avatar_dir: PathBuf,
    pub auth: AuthConfig,
    pub vault: VaultConfig,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let database_max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("Invalid DATABASE_MAX_CONNECTIONS: {raw}"))?,
            Err(_) => 5,
        };

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("Invalid BIND_ADDR")?;

        let frontend_origins = env::var("FRONTEND_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        let avatar_dir = env::var("AVATAR_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data/avatars"));

        let mut auth = if cfg!(debug_assertions) {
            AuthConfig::development()
        } else {
            AuthConfig {
                session_secret: session_secret_from_env()?,
                ..AuthConfig::default()
            }
        };

        let site_url = env::var("SITE_URL")
            .unwrap_or_else(|_| DEFAULT_SITE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        auth.site_url = site_url.clone();
        let vault = VaultConfig {
            site_url,
            ..VaultConfig::default()
        };

        if let Ok(raw) = env::var("REQUIRE_EMAIL_CONFIRMATION") {
            auth.require_email_confirmation = parse_flag(&raw)
                .with_context(|| format!("Invalid REQUIRE_EMAIL_CONFIRMATION: {raw}"))?;
        }

        Ok(Self {
            database_url,
            database_max_connections,
            bind_addr,
            frontend_origins,
            avatar_dir,
            auth,
            vault,
        })
    }
}

/// `SESSION_SECRET`: base64 of exactly 32 bytes
fn session_secret_from_env() -> anyhow::Result<[u8; 32]> {
    let secret_b64 = env::var("SESSION_SECRET").context("SESSION_SECRET must be set in production")?;
    decode_secret(&secret_b64)
}

fn decode_secret(secret_b64: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = general_purpose::STANDARD
        .decode(secret_b64.trim())
        .context("SESSION_SECRET is not valid base64")?;
    let Ok(secret) = <[u8; 32]>::try_from(bytes.as_slice()) else {
        bail!("SESSION_SECRET must decode to 32 bytes, got {}", bytes.len());
    };
    Ok(secret)
}

fn parse_flag(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => bail!("expected true or false"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_secret_requires_32_bytes() {
        let good = general_purpose::STANDARD.encode([7u8; 32]);
        assert_eq!(decode_secret(&good).unwrap(), [7u8; 32]);

        let short = general_purpose::STANDARD.encode([7u8; 16]);
        assert!(decode_secret(&short).is_err());
        assert!(decode_secret("not base64!").is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("TRUE").unwrap());
        assert!(!parse_flag(" off ").unwrap());
        assert!(parse_flag("maybe").is_err());
    }
}
