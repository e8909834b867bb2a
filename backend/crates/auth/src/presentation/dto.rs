//! API DTOs (Data Transfer Objects)

use kernel::id::UserId;
use serde::{Deserialize, Serialize};

// ============================================================================
// Sign Up
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct SignUpRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub username: String,
}

/// `GET /signup` view model
#[derive(Debug, Clone, Serialize)]
pub struct SignUpPageResponse {
    pub username_pattern: &'static str,
    pub username_min_length: usize,
    pub username_max_length: usize,
    pub password_min_length: usize,
}

// ============================================================================
// Sign In
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct SignInRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    /// Local path to continue to after signing in
    pub next: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginPageQuery {
    pub next: Option<String>,
    pub error: Option<String>,
}

/// `GET /login` view model
#[derive(Debug, Clone, Serialize)]
pub struct LoginPageResponse {
    pub next: String,
    pub error: Option<&'static str>,
}

// ============================================================================
// One-time tokens
// ============================================================================

/// `GET /api/auth/confirm`
#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmQuery {
    pub token_hash: Option<String>,
    #[serde(rename = "type")]
    pub otp_type: Option<String>,
    pub next: Option<String>,
}

/// `GET /auth/callback`
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MagicLinkRequest {
    #[serde(default)]
    pub email: String,
    pub next: Option<String>,
}

// ============================================================================
// Session Status
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    pub user_id: Option<UserId>,
    pub expires_at_ms: Option<i64>,
}
