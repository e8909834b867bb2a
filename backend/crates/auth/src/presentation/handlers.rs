//! HTTP Handlers

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use kernel::form::FormSuccessBody;
use kernel::viewer::HOME_PATH;
use platform::password::MIN_PASSWORD_LENGTH;
use platform::rate_limit::InMemoryRateLimitStore;
use platform::redirect::safe_redirect_path;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    CONFIRMATION_SENT_MESSAGE, CheckSessionUseCase, MAGIC_LINK_SENT_MESSAGE, MagicLinkInput,
    MagicLinkUseCase, SignInInput, SignInUseCase, SignOutUseCase, SignUpInput, SignUpOutput,
    SignUpUseCase, VerifyTokenUseCase,
};
use crate::domain::mailer::Mailer;
use crate::domain::repository::AuthStore;
use crate::domain::value_object::token_kind::TokenKind;
use crate::domain::value_object::user_name::{USER_NAME_MAX_LENGTH, USER_NAME_MIN_LENGTH};
use crate::error::AuthResult;
use crate::presentation::dto::{
    CallbackQuery, ConfirmQuery, LoginPageQuery, LoginPageResponse, MagicLinkRequest,
    SessionStatusResponse, SignInRequest, SignUpPageResponse, SignUpRequest,
};
use crate::presentation::middleware::Client;

/// Where failed confirmation links land
pub const INVALID_TOKEN_REDIRECT: &str = "/login?error=invalid_token";

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R, M>
where
    R: AuthStore,
    M: Mailer + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub config: Arc<AuthConfig>,
    pub rate_limits: Arc<InMemoryRateLimitStore>,
}

// ============================================================================
// Sign Up
// ============================================================================

/// GET /signup
pub async fn sign_up_page() -> Json<SignUpPageResponse> {
    Json(SignUpPageResponse {
        username_pattern: "^[a-z0-9_]+$",
        username_min_length: USER_NAME_MIN_LENGTH,
        username_max_length: USER_NAME_MAX_LENGTH,
        password_min_length: MIN_PASSWORD_LENGTH,
    })
}

/// POST /signup
pub async fn sign_up<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Client(fingerprint): Client,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<Response>
where
    R: AuthStore,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    let input = SignUpInput {
        email: req.email,
        password: req.password,
        username: req.username,
    };

    match use_case.execute(input, fingerprint).await? {
        SignUpOutput::ConfirmationSent => Ok(Json(FormSuccessBody {
            success: CONFIRMATION_SENT_MESSAGE.to_string(),
        })
        .into_response()),
        SignUpOutput::SignedIn { session_token } => {
            Ok(redirect_with_session(&state.config, &session_token, HOME_PATH))
        }
    }
}

// ============================================================================
// Sign In
// ============================================================================

/// GET /login
pub async fn login_page(Query(query): Query<LoginPageQuery>) -> Json<LoginPageResponse> {
    let error = query.error.as_deref().map(|code| match code {
        "invalid_token" => "That link is invalid or has expired. Please sign in again.",
        _ => "Could not authenticate user",
    });

    Json(LoginPageResponse {
        next: safe_redirect_path(query.next.as_deref()).to_string(),
        error,
    })
}

/// POST /login
pub async fn sign_in<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Client(fingerprint): Client,
    Json(req): Json<SignInRequest>,
) -> AuthResult<Response>
where
    R: AuthStore,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let next = safe_redirect_path(req.next.as_deref()).to_string();
    let input = SignInInput {
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input, fingerprint).await?;

    Ok(redirect_with_session(
        &state.config,
        &output.session_token,
        &next,
    ))
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /logout
pub async fn sign_out<R, M>(
    State(state): State<AuthAppState<R, M>>,
    headers: HeaderMap,
) -> Response
where
    R: AuthStore,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name);

    if let Some(token) = token {
        let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
        // The cookie is cleared regardless
        if let Err(e) = use_case.execute(&token).await {
            tracing::debug!(error = %e, "Sign out with unusable session");
        }
    }

    (
        [(
            header::SET_COOKIE,
            state.config.cookie_config().delete_cookie_header(),
        )],
        Redirect::to(HOME_PATH),
    )
        .into_response()
}

// ============================================================================
// One-time tokens
// ============================================================================

/// GET /api/auth/confirm
pub async fn confirm_email<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Client(fingerprint): Client,
    Query(query): Query<ConfirmQuery>,
) -> Response
where
    R: AuthStore,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let next = safe_redirect_path(query.next.as_deref()).to_string();

    let (Some(token_hash), Some(kind)) = (
        query.token_hash,
        query.otp_type.as_deref().and_then(TokenKind::from_otp_type),
    ) else {
        return Redirect::to(INVALID_TOKEN_REDIRECT).into_response();
    };

    let use_case = VerifyTokenUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    match use_case.execute(&token_hash, kind, fingerprint).await {
        Ok(session_token) => redirect_with_session(&state.config, &session_token, &next),
        Err(e) => {
            tracing::debug!(error = %e, "Email confirmation failed");
            Redirect::to(INVALID_TOKEN_REDIRECT).into_response()
        }
    }
}

/// GET /auth/callback
///
/// Always lands on `next`; a session cookie is set only when the code
/// was redeemed.
pub async fn auth_callback<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Client(fingerprint): Client,
    Query(query): Query<CallbackQuery>,
) -> Response
where
    R: AuthStore,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let next = safe_redirect_path(query.next.as_deref()).to_string();

    let Some(code) = query.code else {
        return Redirect::to(&next).into_response();
    };

    let use_case = VerifyTokenUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    match use_case.execute(&code, TokenKind::Code, fingerprint).await {
        Ok(session_token) => redirect_with_session(&state.config, &session_token, &next),
        Err(e) => {
            tracing::debug!(error = %e, "Authorization code exchange failed");
            Redirect::to(&next).into_response()
        }
    }
}

/// POST /api/auth/magic-link
pub async fn magic_link<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Client(fingerprint): Client,
    Json(req): Json<MagicLinkRequest>,
) -> AuthResult<Json<FormSuccessBody>>
where
    R: AuthStore,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = MagicLinkUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.rate_limits.clone(),
        state.config.clone(),
    );

    use_case
        .execute(MagicLinkInput {
            email: req.email,
            next: req.next,
            client_ip: fingerprint.ip,
        })
        .await?;

    Ok(Json(FormSuccessBody {
        success: MAGIC_LINK_SENT_MESSAGE.to_string(),
    }))
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/auth/session
pub async fn session_status<R, M>(
    State(state): State<AuthAppState<R, M>>,
    headers: HeaderMap,
    Client(fingerprint): Client,
) -> Json<SessionStatusResponse>
where
    R: AuthStore,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name);

    let session_info = match token {
        Some(token) => {
            let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());
            use_case.execute(&token, &fingerprint.hash).await.ok()
        }
        None => None,
    };

    Json(match session_info {
        Some(info) => SessionStatusResponse {
            authenticated: true,
            user_id: Some(info.account_id),
            expires_at_ms: Some(info.expires_at_ms),
        },
        None => SessionStatusResponse {
            authenticated: false,
            user_id: None,
            expires_at_ms: None,
        },
    })
}

// ============================================================================
// Helper Functions
// ============================================================================

/// `303 See Other` to `location` carrying a fresh session cookie
fn redirect_with_session(config: &AuthConfig, session_token: &str, location: &str) -> Response {
    (
        StatusCode::SEE_OTHER,
        [
            (
                header::SET_COOKIE,
                config.cookie_config().set_cookie_header(session_token),
            ),
            (
                header::LOCATION,
                location
                    .parse()
                    .unwrap_or_else(|_| header::HeaderValue::from_static(HOME_PATH)),
            ),
        ],
    )
        .into_response()
}
