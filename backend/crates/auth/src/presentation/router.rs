//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use kernel::viewer::redirect_signed_in;
use platform::rate_limit::InMemoryRateLimitStore;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::mailer::Mailer;
use crate::domain::repository::AuthStore;
use crate::infra::mailer::LogMailer;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository and the log outbox
pub fn auth_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, LogMailer, config)
}

/// Create a generic Auth router for any repository implementation
///
/// Needs the viewer layer (`with_viewer`) above it for the
/// `/login` and `/signup` redirects.
pub fn auth_router_generic<R, M>(repo: R, mailer: M, config: AuthConfig) -> Router
where
    R: AuthStore,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        mailer: Arc::new(mailer),
        config: Arc::new(config),
        rate_limits: Arc::new(InMemoryRateLimitStore::new()),
    };

    let guest_pages = Router::new()
        .route(
            "/login",
            get(handlers::login_page).post(handlers::sign_in::<R, M>),
        )
        .route(
            "/signup",
            get(handlers::sign_up_page).post(handlers::sign_up::<R, M>),
        )
        .route_layer(middleware::from_fn(redirect_signed_in));

    Router::new()
        .merge(guest_pages)
        .route("/logout", post(handlers::sign_out::<R, M>))
        .route("/auth/callback", get(handlers::auth_callback::<R, M>))
        .route("/api/auth/confirm", get(handlers::confirm_email::<R, M>))
        .route("/api/auth/magic-link", post(handlers::magic_link::<R, M>))
        .route("/api/auth/session", get(handlers::session_status::<R, M>))
        .with_state(state)
}
