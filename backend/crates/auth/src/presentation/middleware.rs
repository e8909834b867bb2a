//! Auth Middleware
//!
//! Resolves the session cookie into a [`Viewer`] for every request.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use axum::Router;
use kernel::viewer::Viewer;
use platform::client::{ClientFingerprint, connect_ip, extract_client_ip, extract_fingerprint};
use std::sync::Arc;

use crate::application::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::repository::AuthSessionRepository;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// Fingerprint of the calling browser (User-Agent hash + client ip)
pub struct Client(pub ClientFingerprint);

impl<S> FromRequestParts<S> for Client
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let client_ip = extract_client_ip(&parts.headers, connect_ip(&parts.extensions));
        Ok(Client(extract_fingerprint(&parts.headers, client_ip)?))
    }
}

/// Inserts a [`Viewer`] into request extensions; never rejects
pub async fn resolve_viewer<R>(
    State(state): State<AuthMiddlewareState<R>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let headers = req.headers();
    let client_ip = extract_client_ip(headers, connect_ip(req.extensions()));
    let fingerprint = extract_fingerprint(headers, client_ip).ok();
    let token = platform::cookie::extract_cookie(headers, &state.config.session_cookie_name);

    let viewer = match (token, fingerprint) {
        (Some(token), Some(fp)) => {
            let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());
            match use_case.get_session(&token, &fp.hash).await {
                Ok(session) => Viewer::signed_in(session.account_id),
                Err(e) => {
                    tracing::debug!(error = %e, "Ignoring unusable session cookie");
                    Viewer::anonymous()
                }
            }
        }
        _ => Viewer::anonymous(),
    };

    req.extensions_mut().insert(viewer);
    next.run(req).await
}

/// Wrap `router` so every route sees the request's [`Viewer`]
pub fn with_viewer<R>(router: Router, repo: R, config: AuthConfig) -> Router
where
    R: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let state = AuthMiddlewareState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };
    router.layer(axum::middleware::from_fn_with_state(
        state,
        resolve_viewer::<R>,
    ))
}
