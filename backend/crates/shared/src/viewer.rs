//! Request viewer
//!
//! The auth layer resolves the session cookie once per request and stores a
//! [`Viewer`] in the request extensions. Handlers read it back with the
//! [`Viewer`] or [`SignedIn`] extractors instead of touching cookies.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Request};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use crate::error::app_error::AppError;
use crate::id::UserId;

/// Where signed-in visitors of `/login` and `/signup` are sent
pub const HOME_PATH: &str = "/feed";

/// Who is making the request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewer(Option<UserId>);

impl Viewer {
    pub const fn anonymous() -> Self {
        Self(None)
    }

    pub const fn signed_in(user_id: UserId) -> Self {
        Self(Some(user_id))
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.0
    }

    pub fn is_signed_in(&self) -> bool {
        self.0.is_some()
    }

    /// True when the viewer is the given user
    pub fn is(&self, user_id: UserId) -> bool {
        self.0 == Some(user_id)
    }
}

impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Viewer>().copied().unwrap_or_default())
    }
}

/// Extractor for mutations: rejects anonymous requests with 401
#[derive(Debug, Clone, Copy)]
pub struct SignedIn(pub UserId);

impl<S> FromRequestParts<S> for SignedIn
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Viewer>()
            .and_then(Viewer::user_id)
            .map(SignedIn)
            .ok_or_else(|| AppError::unauthorized("Not authenticated"))
    }
}

/// `303` to the sign-in page, remembering where to come back to
pub fn login_redirect(return_to: &str) -> Response {
    let next: String = url::form_urlencoded::byte_serialize(return_to.as_bytes()).collect();
    Redirect::to(&format!("/login?next={next}")).into_response()
}

/// Middleware for protected pages: anonymous viewers go to `/login?next=<path>`
pub async fn require_sign_in(req: Request, next: Next) -> Response {
    let signed_in = req
        .extensions()
        .get::<Viewer>()
        .is_some_and(Viewer::is_signed_in);

    if signed_in {
        return next.run(req).await;
    }

    let return_to = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    login_redirect(&return_to)
}

/// Middleware for `/login` and `/signup`: signed-in viewers go home
pub async fn redirect_signed_in(req: Request, next: Next) -> Response {
    let signed_in = req
        .extensions()
        .get::<Viewer>()
        .is_some_and(Viewer::is_signed_in);

    if signed_in {
        return Redirect::to(HOME_PATH).into_response();
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{StatusCode, header};

    #[test]
    fn test_viewer_identity() {
        let id = UserId::new();
        let viewer = Viewer::signed_in(id);
        assert!(viewer.is_signed_in());
        assert!(viewer.is(id));
        assert!(!Viewer::anonymous().is(id));
    }

    #[test]
    fn test_login_redirect_encodes_return_path() {
        let response = login_redirect("/prompts/new?draft=1");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/login?next=%2Fprompts%2Fnew%3Fdraft%3D1"
        );
    }
}
