//! Use-case and HTTP tests against an in-memory store

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use kernel::id::{SessionId, UserId};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::application::config::AuthConfig;
use crate::domain::entity::{
    account::Account, auth_session::AuthSession, credentials::Credentials,
    one_time_token::OneTimeToken,
};
use crate::domain::mailer::{Mailer, OutgoingEmail};
use crate::domain::repository::{
    AccountRepository, AuthSessionRepository, CredentialsRepository, OneTimeTokenRepository,
};
use crate::domain::value_object::{email::Email, token_kind::TokenKind, user_name::UserName};
use crate::error::{AuthError, AuthResult};
use crate::{auth_router_generic, with_viewer};

const UA: &str = "Mozilla/5.0 (X11; Linux x86_64) PromptVaultTest";

// ============================================================================
// Fakes
// ============================================================================

#[derive(Default)]
struct Tables {
    accounts: HashMap<UserId, Account>,
    credentials: HashMap<UserId, Credentials>,
    sessions: HashMap<SessionId, AuthSession>,
    tokens: HashMap<Vec<u8>, OneTimeToken>,
}

#[derive(Clone, Default)]
struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    fn session_count(&self) -> usize {
        self.tables.lock().unwrap().sessions.len()
    }
}

impl AccountRepository for MemoryStore {
    async fn create(&self, account: &Account, credentials: &Credentials) -> AuthResult<()> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .accounts
            .values()
            .any(|a| a.user_name == account.user_name)
        {
            return Err(AuthError::UserNameTaken);
        }
        if tables.accounts.values().any(|a| a.email == account.email) {
            return Err(AuthError::EmailTaken);
        }
        tables.accounts.insert(account.account_id, account.clone());
        tables
            .credentials
            .insert(credentials.account_id, credentials.clone());
        Ok(())
    }

    async fn find_by_id(&self, account_id: UserId) -> AuthResult<Option<Account>> {
        Ok(self.tables.lock().unwrap().accounts.get(&account_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Account>> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .accounts
            .values()
            .find(|a| &a.email == email)
            .cloned())
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .accounts
            .values()
            .any(|a| &a.user_name == user_name))
    }

    async fn update(&self, account: &Account) -> AuthResult<()> {
        self.tables
            .lock()
            .unwrap()
            .accounts
            .insert(account.account_id, account.clone());
        Ok(())
    }
}

impl CredentialsRepository for MemoryStore {
    async fn find_by_account_id(&self, account_id: UserId) -> AuthResult<Option<Credentials>> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .credentials
            .get(&account_id)
            .cloned())
    }

    async fn update(&self, credentials: &Credentials) -> AuthResult<()> {
        self.tables
            .lock()
            .unwrap()
            .credentials
            .insert(credentials.account_id, credentials.clone());
        Ok(())
    }
}

impl AuthSessionRepository for MemoryStore {
    async fn create(&self, session: &AuthSession) -> AuthResult<()> {
        self.tables
            .lock()
            .unwrap()
            .sessions
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        session_id: SessionId,
        fingerprint_hash: &[u8],
    ) -> AuthResult<Option<AuthSession>> {
        let tables = self.tables.lock().unwrap();
        match tables.sessions.get(&session_id) {
            Some(s) if s.client_fingerprint_hash != fingerprint_hash => {
                Err(AuthError::SessionFingerprintMismatch)
            }
            Some(s) if !s.is_expired() => Ok(Some(s.clone())),
            _ => Ok(None),
        }
    }

    async fn update(&self, session: &AuthSession) -> AuthResult<()> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(existing) = tables.sessions.get_mut(&session.session_id) {
            existing.expires_at_ms = session.expires_at_ms;
            existing.last_activity_at = session.last_activity_at;
        }
        Ok(())
    }

    async fn delete(&self, session_id: SessionId) -> AuthResult<()> {
        self.tables.lock().unwrap().sessions.remove(&session_id);
        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.sessions.len();
        tables.sessions.retain(|_, s| !s.is_expired());
        Ok((before - tables.sessions.len()) as u64)
    }
}

impl OneTimeTokenRepository for MemoryStore {
    async fn create(&self, token: &OneTimeToken) -> AuthResult<()> {
        self.tables
            .lock()
            .unwrap()
            .tokens
            .insert(token.token_hash.clone(), token.clone());
        Ok(())
    }

    async fn consume(
        &self,
        token_hash: &[u8],
        kind: TokenKind,
    ) -> AuthResult<Option<OneTimeToken>> {
        let mut tables = self.tables.lock().unwrap();
        let redeemable = tables
            .tokens
            .get(token_hash)
            .is_some_and(|t| t.kind == kind && !t.is_expired());
        Ok(if redeemable {
            tables.tokens.remove(token_hash)
        } else {
            None
        })
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.tokens.len();
        tables.tokens.retain(|_, t| !t.is_expired());
        Ok((before - tables.tokens.len()) as u64)
    }
}

#[derive(Clone, Default)]
struct RecordingMailer {
    sent: Arc<Mutex<Vec<OutgoingEmail>>>,
}

impl RecordingMailer {
    fn links(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|m| m.link.clone())
            .collect()
    }

    /// Path and query of the last emailed link
    fn last_path(&self, config: &AuthConfig) -> String {
        let link = self.links().pop().expect("no email sent");
        link.strip_prefix(config.site_url.as_str())
            .expect("link not under site_url")
            .to_string()
    }
}

impl Mailer for RecordingMailer {
    async fn send(&self, email: OutgoingEmail) -> AuthResult<()> {
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

// ============================================================================
// Helpers
// ============================================================================

struct Harness {
    app: Router,
    store: MemoryStore,
    mailer: RecordingMailer,
    config: AuthConfig,
}

fn harness(config: AuthConfig) -> Harness {
    let store = MemoryStore::default();
    let mailer = RecordingMailer::default();
    let app = with_viewer(
        auth_router_generic(store.clone(), mailer.clone(), config.clone()),
        store.clone(),
        config.clone(),
    );
    Harness {
        app,
        store,
        mailer,
        config,
    }
}

fn confirming_config() -> AuthConfig {
    AuthConfig {
        cookie_secure: false,
        ..AuthConfig::with_random_secret()
    }
}

fn post_json(uri: &str, body: Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::USER_AGENT, UA)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri).header(header::USER_AGENT, UA);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.unwrap()
}

async fn body_json(resp: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn location(resp: &Response<Body>) -> Option<&str> {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

/// `name=value` part of the Set-Cookie header
fn session_cookie(resp: &Response<Body>) -> String {
    resp.headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .expect("no session cookie")
        .to_string()
}

fn query_param(path: &str, name: &str) -> String {
    let query = path.split_once('?').map(|(_, q)| q).unwrap_or_default();
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
        .unwrap_or_default()
}

fn signup_body(email: &str, username: &str) -> Value {
    json!({ "email": email, "password": "correct-horse", "username": username })
}

/// Sign up and follow the confirmation link; returns the session cookie
async fn confirmed_account(h: &Harness, email: &str, username: &str) -> String {
    let resp = send(&h.app, post_json("/signup", signup_body(email, username), None)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(&h.app, get(&h.mailer.last_path(&h.config), None)).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    session_cookie(&resp)
}

// ============================================================================
// Sign up / confirmation
// ============================================================================

#[tokio::test]
async fn test_sign_up_sends_confirmation_link_and_confirming_signs_in() {
    let h = harness(confirming_config());

    let resp = send(
        &h.app,
        post_json("/signup", signup_body("ada@example.com", "ada"), None),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        json!({ "success": "Check your email to confirm your account." })
    );

    let path = h.mailer.last_path(&h.config);
    assert!(path.starts_with("/api/auth/confirm?token_hash="));
    assert_eq!(query_param(&path, "type"), "signup");

    // Unconfirmed accounts cannot sign in yet
    let resp = send(
        &h.app,
        post_json(
            "/login",
            json!({ "email": "ada@example.com", "password": "correct-horse" }),
            None,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(resp).await,
        json!({ "error": { "_form": ["Email not confirmed"] } })
    );

    let token = query_param(&path, "token_hash");
    let confirm = format!("/api/auth/confirm?token_hash={token}&type=email&next=/bookmarks");
    let resp = send(&h.app, get(&confirm, None)).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/bookmarks"));
    assert!(session_cookie(&resp).starts_with("pv_session="));

    // Single use
    let resp = send(&h.app, get(&confirm, None)).await;
    assert_eq!(location(&resp), Some("/login?error=invalid_token"));
}

#[tokio::test]
async fn test_sign_up_reports_field_errors() {
    let h = harness(confirming_config());

    let resp = send(
        &h.app,
        post_json(
            "/signup",
            json!({ "email": "not-an-email", "password": "123", "username": "No Caps" }),
            None,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(resp).await;
    assert_eq!(body["error"]["email"], json!(["Invalid email address"]));
    assert_eq!(
        body["error"]["password"],
        json!(["Password must be at least 6 characters"])
    );
    assert_eq!(
        body["error"]["username"],
        json!(["Username can only contain lowercase letters, numbers, and underscores"])
    );
    assert!(h.mailer.links().is_empty());
}

#[tokio::test]
async fn test_sign_up_rejects_taken_username_and_email() {
    let h = harness(confirming_config());
    send(
        &h.app,
        post_json("/signup", signup_body("ada@example.com", "ada"), None),
    )
    .await;

    let resp = send(
        &h.app,
        post_json("/signup", signup_body("other@example.com", "ada"), None),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body_json(resp).await,
        json!({ "error": { "username": ["Username is already taken"] } })
    );

    let resp = send(
        &h.app,
        post_json("/signup", signup_body("ADA@example.com", "ada_two"), None),
    )
    .await;
    assert_eq!(
        body_json(resp).await,
        json!({ "error": { "_form": ["User already registered"] } })
    );
}

#[tokio::test]
async fn test_sign_up_without_confirmation_signs_in_immediately() {
    let h = harness(AuthConfig::development());

    let resp = send(
        &h.app,
        post_json("/signup", signup_body("ada@example.com", "ada"), None),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/feed"));
    assert!(session_cookie(&resp).starts_with("pv_session="));
    assert!(h.mailer.links().is_empty());
}

#[tokio::test]
async fn test_confirm_with_unsafe_next_lands_on_feed() {
    let h = harness(confirming_config());
    send(
        &h.app,
        post_json("/signup", signup_body("ada@example.com", "ada"), None),
    )
    .await;
    let token = query_param(&h.mailer.last_path(&h.config), "token_hash");

    let resp = send(
        &h.app,
        get(
            &format!("/api/auth/confirm?token_hash={token}&type=signup&next=//evil.com"),
            None,
        ),
    )
    .await;
    assert_eq!(location(&resp), Some("/feed"));
}

#[tokio::test]
async fn test_confirm_with_unknown_token_or_type_redirects_to_login() {
    let h = harness(confirming_config());

    for uri in [
        "/api/auth/confirm?token_hash=bogus&type=signup",
        "/api/auth/confirm?token_hash=bogus&type=recovery",
        "/api/auth/confirm?type=signup",
    ] {
        let resp = send(&h.app, get(uri, None)).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), Some("/login?error=invalid_token"), "{uri}");
    }
}

// ============================================================================
// Sign in / sessions
// ============================================================================

#[tokio::test]
async fn test_wrong_password_is_a_form_error_without_redirect() {
    let h = harness(confirming_config());
    confirmed_account(&h, "ada@example.com", "ada").await;

    let resp = send(
        &h.app,
        post_json(
            "/login",
            json!({ "email": "ada@example.com", "password": "wrong-horse" }),
            None,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(location(&resp).is_none());
    assert_eq!(
        body_json(resp).await,
        json!({ "error": { "_form": ["Invalid login credentials"] } })
    );
}

#[tokio::test]
async fn test_sign_in_redirects_to_safe_next() {
    let h = harness(confirming_config());
    confirmed_account(&h, "ada@example.com", "ada").await;

    let resp = send(
        &h.app,
        post_json(
            "/login",
            json!({ "email": "ada@example.com", "password": "correct-horse", "next": "https://evil.com" }),
            None,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/feed"));

    let cookie = session_cookie(&resp);
    let resp = send(&h.app, get("/api/auth/session", Some(&cookie))).await;
    let body = body_json(resp).await;
    assert_eq!(body["authenticated"], json!(true));
    assert!(body["user_id"].is_string());
}

#[tokio::test]
async fn test_repeated_failures_lock_the_account() {
    let h = harness(confirming_config());
    confirmed_account(&h, "ada@example.com", "ada").await;

    for _ in 0..Credentials::MAX_LOGIN_FAILURES {
        let resp = send(
            &h.app,
            post_json(
                "/login",
                json!({ "email": "ada@example.com", "password": "wrong-horse" }),
                None,
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    let resp = send(
        &h.app,
        post_json(
            "/login",
            json!({ "email": "ada@example.com", "password": "correct-horse" }),
            None,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::LOCKED);
}

#[tokio::test]
async fn test_signed_in_viewer_is_sent_away_from_login() {
    let h = harness(confirming_config());
    let cookie = confirmed_account(&h, "ada@example.com", "ada").await;

    let resp = send(&h.app, get("/login", Some(&cookie))).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/feed"));

    let resp = send(&h.app, get("/login?error=invalid_token&next=/bookmarks", None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["next"], json!("/bookmarks"));
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_session_from_another_browser_is_ignored() {
    let h = harness(confirming_config());
    let cookie = confirmed_account(&h, "ada@example.com", "ada").await;

    let req = Request::builder()
        .uri("/api/auth/session")
        .header(header::USER_AGENT, "curl/8.0")
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let body = body_json(send(&h.app, req).await).await;
    assert_eq!(body["authenticated"], json!(false));
}

#[tokio::test]
async fn test_tampered_session_cookie_is_anonymous() {
    let h = harness(confirming_config());
    let cookie = confirmed_account(&h, "ada@example.com", "ada").await;
    let tampered = format!("{cookie}x");

    let body = body_json(send(&h.app, get("/api/auth/session", Some(&tampered))).await).await;
    assert_eq!(body["authenticated"], json!(false));
}

#[tokio::test]
async fn test_logout_clears_cookie_and_session() {
    let h = harness(confirming_config());
    let cookie = confirmed_account(&h, "ada@example.com", "ada").await;
    assert_eq!(h.store.session_count(), 1);

    let resp = send(&h.app, post_json("/logout", json!({}), Some(&cookie))).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/feed"));
    let set_cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(set_cookie.contains("Max-Age=0"));
    assert_eq!(h.store.session_count(), 0);

    let body = body_json(send(&h.app, get("/api/auth/session", Some(&cookie))).await).await;
    assert_eq!(body["authenticated"], json!(false));
}

// ============================================================================
// Magic link
// ============================================================================

#[tokio::test]
async fn test_magic_link_does_not_reveal_unknown_addresses() {
    let h = harness(confirming_config());

    let resp = send(
        &h.app,
        post_json(
            "/api/auth/magic-link",
            json!({ "email": "nobody@example.com" }),
            None,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        json!({ "success": "Check your email for a sign-in link." })
    );
    assert!(h.mailer.links().is_empty());
}

#[tokio::test]
async fn test_magic_link_code_is_exchanged_at_callback() {
    let h = harness(confirming_config());
    confirmed_account(&h, "ada@example.com", "ada").await;

    let resp = send(
        &h.app,
        post_json(
            "/api/auth/magic-link",
            json!({ "email": "ada@example.com", "next": "/bookmarks" }),
            None,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let path = h.mailer.last_path(&h.config);
    assert!(path.starts_with("/auth/callback?code="));
    assert_eq!(query_param(&path, "next"), "/bookmarks");

    let resp = send(&h.app, get(&path, None)).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/bookmarks"));
    let cookie = session_cookie(&resp);

    let body = body_json(send(&h.app, get("/api/auth/session", Some(&cookie))).await).await;
    assert_eq!(body["authenticated"], json!(true));

    // A spent code still lands on `next`, just without a session
    let resp = send(&h.app, get(&path, None)).await;
    assert_eq!(location(&resp), Some("/bookmarks"));
    assert!(resp.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_magic_link_is_rate_limited_per_client() {
    let h = harness(confirming_config());
    let limit = h.config.magic_link_rate_limit.max_requests;

    for _ in 0..limit {
        let resp = send(
            &h.app,
            post_json(
                "/api/auth/magic-link",
                json!({ "email": "nobody@example.com" }),
                None,
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = send(
        &h.app,
        post_json(
            "/api/auth/magic-link",
            json!({ "email": "nobody@example.com" }),
            None,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_missing_user_agent_is_rejected() {
    let h = harness(confirming_config());
    let req = Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "email": "ada@example.com", "password": "correct-horse" }).to_string(),
        ))
        .unwrap();

    let resp = send(&h.app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
