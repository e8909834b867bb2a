//! Vault Router

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use kernel::viewer::require_sign_in;
use std::sync::Arc;

use crate::application::config::VaultConfig;
use crate::domain::avatar_store::AvatarStore;
use crate::domain::repository::VaultStore;
use crate::infra::avatar::FsAvatarStore;
use crate::infra::postgres::PgVaultRepository;
use crate::presentation::handlers::{self, VaultAppState};

/// Create the Vault router with PostgreSQL repository and filesystem avatars
pub fn vault_router(repo: PgVaultRepository, avatars: FsAvatarStore, config: VaultConfig) -> Router {
    vault_router_generic(repo, avatars, config)
}

/// Create a generic Vault router for any repository implementation
///
/// Needs the viewer layer (`with_viewer`) above it; without it every
/// request is anonymous.
pub fn vault_router_generic<R, A>(repo: R, avatars: A, config: VaultConfig) -> Router
where
    R: VaultStore,
    A: AvatarStore + Clone + Send + Sync + 'static,
{
    let upload_limit = config.avatar_max_bytes + 1024 * 1024;

    let state = VaultAppState {
        repo: Arc::new(repo),
        avatars: Arc::new(avatars),
        config: Arc::new(config),
    };

    let member_pages = Router::new()
        .route("/prompts/new", get(handlers::new_prompt_page))
        .route(
            "/prompts/{id}/edit",
            get(handlers::edit_prompt_page::<R, A>).post(handlers::update_prompt::<R, A>),
        )
        .route("/my-prompts", get(handlers::my_prompts::<R, A>))
        .route("/bookmarks", get(handlers::bookmarks::<R, A>))
        .route("/notifications", get(handlers::notifications_page::<R, A>))
        .route(
            "/profile/settings",
            get(handlers::settings_page::<R, A>).post(handlers::update_settings::<R, A>),
        )
        .route_layer(middleware::from_fn(require_sign_in));

    Router::new()
        .merge(member_pages)
        // Browsing
        .route("/feed", get(handlers::feed::<R, A>))
        .route("/explore", get(handlers::explore::<R, A>))
        .route("/creators", get(handlers::creators::<R, A>))
        .route("/profile/{username}", get(handlers::profile_page::<R, A>))
        // Prompts
        .route("/prompts", post(handlers::create_prompt::<R, A>))
        .route("/prompts/{id}", get(handlers::prompt_detail::<R, A>))
        .route("/prompts/{id}/delete", post(handlers::delete_prompt::<R, A>))
        .route("/prompts/{id}/render", post(handlers::render_prompt::<R, A>))
        .route("/prompts/{id}/like", post(handlers::toggle_like::<R, A>))
        .route("/prompts/{id}/bookmark", post(handlers::toggle_bookmark::<R, A>))
        .route(
            "/prompts/{id}/comments",
            get(handlers::list_comments::<R, A>).post(handlers::add_comment::<R, A>),
        )
        .route("/comments/{id}/delete", post(handlers::delete_comment::<R, A>))
        .route("/users/{id}/follow", post(handlers::toggle_follow::<R, A>))
        // Profile
        .route(
            "/profile/avatar",
            post(handlers::upload_avatar::<R, A>).layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Notifications
        .route(
            "/notifications/{id}/read",
            post(handlers::mark_notification_read::<R, A>),
        )
        .route(
            "/notifications/read-all",
            post(handlers::mark_all_notifications_read::<R, A>),
        )
        .route(
            "/api/notifications/unread",
            get(handlers::unread_notifications::<R, A>),
        )
        // SEO
        .route("/api/og", get(handlers::og_image))
        .route("/sitemap.xml", get(handlers::sitemap::<R, A>))
        .route("/robots.txt", get(handlers::robots::<R, A>))
        .with_state(state)
}
