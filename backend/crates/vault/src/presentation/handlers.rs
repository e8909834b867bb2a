//! HTTP Handlers

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use kernel::form::FormSuccessBody;
use kernel::id::{CommentId, NotificationId, PromptId, UserId};
use kernel::viewer::{HOME_PATH, SignedIn, Viewer};
use std::sync::Arc;

use crate::application::config::VaultConfig;
use crate::application::{
    AVATAR_UPDATED_MESSAGE, AvatarUpload, CommentsUseCase, CreatorsUseCase, ExploreInput,
    ExploreOutput, ExploreUseCase, FeedInput, FeedOutput, FeedUseCase, ListingsUseCase,
    ManagePromptUseCase, NotificationsUseCase, OgCard, PROFILE_UPDATED_MESSAGE, ProfilePage,
    ProfilePageUseCase, ProfileSettingsUseCase, PromptDetail, PromptDetailUseCase,
    RenderedPrompt, SitemapUseCase, ToggleOutput, ToggleUseCase, robots_txt,
};
use crate::domain::avatar_store::AvatarStore;
use crate::domain::repository::VaultStore;
use crate::domain::value_objects::{AiModel, Category, FeedTab};
use crate::error::{VaultError, VaultResult};
use crate::presentation::dto::{
    AvatarResponse, CommentCreatedResponse, CommentRequest, CommentsResponse, CreatorsResponse,
    EditPromptResponse, ExploreQuery, FeedQuery, NewPromptResponse, NotificationsResponse,
    OgQuery, PageQuery, ProfileSettingsRequest, ProfileSettingsResponse, PromptFormRequest,
    PromptListResponse, RenderRequest, SuccessResponse, UnreadResponse,
};

/// Shared state for vault handlers
#[derive(Clone)]
pub struct VaultAppState<R, A>
where
    R: VaultStore,
    A: AvatarStore + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub avatars: Arc<A>,
    pub config: Arc<VaultConfig>,
}

fn prompt_path(prompt_id: PromptId) -> String {
    format!("/prompts/{prompt_id}")
}

// ============================================================================
// Listings
// ============================================================================

/// GET /feed
pub async fn feed<R, A>(
    State(state): State<VaultAppState<R, A>>,
    viewer: Viewer,
    Query(query): Query<FeedQuery>,
) -> VaultResult<Json<FeedOutput>>
where
    R: VaultStore,
    A: AvatarStore + Clone + Send + Sync + 'static,
{
    let use_case = FeedUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let input = FeedInput {
        tab: FeedTab::from_query(query.tab.as_deref()),
        category: Category::filter(query.category.as_deref()),
        page: query.page.unwrap_or(0),
    };

    Ok(Json(use_case.execute(viewer, input).await?))
}

/// GET /explore
pub async fn explore<R, A>(
    State(state): State<VaultAppState<R, A>>,
    viewer: Viewer,
    Query(query): Query<ExploreQuery>,
) -> VaultResult<Json<ExploreOutput>>
where
    R: VaultStore,
    A: AvatarStore + Clone + Send + Sync + 'static,
{
    let use_case = ExploreUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let input = ExploreInput {
        query: query.q,
        category: Category::filter(query.category.as_deref()),
        tag: query.tag,
    };

    Ok(Json(use_case.execute(viewer, input).await?))
}

/// GET /my-prompts
pub async fn my_prompts<R, A>(
    State(state): State<VaultAppState<R, A>>,
    SignedIn(user_id): SignedIn,
) -> VaultResult<Json<PromptListResponse>>
where
    R: VaultStore,
    A: AvatarStore + Clone + Send + Sync + 'static,
{
    let use_case = ListingsUseCase::new(state.repo.clone(), state.repo.clone());
    let prompts = use_case.my_prompts(user_id).await?;
    Ok(Json(PromptListResponse { prompts }))
}

/// GET /bookmarks
pub async fn bookmarks<R, A>(
    State(state): State<VaultAppState<R, A>>,
    SignedIn(user_id): SignedIn,
) -> VaultResult<Json<PromptListResponse>>
where
    R: VaultStore,
    A: AvatarStore + Clone + Send + Sync + 'static,
{
    let use_case = ListingsUseCase::new(state.repo.clone(), state.repo.clone());
    let prompts = use_case.bookmarks(user_id).await?;
    Ok(Json(PromptListResponse { prompts }))
}

/// GET /creators
pub async fn creators<R, A>(
    State(state): State<VaultAppState<R, A>>,
    viewer: Viewer,
) -> VaultResult<Json<CreatorsResponse>>
where
    R: VaultStore,
    A: AvatarStore + Clone + Send + Sync + 'static,
{
    let use_case = CreatorsUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    let creators = use_case.execute(viewer).await?;
    Ok(Json(CreatorsResponse { creators }))
}

// ============================================================================
// Prompts
// ============================================================================

/// GET /prompts/new
pub async fn new_prompt_page() -> Json<NewPromptResponse> {
    Json(NewPromptResponse {
        models: AiModel::ALL,
        categories: Category::ALL,
    })
}

/// POST /prompts
pub async fn create_prompt<R, A>(
    State(state): State<VaultAppState<R, A>>,
    SignedIn(user_id): SignedIn,
    Json(req): Json<PromptFormRequest>,
) -> VaultResult<Redirect>
where
    R: VaultStore,
    A: AvatarStore + Clone + Send + Sync + 'static,
{
    let use_case = ManagePromptUseCase::new(state.repo.clone());
    let prompt_id = use_case.create(user_id, req.into()).await?;
    Ok(Redirect::to(&prompt_path(prompt_id)))
}

/// GET /prompts/{id}
pub async fn prompt_detail<R, A>(
    State(state): State<VaultAppState<R, A>>,
    viewer: Viewer,
    Path(prompt_id): Path<PromptId>,
) -> VaultResult<Json<PromptDetail>>
where
    R: VaultStore,
    A: AvatarStore + Clone + Send + Sync + 'static,
{
    let use_case =
        PromptDetailUseCase::new(state.repo.clone(), state.repo.clone(), state.repo.clone());
    Ok(Json(use_case.execute(viewer, prompt_id).await?))
}

/// GET /prompts/{id}/edit
pub async fn edit_prompt_page<R, A>(
    State(state): State<VaultAppState<R, A>>,
    SignedIn(user_id): SignedIn,
    Path(prompt_id): Path<PromptId>,
) -> VaultResult<Json<EditPromptResponse>>
where
    R: VaultStore,
    A: AvatarStore + Clone + Send + Sync + 'static,
{
    let use_case = ManagePromptUseCase::new(state.repo.clone());
    let prompt = use_case.load_for_edit(user_id, prompt_id).await?;
    let tags = prompt.prompt.tags.join(", ");

    Ok(Json(EditPromptResponse {
        prompt,
        tags,
        models: AiModel::ALL,
        categories: Category::ALL,
    }))
}

/// POST /prompts/{id}/edit
pub async fn update_prompt<R, A>(
    State(state): State<VaultAppState<R, A>>,
    SignedIn(user_id): SignedIn,
    Path(prompt_id): Path<PromptId>,
    Json(req): Json<PromptFormRequest>,
) -> VaultResult<Redirect>
where
    R: VaultStore,
    A: AvatarStore + Clone + Send + Sync + 'static,
{
    let use_case = ManagePromptUseCase::new(state.repo.clone());
    use_case.update(user_id, prompt_id, req.into()).await?;
    Ok(Redirect::to(&prompt_path(prompt_id)))
}

/// POST /prompts/{id}/delete
pub async fn delete_prompt<R, A>(
    State(state): State<VaultAppState<R, A>>,
    SignedIn(user_id): SignedIn,
    Path(prompt_id): Path<PromptId>,
) -> VaultResult<Redirect>
where
    R: VaultStore,
    A: AvatarStore + Clone + Send + Sync + 'static,
{
    let use_case = ManagePromptUseCase::new(state.repo.clone());
    use_case.delete(user_id, prompt_id).await?;
    Ok(Redirect::to(HOME_PATH))
}

/// POST /prompts/{id}/render
pub async fn render_prompt<R, A>(
    State(state): State<VaultAppState<R, A>>,
    viewer: Viewer,
    Path(prompt_id): Path<PromptId>,
    Json(req): Json<RenderRequest>,
) -> VaultResult<Json<RenderedPrompt>>
where
    R: VaultStore,
    A: AvatarStore + Clone + Send + Sync + 'static,
{
    let use_case =
        PromptDetailUseCase::new(state.repo.clone(), state.repo.clone(), state.repo.clone());
    Ok(Json(use_case.render(viewer, prompt_id, &req.values).await?))
}

// ============================================================================
// Toggles
// ============================================================================

/// POST /prompts/{id}/like
pub async fn toggle_like<R, A>(
    State(state): State<VaultAppState<R, A>>,
    SignedIn(user_id): SignedIn,
    Path(prompt_id): Path<PromptId>,
) -> VaultResult<Json<ToggleOutput>>
where
    R: VaultStore,
    A: AvatarStore + Clone + Send + Sync + 'static,
{
    let use_case = toggles(&state);
    Ok(Json(use_case.toggle_like(user_id, prompt_id).await?))
}

/// POST /prompts/{id}/bookmark
pub async fn toggle_bookmark<R, A>(
    State(state): State<VaultAppState<R, A>>,
    SignedIn(user_id): SignedIn,
    Path(prompt_id): Path<PromptId>,
) -> VaultResult<Json<ToggleOutput>>
where
    R: VaultStore,
    A: AvatarStore + Clone + Send + Sync + 'static,
{
    let use_case = toggles(&state);
    Ok(Json(use_case.toggle_bookmark(user_id, prompt_id).await?))
}

/// POST /users/{id}/follow
pub async fn toggle_follow<R, A>(
    State(state): State<VaultAppState<R, A>>,
    SignedIn(user_id): SignedIn,
    Path(target_id): Path<UserId>,
) -> VaultResult<Json<ToggleOutput>>
where
    R: VaultStore,
    A: AvatarStore + Clone + Send + Sync + 'static,
{
    let use_case = toggles(&state);
    Ok(Json(use_case.toggle_follow(user_id, target_id).await?))
}

fn toggles<R, A>(state: &VaultAppState<R, A>) -> ToggleUseCase<R, R, R, R>
where
    R: VaultStore,
    A: AvatarStore + Clone + Send + Sync + 'static,
{
    ToggleUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
    )
}

// ============================================================================
// Comments
// ============================================================================

/// GET /prompts/{id}/comments
pub async fn list_comments<R, A>(
    State(state): State<VaultAppState<R, A>>,
    viewer: Viewer,
    Path(prompt_id): Path<PromptId>,
) -> VaultResult<Json<CommentsResponse>>
where
    R: VaultStore,
    A: AvatarStore + Clone + Send + Sync + 'static,
{
    let use_case = CommentsUseCase::new(state.repo.clone(), state.repo.clone());
    let comments = use_case.list(viewer, prompt_id).await?;
    Ok(Json(CommentsResponse { comments }))
}

/// POST /prompts/{id}/comments
pub async fn add_comment<R, A>(
    State(state): State<VaultAppState<R, A>>,
    SignedIn(user_id): SignedIn,
    Path(prompt_id): Path<PromptId>,
    Json(req): Json<CommentRequest>,
) -> VaultResult<(StatusCode, Json<CommentCreatedResponse>)>
where
    R: VaultStore,
    A: AvatarStore + Clone + Send + Sync + 'static,
{
    let use_case = CommentsUseCase::new(state.repo.clone(), state.repo.clone());
    let id = use_case.add(user_id, prompt_id, &req.content).await?;
    Ok((StatusCode::CREATED, Json(CommentCreatedResponse { id })))
}

/// POST /comments/{id}/delete
pub async fn delete_comment<R, A>(
    State(state): State<VaultAppState<R, A>>,
    SignedIn(user_id): SignedIn,
    Path(comment_id): Path<CommentId>,
) -> VaultResult<Json<SuccessResponse>>
where
    R: VaultStore,
    A: AvatarStore + Clone + Send + Sync + 'static,
{
    let use_case = CommentsUseCase::new(state.repo.clone(), state.repo.clone());
    use_case.delete(user_id, comment_id).await?;
    Ok(Json(SuccessResponse { success: true }))
}

// ============================================================================
// Profiles
// ============================================================================

/// GET /profile/{username}
pub async fn profile_page<R, A>(
    State(state): State<VaultAppState<R, A>>,
    viewer: Viewer,
    Path(username): Path<String>,
) -> VaultResult<Json<ProfilePage>>
where
    R: VaultStore,
    A: AvatarStore + Clone + Send + Sync + 'static,
{
    let use_case = ProfilePageUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
    );
    Ok(Json(use_case.execute(viewer, &username).await?))
}

fn settings<R, A>(state: &VaultAppState<R, A>) -> ProfileSettingsUseCase<R, A>
where
    R: VaultStore,
    A: AvatarStore + Clone + Send + Sync + 'static,
{
    ProfileSettingsUseCase::new(
        state.repo.clone(),
        state.avatars.clone(),
        state.config.clone(),
    )
}

/// GET /profile/settings
pub async fn settings_page<R, A>(
    State(state): State<VaultAppState<R, A>>,
    SignedIn(user_id): SignedIn,
) -> VaultResult<Json<ProfileSettingsResponse>>
where
    R: VaultStore,
    A: AvatarStore + Clone + Send + Sync + 'static,
{
    let profile = settings(&state).load(user_id).await?;
    Ok(Json(ProfileSettingsResponse { profile }))
}

/// POST /profile/settings
pub async fn update_settings<R, A>(
    State(state): State<VaultAppState<R, A>>,
    SignedIn(user_id): SignedIn,
    Json(req): Json<ProfileSettingsRequest>,
) -> VaultResult<Json<FormSuccessBody>>
where
    R: VaultStore,
    A: AvatarStore + Clone + Send + Sync + 'static,
{
    settings(&state).update(user_id, req.into()).await?;
    Ok(Json(FormSuccessBody {
        success: PROFILE_UPDATED_MESSAGE.to_string(),
    }))
}

/// POST /profile/avatar (multipart, field `avatar`)
pub async fn upload_avatar<R, A>(
    State(state): State<VaultAppState<R, A>>,
    SignedIn(user_id): SignedIn,
    mut multipart: Multipart,
) -> VaultResult<Json<AvatarResponse>>
where
    R: VaultStore,
    A: AvatarStore + Clone + Send + Sync + 'static,
{
    let mut upload = AvatarUpload {
        file_name: None,
        bytes: Vec::new(),
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| VaultError::field("avatar", e.body_text()))?
    {
        if field.name() != Some("avatar") {
            continue;
        }
        upload.file_name = field.file_name().map(str::to_string);
        upload.bytes = field
            .bytes()
            .await
            .map_err(|e| VaultError::field("avatar", e.body_text()))?
            .to_vec();
        break;
    }

    let url = settings(&state).upload_avatar(user_id, upload).await?;
    Ok(Json(AvatarResponse {
        success: AVATAR_UPDATED_MESSAGE,
        url,
    }))
}

// ============================================================================
// Notifications
// ============================================================================

/// GET /notifications
pub async fn notifications_page<R, A>(
    State(state): State<VaultAppState<R, A>>,
    SignedIn(user_id): SignedIn,
    Query(query): Query<PageQuery>,
) -> VaultResult<Json<NotificationsResponse>>
where
    R: VaultStore,
    A: AvatarStore + Clone + Send + Sync + 'static,
{
    let use_case = NotificationsUseCase::new(state.repo.clone(), state.config.clone());
    let page = query.page.unwrap_or(0);

    let notifications = use_case.list(user_id, page).await?;
    let unread = use_case.unread_count(user_id).await?;

    Ok(Json(NotificationsResponse {
        notifications,
        unread,
        page,
    }))
}

/// POST /notifications/{id}/read
pub async fn mark_notification_read<R, A>(
    State(state): State<VaultAppState<R, A>>,
    SignedIn(user_id): SignedIn,
    Path(notification_id): Path<NotificationId>,
) -> VaultResult<Json<SuccessResponse>>
where
    R: VaultStore,
    A: AvatarStore + Clone + Send + Sync + 'static,
{
    let use_case = NotificationsUseCase::new(state.repo.clone(), state.config.clone());
    use_case.mark_read(user_id, notification_id).await?;
    Ok(Json(SuccessResponse { success: true }))
}

/// POST /notifications/read-all
pub async fn mark_all_notifications_read<R, A>(
    State(state): State<VaultAppState<R, A>>,
    SignedIn(user_id): SignedIn,
) -> VaultResult<Json<SuccessResponse>>
where
    R: VaultStore,
    A: AvatarStore + Clone + Send + Sync + 'static,
{
    let use_case = NotificationsUseCase::new(state.repo.clone(), state.config.clone());
    use_case.mark_all_read(user_id).await?;
    Ok(Json(SuccessResponse { success: true }))
}

/// GET /api/notifications/unread
///
/// Polled by the navbar badge; failures answer `{"error": ...}` with 500.
pub async fn unread_notifications<R, A>(
    State(state): State<VaultAppState<R, A>>,
    viewer: Viewer,
) -> Response
where
    R: VaultStore,
    A: AvatarStore + Clone + Send + Sync + 'static,
{
    let Some(user_id) = viewer.user_id() else {
        return Json(UnreadResponse {
            authenticated: false,
            unread: 0,
        })
        .into_response();
    };

    let use_case = NotificationsUseCase::new(state.repo.clone(), state.config.clone());
    match use_case.unread_count(user_id).await {
        Ok(unread) => Json(UnreadResponse {
            authenticated: true,
            unread,
        })
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to count unread notifications");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Failed to fetch unread notifications" })),
            )
                .into_response()
        }
    }
}

// ============================================================================
// SEO
// ============================================================================

/// GET /api/og
pub async fn og_image(Query(query): Query<OgQuery>) -> Response {
    let svg = OgCard::from(query).render();
    (
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        svg,
    )
        .into_response()
}

/// GET /sitemap.xml
pub async fn sitemap<R, A>(State(state): State<VaultAppState<R, A>>) -> VaultResult<Response>
where
    R: VaultStore,
    A: AvatarStore + Clone + Send + Sync + 'static,
{
    let use_case = SitemapUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    let xml = use_case.execute().await?;
    Ok(([(header::CONTENT_TYPE, "application/xml")], xml).into_response())
}

/// GET /robots.txt
pub async fn robots<R, A>(State(state): State<VaultAppState<R, A>>) -> Response
where
    R: VaultStore,
    A: AvatarStore + Clone + Send + Sync + 'static,
{
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        robots_txt(&state.config),
    )
        .into_response()
}
