//! PostgreSQL Repository Implementations

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, NotificationId, PromptId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{
    Comment, CommentWithAuthor, Notification, Profile, ProfilePreview, ProfileStamp, Prompt,
    PromptPreview, PromptStamp, PromptWithAuthor,
};
use crate::domain::profile_settings::ProfileSettings;
use crate::domain::prompt_draft::PromptDraft;
use crate::domain::repository::{
    CommentRepository, FeedFilter, FollowRepository, InteractionRepository,
    NotificationRepository, ProfileRepository, PromptOrder, PromptRepository, SearchFilter,
};
use crate::domain::value_objects::{AiModel, Category, Interaction, NotificationKind};
use crate::error::{VaultError, VaultResult};

/// Prompt columns joined with the author preview
const PROMPT_WITH_AUTHOR: &str = r#"
    SELECT
        p.id,
        p.user_id,
        p.title,
        p.content,
        p.description,
        p.model,
        p.category,
        p.tags,
        p.is_public,
        p.like_count,
        p.bookmark_count,
        p.view_count,
        p.created_at,
        p.updated_at,
        a.username AS author_username,
        a.display_name AS author_display_name,
        a.avatar_url AS author_avatar_url
    FROM prompts p
    JOIN profiles a ON a.id = p.user_id
"#;

const PROFILE_COLUMNS: &str = r#"
    id,
    username,
    display_name,
    bio,
    avatar_url,
    website_url,
    follower_count,
    following_count,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed vault repository
#[derive(Clone)]
pub struct PgVaultRepository {
    pool: PgPool,
}

impl PgVaultRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn uuids<T>(ids: &[kernel::id::Id<T>]) -> Vec<Uuid> {
    ids.iter().map(|id| *id.as_uuid()).collect()
}

fn collect_prompts(rows: Vec<PromptRow>) -> VaultResult<Vec<PromptWithAuthor>> {
    rows.into_iter().map(PromptRow::into_prompt).collect()
}

// ============================================================================
// Prompt Repository Implementation
// ============================================================================

impl PromptRepository for PgVaultRepository {
    async fn create(&self, prompt: &Prompt) -> VaultResult<()> {
        sqlx::query(
            r#"
            INSERT INTO prompts (
                id,
                user_id,
                title,
                content,
                description,
                model,
                category,
                tags,
                is_public,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(prompt.id.as_uuid())
        .bind(prompt.user_id.as_uuid())
        .bind(&prompt.title)
        .bind(&prompt.content)
        .bind(&prompt.description)
        .bind(prompt.model.as_str())
        .bind(prompt.category.as_str())
        .bind(&prompt.tags)
        .bind(prompt.is_public)
        .bind(prompt.created_at)
        .bind(prompt.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, prompt_id: PromptId) -> VaultResult<Option<PromptWithAuthor>> {
        let row = sqlx::query_as::<_, PromptRow>(&format!("{PROMPT_WITH_AUTHOR} WHERE p.id = $1"))
            .bind(prompt_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(PromptRow::into_prompt).transpose()
    }

    async fn update(
        &self,
        prompt_id: PromptId,
        owner_id: UserId,
        draft: &PromptDraft,
    ) -> VaultResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE prompts SET
                title = $3,
                content = $4,
                description = $5,
                model = $6,
                category = $7,
                tags = $8,
                is_public = $9,
                updated_at = now()
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(prompt_id.as_uuid())
        .bind(owner_id.as_uuid())
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(&draft.description)
        .bind(draft.model.as_str())
        .bind(draft.category.as_str())
        .bind(&draft.tags)
        .bind(draft.is_public)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn delete(&self, prompt_id: PromptId, owner_id: UserId) -> VaultResult<bool> {
        let deleted = sqlx::query("DELETE FROM prompts WHERE id = $1 AND user_id = $2")
            .bind(prompt_id.as_uuid())
            .bind(owner_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn feed(&self, filter: &FeedFilter) -> VaultResult<Vec<PromptWithAuthor>> {
        // NULL sort key for `latest` leaves created_at as the only ordering
        let sql = format!(
            r#"{PROMPT_WITH_AUTHOR}
            WHERE p.is_public
              AND ($1::text IS NULL OR p.category = $1)
              AND ($2::uuid[] IS NULL OR p.user_id = ANY($2))
            ORDER BY
                CASE WHEN $3 THEN p.like_count END DESC NULLS LAST,
                p.created_at DESC
            OFFSET $4
            LIMIT $5
            "#
        );

        let rows = sqlx::query_as::<_, PromptRow>(&sql)
            .bind(filter.category.map(|c| c.as_str()))
            .bind(filter.authors.as_deref().map(uuids))
            .bind(filter.order == PromptOrder::Trending)
            .bind(filter.offset)
            .bind(filter.limit)
            .fetch_all(&self.pool)
            .await?;

        collect_prompts(rows)
    }

    async fn search(&self, filter: &SearchFilter) -> VaultResult<Vec<PromptWithAuthor>> {
        let sql = format!(
            r#"{PROMPT_WITH_AUTHOR}
            WHERE p.is_public
              AND ($1::text IS NULL OR p.search_vector @@ websearch_to_tsquery('english', $1))
              AND ($2::text IS NULL OR $2 = ANY(p.tags))
              AND ($3::text IS NULL OR p.category = $3)
            ORDER BY p.like_count DESC, p.created_at DESC
            LIMIT $4
            "#
        );

        let rows = sqlx::query_as::<_, PromptRow>(&sql)
            .bind(filter.query.as_deref())
            .bind(filter.tag.as_deref())
            .bind(filter.category.map(|c| c.as_str()))
            .bind(filter.limit)
            .fetch_all(&self.pool)
            .await?;

        collect_prompts(rows)
    }

    async fn list_by_author(
        &self,
        author_id: UserId,
        include_private: bool,
    ) -> VaultResult<Vec<PromptWithAuthor>> {
        let sql = format!(
            r#"{PROMPT_WITH_AUTHOR}
            WHERE p.user_id = $1 AND ($2 OR p.is_public)
            ORDER BY p.created_at DESC
            "#
        );

        let rows = sqlx::query_as::<_, PromptRow>(&sql)
            .bind(author_id.as_uuid())
            .bind(include_private)
            .fetch_all(&self.pool)
            .await?;

        collect_prompts(rows)
    }

    async fn list_bookmarked(&self, user_id: UserId) -> VaultResult<Vec<PromptWithAuthor>> {
        // Own private prompts stay listed; other people's go away when unpublished
        let sql = format!(
            r#"{PROMPT_WITH_AUTHOR}
            JOIN bookmarks b ON b.prompt_id = p.id
            WHERE b.user_id = $1 AND (p.is_public OR p.user_id = $1)
            ORDER BY b.created_at DESC
            "#
        );

        let rows = sqlx::query_as::<_, PromptRow>(&sql)
            .bind(user_id.as_uuid())
            .fetch_all(&self.pool)
            .await?;

        collect_prompts(rows)
    }

    async fn increment_view_count(&self, prompt_id: PromptId) -> VaultResult<()> {
        sqlx::query("UPDATE prompts SET view_count = view_count + 1 WHERE id = $1")
            .bind(prompt_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn public_stamps(&self, offset: i64, limit: i64) -> VaultResult<Vec<PromptStamp>> {
        let rows = sqlx::query_as::<_, (Uuid, DateTime<Utc>)>(
            r#"
            SELECT id, updated_at
            FROM prompts
            WHERE is_public
            ORDER BY created_at DESC
            OFFSET $1
            LIMIT $2
            "#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, updated_at)| PromptStamp {
                id: PromptId::from_uuid(id),
                updated_at,
            })
            .collect())
    }
}

// ============================================================================
// Interaction Repository Implementation
// ============================================================================

impl InteractionRepository for PgVaultRepository {
    async fn exists(
        &self,
        kind: Interaction,
        user_id: UserId,
        prompt_id: PromptId,
    ) -> VaultResult<bool> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE user_id = $1 AND prompt_id = $2)",
            kind.table()
        );

        let exists = sqlx::query_scalar::<_, bool>(&sql)
            .bind(user_id.as_uuid())
            .bind(prompt_id.as_uuid())
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn insert(
        &self,
        kind: Interaction,
        user_id: UserId,
        prompt_id: PromptId,
    ) -> VaultResult<()> {
        let sql = format!(
            "INSERT INTO {} (user_id, prompt_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            kind.table()
        );

        sqlx::query(&sql)
            .bind(user_id.as_uuid())
            .bind(prompt_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(
        &self,
        kind: Interaction,
        user_id: UserId,
        prompt_id: PromptId,
    ) -> VaultResult<()> {
        let sql = format!(
            "DELETE FROM {} WHERE user_id = $1 AND prompt_id = $2",
            kind.table()
        );

        sqlx::query(&sql)
            .bind(user_id.as_uuid())
            .bind(prompt_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn count(&self, kind: Interaction, prompt_id: PromptId) -> VaultResult<Option<i32>> {
        let sql = format!(
            "SELECT {} FROM prompts WHERE id = $1",
            kind.counter_column()
        );

        let count = sqlx::query_scalar::<_, i32>(&sql)
            .bind(prompt_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(count)
    }

    async fn matching(
        &self,
        kind: Interaction,
        user_id: UserId,
        prompt_ids: &[PromptId],
    ) -> VaultResult<HashSet<PromptId>> {
        if prompt_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let sql = format!(
            "SELECT prompt_id FROM {} WHERE user_id = $1 AND prompt_id = ANY($2)",
            kind.table()
        );

        let ids = sqlx::query_scalar::<_, Uuid>(&sql)
            .bind(user_id.as_uuid())
            .bind(uuids(prompt_ids))
            .fetch_all(&self.pool)
            .await?;

        Ok(ids.into_iter().map(PromptId::from_uuid).collect())
    }
}

// ============================================================================
// Follow Repository Implementation
// ============================================================================

impl PgVaultRepository {
    /// Profiles on the other side of `user_id`'s follow rows
    async fn follow_list(&self, user_id: UserId, followers: bool) -> VaultResult<Vec<ProfilePreview>> {
        let (join_col, match_col) = if followers {
            ("follower_id", "following_id")
        } else {
            ("following_id", "follower_id")
        };

        let sql = format!(
            r#"
            SELECT pr.id, pr.username, pr.display_name, pr.avatar_url
            FROM follows f
            JOIN profiles pr ON pr.id = f.{join_col}
            WHERE f.{match_col} = $1
            ORDER BY f.created_at DESC
            "#
        );

        let rows = sqlx::query_as::<_, PreviewRow>(&sql)
            .bind(user_id.as_uuid())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(PreviewRow::into_preview).collect())
    }
}

impl FollowRepository for PgVaultRepository {
    async fn exists(&self, follower_id: UserId, following_id: UserId) -> VaultResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND following_id = $2)",
        )
        .bind(follower_id.as_uuid())
        .bind(following_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn insert(&self, follower_id: UserId, following_id: UserId) -> VaultResult<()> {
        sqlx::query(
            "INSERT INTO follows (follower_id, following_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(follower_id.as_uuid())
        .bind(following_id.as_uuid())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, follower_id: UserId, following_id: UserId) -> VaultResult<()> {
        sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND following_id = $2")
            .bind(follower_id.as_uuid())
            .bind(following_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn following_ids(&self, user_id: UserId) -> VaultResult<Vec<UserId>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT following_id FROM follows WHERE follower_id = $1",
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().map(UserId::from_uuid).collect())
    }

    async fn followers(&self, user_id: UserId) -> VaultResult<Vec<ProfilePreview>> {
        self.follow_list(user_id, true).await
    }

    async fn following(&self, user_id: UserId) -> VaultResult<Vec<ProfilePreview>> {
        self.follow_list(user_id, false).await
    }
}

// ============================================================================
// Profile Repository Implementation
// ============================================================================

impl ProfileRepository for PgVaultRepository {
    async fn find_by_id(&self, user_id: UserId) -> VaultResult<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProfileRow::into_profile))
    }

    async fn find_by_username(&self, username: &str) -> VaultResult<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProfileRow::into_profile))
    }

    async fn update_settings(
        &self,
        user_id: UserId,
        settings: &ProfileSettings,
    ) -> VaultResult<()> {
        sqlx::query(
            r#"
            UPDATE profiles SET
                display_name = $2,
                bio = $3,
                website_url = $4,
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(&settings.display_name)
        .bind(&settings.bio)
        .bind(&settings.website_url)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_avatar_url(&self, user_id: UserId, avatar_url: &str) -> VaultResult<()> {
        sqlx::query("UPDATE profiles SET avatar_url = $2, updated_at = now() WHERE id = $1")
            .bind(user_id.as_uuid())
            .bind(avatar_url)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn top_by_followers(&self, offset: i64, limit: i64) -> VaultResult<Vec<Profile>> {
        let rows = sqlx::query_as::<_, ProfileRow>(&format!(
            r#"
            SELECT {PROFILE_COLUMNS}
            FROM profiles
            ORDER BY follower_count DESC, created_at
            OFFSET $1
            LIMIT $2
            "#
        ))
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProfileRow::into_profile).collect())
    }

    async fn stamps(&self, offset: i64, limit: i64) -> VaultResult<Vec<ProfileStamp>> {
        let rows = sqlx::query_as::<_, (String, DateTime<Utc>)>(
            r#"
            SELECT username, updated_at
            FROM profiles
            ORDER BY follower_count DESC, created_at
            OFFSET $1
            LIMIT $2
            "#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(username, updated_at)| ProfileStamp {
                username,
                updated_at,
            })
            .collect())
    }
}

// ============================================================================
// Comment Repository Implementation
// ============================================================================

impl CommentRepository for PgVaultRepository {
    async fn create(&self, comment: &Comment) -> VaultResult<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, prompt_id, user_id, content, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(comment.id.as_uuid())
        .bind(comment.prompt_id.as_uuid())
        .bind(comment.user_id.as_uuid())
        .bind(&comment.content)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_for_prompt(&self, prompt_id: PromptId) -> VaultResult<Vec<CommentWithAuthor>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT
                c.id,
                c.prompt_id,
                c.user_id,
                c.content,
                c.created_at,
                a.username AS author_username,
                a.display_name AS author_display_name,
                a.avatar_url AS author_avatar_url
            FROM comments c
            JOIN profiles a ON a.id = c.user_id
            WHERE c.prompt_id = $1
            ORDER BY c.created_at ASC
            "#,
        )
        .bind(prompt_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CommentRow::into_comment).collect())
    }

    async fn delete(&self, comment_id: CommentId, author_id: UserId) -> VaultResult<bool> {
        let deleted = sqlx::query("DELETE FROM comments WHERE id = $1 AND user_id = $2")
            .bind(comment_id.as_uuid())
            .bind(author_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Notification Repository Implementation
// ============================================================================

impl NotificationRepository for PgVaultRepository {
    async fn list(
        &self,
        recipient_id: UserId,
        offset: i64,
        limit: i64,
    ) -> VaultResult<Vec<Notification>> {
        let rows = sqlx::query_as::<_, NotificationRow>(
            r#"
            SELECT
                n.id,
                n.type AS kind,
                n.is_read,
                n.read_at,
                n.created_at,
                a.id AS actor_id,
                a.username AS actor_username,
                a.display_name AS actor_display_name,
                a.avatar_url AS actor_avatar_url,
                p.id AS prompt_id,
                p.title AS prompt_title
            FROM notifications n
            LEFT JOIN profiles a ON a.id = n.actor_id
            LEFT JOIN prompts p ON p.id = n.prompt_id
            WHERE n.recipient_id = $1
            ORDER BY n.created_at DESC
            OFFSET $2
            LIMIT $3
            "#,
        )
        .bind(recipient_id.as_uuid())
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(NotificationRow::into_notification).collect()
    }

    async fn unread_count(&self, recipient_id: UserId) -> VaultResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = $1 AND NOT is_read",
        )
        .bind(recipient_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn mark_read(
        &self,
        notification_id: NotificationId,
        recipient_id: UserId,
    ) -> VaultResult<()> {
        sqlx::query(
            r#"
            UPDATE notifications SET is_read = true, read_at = now()
            WHERE id = $1 AND recipient_id = $2
            "#,
        )
        .bind(notification_id.as_uuid())
        .bind(recipient_id.as_uuid())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn mark_all_read(&self, recipient_id: UserId) -> VaultResult<u64> {
        let updated = sqlx::query(
            r#"
            UPDATE notifications SET is_read = true, read_at = now()
            WHERE recipient_id = $1 AND NOT is_read
            "#,
        )
        .bind(recipient_id.as_uuid())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

fn parse_model(value: &str) -> VaultResult<AiModel> {
    AiModel::parse(value).map_err(|e| VaultError::Internal(format!("Corrupt prompt row: {e}")))
}

fn parse_category(value: &str) -> VaultResult<Category> {
    Category::parse(value).map_err(|e| VaultError::Internal(format!("Corrupt prompt row: {e}")))
}

#[derive(sqlx::FromRow)]
struct PromptRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    content: String,
    description: Option<String>,
    model: String,
    category: String,
    tags: Vec<String>,
    is_public: bool,
    like_count: i32,
    bookmark_count: i32,
    view_count: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    author_username: String,
    author_display_name: Option<String>,
    author_avatar_url: Option<String>,
}

impl PromptRow {
    fn into_prompt(self) -> VaultResult<PromptWithAuthor> {
        let user_id = UserId::from_uuid(self.user_id);
        Ok(PromptWithAuthor {
            prompt: Prompt {
                id: PromptId::from_uuid(self.id),
                user_id,
                title: self.title,
                content: self.content,
                description: self.description,
                model: parse_model(&self.model)?,
                category: parse_category(&self.category)?,
                tags: self.tags,
                is_public: self.is_public,
                like_count: self.like_count,
                bookmark_count: self.bookmark_count,
                view_count: self.view_count,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            author: ProfilePreview {
                id: user_id,
                username: self.author_username,
                display_name: self.author_display_name,
                avatar_url: self.author_avatar_url,
            },
        })
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    username: String,
    display_name: Option<String>,
    bio: Option<String>,
    avatar_url: Option<String>,
    website_url: Option<String>,
    follower_count: i32,
    following_count: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProfileRow {
    fn into_profile(self) -> Profile {
        Profile {
            id: UserId::from_uuid(self.id),
            username: self.username,
            display_name: self.display_name,
            bio: self.bio,
            avatar_url: self.avatar_url,
            // Cleared links are stored as ''
            website_url: self.website_url.filter(|w| !w.is_empty()),
            follower_count: self.follower_count,
            following_count: self.following_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PreviewRow {
    id: Uuid,
    username: String,
    display_name: Option<String>,
    avatar_url: Option<String>,
}

impl PreviewRow {
    fn into_preview(self) -> ProfilePreview {
        ProfilePreview {
            id: UserId::from_uuid(self.id),
            username: self.username,
            display_name: self.display_name,
            avatar_url: self.avatar_url,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: Uuid,
    prompt_id: Uuid,
    user_id: Uuid,
    content: String,
    created_at: DateTime<Utc>,
    author_username: String,
    author_display_name: Option<String>,
    author_avatar_url: Option<String>,
}

impl CommentRow {
    fn into_comment(self) -> CommentWithAuthor {
        let user_id = UserId::from_uuid(self.user_id);
        CommentWithAuthor {
            comment: Comment {
                id: CommentId::from_uuid(self.id),
                prompt_id: PromptId::from_uuid(self.prompt_id),
                user_id,
                content: self.content,
                created_at: self.created_at,
            },
            author: ProfilePreview {
                id: user_id,
                username: self.author_username,
                display_name: self.author_display_name,
                avatar_url: self.author_avatar_url,
            },
        }
    }
}

#[derive(sqlx::FromRow)]
struct NotificationRow {
    id: Uuid,
    kind: String,
    is_read: bool,
    read_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    actor_id: Option<Uuid>,
    actor_username: Option<String>,
    actor_display_name: Option<String>,
    actor_avatar_url: Option<String>,
    prompt_id: Option<Uuid>,
    prompt_title: Option<String>,
}

impl NotificationRow {
    fn into_notification(self) -> VaultResult<Notification> {
        let kind = NotificationKind::parse(&self.kind)
            .map_err(|e| VaultError::Internal(format!("Corrupt notification row: {e}")))?;

        let actor = match (self.actor_id, self.actor_username) {
            (Some(id), Some(username)) => Some(ProfilePreview {
                id: UserId::from_uuid(id),
                username,
                display_name: self.actor_display_name,
                avatar_url: self.actor_avatar_url,
            }),
            _ => None,
        };

        let prompt = match (self.prompt_id, self.prompt_title) {
            (Some(id), Some(title)) => Some(PromptPreview {
                id: PromptId::from_uuid(id),
                title,
            }),
            _ => None,
        };

        Ok(Notification {
            id: NotificationId::from_uuid(self.id),
            kind,
            is_read: self.is_read,
            read_at: self.read_at,
            created_at: self.created_at,
            actor,
            prompt,
        })
    }
}
