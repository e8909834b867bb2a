//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//! Counters and notifications are written by database triggers, so the
//! toggle methods here only touch join rows.

use std::collections::HashSet;

use kernel::id::{CommentId, NotificationId, PromptId, UserId};

use crate::domain::entities::{
    Comment, CommentWithAuthor, Notification, Profile, ProfilePreview, ProfileStamp, Prompt,
    PromptStamp, PromptWithAuthor,
};
use crate::domain::profile_settings::ProfileSettings;
use crate::domain::prompt_draft::PromptDraft;
use crate::domain::value_objects::{Category, Interaction};
use crate::error::VaultResult;

/// Ordering of a public prompt listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOrder {
    /// `created_at DESC`
    Latest,
    /// `like_count DESC, created_at DESC`
    Trending,
}

/// Page of public prompts
#[derive(Debug, Clone)]
pub struct FeedFilter {
    pub order: PromptOrder,
    pub category: Option<Category>,
    /// Restrict to these authors (following tab)
    pub authors: Option<Vec<UserId>>,
    pub offset: i64,
    pub limit: i64,
}

/// Explore search over public prompts, ordered by `like_count DESC`
#[derive(Debug, Clone)]
pub struct SearchFilter {
    /// Websearch syntax against the title
    pub query: Option<String>,
    pub tag: Option<String>,
    pub category: Option<Category>,
    pub limit: i64,
}

#[trait_variant::make(PromptRepository: Send)]
pub trait LocalPromptRepository {
    async fn create(&self, prompt: &Prompt) -> VaultResult<()>;

    /// Any prompt, public or not; visibility is checked by the caller
    async fn find_by_id(&self, prompt_id: PromptId) -> VaultResult<Option<PromptWithAuthor>>;

    /// Owner-scoped update. `false` when no row matched.
    async fn update(
        &self,
        prompt_id: PromptId,
        owner_id: UserId,
        draft: &PromptDraft,
    ) -> VaultResult<bool>;

    /// Owner-scoped delete. `false` when no row matched.
    async fn delete(&self, prompt_id: PromptId, owner_id: UserId) -> VaultResult<bool>;

    async fn feed(&self, filter: &FeedFilter) -> VaultResult<Vec<PromptWithAuthor>>;

    async fn search(&self, filter: &SearchFilter) -> VaultResult<Vec<PromptWithAuthor>>;

    /// Newest first; private prompts only when `include_private`
    async fn list_by_author(
        &self,
        author_id: UserId,
        include_private: bool,
    ) -> VaultResult<Vec<PromptWithAuthor>>;

    /// Prompts the user bookmarked, most recent bookmark first
    async fn list_bookmarked(&self, user_id: UserId) -> VaultResult<Vec<PromptWithAuthor>>;

    async fn increment_view_count(&self, prompt_id: PromptId) -> VaultResult<()>;

    /// Public prompts for the sitemap, newest first
    async fn public_stamps(&self, offset: i64, limit: i64) -> VaultResult<Vec<PromptStamp>>;
}

/// Likes and bookmarks
#[trait_variant::make(InteractionRepository: Send)]
pub trait LocalInteractionRepository {
    async fn exists(
        &self,
        kind: Interaction,
        user_id: UserId,
        prompt_id: PromptId,
    ) -> VaultResult<bool>;

    /// Insert the join row; a concurrent duplicate is absorbed by the primary key
    async fn insert(&self, kind: Interaction, user_id: UserId, prompt_id: PromptId)
    -> VaultResult<()>;

    /// Delete the join row; deleting a missing row is a no-op
    async fn delete(&self, kind: Interaction, user_id: UserId, prompt_id: PromptId)
    -> VaultResult<()>;

    /// Fresh counter value from the prompt row
    async fn count(&self, kind: Interaction, prompt_id: PromptId) -> VaultResult<Option<i32>>;

    /// Which of `prompt_ids` the user has liked/bookmarked
    async fn matching(
        &self,
        kind: Interaction,
        user_id: UserId,
        prompt_ids: &[PromptId],
    ) -> VaultResult<HashSet<PromptId>>;
}

#[trait_variant::make(FollowRepository: Send)]
pub trait LocalFollowRepository {
    async fn exists(&self, follower_id: UserId, following_id: UserId) -> VaultResult<bool>;

    async fn insert(&self, follower_id: UserId, following_id: UserId) -> VaultResult<()>;

    async fn delete(&self, follower_id: UserId, following_id: UserId) -> VaultResult<()>;

    /// Everyone `user_id` follows
    async fn following_ids(&self, user_id: UserId) -> VaultResult<Vec<UserId>>;

    /// Followers of `user_id`, newest follow first
    async fn followers(&self, user_id: UserId) -> VaultResult<Vec<ProfilePreview>>;

    /// Profiles `user_id` follows, newest follow first
    async fn following(&self, user_id: UserId) -> VaultResult<Vec<ProfilePreview>>;
}

#[trait_variant::make(ProfileRepository: Send)]
pub trait LocalProfileRepository {
    async fn find_by_id(&self, user_id: UserId) -> VaultResult<Option<Profile>>;

    async fn find_by_username(&self, username: &str) -> VaultResult<Option<Profile>>;

    async fn update_settings(&self, user_id: UserId, settings: &ProfileSettings)
    -> VaultResult<()>;

    async fn update_avatar_url(&self, user_id: UserId, avatar_url: &str) -> VaultResult<()>;

    /// Profiles ordered by `follower_count DESC`
    async fn top_by_followers(&self, offset: i64, limit: i64) -> VaultResult<Vec<Profile>>;

    /// Profiles for the sitemap, most followed first
    async fn stamps(&self, offset: i64, limit: i64) -> VaultResult<Vec<ProfileStamp>>;
}

#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    async fn create(&self, comment: &Comment) -> VaultResult<()>;

    /// Oldest first
    async fn list_for_prompt(&self, prompt_id: PromptId) -> VaultResult<Vec<CommentWithAuthor>>;

    /// Author-scoped delete. `false` when no row matched.
    async fn delete(&self, comment_id: CommentId, author_id: UserId) -> VaultResult<bool>;
}

#[trait_variant::make(NotificationRepository: Send)]
pub trait LocalNotificationRepository {
    /// Newest first
    async fn list(
        &self,
        recipient_id: UserId,
        offset: i64,
        limit: i64,
    ) -> VaultResult<Vec<Notification>>;

    async fn unread_count(&self, recipient_id: UserId) -> VaultResult<i64>;

    /// Recipient-scoped
    async fn mark_read(
        &self,
        notification_id: NotificationId,
        recipient_id: UserId,
    ) -> VaultResult<()>;

    /// Returns the number of notifications that were unread
    async fn mark_all_read(&self, recipient_id: UserId) -> VaultResult<u64>;
}

/// Everything the vault handlers need from one store
pub trait VaultStore:
    PromptRepository
    + InteractionRepository
    + FollowRepository
    + ProfileRepository
    + CommentRepository
    + NotificationRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> VaultStore for T where
    T: PromptRepository
        + InteractionRepository
        + FollowRepository
        + ProfileRepository
        + CommentRepository
        + NotificationRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
