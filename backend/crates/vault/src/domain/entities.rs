//! Domain Entities
//!
//! Rows of the social graph as the application reads them. Counters are
//! maintained by database triggers and are read-only here.

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, NotificationId, PromptId, UserId};
use serde::Serialize;

use crate::domain::prompt_draft::PromptDraft;
use crate::domain::value_objects::{AiModel, Category, NotificationKind};

/// Author/actor summary shown next to prompts, comments and notifications
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfilePreview {
    pub id: UserId,
    pub username: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub id: UserId,
    pub username: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub website_url: Option<String>,
    pub follower_count: i32,
    pub following_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn preview(&self) -> ProfilePreview {
        ProfilePreview {
            id: self.id,
            username: self.username.clone(),
            display_name: self.display_name.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Prompt {
    pub id: PromptId,
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub description: Option<String>,
    pub model: AiModel,
    pub category: Category,
    pub tags: Vec<String>,
    pub is_public: bool,
    pub like_count: i32,
    pub bookmark_count: i32,
    pub view_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Prompt {
    /// New prompt owned by `user_id`
    pub fn new(user_id: UserId, draft: PromptDraft) -> Self {
        let now = Utc::now();
        Self {
            id: PromptId::new(),
            user_id,
            title: draft.title,
            content: draft.content,
            description: draft.description,
            model: draft.model,
            category: draft.category,
            tags: draft.tags,
            is_public: draft.is_public,
            like_count: 0,
            bookmark_count: 0,
            view_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `viewer` may see this prompt at all
    pub fn is_visible_to(&self, viewer: Option<UserId>) -> bool {
        self.is_public || viewer == Some(self.user_id)
    }
}

/// Prompt joined with its author's preview
#[derive(Debug, Clone, Serialize)]
pub struct PromptWithAuthor {
    #[serde(flatten)]
    pub prompt: Prompt,
    pub author: ProfilePreview,
}

#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    pub id: CommentId,
    pub prompt_id: PromptId,
    pub user_id: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentWithAuthor {
    #[serde(flatten)]
    pub comment: Comment,
    pub author: ProfilePreview,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptPreview {
    pub id: PromptId,
    pub title: String,
}

/// Notification row with its actor and (for likes) the prompt
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: NotificationId,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub actor: Option<ProfilePreview>,
    pub prompt: Option<PromptPreview>,
}

/// Public prompt entry for the sitemap
#[derive(Debug, Clone)]
pub struct PromptStamp {
    pub id: PromptId,
    pub updated_at: DateTime<Utc>,
}

/// Profile entry for the sitemap
#[derive(Debug, Clone)]
pub struct ProfileStamp {
    pub username: String,
    pub updated_at: DateTime<Utc>,
}
