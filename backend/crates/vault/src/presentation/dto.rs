//! API DTOs (Data Transfer Objects)

use std::collections::HashMap;

use kernel::id::CommentId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::{CreatorCard, OgCard, PromptCard};
use crate::domain::entities::{CommentWithAuthor, Notification, Profile, PromptWithAuthor};
use crate::domain::profile_settings::ProfileFields;
use crate::domain::prompt_draft::PromptFields;
use crate::domain::value_objects::{AiModel, Category};

// ============================================================================
// Listings
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedQuery {
    pub tab: Option<String>,
    pub category: Option<String>,
    pub page: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExploreQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct PromptListResponse {
    pub prompts: Vec<PromptCard>,
}

#[derive(Debug, Serialize)]
pub struct CreatorsResponse {
    pub creators: Vec<CreatorCard>,
}

// ============================================================================
// Prompts
// ============================================================================

/// Create/edit form body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PromptFormRequest {
    pub title: String,
    pub content: String,
    pub description: Option<String>,
    pub model: String,
    pub category: String,
    /// Comma separated
    pub tags: Option<String>,
    /// Only `false` / `"false"` make a prompt private
    pub is_public: Option<Value>,
}

impl From<PromptFormRequest> for PromptFields {
    fn from(req: PromptFormRequest) -> Self {
        let is_public = match &req.is_public {
            Some(Value::Bool(public)) => *public,
            Some(Value::String(s)) => s != "false",
            _ => true,
        };

        PromptFields {
            title: req.title,
            content: req.content,
            description: req.description,
            model: req.model,
            category: req.category,
            tags: req.tags,
            is_public,
        }
    }
}

/// `GET /prompts/new` view model
#[derive(Debug, Serialize)]
pub struct NewPromptResponse {
    pub models: &'static [AiModel],
    pub categories: &'static [Category],
}

/// `GET /prompts/{id}/edit` view model
#[derive(Debug, Serialize)]
pub struct EditPromptResponse {
    pub prompt: PromptWithAuthor,
    /// Tags joined back into the comma separated form value
    pub tags: String,
    pub models: &'static [AiModel],
    pub categories: &'static [Category],
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderRequest {
    #[serde(default)]
    pub values: HashMap<String, String>,
}

// ============================================================================
// Comments
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentRequest {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct CommentsResponse {
    pub comments: Vec<CommentWithAuthor>,
}

#[derive(Debug, Serialize)]
pub struct CommentCreatedResponse {
    pub id: CommentId,
}

// ============================================================================
// Profiles
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileSettingsRequest {
    pub display_name: String,
    pub bio: Option<String>,
    pub website_url: Option<String>,
}

impl From<ProfileSettingsRequest> for ProfileFields {
    fn from(req: ProfileSettingsRequest) -> Self {
        ProfileFields {
            display_name: req.display_name,
            bio: req.bio,
            website_url: req.website_url,
        }
    }
}

/// `GET /profile/settings` view model
#[derive(Debug, Serialize)]
pub struct ProfileSettingsResponse {
    pub profile: Profile,
}

#[derive(Debug, Serialize)]
pub struct AvatarResponse {
    pub success: &'static str,
    pub url: String,
}

// ============================================================================
// Notifications
// ============================================================================

#[derive(Debug, Serialize)]
pub struct NotificationsResponse {
    pub notifications: Vec<Notification>,
    pub unread: i64,
    pub page: u32,
}

#[derive(Debug, Serialize)]
pub struct UnreadResponse {
    pub authenticated: bool,
    pub unread: i64,
}

/// Bare acknowledgement for actions without a message
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

// ============================================================================
// Social cards
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OgQuery {
    #[serde(rename = "type")]
    pub card_type: Option<String>,
    pub name: Option<String>,
    pub username: Option<String>,
    pub followers: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub model: Option<String>,
}

impl From<OgQuery> for OgCard {
    fn from(q: OgQuery) -> Self {
        match q.card_type.as_deref() {
            Some("profile") => OgCard::Profile {
                name: q.name.unwrap_or_else(|| "Creator".to_string()),
                username: q.username.unwrap_or_default(),
                followers: q.followers.unwrap_or_else(|| "0".to_string()),
            },
            _ => OgCard::Prompt {
                title: q.title.unwrap_or_else(|| "Untitled Prompt".to_string()),
                author: q.author.unwrap_or_else(|| "Anonymous".to_string()),
                category: q.category.unwrap_or_default(),
                model: q.model.unwrap_or_default(),
            },
        }
    }
}
