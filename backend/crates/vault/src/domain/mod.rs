//! Domain Layer
//!
//! Entities, value objects, form validation and repository interfaces.

pub mod avatar_store;
pub mod entities;
pub mod profile_settings;
pub mod prompt_draft;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use avatar_store::AvatarStore;
pub use entities::{
    Comment, CommentWithAuthor, Notification, Profile, ProfilePreview, Prompt, PromptPreview,
    PromptWithAuthor,
};
pub use repository::{
    CommentRepository, FeedFilter, FollowRepository, InteractionRepository,
    NotificationRepository, ProfileRepository, PromptOrder, PromptRepository, SearchFilter,
    VaultStore,
};
pub use value_objects::{AiModel, Category, FeedTab, Interaction, NotificationKind};
