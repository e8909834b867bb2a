//! Application Layer
//!
//! Use cases and application services.

pub mod cards;
pub mod comments;
pub mod config;
pub mod creators;
pub mod explore;
pub mod feed;
pub mod listings;
pub mod manage_prompt;
pub mod notifications;
pub mod og;
pub mod profile;
pub mod prompt_detail;
pub mod seo;
pub mod toggle;

// Re-exports
pub use cards::PromptCard;
pub use comments::CommentsUseCase;
pub use config::VaultConfig;
pub use creators::{CreatorCard, CreatorsUseCase};
pub use explore::{ExploreInput, ExploreOutput, ExploreUseCase};
pub use feed::{FeedInput, FeedOutput, FeedUseCase};
pub use listings::ListingsUseCase;
pub use manage_prompt::ManagePromptUseCase;
pub use notifications::NotificationsUseCase;
pub use og::OgCard;
pub use profile::{
    AVATAR_UPDATED_MESSAGE, AvatarUpload, PROFILE_UPDATED_MESSAGE, ProfilePage,
    ProfilePageUseCase, ProfileSettingsUseCase,
};
pub use prompt_detail::{PromptDetail, PromptDetailUseCase, RenderedPrompt};
pub use seo::{SitemapUseCase, robots_txt};
pub use toggle::{ToggleOutput, ToggleUseCase};
