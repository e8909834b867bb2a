//! Feed Use Case
//!
//! Public prompt listing by tab and category, with creator suggestions for
//! an empty following tab.

use std::sync::Arc;

use kernel::id::UserId;
use kernel::viewer::Viewer;
use serde::Serialize;

use crate::application::cards::{PromptCard, with_viewer_flags};
use crate::application::config::VaultConfig;
use crate::domain::entities::Profile;
use crate::domain::repository::{
    FeedFilter, FollowRepository, InteractionRepository, ProfileRepository, PromptOrder,
    PromptRepository,
};
use crate::domain::value_objects::{Category, FeedTab};
use crate::error::VaultResult;

/// Feed input
#[derive(Debug, Clone, Copy)]
pub struct FeedInput {
    pub tab: FeedTab,
    pub category: Option<Category>,
    /// Zero-based
    pub page: u32,
}

/// Feed output
#[derive(Debug, Serialize)]
pub struct FeedOutput {
    pub tab: FeedTab,
    pub category: Option<Category>,
    pub page: u32,
    pub prompts: Vec<PromptCard>,
    pub has_more: bool,
    /// Filled only when the following tab is empty
    pub suggestions: Vec<Profile>,
}

pub struct FeedUseCase<P, I, F, R>
where
    P: PromptRepository,
    I: InteractionRepository,
    F: FollowRepository,
    R: ProfileRepository,
{
    prompts: Arc<P>,
    interactions: Arc<I>,
    follows: Arc<F>,
    profiles: Arc<R>,
    config: Arc<VaultConfig>,
}

impl<P, I, F, R> FeedUseCase<P, I, F, R>
where
    P: PromptRepository,
    I: InteractionRepository,
    F: FollowRepository,
    R: ProfileRepository,
{
    pub fn new(
        prompts: Arc<P>,
        interactions: Arc<I>,
        follows: Arc<F>,
        profiles: Arc<R>,
        config: Arc<VaultConfig>,
    ) -> Self {
        Self {
            prompts,
            interactions,
            follows,
            profiles,
            config,
        }
    }

    pub async fn execute(&self, viewer: Viewer, input: FeedInput) -> VaultResult<FeedOutput> {
        let limit = self.config.page_size;
        let offset = i64::from(input.page) * limit;

        let followed = match (input.tab, viewer.user_id()) {
            (FeedTab::Following, Some(user_id)) => Some(self.follows.following_ids(user_id).await?),
            (FeedTab::Following, None) => Some(Vec::new()),
            _ => None,
        };

        let prompts = match &followed {
            // Nobody to show posts from
            Some(authors) if authors.is_empty() => Vec::new(),
            _ => {
                let filter = FeedFilter {
                    order: match input.tab {
                        FeedTab::Trending => PromptOrder::Trending,
                        FeedTab::Latest | FeedTab::Following => PromptOrder::Latest,
                    },
                    category: input.category,
                    authors: followed.clone(),
                    offset,
                    limit,
                };
                self.prompts.feed(&filter).await?
            }
        };

        let has_more = prompts.len() as i64 == limit;

        let suggestions = match followed {
            Some(followed) if prompts.is_empty() => {
                self.suggestions(viewer.user_id(), &followed).await?
            }
            _ => Vec::new(),
        };

        let prompts = with_viewer_flags(self.interactions.as_ref(), viewer, prompts).await?;

        Ok(FeedOutput {
            tab: input.tab,
            category: input.category,
            page: input.page,
            prompts,
            has_more,
            suggestions,
        })
    }

    /// Top creators the viewer does not already follow
    async fn suggestions(
        &self,
        viewer: Option<UserId>,
        followed: &[UserId],
    ) -> VaultResult<Vec<Profile>> {
        let wanted = self.config.suggestion_limit;
        // Enough rows to survive removing the viewer and everyone they follow
        let fetch = wanted + followed.len() as i64 + 1;

        let candidates = self.profiles.top_by_followers(0, fetch).await?;

        Ok(candidates
            .into_iter()
            .filter(|p| Some(p.id) != viewer && !followed.contains(&p.id))
            .take(wanted as usize)
            .collect())
    }
}
