//! Explore Use Case
//!
//! Full-text search over public prompt titles with tag and category filters.

use std::sync::Arc;

use kernel::viewer::Viewer;
use serde::Serialize;

use crate::application::cards::{PromptCard, with_viewer_flags};
use crate::application::config::VaultConfig;
use crate::domain::repository::{InteractionRepository, PromptRepository, SearchFilter};
use crate::domain::value_objects::Category;
use crate::error::VaultResult;

#[derive(Debug, Clone, Default)]
pub struct ExploreInput {
    pub query: Option<String>,
    pub category: Option<Category>,
    pub tag: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExploreOutput {
    pub query: Option<String>,
    pub category: Option<Category>,
    pub tag: Option<String>,
    pub categories: &'static [Category],
    pub prompts: Vec<PromptCard>,
}

pub struct ExploreUseCase<P, I>
where
    P: PromptRepository,
    I: InteractionRepository,
{
    prompts: Arc<P>,
    interactions: Arc<I>,
    config: Arc<VaultConfig>,
}

impl<P, I> ExploreUseCase<P, I>
where
    P: PromptRepository,
    I: InteractionRepository,
{
    pub fn new(prompts: Arc<P>, interactions: Arc<I>, config: Arc<VaultConfig>) -> Self {
        Self {
            prompts,
            interactions,
            config,
        }
    }

    pub async fn execute(&self, viewer: Viewer, input: ExploreInput) -> VaultResult<ExploreOutput> {
        let query = non_blank(input.query);
        let tag = non_blank(input.tag).map(|t| t.to_lowercase());

        let filter = SearchFilter {
            query: query.clone(),
            tag: tag.clone(),
            category: input.category,
            limit: self.config.explore_limit,
        };

        let prompts = self.prompts.search(&filter).await?;
        let prompts = with_viewer_flags(self.interactions.as_ref(), viewer, prompts).await?;

        Ok(ExploreOutput {
            query,
            category: input.category,
            tag,
            categories: Category::ALL,
            prompts,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
