//! Personal listings: my prompts and bookmarks

use std::sync::Arc;

use kernel::id::UserId;
use kernel::viewer::Viewer;

use crate::application::cards::{PromptCard, with_viewer_flags};
use crate::domain::repository::{InteractionRepository, PromptRepository};
use crate::error::VaultResult;

pub struct ListingsUseCase<P, I>
where
    P: PromptRepository,
    I: InteractionRepository,
{
    prompts: Arc<P>,
    interactions: Arc<I>,
}

impl<P, I> ListingsUseCase<P, I>
where
    P: PromptRepository,
    I: InteractionRepository,
{
    pub fn new(prompts: Arc<P>, interactions: Arc<I>) -> Self {
        Self {
            prompts,
            interactions,
        }
    }

    /// Public and private, newest first
    pub async fn my_prompts(&self, user_id: UserId) -> VaultResult<Vec<PromptCard>> {
        let prompts = self.prompts.list_by_author(user_id, true).await?;
        with_viewer_flags(self.interactions.as_ref(), Viewer::signed_in(user_id), prompts).await
    }

    /// Most recent bookmark first
    pub async fn bookmarks(&self, user_id: UserId) -> VaultResult<Vec<PromptCard>> {
        let prompts = self.prompts.list_bookmarked(user_id).await?;
        with_viewer_flags(self.interactions.as_ref(), Viewer::signed_in(user_id), prompts).await
    }
}
