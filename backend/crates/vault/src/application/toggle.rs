//! Toggle Use Case
//!
//! Like, bookmark and follow are existence rows flipped on each call:
//! check, then insert or delete. There is no transaction around the pair.
//! Racing inserts collapse on the composite primary key and racing deletes
//! are no-ops.

use std::sync::Arc;

use kernel::id::{PromptId, UserId};
use serde::Serialize;

use crate::application::cards::find_visible;
use crate::domain::repository::{
    FollowRepository, InteractionRepository, ProfileRepository, PromptRepository,
};
use crate::domain::value_objects::Interaction;
use crate::error::{VaultError, VaultResult};

/// State after the toggle and the counter read back after the write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToggleOutput {
    pub active: bool,
    pub count: i32,
}

pub struct ToggleUseCase<P, I, F, R>
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
}

impl<P, I, F, R> ToggleUseCase<P, I, F, R>
where
    P: PromptRepository,
    I: InteractionRepository,
    F: FollowRepository,
    R: ProfileRepository,
{
    pub fn new(prompts: Arc<P>, interactions: Arc<I>, follows: Arc<F>, profiles: Arc<R>) -> Self {
        Self {
            prompts,
            interactions,
            follows,
            profiles,
        }
    }

    pub async fn toggle_like(&self, user_id: UserId, prompt_id: PromptId) -> VaultResult<ToggleOutput> {
        self.toggle_interaction(Interaction::Like, user_id, prompt_id)
            .await
    }

    pub async fn toggle_bookmark(
        &self,
        user_id: UserId,
        prompt_id: PromptId,
    ) -> VaultResult<ToggleOutput> {
        self.toggle_interaction(Interaction::Bookmark, user_id, prompt_id)
            .await
    }

    async fn toggle_interaction(
        &self,
        kind: Interaction,
        user_id: UserId,
        prompt_id: PromptId,
    ) -> VaultResult<ToggleOutput> {
        find_visible(self.prompts.as_ref(), prompt_id, Some(user_id)).await?;

        let active = if self.interactions.exists(kind, user_id, prompt_id).await? {
            self.interactions.delete(kind, user_id, prompt_id).await?;
            false
        } else {
            self.interactions.insert(kind, user_id, prompt_id).await?;
            true
        };

        let count = self
            .interactions
            .count(kind, prompt_id)
            .await?
            .ok_or(VaultError::NotFound("Prompt"))?;

        tracing::info!(
            prompt_id = %prompt_id,
            user_id = %user_id,
            kind = kind.table(),
            active,
            "Interaction toggled"
        );

        Ok(ToggleOutput { active, count })
    }

    /// `count` is the target's follower count
    pub async fn toggle_follow(&self, user_id: UserId, target_id: UserId) -> VaultResult<ToggleOutput> {
        if user_id == target_id {
            return Err(VaultError::CannotFollowSelf);
        }

        if self.profiles.find_by_id(target_id).await?.is_none() {
            return Err(VaultError::NotFound("Profile"));
        }

        let active = if self.follows.exists(user_id, target_id).await? {
            self.follows.delete(user_id, target_id).await?;
            false
        } else {
            self.follows.insert(user_id, target_id).await?;
            true
        };

        let count = self
            .profiles
            .find_by_id(target_id)
            .await?
            .map(|p| p.follower_count)
            .ok_or(VaultError::NotFound("Profile"))?;

        tracing::info!(follower_id = %user_id, following_id = %target_id, active, "Follow toggled");

        Ok(ToggleOutput { active, count })
    }
}
