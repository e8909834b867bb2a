//! Manage Prompt Use Case
//!
//! Create, edit and delete. Edits and deletes are scoped to the owner: a
//! request for someone else's prompt matches no row and reads as not found.

use std::sync::Arc;

use kernel::id::{PromptId, UserId};

use crate::domain::entities::{Prompt, PromptWithAuthor};
use crate::domain::prompt_draft::{PromptDraft, PromptFields};
use crate::domain::repository::PromptRepository;
use crate::error::{VaultError, VaultResult};

pub struct ManagePromptUseCase<P>
where
    P: PromptRepository,
{
    prompts: Arc<P>,
}

impl<P> ManagePromptUseCase<P>
where
    P: PromptRepository,
{
    pub fn new(prompts: Arc<P>) -> Self {
        Self { prompts }
    }

    pub async fn create(&self, owner_id: UserId, fields: PromptFields) -> VaultResult<PromptId> {
        let draft = PromptDraft::parse(fields).map_err(VaultError::Validation)?;
        let prompt = Prompt::new(owner_id, draft);

        self.prompts.create(&prompt).await?;

        tracing::info!(prompt_id = %prompt.id, user_id = %owner_id, "Prompt created");
        Ok(prompt.id)
    }

    /// The prompt for the edit form, only for its owner
    pub async fn load_for_edit(
        &self,
        owner_id: UserId,
        prompt_id: PromptId,
    ) -> VaultResult<PromptWithAuthor> {
        self.prompts
            .find_by_id(prompt_id)
            .await?
            .filter(|p| p.prompt.user_id == owner_id)
            .ok_or(VaultError::NotFound("Prompt"))
    }

    pub async fn update(
        &self,
        owner_id: UserId,
        prompt_id: PromptId,
        fields: PromptFields,
    ) -> VaultResult<()> {
        let draft = PromptDraft::parse(fields).map_err(VaultError::Validation)?;

        if !self.prompts.update(prompt_id, owner_id, &draft).await? {
            return Err(VaultError::NotFound("Prompt"));
        }

        tracing::info!(prompt_id = %prompt_id, "Prompt updated");
        Ok(())
    }

    pub async fn delete(&self, owner_id: UserId, prompt_id: PromptId) -> VaultResult<()> {
        if !self.prompts.delete(prompt_id, owner_id).await? {
            return Err(VaultError::NotFound("Prompt"));
        }

        tracing::info!(prompt_id = %prompt_id, "Prompt deleted");
        Ok(())
    }
}
