//! Prompt Detail Use Case
//!
//! Single prompt page: author, viewer flags, comments and template
//! variables. Also renders the template with supplied values.

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::PromptId;
use kernel::viewer::Viewer;
use serde::Serialize;

use crate::application::cards::find_visible;
use crate::domain::entities::{CommentWithAuthor, PromptWithAuthor};
use crate::domain::repository::{CommentRepository, InteractionRepository, PromptRepository};
use crate::domain::services::{render_template, template_variables};
use crate::domain::value_objects::Interaction;
use crate::error::VaultResult;

#[derive(Debug, Serialize)]
pub struct PromptDetail {
    pub prompt: PromptWithAuthor,
    pub liked: bool,
    pub bookmarked: bool,
    pub is_owner: bool,
    pub comments: Vec<CommentWithAuthor>,
    pub variables: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RenderedPrompt {
    pub variables: Vec<String>,
    pub content: String,
}

pub struct PromptDetailUseCase<P, I, C>
where
    P: PromptRepository + Send + Sync + 'static,
    I: InteractionRepository,
    C: CommentRepository,
{
    prompts: Arc<P>,
    interactions: Arc<I>,
    comments: Arc<C>,
}

impl<P, I, C> PromptDetailUseCase<P, I, C>
where
    P: PromptRepository + Send + Sync + 'static,
    I: InteractionRepository,
    C: CommentRepository,
{
    pub fn new(prompts: Arc<P>, interactions: Arc<I>, comments: Arc<C>) -> Self {
        Self {
            prompts,
            interactions,
            comments,
        }
    }

    pub async fn execute(&self, viewer: Viewer, prompt_id: PromptId) -> VaultResult<PromptDetail> {
        let prompt = find_visible(self.prompts.as_ref(), prompt_id, viewer.user_id()).await?;
        let is_owner = viewer.is(prompt.prompt.user_id);

        let (liked, bookmarked) = match viewer.user_id() {
            Some(user_id) => (
                self.interactions
                    .exists(Interaction::Like, user_id, prompt_id)
                    .await?,
                self.interactions
                    .exists(Interaction::Bookmark, user_id, prompt_id)
                    .await?,
            ),
            None => (false, false),
        };

        let comments = self.comments.list_for_prompt(prompt_id).await?;
        let variables = template_variables(&prompt.prompt.content);

        if !is_owner {
            let repo = self.prompts.clone();
            tokio::spawn(async move {
                if let Err(e) = repo.increment_view_count(prompt_id).await {
                    tracing::warn!(error = %e, prompt_id = %prompt_id, "Failed to count prompt view");
                }
            });
        }

        Ok(PromptDetail {
            prompt,
            liked,
            bookmarked,
            is_owner,
            comments,
            variables,
        })
    }

    /// Substitute `values` into the prompt's placeholders
    pub async fn render(
        &self,
        viewer: Viewer,
        prompt_id: PromptId,
        values: &HashMap<String, String>,
    ) -> VaultResult<RenderedPrompt> {
        let prompt = find_visible(self.prompts.as_ref(), prompt_id, viewer.user_id()).await?;
        let content = &prompt.prompt.content;

        Ok(RenderedPrompt {
            variables: template_variables(content),
            content: render_template(content, values),
        })
    }
}
