//! Comments Use Case

use std::sync::Arc;

use chrono::Utc;
use kernel::id::{CommentId, PromptId, UserId};
use kernel::viewer::Viewer;

use crate::application::cards::find_visible;
use crate::domain::entities::{Comment, CommentWithAuthor};
use crate::domain::repository::{CommentRepository, PromptRepository};
use crate::domain::value_objects::CommentBody;
use crate::error::{VaultError, VaultResult};

pub struct CommentsUseCase<P, C>
where
    P: PromptRepository,
    C: CommentRepository,
{
    prompts: Arc<P>,
    comments: Arc<C>,
}

impl<P, C> CommentsUseCase<P, C>
where
    P: PromptRepository,
    C: CommentRepository,
{
    pub fn new(prompts: Arc<P>, comments: Arc<C>) -> Self {
        Self { prompts, comments }
    }

    /// Oldest first
    pub async fn list(&self, viewer: Viewer, prompt_id: PromptId) -> VaultResult<Vec<CommentWithAuthor>> {
        find_visible(self.prompts.as_ref(), prompt_id, viewer.user_id()).await?;
        self.comments.list_for_prompt(prompt_id).await
    }

    pub async fn add(
        &self,
        user_id: UserId,
        prompt_id: PromptId,
        content: &str,
    ) -> VaultResult<CommentId> {
        let body = CommentBody::new(content).map_err(|e| VaultError::field("content", e.to_string()))?;

        find_visible(self.prompts.as_ref(), prompt_id, Some(user_id)).await?;

        let comment = Comment {
            id: CommentId::new(),
            prompt_id,
            user_id,
            content: body.into_inner(),
            created_at: Utc::now(),
        };
        self.comments.create(&comment).await?;

        tracing::info!(comment_id = %comment.id, prompt_id = %prompt_id, "Comment added");
        Ok(comment.id)
    }

    /// Only the author's own comment
    pub async fn delete(&self, user_id: UserId, comment_id: CommentId) -> VaultResult<()> {
        if !self.comments.delete(comment_id, user_id).await? {
            return Err(VaultError::NotFound("Comment"));
        }

        tracing::info!(comment_id = %comment_id, "Comment deleted");
        Ok(())
    }
}
