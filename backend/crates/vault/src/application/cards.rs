//! Prompt cards
//!
//! Listings carry the viewer's like/bookmark flags, looked up once per list.

use kernel::id::{PromptId, UserId};
use kernel::viewer::Viewer;
use serde::Serialize;

use crate::domain::entities::PromptWithAuthor;
use crate::domain::repository::{InteractionRepository, PromptRepository};
use crate::domain::value_objects::Interaction;
use crate::error::{VaultError, VaultResult};

/// A prompt in a listing, as seen by the viewer
#[derive(Debug, Clone, Serialize)]
pub struct PromptCard {
    #[serde(flatten)]
    pub prompt: PromptWithAuthor,
    pub liked: bool,
    pub bookmarked: bool,
}

/// Attach viewer flags to a listing
pub(crate) async fn with_viewer_flags<I>(
    interactions: &I,
    viewer: Viewer,
    prompts: Vec<PromptWithAuthor>,
) -> VaultResult<Vec<PromptCard>>
where
    I: InteractionRepository,
{
    let Some(user_id) = viewer.user_id() else {
        return Ok(prompts
            .into_iter()
            .map(|prompt| PromptCard {
                prompt,
                liked: false,
                bookmarked: false,
            })
            .collect());
    };

    if prompts.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<PromptId> = prompts.iter().map(|p| p.prompt.id).collect();
    let liked = interactions
        .matching(Interaction::Like, user_id, &ids)
        .await?;
    let bookmarked = interactions
        .matching(Interaction::Bookmark, user_id, &ids)
        .await?;

    Ok(prompts
        .into_iter()
        .map(|prompt| {
            let id = prompt.prompt.id;
            PromptCard {
                prompt,
                liked: liked.contains(&id),
                bookmarked: bookmarked.contains(&id),
            }
        })
        .collect())
}

/// A prompt the viewer may see; non-public prompts only exist for their owner
pub(crate) async fn find_visible<P>(
    prompts: &P,
    prompt_id: PromptId,
    viewer: Option<UserId>,
) -> VaultResult<PromptWithAuthor>
where
    P: PromptRepository,
{
    prompts
        .find_by_id(prompt_id)
        .await?
        .filter(|p| p.prompt.is_visible_to(viewer))
        .ok_or(VaultError::NotFound("Prompt"))
}
