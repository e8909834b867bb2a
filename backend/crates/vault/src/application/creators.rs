//! Creators Use Case
//!
//! Most followed profiles with the viewer's follow state.

use std::sync::Arc;

use kernel::viewer::Viewer;
use serde::Serialize;

use crate::application::config::VaultConfig;
use crate::domain::entities::Profile;
use crate::domain::repository::{FollowRepository, ProfileRepository};
use crate::error::VaultResult;

#[derive(Debug, Serialize)]
pub struct CreatorCard {
    #[serde(flatten)]
    pub profile: Profile,
    /// Always false for the viewer's own card and for anonymous viewers
    pub is_following: bool,
}

pub struct CreatorsUseCase<R, F>
where
    R: ProfileRepository,
    F: FollowRepository,
{
    profiles: Arc<R>,
    follows: Arc<F>,
    config: Arc<VaultConfig>,
}

impl<R, F> CreatorsUseCase<R, F>
where
    R: ProfileRepository,
    F: FollowRepository,
{
    pub fn new(profiles: Arc<R>, follows: Arc<F>, config: Arc<VaultConfig>) -> Self {
        Self {
            profiles,
            follows,
            config,
        }
    }

    pub async fn execute(&self, viewer: Viewer) -> VaultResult<Vec<CreatorCard>> {
        let profiles = self
            .profiles
            .top_by_followers(0, self.config.creators_limit)
            .await?;

        let followed = match viewer.user_id() {
            Some(user_id) => self.follows.following_ids(user_id).await?,
            None => Vec::new(),
        };

        Ok(profiles
            .into_iter()
            .map(|profile| {
                let is_following = !viewer.is(profile.id) && followed.contains(&profile.id);
                CreatorCard {
                    profile,
                    is_following,
                }
            })
            .collect())
    }
}
