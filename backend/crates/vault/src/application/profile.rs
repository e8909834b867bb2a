//! Profile Use Cases
//!
//! Public profile page, settings form and avatar upload.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::UserId;
use kernel::viewer::Viewer;
use serde::Serialize;

use crate::application::cards::{PromptCard, with_viewer_flags};
use crate::application::config::VaultConfig;
use crate::domain::avatar_store::AvatarStore;
use crate::domain::entities::{Profile, ProfilePreview};
use crate::domain::profile_settings::{ProfileFields, ProfileSettings};
use crate::domain::repository::{
    FollowRepository, InteractionRepository, ProfileRepository, PromptRepository,
};
use crate::error::{VaultError, VaultResult};

pub const PROFILE_UPDATED_MESSAGE: &str = "Profile updated.";
pub const AVATAR_UPDATED_MESSAGE: &str = "Avatar updated.";

#[derive(Debug, Serialize)]
pub struct ProfilePage {
    pub profile: Profile,
    pub prompts: Vec<PromptCard>,
    pub followers: Vec<ProfilePreview>,
    pub following: Vec<ProfilePreview>,
    pub is_following: bool,
    pub is_owner: bool,
}

pub struct ProfilePageUseCase<R, P, I, F>
where
    R: ProfileRepository,
    P: PromptRepository,
    I: InteractionRepository,
    F: FollowRepository,
{
    profiles: Arc<R>,
    prompts: Arc<P>,
    interactions: Arc<I>,
    follows: Arc<F>,
}

impl<R, P, I, F> ProfilePageUseCase<R, P, I, F>
where
    R: ProfileRepository,
    P: PromptRepository,
    I: InteractionRepository,
    F: FollowRepository,
{
    pub fn new(profiles: Arc<R>, prompts: Arc<P>, interactions: Arc<I>, follows: Arc<F>) -> Self {
        Self {
            profiles,
            prompts,
            interactions,
            follows,
        }
    }

    pub async fn execute(&self, viewer: Viewer, username: &str) -> VaultResult<ProfilePage> {
        let profile = self
            .profiles
            .find_by_username(username)
            .await?
            .ok_or(VaultError::NotFound("Profile"))?;

        let is_owner = viewer.is(profile.id);
        let is_following = match viewer.user_id() {
            Some(user_id) if !is_owner => self.follows.exists(user_id, profile.id).await?,
            _ => false,
        };

        let prompts = self.prompts.list_by_author(profile.id, false).await?;
        let prompts = with_viewer_flags(self.interactions.as_ref(), viewer, prompts).await?;
        let followers = self.follows.followers(profile.id).await?;
        let following = self.follows.following(profile.id).await?;

        Ok(ProfilePage {
            profile,
            prompts,
            followers,
            following,
            is_following,
            is_owner,
        })
    }
}

/// Uploaded avatar file
#[derive(Debug, Clone)]
pub struct AvatarUpload {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

pub struct ProfileSettingsUseCase<R, A>
where
    R: ProfileRepository,
    A: AvatarStore,
{
    profiles: Arc<R>,
    avatars: Arc<A>,
    config: Arc<VaultConfig>,
}

impl<R, A> ProfileSettingsUseCase<R, A>
where
    R: ProfileRepository,
    A: AvatarStore,
{
    pub fn new(profiles: Arc<R>, avatars: Arc<A>, config: Arc<VaultConfig>) -> Self {
        Self {
            profiles,
            avatars,
            config,
        }
    }

    /// Current values for the settings form
    pub async fn load(&self, user_id: UserId) -> VaultResult<Profile> {
        self.profiles
            .find_by_id(user_id)
            .await?
            .ok_or(VaultError::NotFound("Profile"))
    }

    pub async fn update(&self, user_id: UserId, fields: ProfileFields) -> VaultResult<()> {
        let settings = ProfileSettings::parse(fields).map_err(VaultError::Validation)?;
        self.profiles.update_settings(user_id, &settings).await?;

        tracing::info!(user_id = %user_id, "Profile updated");
        Ok(())
    }

    /// Store the image at `<user_id>/avatar.<ext>` and return its public URL
    pub async fn upload_avatar(&self, user_id: UserId, upload: AvatarUpload) -> VaultResult<String> {
        if upload.bytes.is_empty() {
            return Err(VaultError::field("avatar", "No file selected"));
        }
        if upload.bytes.len() > self.config.avatar_max_bytes {
            return Err(VaultError::field("avatar", "File must be under 5MB"));
        }

        let ext = avatar_extension(upload.file_name.as_deref())
            .ok_or_else(|| VaultError::field("avatar", "Unsupported file type"))?;
        let path = format!("{user_id}/avatar.{ext}");

        self.avatars.put(&path, &upload.bytes).await?;

        let url = self
            .config
            .avatar_url(&path, Utc::now().timestamp_millis());
        self.profiles.update_avatar_url(user_id, &url).await?;

        tracing::info!(user_id = %user_id, path = %path, "Avatar updated");
        Ok(url)
    }
}

/// Lowercased extension of the uploaded file name, if it is a plain one
fn avatar_extension(file_name: Option<&str>) -> Option<String> {
    let (_, ext) = file_name?.rsplit_once('.')?;
    let valid = (1..=5).contains(&ext.len()) && ext.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then(|| ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_extension() {
        assert_eq!(avatar_extension(Some("me.PNG")), Some("png".to_string()));
        assert_eq!(avatar_extension(Some("photo.final.jpeg")), Some("jpeg".to_string()));
        assert_eq!(avatar_extension(Some("noext")), None);
        assert_eq!(avatar_extension(Some("x./../../etc")), None);
        assert_eq!(avatar_extension(None), None);
    }
}
