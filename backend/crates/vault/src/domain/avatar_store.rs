//! Avatar object store

use crate::error::VaultResult;

/// Upsert-style storage for avatar images, addressed by relative path
#[trait_variant::make(AvatarStore: Send)]
pub trait LocalAvatarStore {
    /// Write `bytes` at `path`, replacing any existing object
    async fn put(&self, path: &str, bytes: &[u8]) -> VaultResult<()>;
}
