//! Notifications Use Case
//!
//! Rows are written by database triggers on like and follow inserts; this
//! side only reads them and flips `is_read`.

use std::sync::Arc;

use kernel::id::{NotificationId, UserId};

use crate::application::config::VaultConfig;
use crate::domain::entities::Notification;
use crate::domain::repository::NotificationRepository;
use crate::error::VaultResult;

pub struct NotificationsUseCase<N>
where
    N: NotificationRepository,
{
    notifications: Arc<N>,
    config: Arc<VaultConfig>,
}

impl<N> NotificationsUseCase<N>
where
    N: NotificationRepository,
{
    pub fn new(notifications: Arc<N>, config: Arc<VaultConfig>) -> Self {
        Self {
            notifications,
            config,
        }
    }

    /// Newest first
    pub async fn list(&self, user_id: UserId, page: u32) -> VaultResult<Vec<Notification>> {
        let limit = self.config.notifications_page_size;
        self.notifications
            .list(user_id, i64::from(page) * limit, limit)
            .await
    }

    pub async fn unread_count(&self, user_id: UserId) -> VaultResult<i64> {
        self.notifications.unread_count(user_id).await
    }

    pub async fn mark_read(&self, user_id: UserId, notification_id: NotificationId) -> VaultResult<()> {
        self.notifications.mark_read(notification_id, user_id).await
    }

    pub async fn mark_all_read(&self, user_id: UserId) -> VaultResult<u64> {
        let updated = self.notifications.mark_all_read(user_id).await?;
        tracing::debug!(user_id = %user_id, updated, "Notifications marked read");
        Ok(updated)
    }
}
