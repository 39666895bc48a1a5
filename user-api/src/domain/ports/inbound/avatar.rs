use async_trait::async_trait;

use crate::domain::{models::UserId, AvatarError};

#[async_trait]
pub trait AvatarService: Send + Sync + 'static {
    /// Returns the raw avatar bytes of a user, fetching them from the image
    /// server the first time they are asked for.
    async fn resolve_avatar(&self, user_id: &UserId) -> Result<Vec<u8>, AvatarError>;

    /// Drops the avatar from the cache, the user record and the blob store.
    async fn remove_avatar(&self, user_id: &UserId) -> Result<bool, AvatarError>;
}
