use async_trait::async_trait;

use crate::domain::{
    models::{AvatarToken, UserAvatarRecord, UserId},
    AvatarError,
};

/// The avatar pointer column of the persistent user record.
#[async_trait]
pub trait AvatarRecordStore: Send + Sync + 'static {
    /// Returns `None` when no user with this id exists.
    async fn find_user_avatar(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserAvatarRecord>, AvatarError>;

    /// Sets or clears (`None`) the avatar token of a user.
    async fn update_avatar_token(
        &self,
        user_id: &UserId,
        token: Option<&AvatarToken>,
    ) -> Result<(), AvatarError>;
}
