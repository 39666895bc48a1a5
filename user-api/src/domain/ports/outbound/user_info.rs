use async_trait::async_trait;

use crate::domain::{
    models::{UserDetail, UserId},
    UserError,
};

#[async_trait]
pub trait UserInfoProvider: Send + Sync + 'static {
    async fn user_detail(&self, user_id: &UserId) -> Result<UserDetail, UserError>;
}
