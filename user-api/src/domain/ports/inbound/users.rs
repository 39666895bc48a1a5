use async_trait::async_trait;

use crate::domain::{
    models::{NewUser, User, UserDetail, UserId},
    UserError,
};

#[async_trait]
pub trait UserService: Send + Sync + 'static {
    /// Registers a user and sends the welcome mail.
    async fn create_user(&self, user: NewUser) -> Result<User, UserError>;

    async fn get_user_detail(&self, user_id: &UserId) -> Result<UserDetail, UserError>;
}
