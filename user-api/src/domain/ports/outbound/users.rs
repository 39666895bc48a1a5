use async_trait::async_trait;

use crate::domain::{
    models::{NewUser, User},
    UserError,
};

#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Inserts a user without an avatar. A duplicate email is [`UserError::EmailTaken`].
    async fn create_user(&self, user: &NewUser) -> Result<User, UserError>;
}
