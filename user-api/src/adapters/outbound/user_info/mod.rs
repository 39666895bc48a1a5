use async_trait::async_trait;
use user_info::{UserInfoClient, UserInfoFetchError};

use crate::domain::{
    models::{UserDetail, UserId},
    ports::outbound::UserInfoProvider,
    UserError,
};

/// Adapter that wraps the user-info client to implement the UserInfoProvider port.
pub struct UserInfoAdapter {
    client: UserInfoClient,
}

impl UserInfoAdapter {
    pub fn new(client: UserInfoClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserInfoProvider for UserInfoAdapter {
    async fn user_detail(&self, user_id: &UserId) -> Result<UserDetail, UserError> {
        self.client
            .fetch_user(i64::from(user_id.as_i32()))
            .await
            .map(UserDetail::from)
            .map_err(map_user_info_error)
    }
}

fn map_user_info_error(e: UserInfoFetchError) -> UserError {
    match e {
        UserInfoFetchError::NotFound => UserError::NotFound,
        other => UserError::Provider(other.to_string()),
    }
}
