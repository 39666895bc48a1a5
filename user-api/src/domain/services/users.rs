use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::domain::{
    models::{NewUser, OutgoingMail, User, UserDetail, UserId},
    ports::{
        inbound::UserService,
        outbound::{Mailer, UserInfoProvider, UserRepository},
    },
    UserError,
};

pub struct UserServiceImpl<R, M, P> {
    repository: Arc<R>,
    mailer: Arc<M>,
    user_info: Arc<P>,
    app_name: String,
    sender_address: String,
}

impl<R, M, P> UserServiceImpl<R, M, P> {
    pub fn new(
        repository: Arc<R>,
        mailer: Arc<M>,
        user_info: Arc<P>,
        app_name: impl Into<String>,
        sender_address: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            mailer,
            user_info,
            app_name: app_name.into(),
            sender_address: sender_address.into(),
        }
    }

    fn welcome_mail(&self, user: &User) -> OutgoingMail {
        OutgoingMail {
            from: format!("User management <{}>", self.sender_address),
            to: user.email.clone(),
            subject: format!("[{}] Registration successful!", self.app_name),
            text: format!(
                "Hi {} {},\nThank you for subscribing to our service!\n\nBest Regards!",
                user.first_name, user.last_name
            ),
        }
    }
}

#[async_trait]
impl<R, M, P> UserService for UserServiceImpl<R, M, P>
where
    R: UserRepository,
    M: Mailer,
    P: UserInfoProvider,
{
    #[instrument(name = "users.create", skip_all, fields(email = %user.email))]
    async fn create_user(&self, user: NewUser) -> Result<User, UserError> {
        let created = self.repository.create_user(&user).await?;

        let receipt = self.mailer.send(&self.welcome_mail(&created)).await?;
        if receipt.is_rejected() {
            warn!(user_id = %created.id, rejected = ?receipt.rejected, "registration mail rejected");
            return Err(UserError::MailRejected);
        }

        info!(user_id = %created.id, "user registered");
        Ok(created)
    }

    #[instrument(name = "users.detail", skip(self))]
    async fn get_user_detail(&self, user_id: &UserId) -> Result<UserDetail, UserError> {
        self.user_info.user_detail(user_id).await
    }
}
