use async_trait::async_trait;

use crate::domain::{
    models::{MailReceipt, OutgoingMail},
    MailError,
};

#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    async fn send(&self, mail: &OutgoingMail) -> Result<MailReceipt, MailError>;
}
