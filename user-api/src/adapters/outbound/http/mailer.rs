use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{
    models::{MailReceipt, OutgoingMail},
    ports::outbound::Mailer,
    MailError,
};

/// Sends mail through an HTTP relay that accepts a JSON message and answers
/// with the accepted and rejected recipients.
#[derive(Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    relay_url: String,
}

#[derive(Serialize)]
struct RelayRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct RelayResponse {
    #[serde(default)]
    accepted: Vec<String>,
    #[serde(default)]
    rejected: Vec<String>,
}

impl HttpMailer {
    pub fn new(relay_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), relay_url)
    }

    pub fn with_client(client: reqwest::Client, relay_url: impl Into<String>) -> Self {
        Self {
            client,
            relay_url: relay_url.into(),
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<MailReceipt, MailError> {
        let request = RelayRequest {
            from: &mail.from,
            to: &mail.to,
            subject: &mail.subject,
            text: &mail.text,
        };

        let response = self
            .client
            .post(&self.relay_url)
            .json(&request)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let body = response
            .json::<RelayResponse>()
            .await
            .map_err(|e| MailError::InvalidResponse(e.to_string()))?;

        Ok(MailReceipt {
            accepted: body.accepted,
            rejected: body.rejected,
        })
    }
}
