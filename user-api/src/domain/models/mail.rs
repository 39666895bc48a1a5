/// A plain-text mail handed to the mail relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

/// What the relay did with the recipients of a mail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MailReceipt {
    pub accepted: Vec<String>,
    pub rejected: Vec<String>,
}

impl MailReceipt {
    pub fn is_rejected(&self) -> bool {
        !self.rejected.is_empty()
    }
}
