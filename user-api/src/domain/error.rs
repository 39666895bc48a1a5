use std::fmt;

use thiserror::Error;

/// Why an avatar lookup came back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    UserNotExisting,
    EmptyAvatar,
}

impl fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::UserNotExisting => "user does not exist",
            Self::EmptyAvatar => "user has no avatar",
        };
        write!(f, "{message}")
    }
}

/// Errors that can occur while resolving or removing an avatar.
///
/// Cloneable so a single in-flight resolution can hand the same outcome to
/// every caller waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AvatarError {
    #[error("{0}")]
    NotFound(NotFoundReason),
    #[error("avatar i/o failed: {0}")]
    Io(String),
    #[error("avatar fetch timed out")]
    Timeout,
    #[error("avatar store failed: {0}")]
    Storage(String),
}

impl AvatarError {
    pub const USER_NOT_EXISTING: Self = Self::NotFound(NotFoundReason::UserNotExisting);
    pub const EMPTY_AVATAR: Self = Self::NotFound(NotFoundReason::EmptyAvatar);

    pub fn io(msg: impl fmt::Display) -> Self {
        Self::Io(msg.to_string())
    }

    pub fn storage(msg: impl fmt::Display) -> Self {
        Self::Storage(msg.to_string())
    }
}

impl From<std::io::Error> for AvatarError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Errors that can occur during user management operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("email already exists")]
    EmailTaken,
    #[error("{0}")]
    InvalidInput(String),
    #[error("failed to send registration email")]
    MailRejected,
    #[error("user not found")]
    NotFound,
    #[error("user info provider failed: {0}")]
    Provider(String),
    #[error("mail relay failed: {0}")]
    Mail(#[from] MailError),
    #[error("storage error: {0}")]
    Storage(String),
}

impl UserError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected relay response: {0}")]
    InvalidResponse(String),
}
