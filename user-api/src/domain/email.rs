use std::fmt;
use std::ops::Deref;
use thiserror::Error;

/// A validated, normalized (trimmed and lowercased) email address.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Email(String);

#[derive(Error, Debug, PartialEq)]
pub enum EmailError {
    #[error("'{0}' is not a valid email: must contain only one '@'")]
    InvalidFormat(String),
    #[error("'{0}' is not a valid email: missing local part")]
    MissingLocalPart(String),
    #[error("'{0}' is not a valid email: invalid domain part")]
    InvalidDomainPart(String),
}

impl TryFrom<&str> for Email {
    type Error = EmailError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_lowercase();

        let mut parts = normalized.split('@');
        let local_part = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();

        if parts.next().is_some() {
            return Err(EmailError::InvalidFormat(value.to_string()));
        }

        if local_part.is_empty() || local_part.contains(char::is_whitespace) {
            return Err(EmailError::MissingLocalPart(value.to_string()));
        }

        if domain.is_empty()
            || !domain.contains('.')
            || domain.starts_with('.')
            || domain.ends_with('.')
            || domain.contains(char::is_whitespace)
        {
            return Err(EmailError::InvalidDomainPart(value.to_string()));
        }

        Ok(Self(normalized))
    }
}

impl Deref for Email {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
