use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated user identifier.
///
/// Wraps i32 to match the database SERIAL type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for UserId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl From<UserId> for i32 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

/// Opaque handle addressing a stored avatar blob.
///
/// The same value is used as the cache entry, the `users.avatar` column and
/// the file stem in the avatar directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AvatarToken(String);

impl AvatarToken {
    /// Number of random bytes behind a freshly minted token.
    pub const ENTROPY_BYTES: usize = 32;

    /// Mints a new token: lowercase hex of 32 bytes from the thread-local CSPRNG.
    pub fn generate() -> Self {
        let bytes: [u8; Self::ENTROPY_BYTES] = rand::random();
        Self(hex::encode(bytes))
    }

    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Interprets a persisted value; empty strings count as "no avatar".
    pub fn from_stored(value: Option<String>) -> Option<Self> {
        value.filter(|token| !token.is_empty()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AvatarToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for AvatarToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<AvatarToken> for String {
    fn from(token: AvatarToken) -> Self {
        token.0
    }
}
