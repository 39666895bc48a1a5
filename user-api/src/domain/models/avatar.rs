use super::{AvatarToken, UserId};

/// TTL value understood by cache stores as "never expires".
pub const NO_EXPIRY: u64 = 0;

/// Cache key holding the avatar token of a user: `avatar/{id}`.
pub fn avatar_cache_key(user_id: &UserId) -> String {
    format!("avatar/{}", user_id)
}

/// The avatar pointer stored on a user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAvatarRecord {
    pub user_id: UserId,
    pub token: Option<AvatarToken>,
}

impl UserAvatarRecord {
    pub fn new(user_id: UserId, token: Option<AvatarToken>) -> Self {
        Self { user_id, token }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_is_plain_decimal_id() {
        assert_eq!(avatar_cache_key(&UserId::new(42)), "avatar/42");
        assert_eq!(avatar_cache_key(&UserId::new(7)), "avatar/7");
    }
}
