use async_trait::async_trait;

use crate::domain::AvatarError;

/// Process-wide key/value cache, injected wherever it is needed.
///
/// A `ttl_seconds` of [`NO_EXPIRY`](crate::domain::models::NO_EXPIRY) keeps the
/// entry until it is deleted.
#[async_trait]
pub trait CacheStore: Send + Sync + 'static {
    async fn get(&self, key: &str) -> Result<Option<String>, AvatarError>;

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), AvatarError>;

    async fn delete(&self, key: &str) -> Result<(), AvatarError>;
}
