use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::{sync::Cache, Expiry};

use crate::domain::{models::NO_EXPIRY, ports::outbound::CacheStore, AvatarError};

#[derive(Debug, Clone)]
struct CachedValue {
    value: String,
    ttl: Option<Duration>,
}

/// Expires each entry after its own TTL; `None` never expires.
struct PerEntryTtl;

impl Expiry<String, CachedValue> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        value.ttl
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedValue,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        value.ttl
    }
}

/// In-process cache store.
///
/// Entries can still be evicted once `max_capacity` is reached; callers treat
/// an evicted entry like any other miss.
#[derive(Clone)]
pub struct MokaCacheStore {
    cache: Cache<String, CachedValue>,
}

impl MokaCacheStore {
    pub fn new(max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryTtl)
            .build();

        Self { cache }
    }
}

#[async_trait]
impl CacheStore for MokaCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AvatarError> {
        Ok(self.cache.get(key).map(|cached| cached.value))
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), AvatarError> {
        let ttl = (ttl_seconds != NO_EXPIRY).then(|| Duration::from_secs(ttl_seconds));
        self.cache.insert(
            key.to_string(),
            CachedValue {
                value: value.to_string(),
                ttl,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), AvatarError> {
        self.cache.invalidate(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_delete() {
        let store = MokaCacheStore::new(100);

        assert_eq!(store.get("avatar/1").await.unwrap(), None);

        store.set("avatar/1", "abc", NO_EXPIRY).await.unwrap();
        assert_eq!(store.get("avatar/1").await.unwrap().as_deref(), Some("abc"));

        store.delete("avatar/1").await.unwrap();
        assert_eq!(store.get("avatar/1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_overwrites_previous_value() {
        let store = MokaCacheStore::new(100);

        store.set("avatar/1", "abc", NO_EXPIRY).await.unwrap();
        store.set("avatar/1", "def", NO_EXPIRY).await.unwrap();

        assert_eq!(store.get("avatar/1").await.unwrap().as_deref(), Some("def"));
    }

    #[tokio::test]
    async fn positive_ttl_expires_while_zero_ttl_stays() {
        let store = MokaCacheStore::new(100);

        store.set("short", "a", 1).await.unwrap();
        store.set("durable", "b", NO_EXPIRY).await.unwrap();

        tokio::time::sleep(Duration::from_millis(1_200)).await;

        assert_eq!(store.get("short").await.unwrap(), None);
        assert_eq!(store.get("durable").await.unwrap().as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn deleting_missing_key_is_ok() {
        let store = MokaCacheStore::new(100);
        assert!(store.delete("avatar/404").await.is_ok());
    }
}
