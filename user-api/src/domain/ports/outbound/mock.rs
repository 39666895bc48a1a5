//! In-memory port implementations for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use time::OffsetDateTime;
use tokio::sync::Barrier;

use super::{
    AvatarRecordStore, BlobSink, BlobStore, ByteStream, CacheStore, ImageSource, Mailer,
    UserInfoProvider, UserRepository,
};
use crate::domain::{
    models::{
        AvatarToken, MailReceipt, NewUser, OutgoingMail, User, UserAvatarRecord, UserDetail,
        UserId,
    },
    AvatarError, MailError, UserError,
};

/// Cache backed by a HashMap, remembering the TTL of every entry.
#[derive(Clone, Default)]
pub struct MockCacheStore {
    entries: Arc<RwLock<HashMap<String, (String, u64)>>>,
    get_calls: Arc<AtomicUsize>,
    set_calls: Arc<AtomicUsize>,
    delete_calls: Arc<AtomicUsize>,
    fail_sets: bool,
}

#[allow(dead_code)]
impl MockCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `set` fails with a storage error.
    pub fn failing_sets(mut self) -> Self {
        self.fail_sets = true;
        self
    }

    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .write()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), 0));
        self
    }

    pub fn entry(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap()
            .get(key)
            .map(|(value, _)| value.clone())
    }

    pub fn ttl_of(&self, key: &str) -> Option<u64> {
        self.entries.read().unwrap().get(key).map(|(_, ttl)| *ttl)
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn set_calls(&self) -> usize {
        self.set_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheStore for MockCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AvatarError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.entry(key))
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), AvatarError> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_sets {
            return Err(AvatarError::storage("cache unavailable"));
        }

        self.entries
            .write()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), ttl_seconds));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), AvatarError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.entries.write().unwrap().remove(key);
        Ok(())
    }
}

/// User records reduced to their avatar column.
#[derive(Clone, Default)]
pub struct MockAvatarRecordStore {
    users: Arc<RwLock<HashMap<UserId, Option<AvatarToken>>>>,
    find_calls: Arc<AtomicUsize>,
    update_calls: Arc<AtomicUsize>,
    fail_updates: bool,
}

#[allow(dead_code)]
impl MockAvatarRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, id: i32, token: Option<&str>) -> Self {
        self.users
            .write()
            .unwrap()
            .insert(UserId::new(id), token.map(AvatarToken::new));
        self
    }

    /// Every `update_avatar_token` call fails without touching the record.
    pub fn failing_updates(mut self) -> Self {
        self.fail_updates = true;
        self
    }

    pub fn token_of(&self, id: i32) -> Option<AvatarToken> {
        self.users
            .read()
            .unwrap()
            .get(&UserId::new(id))
            .cloned()
            .flatten()
    }

    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AvatarRecordStore for MockAvatarRecordStore {
    async fn find_user_avatar(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserAvatarRecord>, AvatarError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .users
            .read()
            .unwrap()
            .get(user_id)
            .map(|token| UserAvatarRecord::new(*user_id, token.clone())))
    }

    async fn update_avatar_token(
        &self,
        user_id: &UserId,
        token: Option<&AvatarToken>,
    ) -> Result<(), AvatarError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_updates {
            return Err(AvatarError::storage("record store unavailable"));
        }

        let mut users = self.users.write().unwrap();
        match users.get_mut(user_id) {
            Some(current) => {
                *current = token.cloned();
                Ok(())
            }
            None => Err(AvatarError::USER_NOT_EXISTING),
        }
    }
}

/// Blob store keeping finished blobs in memory.
#[derive(Clone, Default)]
pub struct MockBlobStore {
    blobs: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    read_calls: Arc<AtomicUsize>,
    open_calls: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(self, token: &str, bytes: &[u8]) -> Self {
        self.blobs
            .write()
            .unwrap()
            .insert(token.to_string(), bytes.to_vec());
        self
    }

    pub fn contains(&self, token: &str) -> bool {
        self.blobs.read().unwrap().contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.blobs.read().unwrap().len()
    }

    pub fn read_calls(&self) -> usize {
        self.read_calls.load(Ordering::SeqCst)
    }

    pub fn open_calls(&self) -> usize {
        self.open_calls.load(Ordering::SeqCst)
    }
}

struct MockBlobSink {
    token: String,
    buffer: Vec<u8>,
    blobs: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

#[async_trait]
impl BlobSink for MockBlobSink {
    async fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), AvatarError> {
        self.buffer.extend_from_slice(chunk);
        Ok(())
    }

    async fn finish(self: Box<Self>) -> Result<(), AvatarError> {
        let MockBlobSink {
            token,
            buffer,
            blobs,
        } = *self;
        blobs.write().unwrap().insert(token, buffer);
        Ok(())
    }
}

#[async_trait]
impl BlobStore for MockBlobStore {
    async fn open_write(&self, token: &AvatarToken) -> Result<Box<dyn BlobSink>, AvatarError> {
        self.open_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockBlobSink {
            token: token.to_string(),
            buffer: Vec::new(),
            blobs: Arc::clone(&self.blobs),
        }))
    }

    async fn read_all(&self, token: &AvatarToken) -> Result<Vec<u8>, AvatarError> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        self.blobs
            .read()
            .unwrap()
            .get(token.as_str())
            .cloned()
            .ok_or_else(|| AvatarError::io(format!("no blob {token}")))
    }

    async fn delete(&self, token: &AvatarToken) -> Result<(), AvatarError> {
        self.blobs
            .write()
            .unwrap()
            .remove(token.as_str())
            .map(|_| ())
            .ok_or_else(|| AvatarError::io(format!("no blob {token}")))
    }
}

/// Image source serving a fixed body in a few chunks.
#[derive(Clone)]
pub struct MockImageSource {
    body: Bytes,
    requested: Arc<Mutex<Vec<String>>>,
    delay: Option<Duration>,
    fail_mid_stream: bool,
    rendezvous: Option<Arc<Barrier>>,
}

#[allow(dead_code)]
impl MockImageSource {
    pub fn serving(body: &'static [u8]) -> Self {
        Self {
            body: Bytes::from_static(body),
            requested: Arc::default(),
            delay: None,
            fail_mid_stream: false,
            rendezvous: None,
        }
    }

    /// Waits this long before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Yields the first chunk, then an error.
    pub fn failing_mid_stream(mut self) -> Self {
        self.fail_mid_stream = true;
        self
    }

    /// Holds every request until `parties` requests are in flight at once.
    pub fn with_rendezvous(mut self, parties: usize) -> Self {
        self.rendezvous = Some(Arc::new(Barrier::new(parties)));
        self
    }

    pub fn calls(&self) -> usize {
        self.requested.lock().unwrap().len()
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageSource for MockImageSource {
    async fn fetch_stream(&self, url: &str) -> Result<ByteStream, AvatarError> {
        self.requested.lock().unwrap().push(url.to_string());

        if let Some(barrier) = &self.rendezvous {
            barrier.wait().await;
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let mid = self.body.len() / 2;
        let first = self.body.slice(..mid);
        let second = self.body.slice(mid..);

        let chunks = if self.fail_mid_stream {
            vec![Ok(first), Err(AvatarError::io("connection reset"))]
        } else {
            vec![Ok(first), Ok(second)]
        };

        Ok(futures::stream::iter(chunks).boxed())
    }
}

#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

#[allow(dead_code)]
impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.read().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn create_user(&self, user: &NewUser) -> Result<User, UserError> {
        let mut users = self.users.write().unwrap();
        if users.iter().any(|u| u.email == user.email.as_ref()) {
            return Err(UserError::EmailTaken);
        }

        let now = OffsetDateTime::now_utc();
        let created = User {
            id: UserId::new(users.len() as i32 + 1),
            email: user.email.to_string(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            avatar: None,
            created_at: now,
            modified_at: now,
        };
        users.push(created.clone());
        Ok(created)
    }
}

/// Mailer recording every mail; rejects recipients listed in `rejecting`.
#[derive(Clone, Default)]
pub struct MockMailer {
    sent: Arc<Mutex<Vec<OutgoingMail>>>,
    rejecting: Vec<String>,
}

#[allow(dead_code)]
impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(mut self, recipient: &str) -> Self {
        self.rejecting.push(recipient.to_string());
        self
    }

    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<MailReceipt, MailError> {
        self.sent.lock().unwrap().push(mail.clone());

        if self.rejecting.contains(&mail.to) {
            Ok(MailReceipt {
                accepted: vec![],
                rejected: vec![mail.to.clone()],
            })
        } else {
            Ok(MailReceipt {
                accepted: vec![mail.to.clone()],
                rejected: vec![],
            })
        }
    }
}

#[derive(Clone, Default)]
pub struct MockUserInfoProvider {
    users: Arc<RwLock<HashMap<UserId, UserDetail>>>,
}

#[allow(dead_code)]
impl MockUserInfoProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, detail: UserDetail) -> Self {
        self.users
            .write()
            .unwrap()
            .insert(UserId::new(detail.id as i32), detail);
        self
    }
}

#[async_trait]
impl UserInfoProvider for MockUserInfoProvider {
    async fn user_detail(&self, user_id: &UserId) -> Result<UserDetail, UserError> {
        self.users
            .read()
            .unwrap()
            .get(user_id)
            .cloned()
            .ok_or(UserError::NotFound)
    }
}
