use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use super::{BlobFetcher, SingleFlight};
use crate::domain::{
    models::{avatar_cache_key, AvatarToken, UserId, NO_EXPIRY},
    ports::{
        inbound::AvatarService,
        outbound::{AvatarRecordStore, BlobStore, CacheStore, ImageSource},
    },
    AvatarError,
};

type TokenResult = Result<AvatarToken, AvatarError>;

/// Cache-aside avatar resolution over three independent stores.
///
/// The cache is a durable pointer cache: once it holds a token for a user it
/// is trusted without consulting the user record. Removal is the only way an
/// entry goes away.
pub struct AvatarServiceImpl<C, R, B, I> {
    stores: AvatarStores<C, R, B, I>,
    in_flight: Option<SingleFlight<UserId, TokenResult>>,
}

struct AvatarStores<C, R, B, I> {
    cache: Arc<C>,
    records: Arc<R>,
    blobs: Arc<B>,
    fetcher: Arc<BlobFetcher<I, B>>,
    image_server_url: Arc<str>,
}

impl<C, R, B, I> Clone for AvatarStores<C, R, B, I> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            records: Arc::clone(&self.records),
            blobs: Arc::clone(&self.blobs),
            fetcher: Arc::clone(&self.fetcher),
            image_server_url: Arc::clone(&self.image_server_url),
        }
    }
}

impl<C, R, B, I> AvatarServiceImpl<C, R, B, I> {
    pub fn new(
        cache: Arc<C>,
        records: Arc<R>,
        blobs: Arc<B>,
        fetcher: BlobFetcher<I, B>,
        image_server_url: impl Into<String>,
    ) -> Self {
        let image_server_url: String = image_server_url.into();

        Self {
            stores: AvatarStores {
                cache,
                records,
                blobs,
                fetcher: Arc::new(fetcher),
                image_server_url: Arc::from(image_server_url.trim_end_matches('/')),
            },
            in_flight: None,
        }
    }

    /// With `enabled`, concurrent cache misses for one user share a single
    /// record lookup and fetch instead of each minting their own token.
    pub fn with_single_flight(mut self, enabled: bool) -> Self {
        self.in_flight = enabled.then(SingleFlight::new);
        self
    }
}

impl<C, R, B, I> AvatarStores<C, R, B, I>
where
    C: CacheStore,
    R: AvatarRecordStore,
    B: BlobStore,
    I: ImageSource,
{
    fn source_url(&self, user_id: &UserId) -> String {
        format!("{}/{}-image.jpg", self.image_server_url, user_id)
    }

    async fn cached_token(&self, user_id: &UserId) -> Result<Option<AvatarToken>, AvatarError> {
        let cached = self.cache.get(&avatar_cache_key(user_id)).await?;
        Ok(AvatarToken::from_stored(cached))
    }

    /// Miss path: consult the user record, fetch on first use, then fill the cache.
    async fn resolve_uncached(self, user_id: UserId) -> TokenResult {
        let record = self
            .records
            .find_user_avatar(&user_id)
            .await?
            .ok_or(AvatarError::USER_NOT_EXISTING)?;

        let token = match record.token {
            Some(token) => {
                debug!(%user_id, %token, "re-caching stored avatar token");
                token
            }
            None => {
                let token = AvatarToken::generate();
                let url = self.source_url(&user_id);
                info!(%user_id, %token, %url, "fetching avatar from image server");

                self.fetcher.fetch(&url, &token).await?;
                self.records
                    .update_avatar_token(&user_id, Some(&token))
                    .await?;
                token
            }
        };

        self.cache
            .set(&avatar_cache_key(&user_id), token.as_str(), NO_EXPIRY)
            .await?;

        Ok(token)
    }
}

#[async_trait]
impl<C, R, B, I> AvatarService for AvatarServiceImpl<C, R, B, I>
where
    C: CacheStore,
    R: AvatarRecordStore,
    B: BlobStore,
    I: ImageSource,
{
    #[instrument(name = "avatar.resolve", skip(self))]
    async fn resolve_avatar(&self, user_id: &UserId) -> Result<Vec<u8>, AvatarError> {
        let token = match self.stores.cached_token(user_id).await? {
            Some(token) => {
                debug!(%token, "avatar cache hit");
                token
            }
            None => {
                debug!("avatar cache miss");
                let miss = self.stores.clone().resolve_uncached(*user_id);
                match &self.in_flight {
                    Some(in_flight) => in_flight.run(*user_id, miss).await?,
                    None => miss.await?,
                }
            }
        };

        self.stores.blobs.read_all(&token).await
    }

    #[instrument(name = "avatar.remove", skip(self))]
    async fn remove_avatar(&self, user_id: &UserId) -> Result<bool, AvatarError> {
        let token = match self.stores.cached_token(user_id).await? {
            Some(token) => token,
            None => self
                .stores
                .records
                .find_user_avatar(user_id)
                .await?
                .ok_or(AvatarError::USER_NOT_EXISTING)?
                .token
                .ok_or(AvatarError::EMPTY_AVATAR)?,
        };

        let cache_key = avatar_cache_key(user_id);
        let (record, cache, blob) = tokio::join!(
            self.stores.records.update_avatar_token(user_id, None),
            self.stores.cache.delete(&cache_key),
            self.stores.blobs.delete(&token),
        );

        for (store, result) in [("record", &record), ("cache", &cache), ("blob", &blob)] {
            if let Err(err) = result {
                warn!(%token, store, error = %err, "avatar removal failed for one store");
            }
        }

        record?;
        cache?;
        blob?;

        info!(%token, "avatar removed");
        Ok(true)
    }
}
