use std::{sync::Arc, time::Duration};

use futures::StreamExt;
use tracing::instrument;

use crate::domain::{
    models::AvatarToken,
    ports::outbound::{BlobStore, ImageSource},
    AvatarError,
};

/// Streams an image from the [`ImageSource`] into the [`BlobStore`].
pub struct BlobFetcher<I, B> {
    source: Arc<I>,
    blobs: Arc<B>,
    timeout: Option<Duration>,
}

impl<I, B> BlobFetcher<I, B> {
    pub fn new(source: Arc<I>, blobs: Arc<B>) -> Self {
        Self {
            source,
            blobs,
            timeout: None,
        }
    }

    /// Aborts a fetch that has not completed within `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl<I: ImageSource, B: BlobStore> BlobFetcher<I, B> {
    /// Downloads `source_url` into a new blob named `token`.
    ///
    /// Returns only after the blob is fully written and closed. On failure or
    /// timeout nothing becomes addressable under `token`.
    #[instrument(name = "blob_fetcher.fetch", skip(self), fields(token = %token))]
    pub async fn fetch(&self, source_url: &str, token: &AvatarToken) -> Result<u64, AvatarError> {
        let transfer = self.transfer(source_url, token);

        let written = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, transfer)
                .await
                .map_err(|_| AvatarError::Timeout)??,
            None => transfer.await?,
        };

        tracing::debug!(bytes = written, "avatar blob written");
        Ok(written)
    }

    async fn transfer(&self, source_url: &str, token: &AvatarToken) -> Result<u64, AvatarError> {
        let mut body = self.source.fetch_stream(source_url).await?;
        let mut sink = self.blobs.open_write(token).await?;

        let mut written = 0u64;
        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            sink.write_chunk(&chunk).await?;
            written += chunk.len() as u64;
        }

        sink.finish().await?;
        Ok(written)
    }
}
