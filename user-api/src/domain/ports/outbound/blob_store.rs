use async_trait::async_trait;

use crate::domain::{models::AvatarToken, AvatarError};

/// Write side of a blob being stored.
///
/// Dropping a sink without calling [`BlobSink::finish`] abandons the write;
/// the blob must not become readable under its token.
#[async_trait]
pub trait BlobSink: Send {
    async fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), AvatarError>;

    /// Flushes and closes the blob. Only after this returns is the blob addressable.
    async fn finish(self: Box<Self>) -> Result<(), AvatarError>;
}

/// Storage for avatar images, addressed by token.
#[async_trait]
pub trait BlobStore: Send + Sync + 'static {
    async fn open_write(&self, token: &AvatarToken) -> Result<Box<dyn BlobSink>, AvatarError>;

    async fn read_all(&self, token: &AvatarToken) -> Result<Vec<u8>, AvatarError>;

    async fn delete(&self, token: &AvatarToken) -> Result<(), AvatarError>;
}
