use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

use crate::domain::AvatarError;

pub type ByteStream = BoxStream<'static, Result<Bytes, AvatarError>>;

/// Remote origin of avatar images.
#[async_trait]
pub trait ImageSource: Send + Sync + 'static {
    /// Starts a GET for `url` and yields the response body as it arrives.
    async fn fetch_stream(&self, url: &str) -> Result<ByteStream, AvatarError>;
}
