use std::time::Duration;

use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};

use crate::domain::{
    ports::outbound::{ByteStream, ImageSource},
    AvatarError,
};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches avatar images over plain HTTP GET, streaming the body.
#[derive(Clone)]
pub struct HttpImageSource {
    client: reqwest::Client,
}

impl HttpImageSource {
    pub fn new() -> Result<Self, AvatarError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(AvatarError::io)?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageSource for HttpImageSource {
    async fn fetch_stream(&self, url: &str) -> Result<ByteStream, AvatarError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| {
                tracing::warn!("Image fetch from {} failed: {}", url, e);
                AvatarError::io(e)
            })?;

        Ok(response.bytes_stream().map_err(AvatarError::io).boxed())
    }
}
