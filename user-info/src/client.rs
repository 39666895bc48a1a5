use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;

use crate::{DataResponse, UserInfo, UserInfoURL};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct UserInfoClient {
    http: reqwest::Client,
    base_url: UserInfoURL,
}

impl UserInfoClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, UserInfoFetchError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| UserInfoFetchError::Other(e.to_string()))?;

        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: UserInfoURL::new(base_url),
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        url: impl AsRef<str>,
    ) -> Result<T, UserInfoFetchError> {
        let resp = self
            .http
            .get(url.as_ref())
            .send()
            .await
            .map_err(|e| UserInfoFetchError::ResponseError(e.to_string()))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(UserInfoFetchError::NotFound);
        }

        if !resp.status().is_success() {
            return Err(UserInfoFetchError::ResponseError(format!(
                "unexpected status {}",
                resp.status()
            )));
        }

        let resp_data = resp.json::<T>().await.map_err(|e| {
            UserInfoFetchError::ParsingError(format!("Failed to parse response as JSON: {}", e))
        })?;

        Ok(resp_data)
    }

    /// Fetches the profile of the user with the given id.
    #[instrument(name = "user_info.fetch_user", skip(self))]
    pub async fn fetch_user(&self, id: i64) -> Result<UserInfo, UserInfoFetchError> {
        let url = self.base_url.append_path(&id.to_string());

        let response: DataResponse<UserInfo> = self.fetch(url).await?;
        Ok(response.data)
    }
}

#[derive(Error, Debug)]
pub enum UserInfoFetchError {
    #[error("NotFound")]
    NotFound,
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("ParsingError: {0}")]
    ParsingError(String),
    #[error("Other: {0}")]
    Other(String),
}
