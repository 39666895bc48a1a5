//! Composition root: the only place that knows the concrete outbound adapters.

use std::sync::Arc;

use sqlx::PgPool;
use user_info::{UserInfoClient, UserInfoFetchError};

use crate::{
    adapters::outbound::{
        filesystem::FsBlobStore,
        http::{HttpImageSource, HttpMailer},
        moka::MokaCacheStore,
        postgres::PostgresUserRepository,
        user_info::UserInfoAdapter,
    },
    app_state::AppState,
    config::Settings,
    domain::{
        services::{AvatarServiceImpl, BlobFetcher, UserServiceImpl},
        AvatarError,
    },
};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("avatar storage: {0}")]
    Avatar(#[from] AvatarError),
    #[error("user info client: {0}")]
    UserInfo(#[from] UserInfoFetchError),
}

/// Wires every adapter and service from the settings into an [`AppState`].
pub async fn build_app_state(pool: PgPool, settings: &Settings) -> Result<AppState, StartupError> {
    let repository = Arc::new(PostgresUserRepository::new(pool));

    let blobs = Arc::new(FsBlobStore::new(&settings.avatar.directory));
    blobs.initialize().await?;

    let fetcher = BlobFetcher::new(Arc::new(HttpImageSource::new()?), Arc::clone(&blobs))
        .with_timeout(settings.avatar.fetch_timeout());
    let avatar_service = AvatarServiceImpl::new(
        Arc::new(MokaCacheStore::new(settings.avatar.cache_capacity)),
        Arc::clone(&repository),
        blobs,
        fetcher,
        settings.avatar.image_server_base_url.clone(),
    )
    .with_single_flight(settings.avatar.single_flight);

    let user_info = UserInfoAdapter::new(UserInfoClient::new(settings.user_info.base_url.clone())?);
    let user_service = UserServiceImpl::new(
        repository,
        Arc::new(HttpMailer::new(settings.mail.relay_url.clone())),
        Arc::new(user_info),
        settings.application.app_name.clone(),
        settings.mail.sender_address.clone(),
    );

    tracing::info!(
        single_flight = settings.avatar.single_flight,
        directory = %settings.avatar.directory.display(),
        "avatar service ready"
    );

    Ok(AppState::new(Arc::new(avatar_service), Arc::new(user_service)))
}
