use std::{path::PathBuf, str::FromStr, time::Duration};

use serde::Deserialize;
use serde_with::serde_as;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use strum::{Display, EnumString};

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub avatar: AvatarSettings,
    pub user_info: UserInfoSettings,
    pub mail: MailSettings,
}

#[serde_as]
#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    pub app_url: String,
    pub app_name: String,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    pub database_name: String,
    pub require_ssl: bool,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct AvatarSettings {
    pub directory: PathBuf,
    pub image_server_base_url: String,
    #[serde(default)]
    pub single_flight: bool,
    /// Seconds before a remote image fetch is abandoned. Unset means no limit.
    #[serde_as(as = "Option<serde_with::DisplayFromStr>")]
    pub fetch_timeout_secs: Option<u64>,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub cache_capacity: u64,
}

impl AvatarSettings {
    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct UserInfoSettings {
    pub base_url: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct MailSettings {
    pub relay_url: String,
    pub sender_address: String,
}

impl DatabaseSettings {
    pub fn without_db(&self) -> PgConnectOptions {
        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };

        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .ssl_mode(ssl_mode)
    }

    pub fn with_db(&self) -> PgConnectOptions {
        self.without_db().database(&self.database_name)
    }
}

pub fn read_config() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("no working directory: {e}")))?;
    let environment = Environment::from_str(
        std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .as_str(),
    )
    .map_err(|e| config::ConfigError::Message(format!("invalid APP_ENVIRONMENT: {e}")))?;

    read_config_from(base_path.join("config"), environment)
}

pub fn read_config_from(
    config_directory: PathBuf,
    environment: Environment,
) -> Result<Settings, config::ConfigError> {
    let environment_filename = format!("{}.yaml", environment);

    let settings = config::Config::builder()
        .add_source(config::File::from(config_directory.join("base.yaml")))
        .add_source(config::File::from(
            config_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("USERAPI")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[derive(Display, Debug, EnumString, PartialEq, Eq)]
pub enum Environment {
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
}
