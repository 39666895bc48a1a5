use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::config::read_config;

mod adapters;
mod app_state;
mod config;
mod domain;
mod factory;
mod router;
mod routes;

#[derive(Debug, thiserror::Error)]
enum BootError {
    #[error("configuration: {0}")]
    Config(#[from] ::config::ConfigError),
    #[error("migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error(transparent)]
    Startup(#[from] factory::StartupError),
    #[error("server: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), BootError> {
    dotenvy::dotenv().ok();

    let timer = tracing_subscriber::fmt::time::LocalTime::rfc_3339();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("user_api=info,tower_http=info")),
        )
        .with_timer(timer)
        .init();

    let config = read_config()?;

    let connection_pool = PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect_lazy_with(config.database.with_db());
    sqlx::migrate!("./migrations").run(&connection_pool).await?;
    tracing::info!("database migrations applied");

    let app_state = factory::build_app_state(connection_pool, &config).await?;
    let app = router::create(app_state, &config.application.app_url);

    let addr = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
