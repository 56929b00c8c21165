use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use common::database::{health_check, init_pool};
use users::{
    AppState,
    config::{AppConfig, Cli},
    repositories::{UserController, UserRepository},
    routes, server,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    info!("Starting users service");

    let config = AppConfig::load(&cli).context("failed to load configuration")?;

    // Initialize database connection pool
    let pool = init_pool(&config.database).await?;

    // Check database connectivity
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    let user_repository = UserRepository::new(pool);

    if config.migrate {
        user_repository
            .migrate()
            .await
            .context("users table migration error")?;
        info!("Users table migration complete");
    }

    let app = routes::create_router(AppState::new(Arc::new(user_repository)));

    server::serve(app, &config.server).await
}
