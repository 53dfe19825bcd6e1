use adobo_bacon::config::Settings;
use adobo_bacon::routes::{app, AppState};
use adobo_bacon::seed;
use adobo_bacon::sessions::SessionStore;
use adobo_bacon::storage::RecipeStorage;
use adobo_bacon::user_storage::UserStorage;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("adobo_bacon=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;

    let recipes =
        RecipeStorage::open(settings.recipes_path()).context("failed to open recipe store")?;
    let users = UserStorage::open(settings.users_path()).context("failed to open user store")?;

    let state = Arc::new(AppState {
        recipes,
        users,
        sessions: SessionStore::new(),
        seeds: seed::default_recipes(),
    });

    let addr = format!("0.0.0.0:{}", settings.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, "recipe server started successfully");

    axum::serve(listener, app(state))
        .await
        .context("server error")?;

    Ok(())
}
