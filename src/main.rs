mod config;
mod feeds;
mod routes;
mod state;

use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env()?;

    // Missing feeds are non-fatal: the editor starts with empty panels.
    let catalog = feeds::load_catalog(&config.catalog_path).await;
    let backgrounds = feeds::load_backgrounds(&config.backgrounds_path).await;
    let state = state::AppState::new(catalog, backgrounds);

    let app = routes::app(state, &config.public_dir);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    tracing::info!(port = config.port, public_dir = %config.public_dir.display(), "roomboard listening");
    axum::serve(listener, app).await?;
    Ok(())
}
