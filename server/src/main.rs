mod config;
mod routes;
mod services;
mod state;

use config::ServerConfig;
use state::{AppState, StartupError};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = ServerConfig::from_env()?;
    let state = AppState::from_config(&config)?;
    tracing::info!(backend = ?config.backend, "backends initialized");

    if config.seed_panels {
        let seeded = services::panels::seed_defaults(state.store.as_ref()).await?;
        if !seeded.is_empty() {
            tracing::info!(count = seeded.len(), "seeded default panels");
        }
    }

    let app = match routes::leptos_app(state.clone()) {
        Ok(app) => app,
        Err(e) => {
            tracing::warn!(error = %e, "leptos frontend unavailable; serving API only");
            routes::api_app(state)
        }
    };

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(port = config.port, "fixlit listening");
    axum::serve(listener, app).await?;
    Ok(())
}
