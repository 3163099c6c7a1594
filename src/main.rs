mod config;
mod routes;
mod state;
mod vision;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("glint_backend=debug,tower_http=debug")
        .init();

    let config = Config::from_env()?;

    if config.groq_api_key.is_none() {
        info!("GROQ_API_KEY is not set; /view requests will fail until it is");
    }

    let app_state = AppState::new(&config);
    let app = routes::create_router(app_state).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Glint API running on port {}", config.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
