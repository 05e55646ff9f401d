//! Periscope server
//!
//! Serves the preview shell page for a sandbox session and carries the
//! collaborator hooks that publish refresh and file-change signals to
//! every view of that session.

mod routes;
mod state;
mod views;

use periscope_core::Config;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    periscope_core::init_logging();

    let config = Config::default();
    let bind_addr = config.bind_addr.clone();

    let state = AppState::new(config);
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Periscope server started");

    axum::serve(listener, app).await?;

    Ok(())
}
