use std::net::SocketAddr;

use tracing::{Level, info};

use cms_server::config::AppConfig;
use cms_server::database;
use cms_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    let level = if config.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let db = database::init_db(&config.database.url()).await?;
    let state = AppState { db, config };
    let app = cms_server::build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], 8000));
    info!("CMS server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
