#![deny(unsafe_code)]

use std::net::SocketAddr;

use clap::Parser;
use tracing::{error, info, warn};

use vendorhub::{
    build_app,
    cli::Cli,
    config::DEFAULT_SESSION_SECRET,
    db::connection::open_store,
    init_logging, AppError, AppResult, AppState, Config,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbosity());

    if let Err(e) = run(cli).await {
        error!(error = %e, "server stopped");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let mut config = Config::load_from(cli.config.as_deref())?;
    if let Some(addr) = cli.addr {
        config.server.addr = addr;
    }

    if config.session.secret == DEFAULT_SESSION_SECRET {
        warn!("session.secret is the built-in default; set VENDORHUB_SESSION__SECRET in production");
    }

    let addr: SocketAddr = config
        .server
        .addr
        .parse()
        .map_err(|_| AppError::ConfigError(format!("Failed to parse server address: {}", config.server.addr)))?;

    let store = open_store(&config).await?;
    let cors_origin = config.server.cors_origin.clone();
    let app = build_app(AppState::new(store, config))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to bind to address {addr}: {e}")))?;

    info!(%addr, %cors_origin, "server running");

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::InternalError(format!("Server error: {e}")))
}
