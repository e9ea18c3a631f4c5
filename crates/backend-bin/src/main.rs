use clap::Parser;
use signet_backend_lib::{config::Settings, router, store::MemoryStore, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "signet", about = "Credential issuance service")]
struct Args {
    /// Path to the configuration file
    #[arg(long, default_value = "signet.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize configuration first so the configured log level applies
    let settings = Settings::load_from(&args.config).or_else(|_| {
        eprintln!("trying to load config from config/default.toml");
        Settings::load_from("config/default.toml")
    })?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.log_level.clone())),
        )
        .init();

    // Create the store and application state. An empty signing secret
    // fails here, before the listener is bound.
    let store = MemoryStore::new();
    let state = Arc::new(AppState::new(store, settings)?);

    // Create the router
    let app = router::create_router(state.clone());

    // Start the server
    let addr = state.settings.bind_addr;
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
