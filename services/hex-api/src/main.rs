//! Hexmap API service.
//!
//! HTTP surface for the hex-grid geometry engine: hex-shaped PNG cutouts,
//! grid-context views, and coordinate resolution over registered images.

mod handlers;
mod state;

use anyhow::Result;
use axum::{extract::Extension, routing::get, Router};
use clap::Parser;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use state::AppState;

#[derive(Parser, Debug)]
#[command(name = "hex-api")]
#[command(about = "Hex grid region extraction API server")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8080")]
    listen: String,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Directory holding uploaded images and manifest.json
    #[arg(long, default_value = "./images", env = "HEX_IMAGES_DIR")]
    images_dir: String,

    /// Number of tokio worker threads (default: number of CPU cores)
    #[arg(long)]
    worker_threads: Option<usize>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(async_main(args))?;
    Ok(())
}

async fn async_main(args: Args) -> Result<()> {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting hexmap API server");

    let state = Arc::new(AppState::new(&args.images_dir)?);
    let app = router(state);

    let addr: SocketAddr = args.listen.parse()?;
    info!(address = %addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the service router. Separate from `async_main` so tests can drive
/// it without binding a socket.
fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/hex-region/:image_id/:q/:r",
            get(handlers::hex_region_handler),
        )
        .route(
            "/api/hex-grid-view/:image_id/:q/:r",
            get(handlers::grid_view_handler),
        )
        .route(
            "/api/grid-dimensions/:image_id",
            get(handlers::grid_dimensions_handler),
        )
        .route("/api/locate/:image_id", get(handlers::locate_handler))
        .route("/health", get(handlers::health_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
