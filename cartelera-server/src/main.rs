//! # Cartelera Server
//!
//! Small HTTP service exposing CRUD operations over a movie catalog
//! persisted as a single JSON document on local disk.
//!
//! ## Architecture
//!
//! The server is built on Axum and uses:
//! - A whole-file JSON snapshot store (`cartelera-core`) for persistence
//! - A closed-set validation layer (`cartelera-model`) for movie payloads
//! - Layered configuration: defaults, TOML file, environment, CLI flags

use std::path::PathBuf;

use anyhow::Context;
use axum::http::HeaderValue;
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cartelera_core::CatalogStore;
use cartelera_server::infra::config::{Config, EnvConfig};
use cartelera_server::{AppState, create_app};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "cartelera-server")]
#[command(about = "Movie catalog HTTP service backed by a JSON file")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, env = "CARTELERA_CONFIG")]
    config: Option<PathBuf>,

    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,

    /// Path of the JSON catalog file (overrides config)
    #[arg(long, env = "DATABASE_FILE")]
    data_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Quiet HTTP noise by default. Override via RUST_LOG.
                    "info,tower_http=warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let file_config = match cli.config.as_deref() {
        Some(path) => Some(Config::load_file(path)?),
        None => None,
    };
    let mut config = Config::resolve(file_config, EnvConfig::gather());
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(path) = cli.data_file {
        config.database.file = path;
    }

    let catalog = CatalogStore::open(&config.database.file).with_context(
        || {
            format!(
                "failed to open catalog at {}",
                config.database.file.display()
            )
        },
    )?;
    info!(
        path = %config.database.file.display(),
        movies = catalog.total(),
        "catalog loaded"
    );

    let state = AppState::new(catalog, config.clone());

    let cors_layer = build_cors_layer(&config.cors.allowed_origins);
    let app = create_app(state)
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http());

    let listener =
        TcpListener::bind((config.server.host.as_str(), config.server.port))
            .await
            .with_context(|| {
                format!(
                    "failed to bind {}:{}",
                    config.server.host, config.server.port
                )
            })?;
    info!(
        "starting Cartelera server on {}:{}",
        config.server.host, config.server.port
    );
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the CORS layer (permissive for `*`, allow-list otherwise).
fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new().allow_origin(allow_origin)
}
