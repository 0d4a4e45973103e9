//! Roster
//!
//! Serves the person resource API over SQLite or MongoDB.

use clap::Parser;
use roster_rest::{ServerConfig, StorageBackend, create_app_with_config, init_logging};
use tracing::info;

#[cfg(feature = "sqlite")]
use roster_persistence::backends::sqlite::SqliteBackend;

/// Default SQLite database file when no URL is configured.
#[cfg(feature = "sqlite")]
const DEFAULT_SQLITE_PATH: &str = "roster.db";

/// Creates and initializes a SQLite backend from the server configuration.
#[cfg(feature = "sqlite")]
fn create_sqlite_backend(config: &ServerConfig) -> anyhow::Result<SqliteBackend> {
    let db_path = config.database_url.as_deref().unwrap_or(DEFAULT_SQLITE_PATH);
    info!(database = %db_path, "Initializing SQLite backend");

    let backend = if db_path == ":memory:" {
        SqliteBackend::in_memory()?
    } else {
        SqliteBackend::open(db_path)?
    };
    backend.init_schema()?;

    Ok(backend)
}

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        storage_backend = %config.storage_backend,
        "Starting Roster"
    );

    match config.storage_backend {
        StorageBackend::Sqlite => start_sqlite(config).await?,
        StorageBackend::MongoDb => start_mongodb(config).await?,
    }

    Ok(())
}

/// Starts the server with the SQLite backend.
#[cfg(feature = "sqlite")]
async fn start_sqlite(config: ServerConfig) -> anyhow::Result<()> {
    let backend = create_sqlite_backend(&config)?;
    let app = create_app_with_config(backend, config.clone());
    serve(app, &config).await
}

/// Fallback when sqlite feature is not enabled.
#[cfg(not(feature = "sqlite"))]
async fn start_sqlite(_config: ServerConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "The sqlite backend requires the 'sqlite' feature. \
         Build with: cargo build -p roster --features sqlite"
    )
}

/// Starts the server with the MongoDB backend.
#[cfg(feature = "mongodb")]
async fn start_mongodb(config: ServerConfig) -> anyhow::Result<()> {
    use roster_persistence::backends::mongodb::MongoBackend;

    let Some(url) = config.database_url.as_deref() else {
        anyhow::bail!("The mongodb backend requires ROSTER_DATABASE_URL (a mongodb:// URI)");
    };

    info!(database = %config.database_name, "Initializing MongoDB backend");
    let backend = MongoBackend::connect(url, &config.database_name).await?;
    backend.init_schema().await?;

    let app = create_app_with_config(backend, config.clone());
    serve(app, &config).await
}

/// Fallback when mongodb feature is not enabled.
#[cfg(not(feature = "mongodb"))]
async fn start_mongodb(_config: ServerConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "The mongodb backend requires the 'mongodb' feature. \
         Build with: cargo build -p roster --features mongodb"
    )
}

#[cfg(not(any(feature = "sqlite", feature = "mongodb")))]
compile_error!("At least one database backend feature must be enabled");
