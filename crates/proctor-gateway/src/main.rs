use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

mod app;
mod http;

/// Exam-time resolution gateway.
#[derive(Parser, Debug)]
#[command(name = "proctor-gateway", version)]
struct Args {
    /// Path to proctor.toml (default: ~/.proctor/proctor.toml).
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "proctor_gateway=info,tower_http=debug".into()),
        )
        .init();

    // load config: explicit flag > PROCTOR_CONFIG env > ~/.proctor/proctor.toml
    let args = Args::parse();
    let config_path = args.config.or_else(|| std::env::var("PROCTOR_CONFIG").ok());
    let config =
        proctor_core::ProctorConfig::load(config_path.as_deref()).unwrap_or_else(|e| {
            tracing::warn!("Config load failed ({}), using defaults", e);
            proctor_core::ProctorConfig::default()
        });

    let bind = config.gateway.bind.clone();
    let port = config.gateway.port;

    // initialize the SQLite database
    let db_path = &config.database.path;
    ensure_parent_dir(db_path);
    info!(path = %db_path, "opening SQLite database");

    let db = rusqlite::Connection::open(db_path)?;
    db.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;

    // run schema migrations (idempotent)
    proctor_catalog::db::init_db(&db)?;
    info!("database migrations complete");

    // the store gets its own connection; foreign_keys is per-connection
    let catalog_conn = rusqlite::Connection::open(db_path)?;
    catalog_conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    let catalog = proctor_catalog::CatalogStore::new(catalog_conn);

    // assemble the lookup table: built-in finals grid + operator entries
    let schedule = proctor_lookup::ScheduleTable::builtin().with_entries(
        config
            .lookup
            .entries
            .iter()
            .map(|e| (e.class_time.clone(), e.exam_time.clone())),
    );
    info!(entries = schedule.len(), "exam lookup table ready");

    let state = Arc::new(app::AppState::new(config, schedule, catalog));
    let router = app::build_router(state);

    let addr: SocketAddr = format!("{}:{}", bind, port).parse()?;
    info!("Proctor gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

/// Ensure the parent directory for a file path exists.
fn ensure_parent_dir(path: &str) {
    if let Some(parent) = std::path::Path::new(path).parent() {
        let _ = std::fs::create_dir_all(parent);
    }
}
