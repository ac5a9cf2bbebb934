use anyhow::Context;
use migration::Migrator;
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use std::env;
use std::sync::{Arc, OnceLock};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::StorageBackend;
use crate::store::{CsvFileStore, DatabaseStore, LedgerStore};

static DOTENV_INIT: OnceLock<()> = OnceLock::new();
static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Load environment variables from .env file exactly once
pub fn load_dotenv() {
    DOTENV_INIT.get_or_init(|| {
        dotenv::dotenv().ok();
    });
}

/// Initialize tracing exactly once
pub fn init_tracing() {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,actix_web=info,sea_orm=info"));

        let is_production =
            env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string()) == "production";

        if is_production {
            // JSON formatter for production
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        } else {
            // Pretty formatter for development
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    });
}

/// Connect to the database and bring the schema up to date
pub async fn connect_and_migrate(database_url: &str) -> anyhow::Result<DatabaseConnection> {
    info!("Database URL: {}", redact_db_url(database_url));

    let db: DatabaseConnection = Database::connect(database_url)
        .await
        .context("Failed to connect to database")?;

    info!("Connected to database successfully!");

    Migrator::up(&db, None)
        .await
        .context("Failed to run migrations")?;

    info!("Database migrations completed successfully!");

    Ok(db)
}

/// Build the ledger store selected by configuration
pub async fn build_store(storage: &StorageBackend) -> anyhow::Result<Arc<dyn LedgerStore>> {
    let store: Arc<dyn LedgerStore> = match storage {
        StorageBackend::Database { url } => {
            Arc::new(DatabaseStore::new(connect_and_migrate(url).await?))
        }
        StorageBackend::CsvFile { path } => Arc::new(CsvFileStore::new(path.clone())),
    };
    info!("Ledger store: {}", store.describe());
    Ok(store)
}

/// Helper to log a DB URL without credentials.
pub fn redact_db_url(url: &str) -> String {
    if let Some(at_pos) = url.rfind('@') {
        if let Some(colon_pos) = url[..at_pos].rfind(':') {
            if url[..colon_pos].contains("//") {
                let mut s = String::with_capacity(url.len());
                s.push_str(&url[..(colon_pos + 1)]);
                s.push_str("***");
                s.push_str(&url[at_pos..]);
                return s;
            }
        }
    }
    url.to_string()
}
