use actix_web::web;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Once};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::league::orchestration::LedgerService;
use crate::league::LeagueState;
use crate::store::LedgerStore;

static INIT: Once = Once::new();

pub fn init_tracing_for_tests() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,actix_web=info,sea_orm=warn"));
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty().with_test_writer())
            .init();
    });
}

/// Fresh migrated in-memory SQLite database, one per call
pub async fn sqlite_memory_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("sqlite connect failed");
    Migrator::up(&db, None).await.expect("Migrator::up failed");
    info!("Migrated in-memory test database");
    db
}

/// Unique path in the temp dir; the file itself is not created
pub fn temp_csv_path() -> PathBuf {
    std::env::temp_dir().join(format!("bounty-ledger-{}.csv", Uuid::new_v4()))
}

/// Config with CSV storage and poster assets that do not exist
pub fn test_config() -> AppConfig {
    let vars: HashMap<&str, String> = HashMap::from([
        ("LEDGER_BACKEND", "csv".to_string()),
        ("LEDGER_CSV_PATH", temp_csv_path().display().to_string()),
        ("POSTER_FONT", "/nonexistent/poster-font.ttf".to_string()),
        ("POSTER_BACKGROUND", "/nonexistent/poster-bg.png".to_string()),
        ("LEAGUE_NAME", "Test League".to_string()),
    ]);
    AppConfig::from_lookup(|key| vars.get(key).cloned())
}

/// Shared handler state over the given store
pub fn test_state(store: Arc<dyn LedgerStore>) -> web::Data<LeagueState> {
    web::Data::new(LeagueState::new(LedgerService::new(store), test_config()))
}
