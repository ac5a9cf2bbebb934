//! Ledger persistence
//!
//! The ledger is loaded and saved as a whole through [`LedgerStore`]. Two
//! backends exist: a SQL table through SeaORM and a flat CSV file.

pub mod csv_file;
pub mod database;

use async_trait::async_trait;
use thiserror::Error;

use crate::league::ledger::Ledger;

pub use csv_file::CsvFileStore;
pub use database::DatabaseStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
    #[error("ledger file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("ledger file is not valid CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("ledger file {path} has no '{column}' column")]
    MissingColumn { path: String, column: &'static str },
}

/// Load/save boundary for the ledger
///
/// An empty store loads as an empty ledger, never an error.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn load(&self) -> Result<Ledger, StoreError>;

    async fn save(&self, ledger: &Ledger) -> Result<(), StoreError>;

    /// Short label for logs
    fn describe(&self) -> String;
}
