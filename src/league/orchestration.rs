//! League orchestration module
//!
//! Store-coupled operations on the ledger. Every mutation is one unit of
//! work under the service's write lock: load the ledger, change it, save
//! it. Nothing is kept in memory between requests, so a failed save leaves
//! nothing applied.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::error::AppError;
use crate::league::ledger::{Ledger, PlayerRecord};
use crate::league::ranking::{self, RankedRecord};
use crate::league::rules::GameVariant;
use crate::league::scoring::{self, ResultShape, ScoreDeltas};
use crate::store::LedgerStore;

/// One game result as entered by the operator
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSubmission {
    pub variant: GameVariant,
    pub shape: ResultShape,
    pub rebuys: String,
}

impl ResultSubmission {
    pub fn deltas(&self) -> ScoreDeltas {
        scoring::translate(self.variant, &self.shape.entries(), &self.rebuys)
    }
}

pub struct LedgerService {
    store: Arc<dyn LedgerStore>,
    write_lock: Mutex<()>,
}

impl LedgerService {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn ledger(&self) -> Result<Ledger, AppError> {
        Ok(self.store.load().await?)
    }

    /// Top of the ranking, as presented on the board and poster
    pub async fn leaderboard(&self) -> Result<Vec<RankedRecord>, AppError> {
        Ok(ranking::leaderboard(&self.ledger().await?))
    }

    /// Full ranking, for export
    pub async fn standings(&self) -> Result<Vec<RankedRecord>, AppError> {
        Ok(ranking::standings(&self.ledger().await?))
    }

    /// Apply a game result and persist it; returns the applied deltas
    pub async fn submit(&self, submission: &ResultSubmission) -> Result<ScoreDeltas, AppError> {
        let deltas = submission.deltas();
        if deltas.is_empty() {
            warn!(variant = %submission.variant, "Ignoring empty result submission");
            return Err(AppError::EmptySubmission);
        }

        let _guard = self.write_lock.lock().await;
        let mut ledger = self.store.load().await?;
        ledger.apply(&deltas);
        self.store.save(&ledger).await?;

        info!(
            variant = %submission.variant,
            players = deltas.len(),
            points = deltas.total(),
            store = %self.store.describe(),
            "Applied game result"
        );
        Ok(deltas)
    }

    /// Admin deletion; returns how many records were removed
    pub async fn delete_players(&self, names: &[String]) -> Result<usize, AppError> {
        let names: Vec<&str> = names
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .collect();
        if names.is_empty() {
            return Ok(0);
        }

        let _guard = self.write_lock.lock().await;
        let mut ledger = self.store.load().await?;
        let removed = ledger.remove(&names);
        if removed > 0 {
            self.store.save(&ledger).await?;
        }

        info!(requested = names.len(), removed, "Deleted players");
        Ok(removed)
    }

    /// Direct ledger edit: replace every record
    pub async fn replace(&self, records: Vec<PlayerRecord>) -> Result<Ledger, AppError> {
        let ledger = Ledger::from_records(records);

        let _guard = self.write_lock.lock().await;
        self.store.save(&ledger).await?;

        info!(players = ledger.len(), "Replaced ledger");
        Ok(ledger)
    }
}
