//! SeaORM-backed ledger store
//!
//! One row per player in the `players` table. Saves run in a single
//! transaction: existing rows are updated, new names inserted and rows for
//! names no longer in the ledger deleted.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use std::collections::{HashMap, HashSet};
use tracing::debug;
use uuid::Uuid;

use super::{LedgerStore, StoreError};
use crate::entity::players;
use crate::league::ledger::{Ledger, PlayerRecord};

#[derive(Clone)]
pub struct DatabaseStore {
    db: DatabaseConnection,
}

impl DatabaseStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LedgerStore for DatabaseStore {
    async fn load(&self) -> Result<Ledger, StoreError> {
        let rows = players::Entity::find()
            .order_by_asc(players::Column::CreatedAt)
            .order_by_asc(players::Column::Name)
            .all(&self.db)
            .await?;

        Ok(Ledger::from_records(
            rows.into_iter()
                .map(|row| PlayerRecord::new(row.name, row.score)),
        ))
    }

    async fn save(&self, ledger: &Ledger) -> Result<(), StoreError> {
        let txn = self.db.begin().await?;
        let now: DateTime<FixedOffset> = Utc::now().into();

        let existing: HashMap<String, players::Model> = players::Entity::find()
            .all(&txn)
            .await?
            .into_iter()
            .map(|row| (row.name.clone(), row))
            .collect();

        let mut inserted = 0usize;
        let mut updated = 0usize;
        for record in ledger.records() {
            match existing.get(&record.name) {
                Some(row) if row.score == record.score => {}
                Some(row) => {
                    let mut player: players::ActiveModel = row.clone().into();
                    player.score = Set(record.score);
                    player.updated_at = Set(now);
                    player.update(&txn).await?;
                    updated += 1;
                }
                None => {
                    let player = players::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        name: Set(record.name.clone()),
                        score: Set(record.score),
                        created_at: Set(now),
                        updated_at: Set(now),
                    };
                    player.insert(&txn).await?;
                    inserted += 1;
                }
            }
        }

        let kept: HashSet<&str> = ledger.records().iter().map(|r| r.name.as_str()).collect();
        let stale: Vec<Uuid> = existing
            .values()
            .filter(|row| !kept.contains(row.name.as_str()))
            .map(|row| row.id)
            .collect();
        let deleted = if stale.is_empty() {
            0
        } else {
            players::Entity::delete_many()
                .filter(players::Column::Id.is_in(stale))
                .exec(&txn)
                .await?
                .rows_affected
        };

        txn.commit().await?;
        debug!(inserted, updated, deleted, "Saved ledger to database");
        Ok(())
    }

    fn describe(&self) -> String {
        "database".to_string()
    }
}
