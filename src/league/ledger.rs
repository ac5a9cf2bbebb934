//! Ledger module
//!
//! In-memory player ledger: cumulative score per player name, plus the
//! accumulator that folds a submission's deltas into it.

use serde::{Deserialize, Serialize};

use crate::league::scoring::ScoreDeltas;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub score: f64,
}

impl PlayerRecord {
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Ordered collection of player records with unique, non-empty names
///
/// Names are matched exactly: two records differing only in case or inner
/// whitespace are distinct players.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Ledger {
    records: Vec<PlayerRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from untrusted rows (persisted or hand-edited)
    ///
    /// Names are trimmed, rows with empty names are dropped and duplicate
    /// names are merged by summing their scores, keeping the first position.
    pub fn from_records(records: impl IntoIterator<Item = PlayerRecord>) -> Self {
        let mut ledger = Ledger::new();
        for record in records {
            let name = record.name.trim();
            if name.is_empty() {
                continue;
            }
            // Folds -0.0 into 0.0
            ledger.credit(name, record.score + 0.0);
        }
        ledger
    }

    pub fn records(&self) -> &[PlayerRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<PlayerRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn score_of(&self, name: &str) -> Option<f64> {
        self.records
            .iter()
            .find(|record| record.name == name)
            .map(|record| record.score)
    }

    pub fn total_score(&self) -> f64 {
        self.records.iter().map(|record| record.score).sum()
    }

    /// Existing player names in sorted order, for pickers and admin forms
    pub fn player_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.records.iter().map(|r| r.name.clone()).collect();
        names.sort();
        names
    }

    /// Apply a submission's deltas
    ///
    /// Known names are credited in place; unseen names are appended.
    pub fn apply(&mut self, deltas: &ScoreDeltas) {
        for (name, delta) in deltas.iter() {
            self.credit(name, delta);
        }
    }

    /// Remove records whose names exactly match any of `names`
    ///
    /// Returns the number of records removed.
    pub fn remove<S: AsRef<str>>(&mut self, names: &[S]) -> usize {
        let before = self.records.len();
        self.records
            .retain(|record| !names.iter().any(|name| name.as_ref() == record.name));
        before - self.records.len()
    }

    fn credit(&mut self, name: &str, points: f64) {
        match self.records.iter_mut().find(|record| record.name == name) {
            Some(record) => record.score += points,
            None => self.records.push(PlayerRecord::new(name, points)),
        }
    }
}

impl<'de> Deserialize<'de> for Ledger {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let records = Vec::<PlayerRecord>::deserialize(deserializer)?;
        Ok(Ledger::from_records(records))
    }
}
