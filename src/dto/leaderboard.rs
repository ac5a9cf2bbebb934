use serde::{Deserialize, Serialize};

use crate::league::ledger::PlayerRecord;
use crate::league::ranking::RankedRecord;
use crate::league::scoring::ScoreDeltas;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub total_players: usize,
    pub leaderboard: Vec<RankedRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub message: String,
    pub players_updated: usize,
    pub deltas: ScoreDeltas,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletePlayersResponse {
    pub removed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerResponse {
    pub players: Vec<PlayerRecord>,
}
