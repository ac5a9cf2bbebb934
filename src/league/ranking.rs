//! Ranking module
//!
//! Competition ("min") ranking over the ledger: equal scores share a rank
//! and the next distinct score resumes at one plus the number of records
//! scoring strictly higher (1, 1, 3, 4, ...).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::league::ledger::{Ledger, PlayerRecord};

/// Number of ranked records shown on the board and the poster
pub const BOARD_CAPACITY: usize = 40;

/// Rows per board column; the board is two side-by-side blocks
pub const BLOCK_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRecord {
    pub rank: u32,
    pub name: String,
    pub score: f64,
}

impl From<&RankedRecord> for PlayerRecord {
    fn from(ranked: &RankedRecord) -> Self {
        PlayerRecord::new(ranked.name.clone(), ranked.score)
    }
}

/// Score as compared for ranking; folds `-0.0` into `0.0`
fn score_key(record: &PlayerRecord) -> f64 {
    record.score + 0.0
}

/// Display order: score descending, ties broken by name ascending
fn board_order(a: &PlayerRecord, b: &PlayerRecord) -> Ordering {
    score_key(b)
        .total_cmp(&score_key(a))
        .then_with(|| a.name.cmp(&b.name))
}

/// Rank every record
pub fn rank_records(records: &[PlayerRecord]) -> Vec<RankedRecord> {
    let mut sorted: Vec<&PlayerRecord> = records.iter().collect();
    sorted.sort_by(|a, b| board_order(a, b));

    let mut ranked: Vec<RankedRecord> = Vec::with_capacity(sorted.len());
    for (position, record) in sorted.into_iter().enumerate() {
        // Sorted descending, so everything before the first equal score is strictly greater
        let score = score_key(record);
        let rank = match ranked.last() {
            Some(previous) if previous.score == score => previous.rank,
            _ => position as u32 + 1,
        };
        ranked.push(RankedRecord {
            rank,
            name: record.name.clone(),
            score,
        });
    }
    ranked
}

/// Full ranking of a ledger (used for export)
pub fn standings(ledger: &Ledger) -> Vec<RankedRecord> {
    rank_records(ledger.records())
}

/// The top of the ranking that is actually presented
pub fn leaderboard(ledger: &Ledger) -> Vec<RankedRecord> {
    let mut ranked = standings(ledger);
    ranked.truncate(BOARD_CAPACITY);
    ranked
}

/// Split a leaderboard into the left (ranks 1-20) and right (21-40) blocks
pub fn board_blocks(ranked: &[RankedRecord]) -> (&[RankedRecord], &[RankedRecord]) {
    let shown = &ranked[..ranked.len().min(BOARD_CAPACITY)];
    shown.split_at(shown.len().min(BLOCK_SIZE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(rows: &[(&str, f64)]) -> Vec<PlayerRecord> {
        rows.iter().map(|(n, s)| PlayerRecord::new(*n, *s)).collect()
    }

    fn ranks(ranked: &[RankedRecord]) -> Vec<u32> {
        ranked.iter().map(|r| r.rank).collect()
    }

    #[test]
    fn test_tied_leaders_share_rank_one() {
        let ranked = rank_records(&records(&[("Ann", 12.0), ("Bo", 12.0), ("Cy", 5.0)]));
        assert_eq!(ranks(&ranked), vec![1, 1, 3]);
    }

    #[test]
    fn test_sorted_descending() {
        let ranked = rank_records(&records(&[("Cy", 5.0), ("Ann", 12.0), ("Bo", 7.5)]));
        let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Bo", "Cy"]);
        assert_eq!(ranks(&ranked), vec![1, 2, 3]);
    }

    #[test]
    fn test_ties_ordered_by_name() {
        let ranked = rank_records(&records(&[("Zed", 3.0), ("Amy", 3.0), ("Moe", 3.0)]));
        let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Amy", "Moe", "Zed"]);
        assert_eq!(ranks(&ranked), vec![1, 1, 1]);
    }

    #[test]
    fn test_signed_zero_scores_tie_by_name() {
        let ranked = rank_records(&records(&[("Zed", 0.0), ("Amy", -0.0)]));
        let rows: Vec<(u32, &str)> = ranked.iter().map(|r| (r.rank, r.name.as_str())).collect();
        assert_eq!(rows, vec![(1, "Amy"), (1, "Zed")]);
        assert!(ranked.iter().all(|r| r.score.is_sign_positive()));
    }

    #[test]
    fn test_rank_skips_after_tie_block() {
        let ranked = rank_records(&records(&[
            ("A", 10.0),
            ("B", 10.0),
            ("C", 10.0),
            ("D", 7.0),
            ("E", 7.0),
            ("F", 1.0),
        ]));
        assert_eq!(ranks(&ranked), vec![1, 1, 1, 4, 4, 6]);
    }

    #[test]
    fn test_equal_scores_get_equal_ranks() {
        let ranked = rank_records(&records(&[
            ("A", 2.5),
            ("B", 9.0),
            ("C", 2.5),
            ("D", 9.0),
            ("E", 0.0),
            ("F", 2.5),
        ]));
        for a in &ranked {
            for b in &ranked {
                if a.score == b.score {
                    assert_eq!(a.rank, b.rank, "{} and {} tie", a.name, b.name);
                }
            }
        }
    }

    #[test]
    fn test_rank_is_one_plus_strictly_greater() {
        let input = records(&[("A", 4.0), ("B", 8.0), ("C", 4.0), ("D", 1.0), ("E", 8.0)]);
        let ranked = rank_records(&input);
        for r in &ranked {
            let greater = input.iter().filter(|p| p.score > r.score).count() as u32;
            assert_eq!(r.rank, greater + 1);
        }
    }

    #[test]
    fn test_reranking_is_idempotent() {
        let ranked = rank_records(&records(&[("Ann", 12.0), ("Bo", 12.0), ("Cy", 5.0), ("Di", 0.5)]));
        let again: Vec<PlayerRecord> = ranked.iter().map(PlayerRecord::from).collect();
        assert_eq!(rank_records(&again), ranked);
    }

    #[test]
    fn test_empty_ledger_ranks_nothing() {
        assert!(rank_records(&[]).is_empty());
        assert!(leaderboard(&Ledger::new()).is_empty());
    }

    #[test]
    fn test_leaderboard_truncates_to_capacity() {
        let rows: Vec<PlayerRecord> = (0..55)
            .map(|i| PlayerRecord::new(format!("P{i:02}"), i as f64))
            .collect();
        let ledger = Ledger::from_records(rows);

        let board = leaderboard(&ledger);
        assert_eq!(board.len(), BOARD_CAPACITY);
        assert_eq!(board[0].name, "P54");
        assert_eq!(standings(&ledger).len(), 55);
        assert_eq!(ledger.len(), 55);
    }

    #[test]
    fn test_board_blocks_split() {
        let rows: Vec<PlayerRecord> = (0..25)
            .map(|i| PlayerRecord::new(format!("P{i:02}"), (100 - i) as f64))
            .collect();
        let board = rank_records(&rows);
        let (left, right) = board_blocks(&board);
        assert_eq!(left.len(), BLOCK_SIZE);
        assert_eq!(right.len(), 5);
        assert_eq!(right[0].rank, 21);

        let small = rank_records(&records(&[("A", 1.0)]));
        let (left, right) = board_blocks(&small);
        assert_eq!(left.len(), 1);
        assert!(right.is_empty());
    }
}
