//! League rules module
//!
//! This module contains the static score rule table and the tagged
//! placement types it is keyed by. Everything here is pure and depends
//! only on in-memory domain types and std.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Game variant, selecting which row of the score rule table applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameVariant {
    #[serde(rename = "3 FREE")]
    ThreeFree,
    #[serde(rename = "5 FREE")]
    FiveFree,
}

impl GameVariant {
    pub const ALL: [GameVariant; 2] = [GameVariant::ThreeFree, GameVariant::FiveFree];

    pub fn label(self) -> &'static str {
        match self {
            GameVariant::ThreeFree => "3 FREE",
            GameVariant::FiveFree => "5 FREE",
        }
    }

    /// Score rule row for this variant
    pub fn rule(self) -> &'static ScoreRule {
        match self {
            GameVariant::ThreeFree => &THREE_FREE,
            GameVariant::FiveFree => &FIVE_FREE,
        }
    }
}

impl fmt::Display for GameVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordinal finishing position (zero-indexed into the placement points)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Finish {
    First,
    Second,
    Third,
}

impl Finish {
    pub fn index(self) -> usize {
        match self {
            Finish::First => 0,
            Finish::Second => 1,
            Finish::Third => 2,
        }
    }
}

/// Number of players splitting the top prize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChopSize {
    #[serde(rename = "2chop")]
    Two,
    #[serde(rename = "3chop")]
    Three,
    #[serde(rename = "4chop")]
    Four,
}

impl ChopSize {
    pub fn players(self) -> usize {
        match self {
            ChopSize::Two => 2,
            ChopSize::Three => 3,
            ChopSize::Four => 4,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            ChopSize::Two => "2chop",
            ChopSize::Three => "3chop",
            ChopSize::Four => "4chop",
        }
    }
}

/// A result slot: either an ordinal finish or a share of a chopped pot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Finish(Finish),
    Chop(ChopSize),
}

/// Point values for one game variant
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRule {
    /// Points for 1st, 2nd and 3rd
    pub placements: [f64; 3],
    pub two_chop: f64,
    pub three_chop: f64,
    pub four_chop: f64,
    /// Points per rebuy unit
    pub rebuy: f64,
}

pub const THREE_FREE: ScoreRule = ScoreRule {
    placements: [7.0, 5.0, 3.0],
    two_chop: 7.0,
    three_chop: 6.0,
    four_chop: 5.0,
    rebuy: 0.5,
};

pub const FIVE_FREE: ScoreRule = ScoreRule {
    placements: [10.0, 7.0, 5.0],
    two_chop: 10.0,
    three_chop: 9.0,
    four_chop: 8.0,
    rebuy: 1.0,
};

impl ScoreRule {
    /// Points awarded to one player for the given placement
    pub fn points(&self, placement: Placement) -> f64 {
        match placement {
            Placement::Finish(finish) => self.placements[finish.index()],
            Placement::Chop(ChopSize::Two) => self.two_chop,
            Placement::Chop(ChopSize::Three) => self.three_chop,
            Placement::Chop(ChopSize::Four) => self.four_chop,
        }
    }
}

/// One printable row of the rules table: a heading followed by (label, points) cells
#[derive(Debug, Clone, PartialEq)]
pub struct RuleRow {
    pub heading: &'static str,
    pub cells: Vec<(&'static str, f64)>,
}

/// The rule table laid out for display, two rows per variant
pub fn rule_rows() -> Vec<RuleRow> {
    let mut rows = Vec::with_capacity(4);
    for variant in GameVariant::ALL {
        let rule = variant.rule();
        let heading = match variant {
            GameVariant::ThreeFree => "3 FREE",
            GameVariant::FiveFree => "5 FREE ↑",
        };
        rows.push(RuleRow {
            heading,
            cells: vec![
                ("1st", rule.placements[0]),
                ("2nd", rule.placements[1]),
                ("3rd", rule.placements[2]),
                ("Rebuy", rule.rebuy),
            ],
        });
        rows.push(RuleRow {
            heading: "",
            cells: vec![
                ("1st-2Chop", rule.two_chop),
                ("3-Chop", rule.three_chop),
                ("4-Chop", rule.four_chop),
            ],
        });
    }
    rows
}

/// Format a point value the way the board shows bounties (`$7`, `$0.5`)
pub fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("${points:.0}")
    } else {
        format!("${points}")
    }
}
