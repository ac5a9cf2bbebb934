//! Scoring module
//!
//! This module contains pure scoring calculation logic: turning a game's
//! result entries and rebuy text into per-player point deltas.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::league::rules::{ChopSize, Finish, GameVariant, Placement};

/// A single result slot filled in by the operator; a blank name means "no entry"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub name: String,
    pub placement: Placement,
}

impl ResultEntry {
    pub fn new(name: impl Into<String>, placement: Placement) -> Self {
        Self {
            name: name.into(),
            placement,
        }
    }
}

/// The shapes a game result can take on the entry form
///
/// A chop always claims 1st place and is followed by plain 2nd/3rd slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResultShape {
    Plain {
        #[serde(default)]
        first: String,
        #[serde(default)]
        second: String,
        #[serde(default)]
        third: String,
    },
    Chop {
        size: ChopSize,
        #[serde(default)]
        choppers: Vec<String>,
        #[serde(default)]
        second: String,
        #[serde(default)]
        third: String,
    },
}

impl ResultShape {
    /// Expand the shape into ordered result entries
    ///
    /// At most `size` choppers are taken for a chop.
    pub fn entries(&self) -> Vec<ResultEntry> {
        match self {
            ResultShape::Plain {
                first,
                second,
                third,
            } => vec![
                ResultEntry::new(first.clone(), Placement::Finish(Finish::First)),
                ResultEntry::new(second.clone(), Placement::Finish(Finish::Second)),
                ResultEntry::new(third.clone(), Placement::Finish(Finish::Third)),
            ],
            ResultShape::Chop {
                size,
                choppers,
                second,
                third,
            } => {
                let mut entries: Vec<ResultEntry> = choppers
                    .iter()
                    .take(size.players())
                    .map(|name| ResultEntry::new(name.clone(), Placement::Chop(*size)))
                    .collect();
                entries.push(ResultEntry::new(
                    second.clone(),
                    Placement::Finish(Finish::Second),
                ));
                entries.push(ResultEntry::new(
                    third.clone(),
                    Placement::Finish(Finish::Third),
                ));
                entries
            }
        }
    }
}

/// One parsed rebuy line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rebuy {
    pub name: String,
    pub count: i64,
}

/// Parse a single rebuy line
///
/// If the last whitespace-separated token is an integer it is the count and
/// the rest is the name; otherwise the whole line is the name with count 1.
/// Returns `None` for lines that yield no name.
pub fn parse_rebuy_line(line: &str) -> Option<Rebuy> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (last, rest) = tokens.split_last()?;

    let (name, count) = match last.parse::<i64>() {
        Ok(count) => (rest.join(" "), count),
        Err(_) => (tokens.join(" "), 1),
    };

    if name.is_empty() {
        None
    } else {
        Some(Rebuy { name, count })
    }
}

/// Parse a rebuy text blob; commas and newlines both separate entries
pub fn parse_rebuys(text: &str) -> Vec<Rebuy> {
    text.split(|c: char| c == '\n' || c == ',')
        .filter_map(parse_rebuy_line)
        .collect()
}

/// Per-player point changes produced by one submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreDeltas(BTreeMap<String, f64>);

impl ScoreDeltas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add points to a player's delta, summing with anything already recorded
    pub fn add(&mut self, name: impl Into<String>, points: f64) {
        *self.0.entry(name.into()).or_insert(0.0) += points;
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, delta)| (name.as_str(), *delta))
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ScoreDeltas {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut deltas = ScoreDeltas::new();
        for (name, points) in iter {
            deltas.add(name, points);
        }
        deltas
    }
}

/// Translate one game's results into point deltas
///
/// Blank names are skipped. Duplicate names sum linearly, and a player who
/// both placed and rebought collects both. An empty result means there is
/// nothing to apply.
pub fn translate(variant: GameVariant, entries: &[ResultEntry], rebuy_text: &str) -> ScoreDeltas {
    let rule = variant.rule();
    let mut deltas = ScoreDeltas::new();

    for entry in entries {
        let name = entry.name.trim();
        if name.is_empty() {
            continue;
        }
        deltas.add(name, rule.points(entry.placement));
    }

    for rebuy in parse_rebuys(rebuy_text) {
        deltas.add(rebuy.name, rebuy.count as f64 * rule.rebuy);
    }

    deltas
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(first: &str, second: &str, third: &str) -> Vec<ResultEntry> {
        ResultShape::Plain {
            first: first.to_string(),
            second: second.to_string(),
            third: third.to_string(),
        }
        .entries()
    }

    #[test]
    fn test_parse_rebuy_with_count() {
        assert_eq!(
            parse_rebuy_line("Steve 3"),
            Some(Rebuy {
                name: "Steve".to_string(),
                count: 3
            })
        );
    }

    #[test]
    fn test_parse_rebuy_defaults_to_one() {
        assert_eq!(
            parse_rebuy_line("Steve"),
            Some(Rebuy {
                name: "Steve".to_string(),
                count: 1
            })
        );
    }

    #[test]
    fn test_parse_rebuy_multi_word_name() {
        assert_eq!(
            parse_rebuy_line("Steve Park 2"),
            Some(Rebuy {
                name: "Steve Park".to_string(),
                count: 2
            })
        );
    }

    #[test]
    fn test_parse_rebuy_non_integer_tail_is_part_of_name() {
        // "2.5" is not an integer, so the whole line is the name
        assert_eq!(
            parse_rebuy_line("Steve 2.5"),
            Some(Rebuy {
                name: "Steve 2.5".to_string(),
                count: 1
            })
        );
    }

    #[test]
    fn test_parse_rebuy_blank_and_count_only_lines() {
        assert_eq!(parse_rebuy_line("   "), None);
        assert_eq!(parse_rebuy_line("3"), None);
    }

    #[test]
    fn test_parse_rebuys_splits_on_commas_and_newlines() {
        let rebuys = parse_rebuys("Ann 2, Bo\n\n  Cy Dee 3 ,");
        assert_eq!(
            rebuys,
            vec![
                Rebuy {
                    name: "Ann".to_string(),
                    count: 2
                },
                Rebuy {
                    name: "Bo".to_string(),
                    count: 1
                },
                Rebuy {
                    name: "Cy Dee".to_string(),
                    count: 3
                },
            ]
        );
    }

    #[test]
    fn test_translate_plain_skips_blank_third() {
        let deltas = translate(GameVariant::ThreeFree, &plain("Ann", "Bo", ""), "");
        assert_eq!(deltas.len(), 2);
        assert_eq!(deltas.get("Ann"), Some(7.0));
        assert_eq!(deltas.get("Bo"), Some(5.0));
    }

    #[test]
    fn test_translate_two_chop() {
        let shape = ResultShape::Chop {
            size: ChopSize::Two,
            choppers: vec!["Cy".to_string(), "Di".to_string()],
            second: "Ed".to_string(),
            third: String::new(),
        };
        let deltas = translate(GameVariant::FiveFree, &shape.entries(), "");
        let expected: ScoreDeltas = [("Cy", 10.0), ("Di", 10.0), ("Ed", 7.0)]
            .into_iter()
            .collect();
        assert_eq!(deltas, expected);
    }

    #[test]
    fn test_translate_trims_names() {
        let deltas = translate(GameVariant::ThreeFree, &plain("  Ann ", "", ""), "");
        assert_eq!(deltas.get("Ann"), Some(7.0));
    }

    #[test]
    fn test_translate_duplicate_names_sum() {
        let deltas = translate(GameVariant::ThreeFree, &plain("Ann", "Ann", "Ann"), "");
        assert_eq!(deltas.get("Ann"), Some(15.0));
    }

    #[test]
    fn test_translate_placement_and_rebuy_accumulate() {
        let deltas = translate(GameVariant::ThreeFree, &plain("Ann", "", ""), "Ann 2\nBo");
        assert_eq!(deltas.get("Ann"), Some(8.0));
        assert_eq!(deltas.get("Bo"), Some(0.5));
    }

    #[test]
    fn test_translate_everything_blank_is_empty() {
        let deltas = translate(GameVariant::FiveFree, &plain("", " ", ""), " \n , ");
        assert!(deltas.is_empty());
    }

    #[test]
    fn test_chop_takes_at_most_size_choppers() {
        let shape = ResultShape::Chop {
            size: ChopSize::Three,
            choppers: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            second: String::new(),
            third: String::new(),
        };
        let entries = shape.entries();
        let choppers = entries
            .iter()
            .filter(|e| e.placement == Placement::Chop(ChopSize::Three))
            .count();
        assert_eq!(choppers, 3);
        assert_eq!(entries.len(), 5);
    }

    #[test]
    fn test_result_shape_from_json() {
        let shape: ResultShape = serde_json::from_str(
            r#"{"type":"chop","size":"4chop","choppers":["A","B","C","D"],"second":"E"}"#,
        )
        .unwrap();
        let deltas = translate(GameVariant::ThreeFree, &shape.entries(), "");
        assert_eq!(deltas.get("A"), Some(5.0));
        assert_eq!(deltas.get("E"), Some(5.0));
        assert_eq!(deltas.total(), 25.0);
    }
}
