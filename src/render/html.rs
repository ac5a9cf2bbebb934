//! HTML leaderboard page
//!
//! Renders the themed board: title, two ranking tables of up to 20 rows,
//! the rules table, the result entry form and the admin deletion form.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::league::ranking::{board_blocks, RankedRecord};
use crate::league::rules::{format_points, rule_rows, ChopSize, GameVariant};

const COLOR_TEXT_MAIN: &str = "#3E2723";
const COLOR_RED: &str = "#B71C1C";
const COLOR_GOLD: &str = "#FFD700";
const COLOR_BROWN_BAR: &str = "#8D6E63";
const COLOR_LIGHT_TEXT: &str = "#EFEBE9";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Warning,
    Error,
}

impl BannerKind {
    fn class(self) -> &'static str {
        match self {
            BannerKind::Success => "banner success",
            BannerKind::Warning => "banner warning",
            BannerKind::Error => "banner error",
        }
    }
}

/// One-line status message shown above the board after a form action
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

impl Banner {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            message: message.into(),
        }
    }
}

/// Everything the page needs; all of it is read-only
pub struct BoardPage<'a> {
    pub league_name: &'a str,
    pub month: u32,
    pub leaderboard: &'a [RankedRecord],
    pub player_names: &'a [String],
    pub banner: Option<&'a Banner>,
}

/// Bar fill for a row, as a percentage of the top score
pub fn bar_percent(score: f64, max_score: f64) -> f64 {
    if max_score > 0.0 {
        score / max_score * 100.0
    } else {
        0.0
    }
}

fn ranking_table(rows: &[RankedRecord], max_score: f64) -> Markup {
    html! {
        @if !rows.is_empty() {
            table {
                thead {
                    tr {
                        th style="width:20%" { "Rank" }
                        th style="width:50%" { "Outlaw Name" }
                        th style="width:30%" { "Bounty" }
                    }
                }
                tbody {
                    @for row in rows {
                        @let percent = bar_percent(row.score, max_score);
                        tr class="wanted-poster" {
                            td class="rank" { (row.rank) }
                            td class="nick" { (row.name) }
                            td class="bar" style=(format!(
                                "background: linear-gradient(90deg, {COLOR_BROWN_BAR} {percent:.1}%, \
                                 rgba(141,110,99,0.3) {percent:.1}%);"
                            )) {
                                (format!("${:.1}", row.score))
                            }
                        }
                    }
                }
            }
        }
    }
}

fn rules_table() -> Markup {
    html! {
        table class="rules" {
            tbody {
                @for row in rule_rows() {
                    tr {
                        th { (row.heading) }
                        @for (label, points) in &row.cells {
                            td class="rule-label" { (label) }
                            td { (format_points(*points)) }
                        }
                    }
                }
            }
        }
    }
}

fn result_form() -> Markup {
    html! {
        form method="post" action="/results" class="panel" {
            h3 { "Game result" }
            label {
                "Game "
                select name="variant" {
                    @for variant in GameVariant::ALL {
                        option value=(variant.label()) { (variant.label()) }
                    }
                }
            }
            label {
                "Result "
                select name="shape" {
                    option value="plain" { "1st / 2nd / 3rd" }
                    @for size in [ChopSize::Two, ChopSize::Three, ChopSize::Four] {
                        option value=(size.tag()) { (size.players()) "-way chop" }
                    }
                }
            }
            label { "1st " input name="first"; }
            fieldset {
                legend { "Chop (claims 1st)" }
                input name="chop1" placeholder="Chop 1";
                input name="chop2" placeholder="Chop 2";
                input name="chop3" placeholder="Chop 3";
                input name="chop4" placeholder="Chop 4";
            }
            label { "2nd " input name="second"; }
            label { "3rd " input name="third"; }
            label { "Rebuys " textarea name="rebuys" rows="3" placeholder="Steve 2" {} }
            button type="submit" { "Apply and save" }
        }
    }
}

fn delete_form(player_names: &[String]) -> Markup {
    html! {
        form method="post" action="/players/delete" class="panel" {
            h3 { "Remove players (admin)" }
            p class="known" { (player_names.join(", ")) }
            textarea name="names" rows="2" placeholder="one name per line" {}
            button type="submit" { "Remove selected" }
        }
    }
}

fn style() -> String {
    format!(
        "body {{ background: #F5E6C8; color: {main}; font-family: 'Playfair Display', serif; margin: 0 2rem; }}\
         .main-title {{ color: {red}; font-family: 'Rye', cursive; text-transform: uppercase; \
         font-size: 3rem; text-align: center; text-shadow: 2px 2px 4px rgba(0,0,0,0.3); }}\
         .board {{ display: flex; gap: 2rem; }} .board > div {{ flex: 1; }}\
         table {{ width: 100%; border-collapse: separate; border-spacing: 0 10px; }}\
         th {{ font-family: 'Rye', cursive; padding: 10px; border-bottom: 3px double {main}; }}\
         tr.wanted-poster {{ background-color: rgba(255, 248, 225, 0.8); }}\
         td {{ padding: 5px; text-align: center; border-top: 2px solid {main}; border-bottom: 2px solid {main}; }}\
         td.rank, td.nick {{ font-weight: bold; }}\
         td.bar {{ color: {light}; font-weight: bold; text-align: left; padding-left: 10px; border-radius: 4px; }}\
         table.rules th {{ background: {bar}; color: {gold}; }}\
         table.rules td {{ background: {bar}; color: {light}; }} table.rules td.rule-label {{ color: {gold}; }}\
         .panel {{ background: #161B22; color: #FFFFFF; border: 1px solid {gold}; padding: 1rem; margin: 1rem 0; }}\
         .panel h3, .panel label, .panel legend {{ color: {gold}; font-family: Helvetica, sans-serif; }}\
         .panel button {{ color: {gold}; background: #000; border: 1px solid {gold}; font-weight: bold; width: 100%; }}\
         .banner {{ padding: 0.5rem 1rem; margin: 1rem 0; font-weight: bold; }}\
         .banner.success {{ background: #DCEDC8; }} .banner.warning {{ background: #FFF3CD; }}\
         .banner.error {{ background: #F8D7DA; }}",
        main = COLOR_TEXT_MAIN,
        red = COLOR_RED,
        gold = COLOR_GOLD,
        bar = COLOR_BROWN_BAR,
        light = COLOR_LIGHT_TEXT,
    )
}

/// Render the full leaderboard page
pub fn render_board(page: &BoardPage<'_>) -> Markup {
    let max_score = page
        .leaderboard
        .iter()
        .map(|r| r.score)
        .fold(f64::NEG_INFINITY, f64::max);
    let (left, right) = board_blocks(page.leaderboard);

    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (page.league_name) " Wanted List" }
                style { (PreEscaped(style())) }
            }
            body {
                div class="main-title" {
                    "WANTED: " (page.league_name) " - month " (page.month) " bounties"
                }
                @if let Some(banner) = page.banner {
                    div class=(banner.kind.class()) { (banner.message) }
                }
                @if page.leaderboard.is_empty() {
                    p class="empty" { "No outlaws yet. Record the first game result below." }
                } @else {
                    div class="board" {
                        div { (ranking_table(left, max_score)) }
                        div { (ranking_table(right, max_score)) }
                    }
                    p class="exports" {
                        a href="/export/poster.png" { "Print wanted poster (PNG)" }
                        " | "
                        a href="/export/ledger.csv" { "Download ledger (CSV)" }
                    }
                }
                h2 { "Bounty rules" }
                (rules_table())
                (result_form())
                (delete_form(page.player_names))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(rows: &[(u32, &str, f64)]) -> Vec<RankedRecord> {
        rows.iter()
            .map(|(rank, name, score)| RankedRecord {
                rank: *rank,
                name: name.to_string(),
                score: *score,
            })
            .collect()
    }

    #[test]
    fn test_bar_percent() {
        assert_eq!(bar_percent(5.0, 10.0), 50.0);
        assert_eq!(bar_percent(5.0, 0.0), 0.0);
        assert_eq!(bar_percent(-1.0, -1.0), 0.0);
    }

    #[test]
    fn test_board_lists_players_with_ranks_and_bounties() {
        let board = ranked(&[(1, "Ann", 12.0), (1, "Bo", 12.0), (3, "<Cy>", 5.5)]);
        let names = vec!["Ann".to_string(), "Bo".to_string()];
        let html = render_board(&BoardPage {
            league_name: "ACE's PUB",
            month: 3,
            leaderboard: &board,
            player_names: &names,
            banner: Some(&Banner::success("Saved 3 players")),
        })
        .into_string();

        assert!(html.contains("month 3"));
        assert!(html.contains("PUB Wanted List"));
        assert!(html.contains("$12.0"));
        assert!(html.contains("$5.5"));
        assert!(html.contains("&lt;Cy&gt;"));
        assert!(!html.contains("<Cy>"));
        assert!(html.contains("banner success"));
        assert!(html.contains("100.0%"));
        assert!(html.contains("action=\"/results\""));
    }

    #[test]
    fn test_empty_board_shows_prompt() {
        let html = render_board(&BoardPage {
            league_name: "League",
            month: 1,
            leaderboard: &[],
            player_names: &[],
            banner: None,
        })
        .into_string();
        assert!(html.contains("No outlaws yet"));
        assert!(!html.contains("wanted-poster\">"));
    }
}
