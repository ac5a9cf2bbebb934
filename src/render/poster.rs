//! Printable "WANTED" poster
//!
//! Draws the top 40 onto the league's background image as two blocks of 20
//! rank/name/bounty cards, followed by the bounty rules table, and encodes
//! the result as PNG.

use ab_glyph::{FontVec, PxScale};
use image::{imageops::FilterType, DynamicImage, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::league::ranking::{board_blocks, RankedRecord, BLOCK_SIZE};
use crate::league::rules::{format_points, rule_rows};

pub const POSTER_WIDTH: u32 = 1000;
pub const POSTER_HEIGHT: u32 = 1400;

const COLOR_TEXT_MAIN: Rgba<u8> = Rgba([0x3E, 0x27, 0x23, 0xFF]);
const COLOR_RED: Rgba<u8> = Rgba([0xB7, 0x1C, 0x1C, 0xFF]);
const COLOR_GOLD: Rgba<u8> = Rgba([0xFF, 0xD7, 0x00, 0xFF]);
const COLOR_BROWN_BAR: Rgba<u8> = Rgba([0x8D, 0x6E, 0x63, 0xFF]);
const COLOR_LIGHT_TEXT: Rgba<u8> = Rgba([0xEF, 0xEB, 0xE9, 0xFF]);
const COLOR_CARD: Rgba<u8> = Rgba([0xFF, 0xF8, 0xE1, 0xFF]);

// Board geometry
const COLUMN_WIDTHS: [u32; 3] = [60, 240, 100];
const BLOCK_MARGIN: u32 = 80;
const BOARD_TOP: i32 = 230;
const CARD_HEIGHT: u32 = 36;
const CARD_GAP: u32 = 6;

// Rules table geometry
const RULE_HEADER_WIDTH: u32 = 144;
const RULE_CELL_WIDTH: u32 = 104;
const RULE_ROW_HEIGHT: u32 = 45;

#[derive(Debug, Error)]
pub enum PosterError {
    #[error("background image '{path}' is missing or unreadable: {source}")]
    MissingBackground {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("font file '{path}' is missing: {source}")]
    MissingFont {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("font file '{path}' is not a usable font")]
    InvalidFont { path: String },
    #[error("failed to encode poster: {0}")]
    Encode(#[from] image::ImageError),
}

/// Files the poster is drawn with
#[derive(Debug, Clone, PartialEq)]
pub struct PosterAssets {
    pub font_path: PathBuf,
    pub background_path: PathBuf,
}

/// Title text for the poster
#[derive(Debug, Clone, Copy)]
pub struct PosterTitle<'a> {
    pub league_name: &'a str,
    pub month: u32,
}

fn load_background(path: &Path) -> Result<RgbaImage, PosterError> {
    let background = image::open(path).map_err(|source| PosterError::MissingBackground {
        path: path.display().to_string(),
        source,
    })?;
    Ok(background
        .resize_exact(POSTER_WIDTH, POSTER_HEIGHT, FilterType::Triangle)
        .to_rgba8())
}

fn load_font(path: &Path) -> Result<FontVec, PosterError> {
    let bytes = std::fs::read(path).map_err(|source| PosterError::MissingFont {
        path: path.display().to_string(),
        source,
    })?;
    FontVec::try_from_vec(bytes).map_err(|_| PosterError::InvalidFont {
        path: path.display().to_string(),
    })
}

fn draw_centered(
    canvas: &mut RgbaImage,
    font: &FontVec,
    size: f32,
    color: Rgba<u8>,
    center: (f32, f32),
    text: &str,
) {
    let scale = PxScale::from(size);
    let (w, h) = text_size(scale, font, text);
    let x = (center.0 - w as f32 / 2.0).round() as i32;
    let y = (center.1 - h as f32 / 2.0).round() as i32;
    draw_text_mut(canvas, color, x, y, scale, font, text);
}

fn draw_rule_line(canvas: &mut RgbaImage, y: i32, thickness: u32) {
    let margin = 100;
    draw_filled_rect_mut(
        canvas,
        Rect::at(margin, y).of_size(POSTER_WIDTH - 2 * margin as u32, thickness),
        COLOR_TEXT_MAIN,
    );
}

fn draw_box(canvas: &mut RgbaImage, rect: Rect, fill: Rgba<u8>) {
    draw_filled_rect_mut(canvas, rect, fill);
    draw_hollow_rect_mut(canvas, rect, COLOR_TEXT_MAIN);
    if rect.width() > 2 && rect.height() > 2 {
        let inner = Rect::at(rect.left() + 1, rect.top() + 1).of_size(rect.width() - 2, rect.height() - 2);
        draw_hollow_rect_mut(canvas, inner, COLOR_TEXT_MAIN);
    }
}

/// Left edge of each board block
fn block_lefts() -> [i32; 2] {
    let block_width: u32 = COLUMN_WIDTHS.iter().sum();
    let total = block_width * 2 + BLOCK_MARGIN;
    let start = (POSTER_WIDTH - total) as i32 / 2;
    [start, start + (block_width + BLOCK_MARGIN) as i32]
}

/// Top edge of the card at `row` within a block
fn card_top(row: usize) -> i32 {
    BOARD_TOP + 50 + (row as u32 * (CARD_HEIGHT + CARD_GAP)) as i32
}

fn draw_block(canvas: &mut RgbaImage, font: &FontVec, left: i32, rows: &[RankedRecord]) {
    let block_width: u32 = COLUMN_WIDTHS.iter().sum();
    let column_center = |i: usize| {
        left as f32 + COLUMN_WIDTHS[..i].iter().sum::<u32>() as f32 + COLUMN_WIDTHS[i] as f32 / 2.0
    };

    for (i, heading) in ["Rank", "Name", "Bounty"].iter().enumerate() {
        draw_centered(canvas, font, 30.0, COLOR_TEXT_MAIN, (column_center(i), BOARD_TOP as f32), heading);
    }
    draw_filled_rect_mut(
        canvas,
        Rect::at(left, BOARD_TOP + 30).of_size(block_width, 3),
        COLOR_TEXT_MAIN,
    );

    for (row, record) in rows.iter().take(BLOCK_SIZE).enumerate() {
        let top = card_top(row);
        draw_box(canvas, Rect::at(left, top).of_size(block_width, CARD_HEIGHT), COLOR_CARD);

        let middle = top as f32 + CARD_HEIGHT as f32 / 2.0;
        let bounty = format!("${:.1}", record.score);
        draw_centered(canvas, font, 30.0, COLOR_TEXT_MAIN, (column_center(0), middle), &record.rank.to_string());
        draw_centered(canvas, font, 28.0, COLOR_TEXT_MAIN, (column_center(1), middle), &record.name);
        draw_centered(canvas, font, 26.0, COLOR_TEXT_MAIN, (column_center(2), middle), &bounty);
    }
}

fn draw_rules(canvas: &mut RgbaImage, font: &FontVec, top: i32) {
    draw_rule_line(canvas, top, 5);
    let title_y = top + 25;
    draw_centered(canvas, font, 40.0, COLOR_TEXT_MAIN, (POSTER_WIDTH as f32 / 2.0, title_y as f32), "BOUNTY RULES");

    let table_width = RULE_HEADER_WIDTH + RULE_CELL_WIDTH * 8;
    let left = (POSTER_WIDTH.saturating_sub(table_width) / 2) as i32;
    let mut y = title_y + 30;

    for row in rule_rows() {
        let mut cells: Vec<(String, bool)> = vec![(row.heading.to_string(), true)];
        for (label, points) in &row.cells {
            cells.push((label.to_string(), true));
            cells.push((format_points(*points), false));
        }

        let mut x = left;
        for (index, (text, is_header)) in cells.iter().enumerate() {
            let width = if index == 0 { RULE_HEADER_WIDTH } else { RULE_CELL_WIDTH };
            if !text.is_empty() {
                draw_box(canvas, Rect::at(x, y).of_size(width, RULE_ROW_HEIGHT), COLOR_BROWN_BAR);
                let (color, size) = if *is_header {
                    (COLOR_GOLD, 24.0)
                } else {
                    (COLOR_LIGHT_TEXT, 26.0)
                };
                let center = (x as f32 + width as f32 / 2.0, y as f32 + RULE_ROW_HEIGHT as f32 / 2.0);
                draw_centered(canvas, font, size, color, center, text);
            }
            x += width as i32;
        }
        y += RULE_ROW_HEIGHT as i32;
    }
}

/// Draw the poster onto an already-sized canvas
pub fn draw_poster(canvas: &mut RgbaImage, font: &FontVec, title: PosterTitle<'_>, ranked: &[RankedRecord]) {
    let center_x = POSTER_WIDTH as f32 / 2.0;
    draw_centered(canvas, font, 100.0, COLOR_RED, (center_x, 80.0), "WANTED");
    let subtitle = format!("{} - month {} wanted outlaws", title.league_name, title.month);
    draw_centered(canvas, font, 45.0, COLOR_TEXT_MAIN, (center_x, 160.0), &subtitle);
    draw_rule_line(canvas, 188, 5);

    let (left_rows, right_rows) = board_blocks(ranked);
    let [left, right] = block_lefts();
    draw_block(canvas, font, left, left_rows);
    draw_block(canvas, font, right, right_rows);

    draw_rules(canvas, font, card_top(BLOCK_SIZE) + 20);
}

pub fn encode_png(canvas: RgbaImage) -> Result<Vec<u8>, PosterError> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(canvas).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Render the poster for a leaderboard as PNG bytes
pub fn render_poster(
    assets: &PosterAssets,
    title: PosterTitle<'_>,
    ranked: &[RankedRecord],
) -> Result<Vec<u8>, PosterError> {
    let mut canvas = load_background(&assets.background_path)?;
    let font = load_font(&assets.font_path)?;
    draw_poster(&mut canvas, &font, title, ranked);
    encode_png(canvas)
}
