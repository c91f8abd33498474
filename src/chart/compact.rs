//! src/chart/compact.rs
//!
//! Flat-colored chart strip for the pinned header mode.

use crossterm::style::{Stylize, style};

use super::braille::BrailleChart;
use super::glyph::{BRAILLE_BASE, Cell, Series};
use super::gradient::Rgb;
use super::scaling::render_scale;
use super::window::{ColumnSlot, WindowPlan, aggregate};

pub const COMPACT_MIN_WIDTH: usize = 10;
pub const COMPACT_MIN_LINES: usize = 2;

pub const COMPACT_UPLOAD: Rgb = Rgb::hex(0xEF4444);
pub const COMPACT_DOWNLOAD: Rgb = Rgb::hex(0x10B981);
pub const COMPACT_OVERLAP: Rgb = Rgb::hex(0xEAB308);
/// Empty cells are drawn as dim blank braille so the strip keeps its shape.
pub const COMPACT_BACKGROUND: Rgb = Rgb::hex(0x374151);

fn flat_color(series: Series) -> Rgb {
    match series {
        Series::Upload => COMPACT_UPLOAD,
        Series::Download => COMPACT_DOWNLOAD,
        Series::Overlap => COMPACT_OVERLAP,
    }
}

fn paint(glyph: char, color: Rgb) -> String {
    style(glyph).with(color.into()).to_string()
}

impl BrailleChart {
    /// Render `lines` rows fitted to a terminal `terminal_width` columns wide.
    ///
    /// Uses the same windows, scale and glyphs as [`BrailleChart::render`]
    /// but one flat color per series and no column cache.
    pub fn render_compact(&self, terminal_width: usize, lines: usize) -> String {
        let width = terminal_width.saturating_sub(2).max(COMPACT_MIN_WIDTH);
        let lines = lines.max(COMPACT_MIN_LINES);
        let blank_glyph = char::from_u32(BRAILLE_BASE).unwrap_or(' ');
        let blank = paint(blank_glyph, COMPACT_BACKGROUND);

        let window_size = self.time_scale().window_size();
        let buffer = self.buffer();
        if buffer.is_empty() {
            return vec![blank.repeat(width); lines].join("\n");
        }

        let plan = WindowPlan::for_buffer(buffer, width, window_size);
        let max_value = render_scale(buffer.visible_max(width, window_size));
        let layout = self.layout(lines);

        let columns: Vec<Vec<Cell>> = plan
            .slots()
            .map(|slot| match slot {
                ColumnSlot::Empty => vec![Cell::Blank; lines],
                ColumnSlot::Window { range, .. } => {
                    layout.compose(aggregate(buffer, range), max_value)
                }
            })
            .collect();

        (0..lines)
            .map(|row| {
                columns
                    .iter()
                    .map(|column| match column[row] {
                        Cell::Blank => blank.clone(),
                        Cell::Dots { glyph, series, .. } => paint(glyph, flat_color(series)),
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
