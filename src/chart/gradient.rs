//! src/chart/gradient.rs
//!
//! Per-series color gradients and the cache of styled glyph strings.

use std::collections::HashMap;

use crossterm::style::{Attribute, Color as TermColor, Stylize, style};
use ratatui::style::Color;

use super::glyph::{Cell, Series};

/// 24-bit color usable by both the ANSI text renderer and ratatui.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn hex(value: u32) -> Self {
        Rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }
}

impl From<Rgb> for Color {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        Color::Rgb(r, g, b)
    }
}

impl From<Rgb> for TermColor {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        TermColor::Rgb { r, g, b }
    }
}

// Index 0 is the darkest step (farthest from the origin).
pub const UPLOAD_GRADIENT: [Rgb; 6] = [
    Rgb::hex(0x7F1D1D),
    Rgb::hex(0xB91C1C),
    Rgb::hex(0xDC2626),
    Rgb::hex(0xEF4444),
    Rgb::hex(0xF87171),
    Rgb::hex(0xFCA5A5),
];

pub const DOWNLOAD_GRADIENT: [Rgb; 6] = [
    Rgb::hex(0x064E3B),
    Rgb::hex(0x047857),
    Rgb::hex(0x059669),
    Rgb::hex(0x10B981),
    Rgb::hex(0x34D399),
    Rgb::hex(0x6EE7B7),
];

pub const OVERLAP_GRADIENT: [Rgb; 8] = [
    Rgb::hex(0x713F12),
    Rgb::hex(0x92400E),
    Rgb::hex(0xB45309),
    Rgb::hex(0xD97706),
    Rgb::hex(0xF59E0B),
    Rgb::hex(0xFBBF24),
    Rgb::hex(0xFCD34D),
    Rgb::hex(0xFDE68A),
];

pub fn gradient(series: Series) -> &'static [Rgb] {
    match series {
        Series::Upload => &UPLOAD_GRADIENT,
        Series::Download => &DOWNLOAD_GRADIENT,
        Series::Overlap => &OVERLAP_GRADIENT,
    }
}

/// Gradient step for `fraction`: `0.0` (origin) picks the lightest step,
/// `1.0` the darkest.
pub fn step_index(fraction: f64, step_count: usize) -> usize {
    if step_count == 0 {
        return 0;
    }
    let inverted = 1.0 - fraction.clamp(0.0, 1.0);
    ((inverted * (step_count - 1) as f64) as usize).min(step_count - 1)
}

pub fn shade(series: Series, fraction: f64) -> Rgb {
    let steps = gradient(series);
    steps[step_index(fraction, steps.len())]
}

/// Color of a rendered cell, `None` for blanks.
pub fn cell_color(cell: &Cell) -> Option<Rgb> {
    match cell {
        Cell::Blank => None,
        Cell::Dots { series, .. } => Some(shade(*series, cell.fraction())),
    }
}

/// Memoizes ANSI-styled glyph strings.
///
/// Keys quantize the fraction to hundredths, so a wide chart re-rendered
/// every tick formats each distinct `(glyph, shade, series)` only once.
#[derive(Debug, Default)]
pub struct GlyphStyler {
    cache: HashMap<(char, u8, Series), String>,
}

impl GlyphStyler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(&mut self, glyph: char, fraction: f64, series: Series) -> &str {
        let shade_key = (fraction.clamp(0.0, 1.0) * 100.0).round() as u8;
        self.cache
            .entry((glyph, shade_key, series))
            .or_insert_with(|| {
                let color = shade(series, f64::from(shade_key) / 100.0);
                style(glyph)
                    .with(color.into())
                    .attribute(Attribute::Bold)
                    .to_string()
            })
            .as_str()
    }

    /// Styled text for a cell; blanks stay a bare space.
    pub fn style_cell(&mut self, cell: &Cell) -> &str {
        match cell {
            Cell::Blank => " ",
            Cell::Dots { glyph, series, .. } => self.style(*glyph, cell.fraction(), *series),
        }
    }

    /// Distinct styled strings held.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
