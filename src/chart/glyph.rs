//! src/chart/glyph.rs
//!
//! Turns a column's aggregated sample into one braille cell per output row.
//!
//! A braille cell is a 2x4 dot grid. Bars are drawn two dots wide, so each
//! dot row contributes both sub-column bits and a cell has four dot rows of
//! vertical resolution.

use super::config::{DisplayMode, ScalingMode};
use super::data::Sample;
use super::scaling::scale;

/// Vertical dot rows per braille cell.
pub const DOTS_PER_CELL: usize = 4;

/// U+2800, the empty braille pattern.
pub const BRAILLE_BASE: u32 = 0x2800;

/// Left and right bits for dot rows 0 (top) through 3 (bottom).
const DOT_ROWS: [u32; DOTS_PER_CELL] = [0x01 | 0x08, 0x02 | 0x10, 0x04 | 0x20, 0x40 | 0x80];

/// Which palette a cell is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Series {
    Upload,
    Download,
    /// Overlay-mode cells where upload and download share dots.
    Overlap,
}

/// One rendered character cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// No dots; rendered as a plain space.
    Blank,
    Dots {
        glyph: char,
        series: Series,
        /// Distance from the series origin in hundredths (0 = at origin).
        shade: u8,
    },
}

impl Cell {
    pub fn glyph(&self) -> char {
        match self {
            Cell::Blank => ' ',
            Cell::Dots { glyph, .. } => *glyph,
        }
    }

    pub fn series(&self) -> Option<Series> {
        match self {
            Cell::Blank => None,
            Cell::Dots { series, .. } => Some(*series),
        }
    }

    /// Gradient fraction in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        match self {
            Cell::Blank => 0.0,
            Cell::Dots { shade, .. } => f64::from(*shade) / 100.0,
        }
    }
}

/// Per-column geometry shared by every cell of a render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnLayout {
    pub rows: usize,
    pub display: DisplayMode,
    pub scaling: ScalingMode,
}

impl ColumnLayout {
    /// Dots between the center line and either edge (split mode).
    pub fn half_height(&self) -> usize {
        (self.rows / 2) * DOTS_PER_CELL
    }

    pub fn full_height(&self) -> usize {
        self.rows * DOTS_PER_CELL
    }

    /// Dot extent available to each series under this layout.
    fn extent(&self) -> usize {
        match self.display {
            DisplayMode::Split => self.half_height(),
            DisplayMode::Overlay => self.full_height(),
        }
    }

    /// Scaled `(upload, download)` bar heights in dots, clamped to the extent.
    pub fn heights(&self, sample: Sample, max_value: u64) -> (usize, usize) {
        let extent = self.extent();
        let to_dots = |value: u64| {
            let fraction = scale(value, max_value, self.scaling);
            ((fraction * extent as f64) as usize).min(extent)
        };
        (to_dots(sample.upload), to_dots(sample.download))
    }

    /// Compose every cell of one column, top row first.
    pub fn compose(&self, sample: Sample, max_value: u64) -> Vec<Cell> {
        let (upload, download) = self.heights(sample, max_value);
        (0..self.rows)
            .map(|row| match self.display {
                DisplayMode::Split => split_cell(row, upload, download, self.half_height()),
                DisplayMode::Overlay => overlay_cell(row, upload, download, self.full_height()),
            })
            .collect()
    }
}

fn quantize(fraction: f64) -> u8 {
    (fraction.clamp(0.0, 1.0) * 100.0).round() as u8
}

fn braille(mask: u32) -> char {
    char::from_u32(BRAILLE_BASE + (mask & 0xFF)).unwrap_or(' ')
}

/// Split-axis cell for `row`: download above the center line, upload below.
pub fn split_cell(row: usize, upload_dots: usize, download_dots: usize, half_height: usize) -> Cell {
    if upload_dots == 0 && download_dots == 0 {
        return Cell::Blank;
    }

    let span = (half_height.max(2) - 1) as f64;
    let line_top = row * DOTS_PER_CELL;
    let mut mask = 0u32;
    let mut has_upload = false;
    let mut has_download = false;
    let mut upload_fraction = 0.0f64;
    let mut download_fraction = 0.0f64;

    for (dot_row, bits) in DOT_ROWS.iter().enumerate() {
        let pos = line_top + dot_row;
        if pos < half_height {
            let distance = half_height - pos;
            if distance <= download_dots {
                mask |= bits;
                has_download = true;
                download_fraction = download_fraction.max((distance - 1) as f64 / span);
            }
        } else {
            let distance = pos - half_height;
            if distance < upload_dots {
                mask |= bits;
                has_upload = true;
                upload_fraction = upload_fraction.max(distance as f64 / span);
            }
        }
    }

    if mask == 0 {
        return Cell::Blank;
    }
    // A cell holding both series cannot happen with clamped heights; style it
    // as upload if it ever does.
    let (series, fraction) = if has_upload {
        (Series::Upload, upload_fraction)
    } else {
        debug_assert!(has_download);
        (Series::Download, download_fraction)
    };
    Cell::Dots {
        glyph: braille(mask),
        series,
        shade: quantize(fraction),
    }
}

/// Overlay cell for `row`: both series rise from the bottom edge.
///
/// Unlike [`split_cell`], the shade comes from the row's center rather than
/// the outermost filled dot, so overlapping series share one shade per row.
pub fn overlay_cell(row: usize, upload_dots: usize, download_dots: usize, full_height: usize) -> Cell {
    if upload_dots == 0 && download_dots == 0 {
        return Cell::Blank;
    }

    let line_top = row * DOTS_PER_CELL;
    let mut upload_mask = 0u32;
    let mut download_mask = 0u32;

    for (dot_row, bits) in DOT_ROWS.iter().enumerate() {
        let distance_from_bottom = full_height.saturating_sub(line_top + dot_row);
        if distance_from_bottom <= upload_dots {
            upload_mask |= bits;
        }
        if distance_from_bottom <= download_dots {
            download_mask |= bits;
        }
    }

    let mask = upload_mask | download_mask;
    if mask == 0 {
        return Cell::Blank;
    }
    let series = if upload_mask & download_mask != 0 {
        Series::Overlap
    } else if upload_mask != 0 {
        Series::Upload
    } else {
        Series::Download
    };

    // Position-based so every column shares the same shading per row.
    let span = (full_height.max(2) - 1) as f64;
    let fraction = 1.0 - (line_top + DOTS_PER_CELL / 2) as f64 / span;

    Cell::Dots {
        glyph: braille(mask),
        series,
        shade: quantize(fraction),
    }
}
