//! src/chart/braille.rs
//!
//! The chart object the monitor shell drives: ingest samples, adjust the
//! view, render text.
//!
//! Rendering runs in `O(width * height)` regardless of how much history is
//! buffered: the window plan only touches visible columns and closed
//! windows come straight from the column cache.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use super::cache::{CacheEpoch, ColumnCache};
use super::config::{ChartConfig, DisplayMode, MIN_CHART_HEIGHT, MIN_CHART_WIDTH, ScalingMode, TimeScale};
use super::data::SampleBuffer;
use super::glyph::{Cell, ColumnLayout};
use super::gradient::{GlyphStyler, cell_color};
use super::scaling::{MIN_SCALE_VALUE, render_scale};
use super::window::{ColumnSlot, WindowPlan, aggregate};

/// Live upload/download history rendered as braille glyphs.
#[derive(Debug)]
pub struct BrailleChart {
    config: ChartConfig,
    buffer: SampleBuffer,
    cache: ColumnCache,
    styler: GlyphStyler,
    /// render scale as of the last mutation or render
    max_value: u64,
}

impl BrailleChart {
    /// Create an empty chart retaining at most `max_points` samples.
    pub fn new(max_points: usize) -> Self {
        Self {
            config: ChartConfig::default(),
            buffer: SampleBuffer::new(max_points),
            cache: ColumnCache::new(),
            styler: GlyphStyler::new(),
            max_value: MIN_SCALE_VALUE,
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn width(&self) -> usize {
        self.config.width
    }

    pub fn height(&self) -> usize {
        self.config.height
    }

    /// Set the width in cells (at least 20).
    pub fn set_width(&mut self, width: usize) {
        let width = width.max(MIN_CHART_WIDTH);
        if width != self.config.width {
            self.config.width = width;
            self.cache.invalidate();
            self.update_max_value();
        }
    }

    /// Set the height in rows (at least 8).
    pub fn set_height(&mut self, height: usize) {
        let height = height.max(MIN_CHART_HEIGHT);
        if height != self.config.height {
            self.config.height = height;
            self.cache.invalidate();
        }
    }

    pub fn max_points(&self) -> usize {
        self.buffer.capacity()
    }

    /// Change retention; shrinking drops the oldest samples.
    pub fn set_max_points(&mut self, max_points: usize) {
        self.buffer.set_capacity(max_points);
        self.update_max_value();
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.config.display_mode
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        if mode != self.config.display_mode {
            self.config.display_mode = mode;
            self.cache.invalidate();
        }
    }

    pub fn toggle_display_mode(&mut self) -> DisplayMode {
        self.set_display_mode(self.config.display_mode.toggled());
        self.config.display_mode
    }

    pub fn scaling_mode(&self) -> ScalingMode {
        self.config.scaling_mode
    }

    pub fn scaling_mode_name(&self) -> &'static str {
        self.config.scaling_mode.name()
    }

    pub fn set_scaling_mode(&mut self, mode: ScalingMode) {
        if mode != self.config.scaling_mode {
            self.config.scaling_mode = mode;
            self.cache.invalidate();
        }
    }

    pub fn cycle_scaling_mode(&mut self) -> ScalingMode {
        self.set_scaling_mode(self.config.scaling_mode.next());
        self.config.scaling_mode
    }

    pub fn time_scale(&self) -> TimeScale {
        self.config.time_scale
    }

    pub fn time_scale_name(&self) -> &'static str {
        self.config.time_scale.name()
    }

    pub fn set_time_scale(&mut self, scale: TimeScale) {
        if scale != self.config.time_scale {
            self.config.time_scale = scale;
            self.cache.invalidate();
            self.update_max_value();
        }
    }

    pub fn cycle_time_scale(&mut self) -> TimeScale {
        self.set_time_scale(self.config.time_scale.next());
        self.config.time_scale
    }

    /// Ingest one sample (bytes per second).
    pub fn add_data_point(&mut self, upload: u64, download: u64) {
        self.buffer.append(upload, download);
        self.update_max_value();
    }

    /// Render scale: visible maximum clamped to `[1 KiB/s, 100 MiB/s]`.
    pub fn max_value(&self) -> u64 {
        self.max_value
    }

    pub fn data_len(&self) -> usize {
        self.buffer.len()
    }

    pub(crate) fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }

    /// Closed columns currently memoized.
    pub fn cached_columns(&self) -> usize {
        self.cache.len()
    }

    /// Drop all history and cached columns.
    pub fn reset(&mut self) {
        self.buffer.reset();
        self.cache.invalidate();
        self.max_value = MIN_SCALE_VALUE;
        tracing::debug!("chart reset");
    }

    fn window_size(&self) -> usize {
        self.config.time_scale.window_size()
    }

    fn update_max_value(&mut self) -> u64 {
        let visible = self.buffer.visible_max(self.config.width, self.window_size());
        self.max_value = render_scale(visible);
        self.max_value
    }

    pub(crate) fn layout(&self, rows: usize) -> ColumnLayout {
        ColumnLayout {
            rows,
            display: self.config.display_mode,
            scaling: self.config.scaling_mode,
        }
    }

    fn epoch(&self) -> CacheEpoch {
        CacheEpoch {
            scaling: self.config.scaling_mode,
            display: self.config.display_mode,
            time_scale: self.config.time_scale,
            width: self.config.width,
            height: self.config.height,
            max_value: self.max_value,
        }
    }

    /// Render the grid of cells, `height` rows of `width` cells each.
    pub fn render_cells(&mut self) -> Vec<Vec<Cell>> {
        let (width, height) = (self.config.width, self.config.height);
        if self.buffer.is_empty() {
            return vec![vec![Cell::Blank; width]; height];
        }

        let max_value = self.update_max_value();
        let plan = WindowPlan::for_buffer(&self.buffer, width, self.window_size());
        let layout = self.layout(height);
        self.cache.begin(self.epoch());

        let mut rows: Vec<Vec<Cell>> = (0..height).map(|_| Vec::with_capacity(width)).collect();
        let buffer = &self.buffer;
        for slot in plan.slots() {
            match slot {
                ColumnSlot::Empty => rows.iter_mut().for_each(|row| row.push(Cell::Blank)),
                ColumnSlot::Window {
                    index,
                    range,
                    complete,
                } => {
                    let column = self.cache.get_or_render(index, complete, || {
                        layout.compose(aggregate(buffer, range), max_value)
                    });
                    for (row, cell) in rows.iter_mut().zip(column.iter()) {
                        row.push(*cell);
                    }
                }
            }
        }

        if let Some(first) = plan.first_visible_window() {
            self.cache.prune_before(first.max(plan.first_whole_window()));
        }
        rows
    }

    /// Render rows as ratatui lines colored with the same gradients as
    /// [`BrailleChart::render`].
    pub fn render_lines(&mut self) -> Vec<Line<'static>> {
        self.render_cells()
            .into_iter()
            .map(|row| {
                let spans: Vec<Span<'static>> = row
                    .iter()
                    .map(|cell| match cell_color(cell) {
                        Some(color) => Span::styled(
                            cell.glyph().to_string(),
                            Style::default()
                                .fg(Color::from(color))
                                .add_modifier(Modifier::BOLD),
                        ),
                        None => Span::raw(" "),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }

    /// Render newline-joined rows of styled glyphs (no trailing newline).
    pub fn render(&mut self) -> String {
        let rows = self.render_cells();
        let mut out = String::with_capacity(self.config.width * self.config.height * 16);
        for (i, row) in rows.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            for cell in row {
                out.push_str(self.styler.style_cell(cell));
            }
        }
        out
    }
}
