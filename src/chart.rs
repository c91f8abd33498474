//! src/chart.rs
//!
//! Braille bandwidth chart: sample history, time windows, glyph composition
//! and coloring.

pub mod braille;
pub mod cache;
pub mod compact;
pub mod config;
pub mod data;
pub mod glyph;
pub mod gradient;
pub mod scaling;
pub mod window;

pub use braille::BrailleChart;
pub use config::{ChartConfig, DisplayMode, MIN_CHART_HEIGHT, MIN_CHART_WIDTH, ScalingMode, TimeScale};
pub use data::{Sample, SampleBuffer};
pub use glyph::{Cell, Series};
pub use gradient::Rgb;
