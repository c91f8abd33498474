//! src/chart/config.rs
//!
//! Chart configuration: dimensions, scaling transform, axis layout and the
//! time window compressed into the viewport.

use serde::Deserialize;

/// Minimum chart width in terminal cells.
pub const MIN_CHART_WIDTH: usize = 20;

/// Minimum chart height in terminal rows.
pub const MIN_CHART_HEIGHT: usize = 8;

pub const DEFAULT_CHART_WIDTH: usize = 80;
pub const DEFAULT_CHART_HEIGHT: usize = 20;

/// How raw byte rates are mapped onto the vertical axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingMode {
    Linear,
    #[default]
    Logarithmic,
    SquareRoot,
}

impl ScalingMode {
    /// Next mode in the Linear -> Logarithmic -> SquareRoot cycle.
    pub fn next(self) -> Self {
        match self {
            ScalingMode::Linear => ScalingMode::Logarithmic,
            ScalingMode::Logarithmic => ScalingMode::SquareRoot,
            ScalingMode::SquareRoot => ScalingMode::Linear,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ScalingMode::Linear => "Linear",
            ScalingMode::Logarithmic => "Logarithmic",
            ScalingMode::SquareRoot => "Square Root",
        }
    }
}

/// Axis layout for the two series.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Download grows up from a center line, upload grows down from it.
    #[default]
    Split,
    /// Both series grow up from the bottom edge; shared dots are highlighted.
    Overlay,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Split => DisplayMode::Overlay,
            DisplayMode::Overlay => DisplayMode::Split,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DisplayMode::Split => "split",
            DisplayMode::Overlay => "overlay",
        }
    }
}

/// Total history duration compressed into the chart width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TimeScale {
    #[default]
    OneMinute,
    ThreeMinutes,
    FiveMinutes,
    TenMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    SixtyMinutes,
}

impl TimeScale {
    pub const ALL: [TimeScale; 7] = [
        TimeScale::OneMinute,
        TimeScale::ThreeMinutes,
        TimeScale::FiveMinutes,
        TimeScale::TenMinutes,
        TimeScale::FifteenMinutes,
        TimeScale::ThirtyMinutes,
        TimeScale::SixtyMinutes,
    ];

    pub fn minutes(self) -> u32 {
        match self {
            TimeScale::OneMinute => 1,
            TimeScale::ThreeMinutes => 3,
            TimeScale::FiveMinutes => 5,
            TimeScale::TenMinutes => 10,
            TimeScale::FifteenMinutes => 15,
            TimeScale::ThirtyMinutes => 30,
            TimeScale::SixtyMinutes => 60,
        }
    }

    pub fn seconds(self) -> u32 {
        self.minutes() * 60
    }

    /// Number of samples aggregated into one column (never 0).
    pub fn window_size(self) -> usize {
        ((self.seconds() / 60) as usize).max(1)
    }

    /// Look up a scale by its minute count.
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.minutes() == minutes)
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            TimeScale::OneMinute => "1 min",
            TimeScale::ThreeMinutes => "3 min",
            TimeScale::FiveMinutes => "5 min",
            TimeScale::TenMinutes => "10 min",
            TimeScale::FifteenMinutes => "15 min",
            TimeScale::ThirtyMinutes => "30 min",
            TimeScale::SixtyMinutes => "60 min",
        }
    }
}

/// Mutable chart state that shapes the sample -> glyph mapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartConfig {
    /// Width in terminal cells (one column per window).
    pub width: usize,

    /// Height in terminal rows (four braille dot rows each).
    pub height: usize,

    pub scaling_mode: ScalingMode,
    pub display_mode: DisplayMode,
    pub time_scale: TimeScale,
}

impl ChartConfig {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width.max(MIN_CHART_WIDTH),
            height: height.max(MIN_CHART_HEIGHT),
            ..Self::default()
        }
    }

    /// Dot rows between the center line and either edge in split mode.
    pub fn half_height_dots(&self) -> usize {
        (self.height / 2) * super::glyph::DOTS_PER_CELL
    }

    /// Dot rows in the whole chart (overlay mode).
    pub fn full_height_dots(&self) -> usize {
        self.height * super::glyph::DOTS_PER_CELL
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CHART_WIDTH,
            height: DEFAULT_CHART_HEIGHT,
            scaling_mode: ScalingMode::default(),
            display_mode: DisplayMode::default(),
            time_scale: TimeScale::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaling_mode_cycles_through_all_three() {
        let start = ScalingMode::Linear;
        assert_eq!(start.next(), ScalingMode::Logarithmic);
        assert_eq!(start.next().next(), ScalingMode::SquareRoot);
        assert_eq!(start.next().next().next(), start);
    }

    #[test]
    fn default_scaling_is_logarithmic() {
        assert_eq!(ScalingMode::default(), ScalingMode::Logarithmic);
        assert_eq!(ChartConfig::default().display_mode, DisplayMode::Split);
    }

    #[test]
    fn time_scale_window_sizes() {
        let sizes: Vec<usize> = TimeScale::ALL.iter().map(|s| s.window_size()).collect();
        assert_eq!(sizes, vec![1, 3, 5, 10, 15, 30, 60]);
    }

    #[test]
    fn time_scale_cycle_wraps() {
        assert_eq!(TimeScale::SixtyMinutes.next(), TimeScale::OneMinute);
        assert_eq!(TimeScale::OneMinute.next(), TimeScale::ThreeMinutes);
    }

    #[test]
    fn time_scale_from_minutes() {
        assert_eq!(TimeScale::from_minutes(15), Some(TimeScale::FifteenMinutes));
        assert_eq!(TimeScale::from_minutes(7), None);
    }

    #[test]
    fn new_clamps_dimensions() {
        let cfg = ChartConfig::new(3, 2);
        assert_eq!(cfg.width, MIN_CHART_WIDTH);
        assert_eq!(cfg.height, MIN_CHART_HEIGHT);
        assert_eq!(cfg.half_height_dots(), 16);
        assert_eq!(cfg.full_height_dots(), 32);
    }

    #[test]
    fn scaling_mode_parses_from_snake_case() {
        #[derive(Deserialize)]
        struct Wrap {
            mode: ScalingMode,
        }
        let w: Wrap = toml::from_str("mode = \"square_root\"").unwrap();
        assert_eq!(w.mode, ScalingMode::SquareRoot);
    }
}
