//! src/config.rs
//!
//! Command line flags merged over the optional settings file.
//!
//! ```toml
//! # ~/.config/netpeaks/config.toml
//! interval_ms = 500
//! display_mode = "overlay"
//! scaling_mode = "square_root"
//! time_scale = 5
//! show_statusbar = false
//! compact_size = 3
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;

use crate::chart::{DisplayMode, ScalingMode, TimeScale};
use crate::error::{Error, Result};
use crate::monitor::DEFAULT_INTERVAL;

const CONFIG_DIR: &str = "netpeaks";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_COMPACT_SIZE: usize = 2;
/// Faster sampling than this only produces noise.
pub const MIN_INTERVAL_MS: u64 = 50;

/// netpeaks - live network bandwidth as a braille chart
#[derive(Parser, Debug, Default)]
#[command(name = "netpeaks", version)]
#[command(about = "Live network bandwidth as a braille chart", long_about = None)]
pub struct Cli {
    /// Settings file (defaults to <config dir>/netpeaks/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Pin a small chart to the top of the terminal instead of the full UI
    #[arg(long)]
    pub compact: bool,

    /// Draw both series from the bottom edge
    #[arg(long)]
    pub overlay: bool,

    /// Minutes of history across the chart (1, 3, 5, 10, 15, 30, 60)
    #[arg(long, value_name = "MIN")]
    pub time: Option<u32>,

    /// Height of the compact chart in lines
    #[arg(long, value_name = "N")]
    pub size: Option<usize>,

    /// Sampling interval in milliseconds
    #[arg(long, value_name = "MS")]
    pub interval: Option<u64>,

    /// Vertical scaling: linear, logarithmic or square_root
    #[arg(long, value_name = "MODE", value_parser = parse_scaling_mode)]
    pub scaling: Option<ScalingMode>,

    /// Chart synthetic traffic instead of the real interfaces
    #[arg(long)]
    pub demo: bool,
}

fn parse_scaling_mode(value: &str) -> std::result::Result<ScalingMode, String> {
    match value.to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
        "linear" | "lin" => Ok(ScalingMode::Linear),
        "logarithmic" | "log" => Ok(ScalingMode::Logarithmic),
        "square_root" | "sqrt" => Ok(ScalingMode::SquareRoot),
        other => Err(format!(
            "unknown scaling mode '{other}' (expected linear, logarithmic or square_root)"
        )),
    }
}

/// Contents of the settings file. Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub interval_ms: Option<u64>,
    pub display_mode: Option<DisplayMode>,
    pub scaling_mode: Option<ScalingMode>,
    /// Minutes
    pub time_scale: Option<u32>,
    pub show_statusbar: Option<bool>,
    pub compact_size: Option<usize>,
}

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub interval: Duration,
    pub display_mode: DisplayMode,
    pub scaling_mode: ScalingMode,
    pub time_scale: TimeScale,
    pub show_statusbar: bool,
    pub compact: bool,
    pub compact_size: usize,
    pub demo: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            display_mode: DisplayMode::default(),
            scaling_mode: ScalingMode::default(),
            time_scale: TimeScale::default(),
            show_statusbar: true,
            compact: false,
            compact_size: DEFAULT_COMPACT_SIZE,
            demo: false,
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILENAME))
}

/// Read the settings file. A missing file is `Ok(None)`.
pub fn load_file(path: &Path) -> Result<Option<FileConfig>> {
    if !path.exists() {
        tracing::debug!("No config file at {:?}, using defaults", path);
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    let parsed = toml::from_str(&content)
        .map_err(|e| Error::config_invalid(path, e.message().to_string()))?;
    tracing::debug!("Loaded settings from {:?}", path);
    Ok(Some(parsed))
}

/// Minutes -> time scale; anything unsupported falls back to one minute.
fn time_scale_or_default(minutes: u32) -> TimeScale {
    TimeScale::from_minutes(minutes).unwrap_or_else(|| {
        tracing::warn!(minutes, "unsupported time scale, using 1 minute");
        TimeScale::OneMinute
    })
}

impl Settings {
    /// Load the settings file named by `cli` (or the default location) and
    /// apply the flags on top.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let path = cli.config.clone().or_else(default_config_path);
        let file = match path {
            Some(path) => load_file(&path)?.unwrap_or_default(),
            None => FileConfig::default(),
        };
        Ok(Self::merge(&file, cli))
    }

    /// Flags win over file values, file values over defaults.
    pub fn merge(file: &FileConfig, cli: &Cli) -> Self {
        let defaults = Self::default();
        let interval_ms = cli
            .interval
            .or(file.interval_ms)
            .map(|ms| ms.max(MIN_INTERVAL_MS));

        let display_mode = if cli.overlay {
            DisplayMode::Overlay
        } else {
            file.display_mode.unwrap_or(defaults.display_mode)
        };

        Self {
            interval: interval_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.interval),
            display_mode,
            scaling_mode: cli
                .scaling
                .or(file.scaling_mode)
                .unwrap_or(defaults.scaling_mode),
            time_scale: cli
                .time
                .or(file.time_scale)
                .map(time_scale_or_default)
                .unwrap_or(defaults.time_scale),
            show_statusbar: file.show_statusbar.unwrap_or(defaults.show_statusbar),
            compact: cli.compact,
            compact_size: cli
                .size
                .or(file.compact_size)
                .unwrap_or(defaults.compact_size)
                .max(1),
            demo: cli.demo,
        }
    }
}
