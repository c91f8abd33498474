//! src/panels.rs
//!
//! Top-level panels module and re-exports.

pub mod chart;
pub mod help;
pub mod status;

pub use chart::ChartPanel;
pub use help::{HELP_HEIGHT, HelpPanel};
pub use status::{STATUS_BAR_HEIGHT, StatusPanel};
