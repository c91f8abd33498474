//! src/lib.rs
//!
//! netpeaks: a terminal bandwidth monitor drawing upload and download rates
//! as a scrolling braille chart.
//!
//! The [`chart`] module is a self-contained rendering engine; everything else
//! is the shell around it (sampling, shared state, ratatui panels, config).

pub mod app;
pub mod chart;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod monitor;
pub mod panels;
pub mod sampler;
pub mod ui;

pub use chart::BrailleChart;
pub use error::{Error, Result};
