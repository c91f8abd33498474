//! src/monitor/shared.rs
//!
//! The authoritative monitor object: chart, stats and UI toggles.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::chart::{BrailleChart, Sample};

use super::stats::Stats;

#[derive(Debug)]
pub struct MonitorShared {
    pub chart: BrailleChart,
    pub stats: Stats,
    /// Most recent reading, shown even while paused.
    pub current: Sample,
    pub paused: bool,
    pub show_statusbar: bool,
}

impl MonitorShared {
    pub fn new(max_points: usize, interval: Duration) -> Self {
        Self {
            chart: BrailleChart::new(max_points),
            stats: Stats::new(interval),
            current: Sample::default(),
            paused: false,
            show_statusbar: true,
        }
    }

    pub fn new_shared(max_points: usize, interval: Duration) -> SharedMonitor {
        Arc::new(RwLock::new(Self::new(max_points, interval)))
    }

    /// Feed one reading to the chart and stats unless paused.
    pub fn record(&mut self, sample: Sample) {
        if self.paused {
            return;
        }
        self.current = sample;
        self.chart.add_data_point(sample.upload, sample.download);
        self.stats.update(sample);
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        tracing::info!(paused = self.paused, "pause toggled");
        self.paused
    }

    /// Clear chart history and session stats.
    pub fn reset(&mut self) {
        self.chart.reset();
        self.stats.reset();
        self.current = Sample::default();
        tracing::info!("monitor reset");
    }
}

/// Alias: Arc<RwLock<MonitorShared>>
pub type SharedMonitor = Arc<RwLock<MonitorShared>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paused_monitor_ignores_samples() {
        let mut m = MonitorShared::new(10, Duration::from_secs(1));
        m.record(Sample::new(5, 5));
        assert!(m.toggle_pause());
        m.record(Sample::new(9, 9));
        assert_eq!(m.chart.data_len(), 1);
        assert_eq!(m.current, Sample::new(5, 5));
        assert!(!m.toggle_pause());
        m.record(Sample::new(9, 9));
        assert_eq!(m.chart.data_len(), 2);
    }

    #[test]
    fn reset_clears_chart_and_stats() {
        let mut m = MonitorShared::new(10, Duration::from_secs(1));
        m.record(Sample::new(5000, 7000));
        m.reset();
        assert_eq!(m.chart.data_len(), 0);
        assert_eq!(m.stats.peak_download, 0);
        assert_eq!(m.current, Sample::default());
    }
}
