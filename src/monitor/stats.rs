//! src/monitor/stats.rs
//!
//! Session totals and peaks shown in the status bar.

use std::time::{Duration, Instant};

use crate::chart::Sample;

#[derive(Debug, Clone)]
pub struct Stats {
    /// Estimated bytes sent: each rate counts for one sampling interval.
    pub total_upload: u64,
    pub total_download: u64,
    pub peak_upload: u64,
    pub peak_download: u64,
    started: Instant,
    interval: Duration,
}

impl Stats {
    pub fn new(interval: Duration) -> Self {
        Self {
            total_upload: 0,
            total_download: 0,
            peak_upload: 0,
            peak_download: 0,
            started: Instant::now(),
            interval,
        }
    }

    pub fn update(&mut self, sample: Sample) {
        let seconds = self.interval.as_secs_f64();
        self.total_upload = self
            .total_upload
            .saturating_add((sample.upload as f64 * seconds) as u64);
        self.total_download = self
            .total_download
            .saturating_add((sample.download as f64 * seconds) as u64);
        self.peak_upload = self.peak_upload.max(sample.upload);
        self.peak_download = self.peak_download.max(sample.download);
    }

    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    /// Zero every counter and restart the uptime clock.
    pub fn reset(&mut self) {
        *self = Self::new(self.interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_scale_with_interval() {
        let mut stats = Stats::new(Duration::from_millis(500));
        stats.update(Sample::new(1000, 4000));
        stats.update(Sample::new(3000, 2000));
        assert_eq!(stats.total_upload, 2000);
        assert_eq!(stats.total_download, 3000);
        assert_eq!(stats.peak_upload, 3000);
        assert_eq!(stats.peak_download, 4000);
    }

    #[test]
    fn reset_clears_counters() {
        let mut stats = Stats::new(Duration::from_secs(1));
        stats.update(Sample::new(10, 10));
        stats.reset();
        assert_eq!((stats.total_upload, stats.peak_download), (0, 0));
    }
}
