//! src/monitor.rs
//!
//! Runtime state shared between the sampling thread and the UI loop.

pub mod shared;
pub mod stats;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::sampler::Sampler;

pub use shared::{MonitorShared, SharedMonitor};
pub use stats::Stats;

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

/// Samples needed to cover the longest time scale (60 minutes).
pub fn history_capacity(interval: Duration) -> usize {
    let interval_ms = interval.as_millis().max(1);
    ((60 * 60 * 1000) / interval_ms).max(1) as usize
}

/// Spawn the thread that polls `sampler` every `interval` and records each
/// reading into `shared` until `stop` is raised.
///
/// Failed readings are logged and skipped; the chart never sees them.
pub fn spawn_sampler(
    shared: SharedMonitor,
    mut sampler: Box<dyn Sampler>,
    interval: Duration,
    stop: Arc<AtomicBool>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        tracing::info!(interval_ms = interval.as_millis() as u64, "sampler started");
        while !stop.load(Ordering::Relaxed) {
            let tick = Instant::now();
            match sampler.sample() {
                Ok(sample) => match shared.write() {
                    Ok(mut monitor) => monitor.record(sample),
                    Err(_) => {
                        tracing::error!("monitor state poisoned, sampler exiting");
                        break;
                    }
                },
                Err(e) => tracing::warn!(error = %e, "skipping sample"),
            }
            let elapsed = tick.elapsed();
            if elapsed < interval {
                thread::sleep(interval - elapsed);
            }
        }
        tracing::info!("sampler stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Sample;
    use crate::error::{Error, Result};

    struct Scripted(Vec<Result<Sample>>);

    impl Sampler for Scripted {
        fn sample(&mut self) -> Result<Sample> {
            if self.0.is_empty() {
                Ok(Sample::default())
            } else {
                self.0.remove(0)
            }
        }
    }

    #[test]
    fn capacity_covers_an_hour() {
        assert_eq!(history_capacity(Duration::from_millis(500)), 7200);
        assert_eq!(history_capacity(Duration::from_secs(1)), 3600);
        assert_eq!(history_capacity(Duration::ZERO), 3_600_000);
    }

    #[test]
    fn sampler_thread_records_and_skips_errors() {
        let shared = MonitorShared::new_shared(100, Duration::from_millis(1));
        let stop = Arc::new(AtomicBool::new(false));
        let script = Scripted(vec![
            Ok(Sample::new(2048, 4096)),
            Err(Error::sampler("counter read failed")),
            Ok(Sample::new(1024, 1024)),
        ]);
        let handle = spawn_sampler(
            shared.clone(),
            Box::new(script),
            Duration::from_millis(1),
            stop.clone(),
        );
        while shared.read().unwrap().chart.data_len() < 4 {
            thread::sleep(Duration::from_millis(1));
        }
        stop.store(true, Ordering::Relaxed);
        handle.join().unwrap();

        let monitor = shared.read().unwrap();
        assert_eq!(monitor.stats.peak_upload, 2048);
        assert_eq!(monitor.stats.peak_download, 4096);
    }
}
