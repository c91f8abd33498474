//! src/sampler.rs
//!
//! Sources of bandwidth samples fed to the chart.
//!
//! [`NetworkSampler`] reads the host's interface counters through `sysinfo`;
//! [`DemoSampler`] makes up plausible traffic for `--demo` runs.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sysinfo::Networks;

use crate::chart::Sample;
use crate::error::{Error, Result};

/// Produces one upload/download rate pair (bytes per second) per call.
pub trait Sampler: Send {
    fn sample(&mut self) -> Result<Sample>;
}

/// Interfaces that only carry local traffic.
const LOOPBACK_INTERFACES: [&str; 3] = ["lo", "lo0", "Loopback"];

/// Calls closer together than this return the previous rates.
const MIN_SAMPLE_GAP: Duration = Duration::from_millis(10);

fn is_loopback(name: &str) -> bool {
    LOOPBACK_INTERFACES
        .iter()
        .any(|lo| name == *lo || name.starts_with("Loopback"))
}

/// Counter delta that tolerates a reset or wrap of the interface counter.
fn counter_delta(current: u64, previous: u64) -> u64 {
    if current < previous {
        current
    } else {
        current - previous
    }
}

/// Per-interface byte counters, summed across every non-loopback interface.
pub struct NetworkSampler {
    networks: Networks,
    /// `(transmitted, received)` totals per interface at the last sample
    last_totals: HashMap<String, (u64, u64)>,
    last_time: Instant,
    last_rates: Sample,
}

impl NetworkSampler {
    /// Prime the counters so the first [`Sampler::sample`] yields real rates.
    pub fn new() -> Self {
        let networks = Networks::new_with_refreshed_list();
        let last_totals = networks
            .iter()
            .filter(|(name, _)| !is_loopback(name))
            .map(|(name, data)| (name.clone(), (data.total_transmitted(), data.total_received())))
            .collect::<HashMap<_, _>>();
        tracing::debug!(interfaces = last_totals.len(), "network sampler primed");
        Self {
            networks,
            last_totals,
            last_time: Instant::now(),
            last_rates: Sample::default(),
        }
    }
}

impl Default for NetworkSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler for NetworkSampler {
    fn sample(&mut self) -> Result<Sample> {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_time);
        if elapsed < MIN_SAMPLE_GAP {
            return Ok(self.last_rates);
        }

        self.networks.refresh();
        if self.networks.iter().next().is_none() {
            return Err(Error::sampler("no network interfaces reported"));
        }

        let seconds = elapsed.as_secs_f64();
        let mut upload = 0u64;
        let mut download = 0u64;
        for (name, data) in self.networks.iter() {
            if is_loopback(name) {
                continue;
            }
            let totals = (data.total_transmitted(), data.total_received());
            if let Some(&(sent, recv)) = self.last_totals.get(name) {
                upload += (counter_delta(totals.0, sent) as f64 / seconds) as u64;
                download += (counter_delta(totals.1, recv) as f64 / seconds) as u64;
            }
            self.last_totals.insert(name.clone(), totals);
        }

        self.last_time = now;
        self.last_rates = Sample::new(upload, download);
        Ok(self.last_rates)
    }
}

/// Synthetic traffic: a wandering baseline with occasional bursts.
pub struct DemoSampler {
    rng: StdRng,
    upload_base: f64,
    download_base: f64,
}

impl DemoSampler {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Deterministic sampler for tests.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            upload_base: 32.0 * 1024.0,
            download_base: 256.0 * 1024.0,
        }
    }

    fn next_rate(rng: &mut StdRng, base: &mut f64, floor: f64, ceiling: f64) -> u64 {
        *base = (*base * rng.random_range(0.85..1.15)).clamp(floor, ceiling);
        let burst = if rng.random_bool(0.08) {
            rng.random_range(2.0..12.0)
        } else {
            1.0
        };
        (*base * burst) as u64
    }
}

impl Default for DemoSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler for DemoSampler {
    fn sample(&mut self) -> Result<Sample> {
        let upload = Self::next_rate(&mut self.rng, &mut self.upload_base, 512.0, 4.0 * 1024.0 * 1024.0);
        let download = Self::next_rate(
            &mut self.rng,
            &mut self.download_base,
            2048.0,
            16.0 * 1024.0 * 1024.0,
        );
        Ok(Sample::new(upload, download))
    }
}
