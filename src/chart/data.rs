//! src/chart/data.rs
//!
//! Bounded FIFO storage for paired upload/download samples with an
//! incrementally maintained maximum.

use std::collections::VecDeque;
use std::ops::Range;

use super::window::WindowPlan;

/// One measurement in bytes per second. Never mutated after append.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sample {
    pub upload: u64,
    pub download: u64,
}

impl Sample {
    pub fn new(upload: u64, download: u64) -> Self {
        Self { upload, download }
    }

    /// Larger of the two series.
    pub fn peak(self) -> u64 {
        self.upload.max(self.download)
    }

    /// Per-series maximum of two samples.
    pub fn max_each(self, other: Sample) -> Sample {
        Sample {
            upload: self.upload.max(other.upload),
            download: self.download.max(other.download),
        }
    }
}

#[derive(Debug)]
pub struct SampleBuffer {
    /// upload series, oldest at front
    upload: VecDeque<u64>,

    /// download series, same length as `upload`
    download: VecDeque<u64>,

    /// retention bound; appends past it evict the oldest sample
    max_points: usize,

    /// running maximum over both series
    current_max: u64,

    /// samples dropped from the front since the last reset
    evicted: u64,
}

impl SampleBuffer {
    pub fn new(max_points: usize) -> Self {
        let max_points = max_points.max(1);
        Self {
            upload: VecDeque::with_capacity(max_points.min(8192)),
            download: VecDeque::with_capacity(max_points.min(8192)),
            max_points,
            current_max: 0,
            evicted: 0,
        }
    }

    /// Append a sample, evicting the oldest when over capacity.
    ///
    /// Maintains invariant: `upload.len() == download.len() <= max_points`.
    pub fn append(&mut self, upload: u64, download: u64) {
        self.current_max = self.current_max.max(upload).max(download);
        self.upload.push_back(upload);
        self.download.push_back(download);

        if self.upload.len() > self.max_points {
            self.evict_front();
        }
    }

    fn evict_front(&mut self) {
        let up = self.upload.pop_front().unwrap_or(0);
        let down = self.download.pop_front().unwrap_or(0);
        self.evicted += 1;
        if up == self.current_max || down == self.current_max {
            self.rescan_max();
        }
    }

    fn rescan_max(&mut self) {
        self.current_max = self
            .upload
            .iter()
            .chain(self.download.iter())
            .copied()
            .max()
            .unwrap_or(0);
    }

    /// Change the retention bound. Shrinking drops the oldest samples.
    pub fn set_capacity(&mut self, max_points: usize) {
        let max_points = max_points.max(1);
        self.max_points = max_points;
        let excess = self.upload.len().saturating_sub(max_points);
        if excess > 0 {
            self.upload.drain(..excess);
            self.download.drain(..excess);
            self.evicted += excess as u64;
            self.rescan_max();
            tracing::trace!(excess, max_points, "trimmed sample buffer");
        }
    }

    pub fn reset(&mut self) {
        self.upload.clear();
        self.download.clear();
        self.current_max = 0;
        self.evicted = 0;
    }

    pub fn len(&self) -> usize {
        self.upload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upload.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_points
    }

    /// Maximum over every retained sample of both series.
    pub fn current_max(&self) -> u64 {
        self.current_max
    }

    /// Number of samples evicted from the front since the last reset.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    /// Logical index one past the newest sample (counts evicted samples).
    pub fn logical_end(&self) -> u64 {
        self.evicted + self.upload.len() as u64
    }

    pub fn get(&self, index: usize) -> Option<Sample> {
        Some(Sample {
            upload: *self.upload.get(index)?,
            download: *self.download.get(index)?,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Sample> + '_ {
        self.upload
            .iter()
            .zip(self.download.iter())
            .map(|(&u, &d)| Sample::new(u, d))
    }

    /// Per-series maximum over buffer indices `range` (clamped to the buffer).
    pub fn max_in(&self, range: Range<usize>) -> Sample {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        Sample {
            upload: self.upload.range(start..end).copied().max().unwrap_or(0),
            download: self.download.range(start..end).copied().max().unwrap_or(0),
        }
    }

    /// Maximum of both series over the samples inside the windows currently
    /// visible in a `width`-column chart aggregating `window_size` samples
    /// per column.
    pub fn visible_max(&self, width: usize, window_size: usize) -> u64 {
        let plan = WindowPlan::new(self.evicted, self.len(), width, window_size);
        match plan.visible_buffer_range() {
            Some(range) => self.max_in(range).peak(),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_keeps_series_aligned() {
        let mut buf = SampleBuffer::new(4);
        buf.append(1, 10);
        buf.append(2, 20);
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.get(1), Some(Sample::new(2, 20)));
        assert_eq!(buf.get(2), None);
        assert_eq!(buf.current_max(), 20);
    }

    #[test]
    fn capacity_trimming_keeps_most_recent() {
        let max_points = 10;
        let mut buf = SampleBuffer::new(max_points);
        for i in 0..(max_points as u64 + 5) {
            // The largest value arrives first and must be evicted.
            let v = if i == 0 { 1_000_000 } else { i * 100 };
            buf.append(v, v / 2);
        }
        assert_eq!(buf.len(), max_points);
        let kept: Vec<u64> = buf.iter().map(|s| s.upload).collect();
        let expected: Vec<u64> = (5..15).map(|i| i * 100).collect();
        assert_eq!(kept, expected);
        assert_eq!(buf.current_max(), 1400);
        assert_eq!(buf.evicted(), 5);
        assert_eq!(buf.logical_end(), 15);
    }

    #[test]
    fn evicting_download_max_rescans() {
        let mut buf = SampleBuffer::new(2);
        buf.append(1, 900);
        buf.append(5, 6);
        buf.append(7, 3);
        assert_eq!(buf.current_max(), 7);
    }

    #[test]
    fn shrinking_capacity_trims_front_and_rescans() {
        let mut buf = SampleBuffer::new(10);
        for v in [50, 1, 2, 3, 4] {
            buf.append(v, 0);
        }
        buf.set_capacity(3);
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.iter().map(|s| s.upload).collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(buf.current_max(), 4);
        assert_eq!(buf.evicted(), 2);
    }

    #[test]
    fn growing_capacity_keeps_data() {
        let mut buf = SampleBuffer::new(3);
        for v in 1..=3 {
            buf.append(v, v);
        }
        buf.set_capacity(100);
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.capacity(), 100);
    }

    #[test]
    fn zero_capacity_clamps_to_one() {
        let mut buf = SampleBuffer::new(0);
        buf.append(1, 1);
        buf.append(2, 2);
        assert_eq!(buf.len(), 1);
        assert_eq!(buf.get(0), Some(Sample::new(2, 2)));
    }

    #[test]
    fn reset_clears_everything() {
        let mut buf = SampleBuffer::new(2);
        for v in 1..=5 {
            buf.append(v, v);
        }
        buf.reset();
        assert!(buf.is_empty());
        assert_eq!(buf.current_max(), 0);
        assert_eq!(buf.evicted(), 0);
    }

    #[test]
    fn max_in_is_per_series() {
        let mut buf = SampleBuffer::new(10);
        buf.append(1, 50);
        buf.append(30, 2);
        buf.append(3, 4);
        assert_eq!(buf.max_in(0..3), Sample::new(30, 50));
        assert_eq!(buf.max_in(2..99), Sample::new(3, 4));
        assert_eq!(buf.max_in(5..9), Sample::default());
    }

    #[test]
    fn visible_max_ignores_history_outside_viewport() {
        let mut buf = SampleBuffer::new(100);
        buf.append(9_999, 0);
        for _ in 0..20 {
            buf.append(10, 20);
        }
        assert_eq!(buf.current_max(), 9_999);
        assert_eq!(buf.visible_max(20, 1), 20);
    }

    #[test]
    fn visible_max_covers_whole_windows() {
        // 3 samples per column, 2 columns. Logical samples 0..8 form windows
        // [0,3) [3,6) [6,8); only the last two are visible.
        let mut buf = SampleBuffer::new(100);
        for v in [100, 1, 1, 70, 1, 1, 1, 1] {
            buf.append(v, 0);
        }
        // Last 2 raw samples would give 1; whole windows include the 70.
        assert_eq!(buf.visible_max(2, 3), 70);
    }
}
