//! src/chart/window.rs
//!
//! Assigns chart columns to windows of samples, newest at the right edge.
//!
//! Windows are aligned on the logical sample sequence (every sample appended
//! since the last reset, including the ones already evicted from the buffer),
//! so window `w` always covers logical samples `[w * k, (w + 1) * k)`.
//! Eviction therefore never shifts samples from one window into another. It
//! can still cut the front off the oldest window, which then shows only the
//! samples that remain and is no longer treated as closed.

use std::ops::Range;

use super::data::{Sample, SampleBuffer};

/// What a single output column shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColumnSlot {
    /// No data maps to this column (left padding).
    Empty,
    /// Column aggregates window `index` whose samples sit at `range` in the buffer.
    Window {
        index: u64,
        range: Range<usize>,
        complete: bool,
    },
}

/// Column/window geometry for one render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowPlan {
    /// logical index of the oldest buffered sample
    origin: u64,
    /// buffered sample count
    len: usize,
    /// output columns
    width: usize,
    /// samples per column (k)
    window_size: usize,
}

impl WindowPlan {
    pub fn new(origin: u64, len: usize, width: usize, window_size: usize) -> Self {
        Self {
            origin,
            len,
            width,
            window_size: window_size.max(1),
        }
    }

    pub fn for_buffer(buffer: &SampleBuffer, width: usize, window_size: usize) -> Self {
        Self::new(buffer.evicted(), buffer.len(), width, window_size)
    }

    fn k(&self) -> u64 {
        self.window_size as u64
    }

    fn end(&self) -> u64 {
        self.origin + self.len as u64
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// `ceil(end / k)`: windows that hold at least one sample, counting from
    /// logical index 0.
    pub fn total_windows(&self) -> u64 {
        self.end().div_ceil(self.k())
    }

    /// Windows whose last sample has arrived.
    pub fn complete_windows(&self) -> u64 {
        self.end() / self.k()
    }

    /// Oldest window with none of its samples evicted.
    pub fn first_whole_window(&self) -> u64 {
        self.origin.div_ceil(self.k())
    }

    /// Closed and fully retained. Only these may be cached: a window whose
    /// front was evicted aggregates fewer samples than when it closed.
    pub fn is_complete(&self, window: u64) -> bool {
        window >= self.first_whole_window() && window < self.complete_windows()
    }

    /// Oldest window drawn, or `None` when there is nothing to draw.
    pub fn first_visible_window(&self) -> Option<u64> {
        if self.len == 0 || self.width == 0 {
            return None;
        }
        let first_with_data = self.origin / self.k();
        let first_in_view = self.total_windows().saturating_sub(self.width as u64);
        Some(first_with_data.max(first_in_view))
    }

    /// Buffer indices covered by window `window`, clipped to retained data.
    fn buffer_range(&self, window: u64) -> Range<usize> {
        let start = (window * self.k()).max(self.origin);
        let end = ((window + 1) * self.k()).min(self.end());
        let start = (start - self.origin) as usize;
        let end = (end.max(self.origin) - self.origin) as usize;
        start..end.max(start)
    }

    /// Slot for column `x` (`0` = leftmost).
    pub fn slot(&self, x: usize) -> ColumnSlot {
        let Some(first_visible) = self.first_visible_window() else {
            return ColumnSlot::Empty;
        };
        if x >= self.width {
            return ColumnSlot::Empty;
        }
        let from_right = (self.width - x) as u64;
        let total = self.total_windows();
        if from_right > total {
            return ColumnSlot::Empty;
        }
        let index = total - from_right;
        if index < first_visible {
            return ColumnSlot::Empty;
        }
        ColumnSlot::Window {
            index,
            range: self.buffer_range(index),
            complete: self.is_complete(index),
        }
    }

    /// Slots for every column, left to right.
    pub fn slots(&self) -> impl Iterator<Item = ColumnSlot> + '_ {
        (0..self.width).map(|x| self.slot(x))
    }

    /// Buffer indices of every sample inside a visible window.
    pub fn visible_buffer_range(&self) -> Option<Range<usize>> {
        let first = self.first_visible_window()?;
        Some(self.buffer_range(first).start..self.len)
    }
}

/// Aggregate a window by per-series maximum, so short bursts survive.
pub fn aggregate(buffer: &SampleBuffer, range: Range<usize>) -> Sample {
    buffer.max_in(range)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_index(slot: &ColumnSlot) -> Option<u64> {
        match slot {
            ColumnSlot::Empty => None,
            ColumnSlot::Window { index, .. } => Some(*index),
        }
    }

    #[test]
    fn one_sample_per_column_scrolls_from_right() {
        let plan = WindowPlan::new(0, 3, 5, 1);
        let slots: Vec<_> = plan.slots().collect();
        assert_eq!(slots[0], ColumnSlot::Empty);
        assert_eq!(slots[1], ColumnSlot::Empty);
        assert_eq!(
            slots[2],
            ColumnSlot::Window { index: 0, range: 0..1, complete: true }
        );
        assert_eq!(
            slots[4],
            ColumnSlot::Window { index: 2, range: 2..3, complete: true }
        );
    }

    #[test]
    fn data_index_matches_len_minus_offset_when_full() {
        let (len, width) = (12usize, 5usize);
        let plan = WindowPlan::new(0, len, width, 1);
        for x in 0..width {
            let expected = len - (width - x);
            match plan.slot(x) {
                ColumnSlot::Window { range, .. } => assert_eq!(range, expected..expected + 1),
                ColumnSlot::Empty => panic!("column {x} should hold data"),
            }
        }
    }

    #[test]
    fn coarse_windows_left_pad_when_few() {
        // 7 samples, k = 3 -> windows [0,3) [3,6) [6,7)
        let plan = WindowPlan::new(0, 7, 5, 3);
        assert_eq!(plan.total_windows(), 3);
        assert_eq!(plan.complete_windows(), 2);
        let indices: Vec<_> = plan.slots().map(|s| window_index(&s)).collect();
        assert_eq!(indices, vec![None, None, Some(0), Some(1), Some(2)]);
        assert_eq!(
            plan.slot(4),
            ColumnSlot::Window { index: 2, range: 6..7, complete: false }
        );
    }

    #[test]
    fn coarse_windows_show_most_recent_when_many() {
        // 20 samples, k = 3 -> 7 windows, 4 columns -> windows 3..7
        let plan = WindowPlan::new(0, 20, 4, 3);
        assert_eq!(plan.first_visible_window(), Some(3));
        let indices: Vec<_> = plan.slots().map(|s| window_index(&s)).collect();
        assert_eq!(indices, vec![Some(3), Some(4), Some(5), Some(6)]);
        assert_eq!(plan.visible_buffer_range(), Some(9..20));
    }

    #[test]
    fn exact_multiple_closes_every_window() {
        let plan = WindowPlan::new(0, 9, 10, 3);
        assert!(plan.is_complete(2));
        assert!(!plan.is_complete(3));
    }

    #[test]
    fn eviction_keeps_window_alignment() {
        // Logical samples 4..14 retained, k = 5: windows 0 [0,5) partly
        // evicted, 1 [5,10), 2 [10,14).
        let plan = WindowPlan::new(4, 10, 8, 5);
        assert_eq!(plan.first_visible_window(), Some(0));
        assert_eq!(
            plan.slot(5),
            ColumnSlot::Window { index: 0, range: 0..1, complete: false }
        );
        assert_eq!(
            plan.slot(6),
            ColumnSlot::Window { index: 1, range: 1..6, complete: true }
        );
        assert_eq!(
            plan.slot(7),
            ColumnSlot::Window { index: 2, range: 6..10, complete: false }
        );
    }

    #[test]
    fn partly_evicted_window_is_never_complete() {
        // k = 5, logical samples 5..15: window 1 is whole, window 0 is gone.
        let plan = WindowPlan::new(5, 10, 8, 5);
        assert_eq!(plan.first_whole_window(), 1);
        assert!(plan.is_complete(1));
        // One more eviction cuts the front off window 1.
        let plan = WindowPlan::new(6, 10, 8, 5);
        assert_eq!(plan.first_whole_window(), 2);
        assert!(!plan.is_complete(1));
        assert!(plan.is_complete(2));
    }

    #[test]
    fn empty_buffer_has_no_windows() {
        let plan = WindowPlan::new(0, 0, 10, 3);
        assert_eq!(plan.first_visible_window(), None);
        assert!(plan.slots().all(|s| s == ColumnSlot::Empty));
        assert_eq!(plan.visible_buffer_range(), None);
    }

    #[test]
    fn aggregation_uses_max_not_last_or_mean() {
        let mut buf = SampleBuffer::new(100);
        // interior spike in the middle of window [0,5)
        for (u, d) in [(10, 1), (20, 2), (900, 3), (30, 400), (5, 4)] {
            buf.append(u, d);
        }
        let plan = WindowPlan::for_buffer(&buf, 4, 5);
        let ColumnSlot::Window { range, .. } = plan.slot(3) else {
            panic!("rightmost column should hold the window");
        };
        assert_eq!(aggregate(&buf, range), Sample::new(900, 400));
    }
}
