//! src/chart/cache.rs
//!
//! Memoizes rendered columns of closed windows.
//!
//! Every cached column belongs to a [`CacheEpoch`]: the configuration and
//! render scale it was drawn under. Starting a render under a different epoch
//! drops every entry, so all visible columns always share one scale, and while
//! the epoch holds a closed window renders identically on every frame.

use std::borrow::Cow;
use std::collections::BTreeMap;

use super::config::{DisplayMode, ScalingMode, TimeScale};
use super::glyph::Cell;

/// Everything that changes the sample -> glyph mapping of a closed window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheEpoch {
    pub scaling: ScalingMode,
    pub display: DisplayMode,
    pub time_scale: TimeScale,
    pub width: usize,
    pub height: usize,
    /// Render scale the cached columns were drawn against.
    pub max_value: u64,
}

#[derive(Debug, Default)]
pub struct ColumnCache {
    epoch: Option<CacheEpoch>,
    columns: BTreeMap<u64, Vec<Cell>>,
    hits: u64,
    misses: u64,
}

impl ColumnCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter `epoch` for the coming render. Returns `true` when this dropped
    /// previously cached columns.
    pub fn begin(&mut self, epoch: CacheEpoch) -> bool {
        if self.epoch == Some(epoch) {
            return false;
        }
        let dropped = !self.columns.is_empty();
        if dropped {
            tracing::debug!(
                entries = self.columns.len(),
                ?epoch,
                "column cache invalidated"
            );
            tracing::trace!(hits = self.hits, misses = self.misses, "column cache stats");
        }
        self.columns.clear();
        self.epoch = Some(epoch);
        dropped
    }

    /// Cached cells for `window` when it is complete, otherwise `render()`.
    ///
    /// A complete window rendered for the first time is stored before
    /// returning; an incomplete one is never stored.
    pub fn get_or_render<F>(&mut self, window: u64, complete: bool, render: F) -> Cow<'_, [Cell]>
    where
        F: FnOnce() -> Vec<Cell>,
    {
        if !complete {
            self.misses += 1;
            return Cow::Owned(render());
        }
        if self.columns.contains_key(&window) {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        Cow::Borrowed(self.columns.entry(window).or_insert_with(render).as_slice())
    }

    /// Drop columns for windows that scrolled off the left edge.
    pub fn prune_before(&mut self, first_visible: u64) {
        self.columns = self.columns.split_off(&first_visible);
    }

    /// Forget every column and the epoch.
    pub fn invalidate(&mut self) {
        self.columns.clear();
        self.epoch = None;
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, window: u64) -> bool {
        self.columns.contains_key(&window)
    }

    /// `(hits, misses)` since construction.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
