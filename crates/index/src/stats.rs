//! Scan statistics for keysift leaf chains.
//!
//! Counters are cumulative across scans and updated with relaxed atomics,
//! so a chain shared between concurrent readers can record them through a
//! shared reference.

use core::sync::atomic::{AtomicUsize, Ordering};

/// Outcome of a single traversal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Leaves handed to the visitor.
    pub leaves_visited: usize,
    /// Leaves skipped because the visitor had no interest in their span.
    pub leaves_pruned: usize,
    /// Entries contained in visited leaves.
    pub entries_examined: usize,
    /// Whether the traversal ended because the visitor was satiated.
    pub satiated: bool,
}

/// Cumulative statistics for a leaf chain.
#[derive(Debug)]
pub struct ScanStats {
    /// Number of traversals run.
    scans: AtomicUsize,
    /// Leaves handed to visitors.
    leaves_visited: AtomicUsize,
    /// Leaves skipped by range pruning.
    leaves_pruned: AtomicUsize,
    /// Entries contained in visited leaves.
    entries_examined: AtomicUsize,
    /// Traversals that stopped on satiation.
    satiated_scans: AtomicUsize,
}

impl ScanStats {
    /// Creates a new empty stats instance.
    pub fn new() -> Self {
        Self {
            scans: AtomicUsize::new(0),
            leaves_visited: AtomicUsize::new(0),
            leaves_pruned: AtomicUsize::new(0),
            entries_examined: AtomicUsize::new(0),
            satiated_scans: AtomicUsize::new(0),
        }
    }

    /// Returns the number of traversals run.
    pub fn scans(&self) -> usize {
        self.scans.load(Ordering::Relaxed)
    }

    /// Returns the number of leaves handed to visitors.
    pub fn leaves_visited(&self) -> usize {
        self.leaves_visited.load(Ordering::Relaxed)
    }

    /// Returns the number of leaves skipped by range pruning.
    pub fn leaves_pruned(&self) -> usize {
        self.leaves_pruned.load(Ordering::Relaxed)
    }

    /// Returns the number of entries contained in visited leaves.
    pub fn entries_examined(&self) -> usize {
        self.entries_examined.load(Ordering::Relaxed)
    }

    /// Returns the number of traversals that stopped on satiation.
    pub fn satiated_scans(&self) -> usize {
        self.satiated_scans.load(Ordering::Relaxed)
    }

    /// Folds one traversal into the totals.
    pub fn record(&self, summary: &ScanSummary) {
        self.scans.fetch_add(1, Ordering::Relaxed);
        self.leaves_visited
            .fetch_add(summary.leaves_visited, Ordering::Relaxed);
        self.leaves_pruned
            .fetch_add(summary.leaves_pruned, Ordering::Relaxed);
        self.entries_examined
            .fetch_add(summary.entries_examined, Ordering::Relaxed);
        if summary.satiated {
            self.satiated_scans.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Resets every counter to zero.
    pub fn clear(&self) {
        self.scans.store(0, Ordering::Relaxed);
        self.leaves_visited.store(0, Ordering::Relaxed);
        self.leaves_pruned.store(0, Ordering::Relaxed);
        self.entries_examined.store(0, Ordering::Relaxed);
        self.satiated_scans.store(0, Ordering::Relaxed);
    }
}

impl Default for ScanStats {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ScanStats {
    fn clone(&self) -> Self {
        Self {
            scans: AtomicUsize::new(self.scans()),
            leaves_visited: AtomicUsize::new(self.leaves_visited()),
            leaves_pruned: AtomicUsize::new(self.leaves_pruned()),
            entries_examined: AtomicUsize::new(self.entries_examined()),
            satiated_scans: AtomicUsize::new(self.satiated_scans()),
        }
    }
}
