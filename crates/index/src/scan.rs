//! Reference traversal engine over an ordered leaf chain.
//!
//! `LeafChain` is a read-only, bulk-loaded sequence of leaves holding
//! ascending keys with parallel values. Leaves are grouped into branches
//! of `order` leaves, giving a two-level tree whose separator keys are the
//! first key of each leaf. A traversal drives any `IndexVisitor`:
//!
//! 1. Stop as soon as the visitor is satiated.
//! 2. Ask the visitor about a branch's span; skip the whole branch if it
//!    has no interest.
//! 3. Repeat the check per leaf, then hand the leaf's keys and values to
//!    `IndexVisitor::visit`.
//!
//! A span runs from the node's own separator to the next node's
//! separator. The low side of the first node and the high side of the
//! last node are unbounded.

use crate::predicate::Predicate;
use crate::stats::{ScanStats, ScanSummary};
use crate::visitor::{IndexVisitor, PredicateVisitor};
use alloc::vec;
use alloc::vec::Vec;
use keysift_core::{Error, Result};

/// Default number of entries per leaf and leaves per branch.
pub const DEFAULT_ORDER: usize = 64;

#[derive(Clone, Debug)]
struct Leaf<K, V> {
    keys: Vec<K>,
    values: Vec<V>,
}

/// An immutable ordered sequence of leaves that can be scanned with a
/// visitor.
#[derive(Clone, Debug)]
pub struct LeafChain<K, V> {
    /// Leaves in key order. Never empty individually.
    leaves: Vec<Leaf<K, V>>,
    /// Maximum entries per leaf and leaves per branch.
    order: usize,
    /// Total number of entries.
    len: usize,
    /// Cumulative traversal statistics.
    stats: ScanStats,
}

impl<K: Ord, V> LeafChain<K, V> {
    /// Bulk-loads ascending `(key, value)` pairs. Duplicate keys are kept.
    ///
    /// Fails if `order` is zero or a key is smaller than its predecessor.
    pub fn from_sorted(pairs: impl IntoIterator<Item = (K, V)>, order: usize) -> Result<Self> {
        if order == 0 {
            return Err(Error::invalid_argument("leaf chain order must be positive"));
        }

        let mut leaves: Vec<Leaf<K, V>> = Vec::new();
        let mut len = 0;
        for (position, (key, value)) in pairs.into_iter().enumerate() {
            if let Some(prev) = leaves.last().and_then(|leaf| leaf.keys.last()) {
                if &key < prev {
                    return Err(Error::unsorted_input(position));
                }
            }
            match leaves.last_mut() {
                Some(leaf) if leaf.keys.len() < order => {
                    leaf.keys.push(key);
                    leaf.values.push(value);
                }
                _ => leaves.push(Leaf {
                    keys: vec![key],
                    values: vec![value],
                }),
            }
            len += 1;
        }

        Ok(Self {
            leaves,
            order,
            len,
            stats: ScanStats::new(),
        })
    }

    /// Bulk-loads ascending pairs with `DEFAULT_ORDER`.
    pub fn with_default_order(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self> {
        Self::from_sorted(pairs, DEFAULT_ORDER)
    }

    /// Walks the chain in key order, pruning spans the visitor is not
    /// interested in and stopping once it is satiated.
    pub fn visit<T: IndexVisitor<K, V>>(&self, visitor: &mut T) -> ScanSummary {
        let mut summary = ScanSummary::default();

        'branches: for (b, branch) in self.leaves.chunks(self.order).enumerate() {
            if visitor.is_satiated() {
                break;
            }
            let start = b * self.order;
            let end = start + branch.len();
            let (left, right) = self.span(start, end);
            if !visitor.is_interested_in_range(left, right) {
                tracing::trace!(start, end, "pruned branch");
                summary.leaves_pruned += branch.len();
                continue;
            }

            for (i, leaf) in (start..end).zip(branch) {
                if visitor.is_satiated() {
                    break 'branches;
                }
                let (left, right) = self.span(i, i + 1);
                if !visitor.is_interested_in_range(left, right) {
                    tracing::trace!(leaf = i, "pruned leaf");
                    summary.leaves_pruned += 1;
                    continue;
                }
                visitor.visit(&leaf.keys, &leaf.values);
                summary.leaves_visited += 1;
                summary.entries_examined += leaf.keys.len();
            }
        }

        summary.satiated = visitor.is_satiated();
        self.stats.record(&summary);
        tracing::debug!(
            leaves_visited = summary.leaves_visited,
            leaves_pruned = summary.leaves_pruned,
            satiated = summary.satiated,
            "leaf chain scan finished"
        );
        summary
    }

    /// Collects the values of entries matching `predicate`, at most
    /// `limit` of them when a limit is given.
    pub fn scan(&self, predicate: &Predicate<K>, limit: Option<usize>) -> Vec<V>
    where
        V: Clone,
    {
        let mut out = Vec::new();
        {
            let mut visitor =
                PredicateVisitor::with_hook(predicate, limit, |_: &K, value: &V| {
                    out.push(value.clone())
                });
            self.visit(&mut visitor);
        }
        out
    }

    /// Counts entries matching `predicate` without collecting them.
    pub fn count(&self, predicate: &Predicate<K>) -> usize {
        let mut count = 0;
        {
            let mut visitor =
                PredicateVisitor::with_hook(predicate, None, |_: &K, _: &V| count += 1);
            self.visit(&mut visitor);
        }
        count
    }
}

impl<K, V> LeafChain<K, V> {
    /// Returns the span bounds of nodes `start..end`.
    fn span(&self, start: usize, end: usize) -> (Option<&K>, Option<&K>) {
        let left = if start == 0 {
            None
        } else {
            self.leaves.get(start).and_then(|leaf| leaf.keys.first())
        };
        let right = self.leaves.get(end).and_then(|leaf| leaf.keys.first());
        (left, right)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the chain holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Returns the maximum entries per leaf.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Returns the cumulative traversal statistics.
    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }

    /// Iterates over every entry in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.leaves
            .iter()
            .flat_map(|leaf| leaf.keys.iter().zip(leaf.values.iter()))
    }
}
