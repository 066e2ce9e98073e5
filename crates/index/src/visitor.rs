//! Bounded visitors driven by a traversal engine.
//!
//! `IndexVisitor` is the seam between an ordered index and the code that
//! consumes its entries. An engine asks the visitor whether a sub-range is
//! worth descending into, hands it leaf batches of parallel keys and
//! values, and stops once the visitor reports that it is satiated.
//!
//! `PredicateVisitor` adapts a `Predicate` and an optional match quota to
//! that contract. Accepted pairs go to an injected hook (collector,
//! streaming emitter, counter), or can be pulled lazily with
//! `PredicateVisitor::matches`.
//!
//! A visitor carries traversal-local state and is meant to be built fresh
//! for one scan and dropped afterwards.

use crate::predicate::Predicate;
use core::iter::Zip;
use core::marker::PhantomData;
use core::slice::Iter;
use keysift_core::{Error, Result};

/// Traversal contract between an ordered index and a consumer of entries.
pub trait IndexVisitor<K, V> {
    /// Returns false if no key between `left` and `right` can be of
    /// interest, in which case the engine must skip that sub-range.
    /// `None` means unbounded on that side.
    fn is_interested_in_range(&self, left: Option<&K>, right: Option<&K>) -> bool;

    /// Visits one leaf batch. `keys` are ascending and `values[i]` belongs
    /// to `keys[i]`.
    fn visit(&mut self, keys: &[K], values: &[V]);

    /// Returns true once the visitor wants no further entries.
    fn is_satiated(&self) -> bool;
}

impl<K, V, T: IndexVisitor<K, V> + ?Sized> IndexVisitor<K, V> for &mut T {
    fn is_interested_in_range(&self, left: Option<&K>, right: Option<&K>) -> bool {
        (**self).is_interested_in_range(left, right)
    }

    fn visit(&mut self, keys: &[K], values: &[V]) {
        (**self).visit(keys, values)
    }

    fn is_satiated(&self) -> bool {
        (**self).is_satiated()
    }
}

/// Converts a signed quota where any negative value means unlimited.
pub fn quota_from_signed(quota: i64) -> Option<usize> {
    usize::try_from(quota).ok()
}

fn ignore_match<K, V>(_: &K, _: &V) {}

/// Filters leaf batches through a predicate, stopping after a quota of
/// matches.
///
/// The quota is `None` for unlimited, or `Some(n)` for at most `n`
/// matches. `Some(0)` is satiated from the start and never evaluates the
/// predicate.
pub struct PredicateVisitor<'p, K, V, F = fn(&K, &V)> {
    predicate: &'p Predicate<K>,
    limit: Option<usize>,
    remaining: Option<usize>,
    hook: F,
    _marker: PhantomData<fn(&V)>,
}

impl<'p, K, V> PredicateVisitor<'p, K, V> {
    /// Quota value meaning "no limit".
    pub const UNLIMITED: Option<usize> = None;

    /// Creates a visitor whose match hook does nothing.
    pub fn new(predicate: &'p Predicate<K>, limit: Option<usize>) -> Self {
        Self::with_hook(predicate, limit, ignore_match::<K, V> as fn(&K, &V))
    }
}

impl<'p, K, V, F> PredicateVisitor<'p, K, V, F>
where
    F: FnMut(&K, &V),
{
    /// Creates a visitor that calls `hook` once per accepted pair, in
    /// input order.
    pub fn with_hook(predicate: &'p Predicate<K>, limit: Option<usize>, hook: F) -> Self {
        Self {
            predicate,
            limit,
            remaining: limit,
            hook,
            _marker: PhantomData,
        }
    }

    /// Returns the wrapped predicate.
    pub fn predicate(&self) -> &'p Predicate<K> {
        self.predicate
    }

    /// Returns the quota this visitor started with.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Returns the number of matches still allowed, `None` if unlimited.
    pub fn remaining(&self) -> Option<usize> {
        self.remaining
    }

    /// Returns true once the quota is used up.
    pub fn is_satiated(&self) -> bool {
        self.remaining == Some(0)
    }

    /// Consumes the visitor and returns its hook.
    pub fn into_hook(self) -> F {
        self.hook
    }

    /// Takes one unit of quota. Unlimited visitors are unaffected.
    fn consume(&mut self) {
        if let Some(n) = self.remaining.as_mut() {
            *n = n.saturating_sub(1);
            if *n == 0 {
                tracing::trace!(limit = ?self.limit, "predicate visitor satiated");
            }
        }
    }
}

impl<'p, K: Ord, V, F> PredicateVisitor<'p, K, V, F>
where
    F: FnMut(&K, &V),
{
    /// Filters one leaf batch, forwarding accepted pairs to the hook.
    ///
    /// Satiation is checked before each position, so trailing entries are
    /// left unexamined once the quota runs out. Pairs are taken
    /// positionally; surplus entries on the longer side are ignored.
    pub fn visit_batch(&mut self, keys: &[K], values: &[V]) {
        debug_assert_eq!(keys.len(), values.len());
        for (key, value) in keys.iter().zip(values) {
            if self.is_satiated() {
                break;
            }
            if self.predicate.matches(key) {
                self.consume();
                (self.hook)(key, value);
            }
        }
    }

    /// Like `visit_batch`, but rejects batches whose key and value
    /// sequences differ in length.
    pub fn try_visit(&mut self, keys: &[K], values: &[V]) -> Result<()> {
        if keys.len() != values.len() {
            return Err(Error::misaligned_batch(keys.len(), values.len()));
        }
        self.visit_batch(keys, values);
        Ok(())
    }

    /// Lazily yields the accepted pairs of one batch.
    ///
    /// Quota is consumed as items are pulled; the hook is not called for
    /// pairs taken this way.
    pub fn matches<'b>(&'b mut self, keys: &'b [K], values: &'b [V]) -> BatchMatches<'b, 'p, K, V, F> {
        BatchMatches {
            visitor: self,
            entries: keys.iter().zip(values.iter()),
        }
    }
}

impl<'p, K: Ord, V, F> IndexVisitor<K, V> for PredicateVisitor<'p, K, V, F>
where
    F: FnMut(&K, &V),
{
    fn is_interested_in_range(&self, left: Option<&K>, right: Option<&K>) -> bool {
        self.predicate.is_interested_in_range(left, right)
    }

    fn visit(&mut self, keys: &[K], values: &[V]) {
        self.visit_batch(keys, values);
    }

    fn is_satiated(&self) -> bool {
        PredicateVisitor::is_satiated(self)
    }
}

/// Creates an unlimited visitor that forwards every match to `hook`.
pub fn visitor<K, V, F>(predicate: &Predicate<K>, hook: F) -> PredicateVisitor<'_, K, V, F>
where
    F: FnMut(&K, &V),
{
    PredicateVisitor::with_hook(predicate, None, hook)
}

/// Iterator over the accepted pairs of one batch.
pub struct BatchMatches<'b, 'p, K, V, F> {
    visitor: &'b mut PredicateVisitor<'p, K, V, F>,
    entries: Zip<Iter<'b, K>, Iter<'b, V>>,
}

impl<'b, 'p, K: Ord, V, F> Iterator for BatchMatches<'b, 'p, K, V, F>
where
    F: FnMut(&K, &V),
{
    type Item = (&'b K, &'b V);

    fn next(&mut self) -> Option<Self::Item> {
        while !self.visitor.is_satiated() {
            let (key, value) = self.entries.next()?;
            if self.visitor.predicate.matches(key) {
                self.visitor.consume();
                return Some((key, value));
            }
        }
        None
    }
}
