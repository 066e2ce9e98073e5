//! Predicate algebra over ordered keys.
//!
//! A `Predicate` describes the set of keys a query is interested in. It
//! answers two questions for a traversal engine:
//!
//! - `matches`: does this single key belong to the set?
//! - `is_interested_in_range`: could any key between a known minimum and
//!   maximum belong to the set?
//!
//! The range test is a sound over-approximation: it may report interest in
//! a range that holds no matching key, but it never reports disinterest in
//! a range that does. Engines rely on this to prune whole subtrees.
//!
//! Range edges are passed as `Option<&K>`, where `None` means unbounded in
//! that direction (negative infinity on the low side, positive infinity on
//! the high side).

use alloc::vec::Vec;
use core::fmt;
use keysift_core::{Error, Result};

/// Comparison operator of a single-bound predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// `key > bound`
    Gt,
    /// `key >= bound`
    Gte,
    /// `key < bound`
    Lt,
    /// `key <= bound`
    Lte,
}

impl CompareOp {
    /// Applies this operator to `key` against `bound`.
    #[inline]
    pub fn apply<K: Ord>(&self, key: &K, bound: &K) -> bool {
        match self {
            CompareOp::Gt => key > bound,
            CompareOp::Gte => key >= bound,
            CompareOp::Lt => key < bound,
            CompareOp::Lte => key <= bound,
        }
    }

    /// Returns true for operators that admit every key above some point.
    #[inline]
    pub fn is_lower_bound(&self) -> bool {
        matches!(self, CompareOp::Gt | CompareOp::Gte)
    }

    /// Returns the operator symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
        }
    }
}

/// An immutable description of a set of interesting keys.
///
/// Children of `And` and `Or` are owned; the order of children only
/// affects rendering. An empty `And` accepts everything and an empty `Or`
/// accepts nothing, matching `All` and `None`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Predicate<K> {
    /// `key <op> bound`
    Compare { op: CompareOp, bound: K },
    /// `first <= key < last`. Matches nothing when `first > last`.
    Between { first: K, last: K },
    /// Every child matches.
    And(Vec<Predicate<K>>),
    /// At least one child matches.
    Or(Vec<Predicate<K>>),
    /// Matches every key.
    All,
    /// Matches no key.
    None,
}

impl<K: Ord> Predicate<K> {
    /// Pointwise test: returns true if `key` belongs to this predicate's set.
    pub fn matches(&self, key: &K) -> bool {
        match self {
            Predicate::Compare { op, bound } => op.apply(key, bound),
            Predicate::Between { first, last } => key >= first && key < last,
            Predicate::And(children) => children.iter().all(|c| c.matches(key)),
            Predicate::Or(children) => children.iter().any(|c| c.matches(key)),
            Predicate::All => true,
            Predicate::None => false,
        }
    }

    /// Pointwise test that rejects an absent key.
    ///
    /// An absent key is not a sentinel value, so it is reported as
    /// `Error::InvalidArgument` instead of being coerced into a match or a
    /// miss.
    pub fn try_matches(&self, key: Option<&K>) -> Result<bool> {
        match key {
            Some(key) => Ok(self.matches(key)),
            None => Err(Error::invalid_argument(
                "pointwise predicate test requires a present key",
            )),
        }
    }

    /// Range-interest test for keys between `left` (minimum) and `right`
    /// (maximum). `None` on either side means unbounded.
    ///
    /// Returns true whenever some key in the range could match. For
    /// lower-bound comparisons only the maximum matters, for upper-bound
    /// comparisons only the minimum.
    pub fn is_interested_in_range(&self, left: Option<&K>, right: Option<&K>) -> bool {
        match self {
            Predicate::Compare { op, bound } => {
                let edge = if op.is_lower_bound() { right } else { left };
                edge.map_or(true, |k| op.apply(k, bound))
            }
            // Half-open overlap. A reversed query range falls through the
            // same formula and reports no overlap.
            Predicate::Between { first, last } => {
                right.map_or(true, |r| r >= first) && left.map_or(true, |l| l < last)
            }
            Predicate::And(children) => children
                .iter()
                .all(|c| c.is_interested_in_range(left, right)),
            Predicate::Or(children) => children
                .iter()
                .any(|c| c.is_interested_in_range(left, right)),
            Predicate::All => true,
            Predicate::None => false,
        }
    }
}

impl<K> Predicate<K> {
    /// Returns true for the constant predicates `All` and `None`.
    pub fn is_constant(&self) -> bool {
        matches!(self, Predicate::All | Predicate::None)
    }

    /// Returns the direct children of a combinator, or an empty slice.
    pub fn children(&self) -> &[Predicate<K>] {
        match self {
            Predicate::And(children) | Predicate::Or(children) => children,
            _ => &[],
        }
    }

    /// Returns the height of the expression tree. Leaves have depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(Predicate::depth).max().unwrap_or(0)
    }
}

fn write_joined<K: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    children: &[Predicate<K>],
    sep: &str,
) -> fmt::Result {
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "({})", child)?;
    }
    Ok(())
}

/// Debug rendering. One-way; the output is not meant to be parsed back.
impl<K: fmt::Display> fmt::Display for Predicate<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Compare { op, bound } => write!(f, "key {} {}", op.symbol(), bound),
            Predicate::Between { first, last } => write!(f, "{} <= key < {}", first, last),
            Predicate::And(children) => write_joined(f, children, " AND "),
            Predicate::Or(children) => write_joined(f, children, " OR "),
            Predicate::All => f.write_str("all"),
            Predicate::None => f.write_str("none"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    fn cmp(op: CompareOp, bound: i32) -> Predicate<i32> {
        Predicate::Compare { op, bound }
    }

    #[test]
    fn test_compare_matches() {
        assert!(cmp(CompareOp::Gt, 5).matches(&6));
        assert!(!cmp(CompareOp::Gt, 5).matches(&5));
        assert!(cmp(CompareOp::Gte, 5).matches(&5));
        assert!(!cmp(CompareOp::Gte, 5).matches(&4));
        assert!(cmp(CompareOp::Lt, 5).matches(&4));
        assert!(!cmp(CompareOp::Lt, 5).matches(&5));
        assert!(cmp(CompareOp::Lte, 5).matches(&5));
        assert!(!cmp(CompareOp::Lte, 5).matches(&6));
    }

    #[test]
    fn test_lower_bound_range_uses_maximum() {
        let gt = cmp(CompareOp::Gt, 10);
        assert!(gt.is_interested_in_range(Some(&0), Some(&11)));
        assert!(!gt.is_interested_in_range(Some(&0), Some(&10)));
        assert!(gt.is_interested_in_range(Some(&0), None));
        assert!(gt.is_interested_in_range(None, None));

        let gte = cmp(CompareOp::Gte, 10);
        assert!(gte.is_interested_in_range(Some(&0), Some(&10)));
        assert!(!gte.is_interested_in_range(None, Some(&9)));
    }

    #[test]
    fn test_upper_bound_range_uses_minimum() {
        let lt = cmp(CompareOp::Lt, 10);
        assert!(lt.is_interested_in_range(Some(&9), Some(&100)));
        assert!(!lt.is_interested_in_range(Some(&10), Some(&100)));
        assert!(lt.is_interested_in_range(None, Some(&100)));

        let lte = cmp(CompareOp::Lte, 10);
        assert!(lte.is_interested_in_range(Some(&10), None));
        assert!(!lte.is_interested_in_range(Some(&11), None));
    }

    #[test]
    fn test_between_boundaries() {
        let p = Predicate::Between { first: 10, last: 20 };
        assert!(p.matches(&10));
        assert!(p.matches(&15));
        assert!(!p.matches(&20));
        assert!(!p.matches(&9));
    }

    #[test]
    fn test_between_range_overlap() {
        let p = Predicate::Between { first: 10, last: 20 };
        assert!(p.is_interested_in_range(Some(&0), Some(&10)));
        assert!(!p.is_interested_in_range(Some(&0), Some(&9)));
        assert!(p.is_interested_in_range(Some(&19), Some(&30)));
        assert!(!p.is_interested_in_range(Some(&20), Some(&30)));
        assert!(p.is_interested_in_range(None, None));
        assert!(p.is_interested_in_range(None, Some(&12)));
        assert!(p.is_interested_in_range(Some(&12), None));
    }

    #[test]
    fn test_between_malformed_matches_nothing() {
        let p = Predicate::Between { first: 20, last: 10 };
        for k in 0..30 {
            assert!(!p.matches(&k));
        }
    }

    #[test]
    fn test_between_reversed_query_range() {
        let p = Predicate::Between { first: 10, last: 20 };
        // right < first, so the formula reports no overlap
        assert!(!p.is_interested_in_range(Some(&15), Some(&5)));
    }

    #[test]
    fn test_combinators() {
        let and = Predicate::And(vec![cmp(CompareOp::Gte, 10), cmp(CompareOp::Lt, 20)]);
        assert!(and.matches(&10));
        assert!(!and.matches(&20));
        assert!(!and.is_interested_in_range(Some(&20), Some(&30)));
        assert!(and.is_interested_in_range(Some(&5), Some(&12)));

        let or = Predicate::Or(vec![cmp(CompareOp::Lt, 0), cmp(CompareOp::Gt, 100)]);
        assert!(or.matches(&-1));
        assert!(or.matches(&101));
        assert!(!or.matches(&50));
        assert!(!or.is_interested_in_range(Some(&0), Some(&100)));
        assert!(or.is_interested_in_range(Some(&-5), Some(&5)));
    }

    #[test]
    fn test_empty_combinators() {
        let and: Predicate<i32> = Predicate::And(vec![]);
        let or: Predicate<i32> = Predicate::Or(vec![]);
        assert!(and.matches(&0));
        assert!(and.is_interested_in_range(None, None));
        assert!(!or.matches(&0));
        assert!(!or.is_interested_in_range(None, None));
    }

    #[test]
    fn test_constants() {
        let all: Predicate<i32> = Predicate::All;
        let none: Predicate<i32> = Predicate::None;
        assert!(all.matches(&i32::MIN));
        assert!(all.is_interested_in_range(Some(&1), Some(&0)));
        assert!(!none.matches(&0));
        assert!(!none.is_interested_in_range(None, None));
        assert!(all.is_constant() && none.is_constant());
    }

    #[test]
    fn test_try_matches_rejects_absent_key() {
        let p = cmp(CompareOp::Gt, 5);
        assert_eq!(p.try_matches(Some(&6)), Ok(true));
        assert_eq!(p.try_matches(Some(&5)), Ok(false));
        let err = p.try_matches(None).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_display() {
        assert_eq!(cmp(CompareOp::Gt, 5).to_string(), "key > 5");
        assert_eq!(cmp(CompareOp::Lte, 5).to_string(), "key <= 5");
        assert_eq!(
            Predicate::Between { first: 1, last: 9 }.to_string(),
            "1 <= key < 9"
        );
        let tree = Predicate::Or(vec![
            Predicate::And(vec![cmp(CompareOp::Gte, 1), cmp(CompareOp::Lt, 3)]),
            Predicate::All,
        ]);
        assert_eq!(tree.to_string(), "((key >= 1) AND (key < 3)) OR (all)");
        assert_eq!(Predicate::<i32>::Or(vec![]).to_string(), "");
        assert_eq!(Predicate::<i32>::None.to_string(), "none");
    }

    #[test]
    fn test_depth_and_children() {
        let leaf = cmp(CompareOp::Gt, 1);
        assert_eq!(leaf.depth(), 1);
        assert!(leaf.children().is_empty());
        let tree = Predicate::And(vec![leaf.clone(), Predicate::Or(vec![leaf])]);
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.children().len(), 2);
    }
}
