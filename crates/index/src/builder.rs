//! Constructors for predicate expressions.
//!
//! Each constructor is available both as an associated function on
//! `Predicate` and as a free function, so expressions read naturally:
//!
//! ```rust
//! use keysift_index::builder::{and, gte, lt, or};
//!
//! let p = or([and([gte(10), lt(20)]), gte(100)]);
//! assert!(p.matches(&15));
//! assert!(p.matches(&100));
//! assert!(!p.matches(&50));
//!
//! // Operators build the same trees.
//! let q = gte(10) & lt(20);
//! assert_eq!(q.to_string(), "(key >= 10) AND (key < 20)");
//! ```

use crate::predicate::{CompareOp, Predicate};
use alloc::vec;
use core::ops::{BitAnd, BitOr};

impl<K> Predicate<K> {
    /// Creates `key > bound`.
    pub fn gt(bound: K) -> Self {
        Predicate::Compare { op: CompareOp::Gt, bound }
    }

    /// Creates `key >= bound`.
    pub fn gte(bound: K) -> Self {
        Predicate::Compare { op: CompareOp::Gte, bound }
    }

    /// Creates `key < bound`.
    pub fn lt(bound: K) -> Self {
        Predicate::Compare { op: CompareOp::Lt, bound }
    }

    /// Creates `key <= bound`.
    pub fn lte(bound: K) -> Self {
        Predicate::Compare { op: CompareOp::Lte, bound }
    }

    /// Creates `first <= key < last`.
    ///
    /// `first` should not exceed `last`; a reversed interval is accepted
    /// and matches nothing.
    pub fn between(first: K, last: K) -> Self {
        Predicate::Between { first, last }
    }

    /// Creates a conjunction of `children`.
    pub fn and(children: impl IntoIterator<Item = Predicate<K>>) -> Self {
        Predicate::And(children.into_iter().collect())
    }

    /// Creates a disjunction of `children`.
    pub fn or(children: impl IntoIterator<Item = Predicate<K>>) -> Self {
        Predicate::Or(children.into_iter().collect())
    }

    /// Creates the predicate matching every key.
    pub fn all() -> Self {
        Predicate::All
    }

    /// Creates the predicate matching no key.
    pub fn none() -> Self {
        Predicate::None
    }
}

/// Creates `key > bound`.
pub fn gt<K>(bound: K) -> Predicate<K> {
    Predicate::gt(bound)
}

/// Creates `key >= bound`.
pub fn gte<K>(bound: K) -> Predicate<K> {
    Predicate::gte(bound)
}

/// Creates `key < bound`.
pub fn lt<K>(bound: K) -> Predicate<K> {
    Predicate::lt(bound)
}

/// Creates `key <= bound`.
pub fn lte<K>(bound: K) -> Predicate<K> {
    Predicate::lte(bound)
}

/// Creates `first <= key < last`.
pub fn between<K>(first: K, last: K) -> Predicate<K> {
    Predicate::between(first, last)
}

/// Creates a conjunction of `children`.
pub fn and<K>(children: impl IntoIterator<Item = Predicate<K>>) -> Predicate<K> {
    Predicate::and(children)
}

/// Creates a disjunction of `children`.
pub fn or<K>(children: impl IntoIterator<Item = Predicate<K>>) -> Predicate<K> {
    Predicate::or(children)
}

/// Creates the predicate matching every key.
pub fn all<K>() -> Predicate<K> {
    Predicate::All
}

/// Creates the predicate matching no key.
pub fn none<K>() -> Predicate<K> {
    Predicate::None
}

/// `a & b` builds `And([a, b])`. A left-hand `And` is extended in place.
impl<K> BitAnd for Predicate<K> {
    type Output = Predicate<K>;

    fn bitand(self, rhs: Predicate<K>) -> Predicate<K> {
        match self {
            Predicate::And(mut children) => {
                children.push(rhs);
                Predicate::And(children)
            }
            lhs => Predicate::And(vec![lhs, rhs]),
        }
    }
}

/// `a | b` builds `Or([a, b])`. A left-hand `Or` is extended in place.
impl<K> BitOr for Predicate<K> {
    type Output = Predicate<K>;

    fn bitor(self, rhs: Predicate<K>) -> Predicate<K> {
        match self {
            Predicate::Or(mut children) => {
                children.push(rhs);
                Predicate::Or(children)
            }
            lhs => Predicate::Or(vec![lhs, rhs]),
        }
    }
}
