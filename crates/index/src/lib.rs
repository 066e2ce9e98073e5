//! Keysift Index - Predicate pruning for ordered index scans.
//!
//! This crate provides the pieces an ordered index needs to skip work
//! during a range query:
//!
//! - `Predicate`: An immutable set of interesting keys with a pointwise
//!   test and a conservative range-interest test
//! - `builder`: Constructors and `&` / `|` composition for predicates
//! - `PredicateVisitor`: Filters leaf batches through a predicate with an
//!   optional match quota and early exit
//! - `LeafChain`: A read-only ordered leaf sequence that drives any
//!   `IndexVisitor`, pruning spans the visitor has no interest in
//!
//! # Example
//!
//! ```rust
//! use keysift_index::{LeafChain, PredicateVisitor};
//! use keysift_index::builder::{gte, lt};
//!
//! let chain = LeafChain::from_sorted((0..1000).map(|k| (k, k as u64)), 16).unwrap();
//!
//! // Range query with pruning
//! let p = gte(100) & lt(110);
//! assert_eq!(chain.scan(&p, None), (100..110).collect::<Vec<u64>>());
//!
//! // Bounded query: stop after three matches
//! let mut first = Vec::new();
//! let mut visitor = PredicateVisitor::with_hook(&p, Some(3), |k: &i32, _: &u64| first.push(*k));
//! chain.visit(&mut visitor);
//! assert!(visitor.is_satiated());
//! drop(visitor);
//! assert_eq!(first, vec![100, 101, 102]);
//!
//! // Range-interest test: nothing in [0, 50] can match
//! assert!(!p.is_interested_in_range(Some(&0), Some(&50)));
//! assert_eq!(p.to_string(), "(key >= 100) AND (key < 110)");
//! ```

#![no_std]

extern crate alloc;

pub mod builder;
pub mod predicate;
pub mod scan;
pub mod stats;
pub mod visitor;

pub use predicate::{CompareOp, Predicate};
pub use scan::{LeafChain, DEFAULT_ORDER};
pub use stats::{ScanStats, ScanSummary};
pub use visitor::{quota_from_signed, visitor, BatchMatches, IndexVisitor, PredicateVisitor};
