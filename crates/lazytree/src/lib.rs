//! lazytree is an indexed range-aggregation tree with lazy propagation
//!
//! A [SegmentTree] is built once over a fixed sequence of [Value]s and then accepts range updates
//! and range queries in any order. Updates covering a whole subtree are recorded on the subtree root
//! and only pushed further down once a later call needs to look inside it.
//!
//! The aggregate computed over a range is selected through one of the pre-defined aggregators:
//! - [SumAggregator]
//! - [MinIndexAggregator]
//! - [XorAggregator]
//!
//! Two kinds of range updates exist, see [Update]. A range-assign always overrides any outstanding
//! range-add, while a range-add on top of an outstanding range-assign advances the assigned value.
//!
//! # Example
//!
//! ```
//! use lazytree::{SegmentTree, SumAggregator};
//!
//! let mut tree: SegmentTree<SumAggregator> = SegmentTree::new(&[1, 1, 1, 1]).unwrap();
//! tree.add(0, 3, 5).unwrap();
//! tree.assign(0, 3, 2).unwrap();
//! assert_eq!(tree.query(0, 3), Ok(8));
//! assert_eq!(tree.query(1, 2), Ok(4));
//! ```
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(nonstandard_style, missing_docs)]
#![forbid(unsafe_code)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[macro_use]
mod macros;

/// Aggregation interface and the fixed set of supported aggregators
pub mod aggregator;
/// Dynamically selected trees
pub mod any;
/// Index ranges covered by tree nodes
pub mod span;
/// Lazy range-aggregation tree
pub mod tree;
/// Range updates and their composition
pub mod update;

use core::fmt::{self, Display};

pub use aggregator::{
    AggregateKind,
    Aggregator,
    min_index::{MinIndexAggregator, MinIndexState},
    sum::SumAggregator,
    xor::XorAggregator,
};
pub use any::{AggregateResult, AnyTree, build};
pub use span::Span;
pub use tree::{Conf, SegmentTree};
pub use update::{Update, UpdateKind};

/// Element type of the underlying sequence
pub type Value = i64;

/// A type containing error variants that may arise when using a tree
///
/// A tree fails on empty input, malformed ranges and internal defects. The one other failure is
/// [Error::Unsupported]: an XOR summary cannot absorb a range-add, because the exclusive-or of
/// shifted elements does not follow from the old exclusive-or. Rejecting the call up front leaves
/// the tree untouched instead of corrupting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The initial sequence was empty
    InvalidInput,
    /// The inclusive range `[left, right]` is malformed or not within `[0, len)`
    Range {
        /// Left end of the requested range
        left: usize,
        /// Right end of the requested range
        right: usize,
        /// Number of elements in the tree
        len: usize,
    },
    /// The aggregate has no range semantics for the update kind
    Unsupported {
        /// Aggregate of the tree
        aggregate: AggregateKind,
        /// Rejected update kind
        kind: UpdateKind,
    },
    /// Internal defect: the tree no longer satisfies one of its invariants
    InvariantViolation {
        /// What was found to be inconsistent
        reason: &'static str,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInput => write!(f, "cannot build a tree over an empty sequence"),
            Error::Range { left, right, len } => {
                write!(f, "range [{left}, {right}] is not valid for a tree of length {len}")
            }
            Error::Unsupported { aggregate, kind } => {
                write!(f, "{aggregate} trees do not support range {kind} updates")
            }
            Error::InvariantViolation { reason } => write!(f, "invariant violated: {reason}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl Error {
    pub(crate) fn invariant(reason: &'static str) -> Self {
        Error::InvariantViolation { reason }
    }
    /// Returns `true` if the error was caused by an empty initial sequence
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput)
    }
    /// Returns `true` if the error was caused by a malformed or out-of-bounds range
    pub fn is_range(&self) -> bool {
        matches!(self, Error::Range { .. })
    }
    /// Returns `true` if the update kind is not supported by the aggregate
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::Unsupported { .. })
    }
    /// Returns `true` if the error signals an internal defect
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Error::InvariantViolation { .. })
    }
}
