use crate::{
    AggregateKind,
    Conf,
    Error,
    MinIndexAggregator,
    SegmentTree,
    SumAggregator,
    Update,
    UpdateKind,
    Value,
    XorAggregator,
};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Result of a query on an [AnyTree]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateResult {
    /// Sum of the range
    Sum(Value),
    /// Index of the rightmost minimum of the range
    MinIndex(usize),
    /// Exclusive-or of the range
    Xor(Value),
}

impl AggregateResult {
    /// Returns the aggregated value of SUM and XOR results
    pub fn as_value(&self) -> Option<Value> {
        match self {
            AggregateResult::Sum(v) | AggregateResult::Xor(v) => Some(*v),
            AggregateResult::MinIndex(_) => None,
        }
    }
    /// Returns the index of a MIN-INDEX result
    pub fn as_index(&self) -> Option<usize> {
        match self {
            AggregateResult::MinIndex(i) => Some(*i),
            _ => None,
        }
    }
}

/// A tree whose aggregate is selected at runtime
///
/// # Example
///
/// ```
/// use lazytree::{build, AggregateKind, AggregateResult, UpdateKind};
///
/// let mut tree = build(&[0, 0, 0, 0], AggregateKind::Sum).unwrap();
/// tree.update(1, 2, UpdateKind::Add, 3).unwrap();
/// tree.update(1, 2, UpdateKind::Add, 4).unwrap();
/// assert_eq!(tree.query(1, 2), Ok(AggregateResult::Sum(14)));
/// ```
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Clone)]
pub enum AnyTree {
    /// A tree over [SumAggregator]
    Sum(SegmentTree<SumAggregator>),
    /// A tree over [MinIndexAggregator]
    MinIndex(SegmentTree<MinIndexAggregator>),
    /// A tree over [XorAggregator]
    Xor(SegmentTree<XorAggregator>),
}

macro_rules! dispatch {
    ($self:expr, $tree:ident => $body:expr) => {
        match $self {
            AnyTree::Sum($tree) => $body,
            AnyTree::MinIndex($tree) => $body,
            AnyTree::Xor($tree) => $body,
        }
    };
}

/// Builds a tree over `values` computing the given aggregate
///
/// Returns [Error::InvalidInput] if `values` is empty.
pub fn build(values: &[Value], aggregate: AggregateKind) -> Result<AnyTree, Error> {
    AnyTree::with_conf(values, aggregate, Conf::default())
}

impl AnyTree {
    /// Builds a tree over `values` computing the given aggregate using the specified configuration
    pub fn with_conf(
        values: &[Value],
        aggregate: AggregateKind,
        conf: Conf,
    ) -> Result<Self, Error> {
        Ok(match aggregate {
            AggregateKind::Sum => AnyTree::Sum(SegmentTree::with_conf(values, conf)?),
            AggregateKind::MinIndex => AnyTree::MinIndex(SegmentTree::with_conf(values, conf)?),
            AggregateKind::Xor => AnyTree::Xor(SegmentTree::with_conf(values, conf)?),
        })
    }

    /// Returns the aggregate the tree computes
    pub fn kind(&self) -> AggregateKind {
        match self {
            AnyTree::Sum(_) => AggregateKind::Sum,
            AnyTree::MinIndex(_) => AggregateKind::MinIndex,
            AnyTree::Xor(_) => AggregateKind::Xor,
        }
    }

    /// Returns the number of elements
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        dispatch!(self, tree => tree.len())
    }

    /// Returns the aggregate over the inclusive range `[left, right]`
    pub fn query(&mut self, left: usize, right: usize) -> Result<AggregateResult, Error> {
        match self {
            AnyTree::Sum(tree) => tree.query(left, right).map(AggregateResult::Sum),
            AnyTree::MinIndex(tree) => tree.query(left, right).map(AggregateResult::MinIndex),
            AnyTree::Xor(tree) => tree.query(left, right).map(AggregateResult::Xor),
        }
    }

    /// Applies a range update of the given kind to `[left, right]`
    pub fn update(
        &mut self,
        left: usize,
        right: usize,
        kind: UpdateKind,
        value: Value,
    ) -> Result<(), Error> {
        let update = Update::new(kind, value);
        dispatch!(self, tree => tree.update(left, right, update))
    }

    /// Updates a single element, see [SegmentTree::point_update]
    pub fn point_update(&mut self, index: usize, value: Value) -> Result<(), Error> {
        dispatch!(self, tree => tree.point_update(index, value))
    }

    /// Returns the current value of the element at `index`
    pub fn get(&mut self, index: usize) -> Result<Value, Error> {
        dispatch!(self, tree => tree.get(index))
    }

    /// Pushes every pending update to the leaves and returns the current elements
    pub fn values(&mut self) -> Result<Vec<Value>, Error> {
        dispatch!(self, tree => tree.values())
    }

    /// Verifies the internal consistency of the tree
    pub fn validate(&self) -> Result<(), Error> {
        dispatch!(self, tree => tree.validate())
    }
}
