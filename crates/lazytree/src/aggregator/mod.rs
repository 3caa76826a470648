use crate::{Span, Update, UpdateKind, Value};
use core::fmt::{self, Debug, Display};

/// Range MIN aggregation reporting the position of the minimum
pub mod min_index;
/// Range SUM aggregation
pub mod sum;
/// Range XOR aggregation
pub mod xor;

mod sealed {
    pub trait Sealed {}
}
pub(crate) use sealed::Sealed;

/// The fixed set of aggregates a tree can be built with
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateKind {
    /// See [sum::SumAggregator]
    Sum,
    /// See [min_index::MinIndexAggregator]
    MinIndex,
    /// See [xor::XorAggregator]
    Xor,
}

impl Display for AggregateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateKind::Sum => f.write_str("SUM"),
            AggregateKind::MinIndex => f.write_str("MIN-INDEX"),
            AggregateKind::Xor => f.write_str("XOR"),
        }
    }
}

/// Aggregation interface used by [SegmentTree](crate::SegmentTree)
///
/// Every node of a tree stores a [Self::Summary] of its range. Summaries of adjacent ranges are
/// combined left then right, and range updates are folded directly into a summary given the span
/// the summary covers.
///
/// The trait is sealed: the supported aggregates are [sum], [min_index] and [xor].
pub trait Aggregator: Sealed + Default + Debug + Clone + Copy + Send + 'static {
    /// Identity value for [Self::Summary]
    ///
    /// Combining any summary with the identity, on either side, returns that summary.
    const IDENTITY: Self::Summary;

    /// The runtime tag of this aggregator
    const KIND: AggregateKind;

    /// Summary of a contiguous range
    type Summary: SummaryType;

    /// Query result that is lowered from a [Self::Summary]
    type Aggregate: Debug + Copy + PartialEq + Send;

    /// Lifts the initial value at `index` into a leaf summary
    fn lift(index: usize, value: Value) -> Self::Summary;

    /// Combines the summaries of two adjacent ranges, `a` being the left one
    fn combine(a: Self::Summary, b: Self::Summary) -> Self::Summary;

    /// Lowers a [Self::Summary] into a final [Self::Aggregate]
    fn lower(a: Self::Summary) -> Self::Aggregate;

    /// Applies a range update to the summary of `span`
    ///
    /// Returns `None` if the aggregate cannot express the update, see [Self::supports].
    fn apply(summary: Self::Summary, update: Update, span: Span) -> Option<Self::Summary>;

    /// Returns the element value held by a leaf summary
    fn leaf_value(summary: Self::Summary) -> Value;

    /// Applies a point update to the leaf summary at `index`
    ///
    /// Overwrites the element by default.
    #[inline]
    fn point(summary: Self::Summary, index: usize, value: Value) -> Self::Summary {
        let _ = summary;
        Self::lift(index, value)
    }

    /// Returns `true` if range updates of the given kind can be expressed on summaries
    #[inline]
    fn supports(kind: UpdateKind) -> bool {
        let _ = kind;
        true
    }

    /// Folds a sequence of leaf values into a summary without any tree
    ///
    /// `offset` is the index of the first value.
    #[inline]
    fn fold(offset: usize, values: &[Value]) -> Self::Summary {
        values
            .iter()
            .enumerate()
            .map(|(i, value)| Self::lift(offset + i, *value))
            .fold(Self::IDENTITY, Self::combine)
    }
}

/// Trait bounds for a summary type
#[cfg(not(feature = "serde"))]
pub trait SummaryBounds: Default + Debug + Clone + Copy + PartialEq + Send {}

/// Trait bounds for a summary type
#[cfg(feature = "serde")]
pub trait SummaryBounds:
    Default
    + Debug
    + Clone
    + Copy
    + PartialEq
    + Send
    + serde::Serialize
    + for<'a> serde::Deserialize<'a>
{
}

#[cfg(not(feature = "serde"))]
impl<T> SummaryBounds for T where T: Default + Debug + Clone + Copy + PartialEq + Send {}

#[cfg(feature = "serde")]
impl<T> SummaryBounds for T where
    T: Default
        + Debug
        + Clone
        + Copy
        + PartialEq
        + Send
        + serde::Serialize
        + for<'a> serde::Deserialize<'a>
{
}

/// A summary type stored in tree nodes
pub trait SummaryType: SummaryBounds {}

macro_rules! primitive_summary {
    ($type:ty) => {
        impl SummaryType for $type {}
    };
}

primitive_summary!(i64);
