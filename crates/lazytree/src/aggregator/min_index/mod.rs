use super::{AggregateKind, Aggregator, Sealed, SummaryType};
use crate::{Span, Update, Value};

/// Summary of a [MinIndexAggregator] range: the minimum value and where it is located
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinIndexState {
    value: Value,
    index: usize,
}

impl MinIndexState {
    /// Creates a new state
    pub const fn new(value: Value, index: usize) -> Self {
        Self { value, index }
    }
    /// Returns the minimum value of the range
    pub fn value(&self) -> Value {
        self.value
    }
    /// Returns the index of the minimum value
    pub fn index(&self) -> usize {
        self.index
    }
}

impl SummaryType for MinIndexState {}

/// Finds the position of the smallest element of a range
///
/// If several elements share the minimum value, the rightmost one is reported.
///
/// Range updates keep the state exact without revisiting the leaves: an add shifts every element
/// by the same amount so the position of the minimum stays put, and an assign makes every element
/// equal so the last index of the range wins the tie.
///
/// Element values shift with wrapping arithmetic, so updates never panic. Positions are exact as
/// long as every element stays within [Value]; an element pushed past `Value::MAX` wraps around and
/// is compared by its wrapped value from then on.
#[derive(Default, Debug, Clone, Copy)]
pub struct MinIndexAggregator;

impl Sealed for MinIndexAggregator {}

impl Aggregator for MinIndexAggregator {
    // ties prefer the larger index, which makes index 0 neutral for Value::MAX
    const IDENTITY: Self::Summary = MinIndexState::new(Value::MAX, 0);
    const KIND: AggregateKind = AggregateKind::MinIndex;

    type Summary = MinIndexState;
    type Aggregate = usize;

    #[inline]
    fn lift(index: usize, value: Value) -> Self::Summary {
        MinIndexState::new(value, index)
    }

    #[inline]
    fn combine(a: Self::Summary, b: Self::Summary) -> Self::Summary {
        if a.value < b.value {
            a
        } else if b.value < a.value {
            b
        } else if a.index >= b.index {
            a
        } else {
            b
        }
    }

    #[inline]
    fn lower(a: Self::Summary) -> Self::Aggregate {
        a.index
    }

    #[inline]
    fn apply(summary: Self::Summary, update: Update, span: Span) -> Option<Self::Summary> {
        Some(match update {
            Update::Add(v) => MinIndexState::new(summary.value.wrapping_add(v), summary.index),
            Update::Assign(v) => MinIndexState::new(v, span.hi()),
        })
    }

    #[inline]
    fn leaf_value(summary: Self::Summary) -> Value {
        summary.value
    }
}
