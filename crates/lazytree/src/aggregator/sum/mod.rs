use super::{AggregateKind, Aggregator, Sealed};
use crate::{Span, Update, Value};

/// Sums the elements of a range
///
/// A range-add of `v` over `len` elements grows the sum by `v * len`, and a range-assign of `v`
/// turns the sum into `v * len`.
///
/// Sums use wrapping two's complement arithmetic. A range whose true sum exceeds [Value] therefore
/// reports the wrapped sum, while every sub-range that fits is still exact.
#[derive(Default, Debug, Clone, Copy)]
pub struct SumAggregator;

impl Sealed for SumAggregator {}

impl Aggregator for SumAggregator {
    const IDENTITY: Self::Summary = 0;
    const KIND: AggregateKind = AggregateKind::Sum;

    type Summary = Value;
    type Aggregate = Value;

    #[inline]
    fn lift(_index: usize, value: Value) -> Self::Summary {
        value
    }

    #[inline]
    fn combine(a: Self::Summary, b: Self::Summary) -> Self::Summary {
        a.wrapping_add(b)
    }

    #[inline]
    fn lower(a: Self::Summary) -> Self::Aggregate {
        a
    }

    #[inline]
    fn apply(summary: Self::Summary, update: Update, span: Span) -> Option<Self::Summary> {
        let len = span.len() as Value;
        Some(match update {
            Update::Add(v) => summary.wrapping_add(v.wrapping_mul(len)),
            Update::Assign(v) => v.wrapping_mul(len),
        })
    }

    #[inline]
    fn leaf_value(summary: Self::Summary) -> Value {
        summary
    }
}
