use super::{AggregateKind, Aggregator, Sealed};
use crate::{Span, Update, UpdateKind, Value};

/// Computes the bitwise exclusive-or of a range
///
/// Point updates toggle the element (`element ^= value`), so applying the same point update twice
/// restores the previous state. Range-assign is supported through parity: an even number of equal
/// elements cancels out. Range-add cannot be folded into an XOR summary and is rejected.
#[derive(Default, Debug, Clone, Copy)]
pub struct XorAggregator;

impl Sealed for XorAggregator {}

impl Aggregator for XorAggregator {
    const IDENTITY: Self::Summary = 0;
    const KIND: AggregateKind = AggregateKind::Xor;

    type Summary = Value;
    type Aggregate = Value;

    #[inline]
    fn lift(_index: usize, value: Value) -> Self::Summary {
        value
    }

    #[inline]
    fn combine(a: Self::Summary, b: Self::Summary) -> Self::Summary {
        a ^ b
    }

    #[inline]
    fn lower(a: Self::Summary) -> Self::Aggregate {
        a
    }

    #[inline]
    fn apply(_summary: Self::Summary, update: Update, span: Span) -> Option<Self::Summary> {
        match update {
            Update::Add(_) => None,
            Update::Assign(v) if span.len() % 2 == 1 => Some(v),
            Update::Assign(_) => Some(0),
        }
    }

    #[inline]
    fn leaf_value(summary: Self::Summary) -> Value {
        summary
    }

    #[inline]
    fn point(summary: Self::Summary, _index: usize, value: Value) -> Self::Summary {
        summary ^ value
    }

    #[inline]
    fn supports(kind: UpdateKind) -> bool {
        kind == UpdateKind::Assign
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xor_combine_test() {
        assert_eq!(XorAggregator::fold(0, &[0b1010, 0b0110, 0b0001]), 0b1101);
        assert_eq!(XorAggregator::combine(0b11, XorAggregator::IDENTITY), 0b11);
    }

    #[test]
    fn xor_toggle_test() {
        let leaf = XorAggregator::lift(0, 9);
        let toggled = XorAggregator::point(leaf, 0, 5);
        assert_eq!(toggled, 12);
        assert_eq!(XorAggregator::point(toggled, 0, 5), leaf);
    }

    #[test]
    fn xor_apply_test() {
        assert_eq!(
            XorAggregator::apply(1, Update::Assign(6), Span::new(0, 2)),
            Some(6)
        );
        assert_eq!(
            XorAggregator::apply(1, Update::Assign(6), Span::new(0, 3)),
            Some(0)
        );
        assert_eq!(XorAggregator::apply(1, Update::Add(6), Span::leaf(0)), None);
        assert!(!XorAggregator::supports(UpdateKind::Add));
        assert!(XorAggregator::supports(UpdateKind::Assign));
    }
}
