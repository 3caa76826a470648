/// A non-empty inclusive index range `[lo, hi]` owned by a tree node
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    lo: usize,
    hi: usize,
}

impl Span {
    /// Creates a span covering `[lo, hi]`
    ///
    /// # Panics
    ///
    /// Panics if `lo > hi`
    pub fn new(lo: usize, hi: usize) -> Self {
        assert!(lo <= hi, "span lower bound {lo} exceeds upper bound {hi}");
        Self { lo, hi }
    }
    /// Creates a span covering the single index `index`
    #[inline]
    pub fn leaf(index: usize) -> Self {
        Self {
            lo: index,
            hi: index,
        }
    }
    /// Returns the first index of the span
    #[inline]
    pub fn lo(&self) -> usize {
        self.lo
    }
    /// Returns the last index of the span
    #[inline]
    pub fn hi(&self) -> usize {
        self.hi
    }
    /// Returns the number of indices covered by the span
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.hi - self.lo + 1
    }
    /// Returns `true` if the span covers a single index
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.lo == self.hi
    }
    /// Returns the split point, the last index of the left half
    #[inline]
    pub fn mid(&self) -> usize {
        self.lo + (self.hi - self.lo) / 2
    }
    /// Splits the span into `[lo, mid]` and `[mid + 1, hi]`
    ///
    /// Must not be called on a leaf span.
    #[inline]
    pub(crate) fn split(&self) -> (Span, Span) {
        let mid = self.mid();
        (
            Span {
                lo: self.lo,
                hi: mid,
            },
            Span {
                lo: mid + 1,
                hi: self.hi,
            },
        )
    }
    /// Returns `true` if the span lies completely inside `[left, right]`
    #[inline]
    pub fn within(&self, left: usize, right: usize) -> bool {
        left <= self.lo && self.hi <= right
    }
    /// Returns `true` if the span shares no index with `[left, right]`
    #[inline]
    pub fn disjoint(&self, left: usize, right: usize) -> bool {
        right < self.lo || self.hi < left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_test() {
        let span = Span::new(0, 4);
        assert_eq!(span.len(), 5);
        assert_eq!(span.mid(), 2);
        let (left, right) = span.split();
        assert_eq!(left, Span::new(0, 2));
        assert_eq!(right, Span::new(3, 4));

        let (left, right) = Span::new(5, 6).split();
        assert!(left.is_leaf() && right.is_leaf());
        assert_eq!((left.lo(), right.hi()), (5, 6));
    }

    #[test]
    fn overlap_test() {
        let span = Span::new(2, 5);
        assert!(span.within(0, 5));
        assert!(span.within(2, 5));
        assert!(!span.within(3, 9));
        assert!(span.disjoint(0, 1));
        assert!(span.disjoint(6, 8));
        assert!(!span.disjoint(5, 8));
    }

    #[test]
    #[should_panic]
    fn inverted_span_test() {
        let _ = Span::new(3, 2);
    }
}
