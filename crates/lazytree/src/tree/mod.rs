mod node;

cfg_profiler! {
    pub use lazytree_stats::{Operation, Profile};
    use lazytree_stats::profile_scope;
}

use crate::{Aggregator, Error, Span, Update, Value};
use core::ops::{Bound, RangeBounds};
use log::{debug, trace};
use node::Node;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// [`SegmentTree`] Configuration
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Conf {
    /// Validate the whole tree after every mutating call
    invariant_checks: bool,
}

impl Conf {
    /// Enables or disables validation of the tree after every mutating call
    ///
    /// Validation visits every node, turning O(log N) operations into O(N) ones. Disabled by default.
    pub fn with_invariant_checks(mut self, enabled: bool) -> Self {
        self.invariant_checks = enabled;
        self
    }
    /// Returns `true` if invariant checks are enabled
    pub fn invariant_checks(&self) -> bool {
        self.invariant_checks
    }
}

/// A range-aggregation tree with lazy propagation
///
/// # How it works
///
/// The tree is a binary tree over the index range `[0, N)`. Each node splits its range at the
/// midpoint and stores the summary of its range according to the aggregator `A`.
///
/// ## Updates
///
/// A range update stops at the highest nodes whose ranges are fully covered. Those nodes fold the
/// update into their own summary and keep it as pending instead of visiting their children.
/// Outstanding updates compose according to [Update::then].
///
/// ## Queries
///
/// A query returns the summary of fully covered nodes directly. A node that is only partially
/// covered first hands its pending update to its children before descending. Queries therefore
/// need mutable access to the tree.
///
/// Every result is identical to applying all updates eagerly, in submission order, to a plain array.
///
/// ## Example
///
/// ```
/// use lazytree::{MinIndexAggregator, SegmentTree};
///
/// let mut tree: SegmentTree<MinIndexAggregator> = SegmentTree::new(&[5, 3, 3, 5]).unwrap();
/// // ties resolve to the rightmost minimum
/// assert_eq!(tree.query(1, 2), Ok(2));
/// tree.add(2, 3, 1).unwrap();
/// assert_eq!(tree.query(0, 3), Ok(1));
/// ```
///
/// ## Serialization
///
/// With the `serde` feature a tree serializes its nodes, outstanding updates included, and its
/// [Conf]. The length is derived from the root when deserializing, and the restored tree must pass
/// [SegmentTree::validate] or deserialization fails.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound = "A: Default", try_from = "Snapshot<A>")
)]
#[derive(Debug, Clone)]
pub struct SegmentTree<A: Aggregator> {
    root: Node<A>,
    #[cfg_attr(feature = "serde", serde(skip))]
    len: usize,
    conf: Conf,
    #[cfg(feature = "profiler")]
    #[cfg_attr(feature = "serde", serde(skip))]
    stats: Profile,
}

/// Serialized form of a [SegmentTree]
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(bound = "A: Default")]
struct Snapshot<A: Aggregator> {
    root: Node<A>,
    conf: Conf,
}

#[cfg(feature = "serde")]
impl<A: Aggregator> TryFrom<Snapshot<A>> for SegmentTree<A> {
    type Error = Error;

    fn try_from(snapshot: Snapshot<A>) -> Result<Self, Self::Error> {
        let span = snapshot.root.span();
        if span.lo() != 0 {
            return Err(Error::invariant("root does not start at index 0"));
        }
        let tree = Self {
            root: snapshot.root,
            len: span.len(),
            conf: snapshot.conf,
            #[cfg(feature = "profiler")]
            stats: Profile::default(),
        };
        tree.validate()?;
        Ok(tree)
    }
}

impl<A: Aggregator> SegmentTree<A> {
    /// Builds a tree over `values` using the default configuration
    ///
    /// Returns [Error::InvalidInput] if `values` is empty.
    pub fn new(values: &[Value]) -> Result<Self, Error> {
        Self::with_conf(values, Conf::default())
    }

    /// Builds a tree over `values` using the specified configuration
    ///
    /// Returns [Error::InvalidInput] if `values` is empty.
    pub fn with_conf(values: &[Value], conf: Conf) -> Result<Self, Error> {
        if values.is_empty() {
            debug!("rejected {} tree over an empty sequence", A::KIND);
            return Err(Error::InvalidInput);
        }
        #[cfg(feature = "profiler")]
        let stats = Profile::default();
        let root = {
            #[cfg(feature = "profiler")]
            profile_scope!(stats, Operation::Build, values.len());
            Node::build(values, Span::new(0, values.len() - 1))
        };
        debug!("built {} tree over {} elements", A::KIND, values.len());
        Ok(Self {
            root,
            len: values.len(),
            conf,
            #[cfg(feature = "profiler")]
            stats,
        })
    }

    /// Returns the number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree has no elements
    ///
    /// Always `false` since empty trees cannot be built.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the configuration of the tree
    pub fn conf(&self) -> Conf {
        self.conf
    }

    /// Returns the aggregate over the inclusive range `[left, right]`
    #[inline]
    pub fn query(&mut self, left: usize, right: usize) -> Result<A::Aggregate, Error> {
        self.combine(left, right).map(A::lower)
    }

    /// Returns the summary over the inclusive range `[left, right]`
    pub fn combine(&mut self, left: usize, right: usize) -> Result<A::Summary, Error> {
        self.check_range(left, right)?;
        #[cfg(feature = "profiler")]
        profile_scope!(self.stats, Operation::Query, right - left + 1);

        self.root.query(left, right)
    }

    /// Returns the summary over the given range of indices
    ///
    /// Returns [Error::Range] if the range is empty or reaches past the last element.
    pub fn combine_range<R>(&mut self, range: R) -> Result<A::Summary, Error>
    where
        R: RangeBounds<usize>,
    {
        let (left, right) = self.inclusive(&range)?;
        self.combine(left, right)
    }

    /// Returns the aggregate over the given range of indices
    ///
    /// Returns [Error::Range] if the range is empty or reaches past the last element.
    #[inline]
    pub fn combine_range_and_lower<R>(&mut self, range: R) -> Result<A::Aggregate, Error>
    where
        R: RangeBounds<usize>,
    {
        self.combine_range(range).map(A::lower)
    }

    /// Applies `update` to every element of the inclusive range `[left, right]`
    ///
    /// Returns [Error::Unsupported] without touching the tree if the aggregator cannot express the
    /// update kind over a range.
    pub fn update(&mut self, left: usize, right: usize, update: Update) -> Result<(), Error> {
        self.check_range(left, right)?;
        #[cfg(feature = "profiler")]
        profile_scope!(self.stats, Operation::Update, right - left + 1);

        if !A::supports(update.kind()) {
            debug!("rejected range {} on {} tree", update.kind(), A::KIND);
            return Err(Error::Unsupported {
                aggregate: A::KIND,
                kind: update.kind(),
            });
        }
        trace!("{:?} over [{}, {}]", update, left, right);
        self.root.update(left, right, update)?;
        self.check_invariants()
    }

    /// Adds `value` to every element of `[left, right]`
    #[inline]
    pub fn add(&mut self, left: usize, right: usize, value: Value) -> Result<(), Error> {
        self.update(left, right, Update::Add(value))
    }

    /// Sets every element of `[left, right]` to `value`
    #[inline]
    pub fn assign(&mut self, left: usize, right: usize, value: Value) -> Result<(), Error> {
        self.update(left, right, Update::Assign(value))
    }

    /// Updates a single element using the aggregator's point semantics
    ///
    /// SUM and MIN-INDEX trees overwrite the element while XOR trees toggle it with `value`.
    pub fn point_update(&mut self, index: usize, value: Value) -> Result<(), Error> {
        self.check_range(index, index)?;
        #[cfg(feature = "profiler")]
        profile_scope!(self.stats, Operation::PointUpdate, 1);

        trace!("point update {} at {}", value, index);
        self.root.point_update(index, value)?;
        self.check_invariants()
    }

    /// Returns the current value of the element at `index`
    pub fn get(&mut self, index: usize) -> Result<Value, Error> {
        self.check_range(index, index)?;
        self.root.leaf(index).map(A::leaf_value)
    }

    /// Pushes every pending update down to the leaves and returns the current elements
    ///
    /// Afterwards [Self::has_pending] returns `false` until the next range update.
    pub fn values(&mut self) -> Result<Vec<Value>, Error> {
        {
            #[cfg(feature = "profiler")]
            profile_scope!(self.stats, Operation::Flush, self.len);
            self.root.flush()?;
        }
        let mut values = Vec::with_capacity(self.len);
        self.root.collect(&mut values);
        Ok(values)
    }

    /// Returns `true` if any node still defers an update to its children
    pub fn has_pending(&self) -> bool {
        self.root.has_pending()
    }

    /// Verifies that the root covers `[0, len)` and every node summary is consistent with its children
    ///
    /// Returns [Error::InvariantViolation] describing the first inconsistency found.
    pub fn validate(&self) -> Result<(), Error> {
        if self.len == 0 || self.root.span() != Span::new(0, self.len - 1) {
            return Err(Error::invariant("root span does not match the tree length"));
        }
        self.root.validate()
    }

    #[cfg(feature = "profiler")]
    /// Returns the per-operation profile of the tree
    pub fn stats(&self) -> &Profile {
        &self.stats
    }

    #[inline]
    fn check_range(&self, left: usize, right: usize) -> Result<(), Error> {
        if left > right || right >= self.len {
            debug!(
                "rejected range [{}, {}] on tree of length {}",
                left, right, self.len
            );
            return Err(Error::Range {
                left,
                right,
                len: self.len,
            });
        }
        Ok(())
    }

    #[inline]
    fn check_invariants(&self) -> Result<(), Error> {
        if self.conf.invariant_checks {
            self.validate()
        } else {
            Ok(())
        }
    }

    // converts range bounds into an inclusive, non-empty pair of indices
    fn inclusive(&self, range: &impl RangeBounds<usize>) -> Result<(usize, usize), Error> {
        let start = match range.start_bound() {
            Bound::Included(&n) => Some(n),
            Bound::Excluded(&n) => n.checked_add(1),
            Bound::Unbounded => Some(0),
        };
        let end = match range.end_bound() {
            Bound::Included(&n) => Some(n),
            Bound::Excluded(&n) => n.checked_sub(1),
            Bound::Unbounded => Some(self.len - 1),
        };
        match (start, end) {
            (Some(left), Some(right)) => Ok((left, right)),
            (left, right) => Err(Error::Range {
                left: left.unwrap_or(usize::MAX),
                right: right.unwrap_or(0),
                len: self.len,
            }),
        }
    }

    #[cfg(feature = "profiler")]
    /// Prints the profile of the [SegmentTree]
    pub fn print_stats(&self) {
        use prettytable::{Table, row};
        let mut table = Table::new();
        table.add_row(row![
            "operation", "count", "p50", "p90", "p99", "max", "span p50", "span max",
        ]);
        let ns = |p: f64| -> String { format!("{:.2}ns", p) };

        for (operation, stats) in self.stats.iter() {
            let latency = stats.latency().percentiles();
            let span = stats.span().percentiles();
            table.add_row(row![
                operation.name(),
                latency.count,
                ns(latency.p50),
                ns(latency.p90),
                ns(latency.p99),
                ns(latency.max),
                format!("{:.0}", span.p50),
                format!("{:.0}", span.max),
            ]);
        }

        println!("===={} SegmentTree Profiler Dump====", A::KIND);
        table.printstd();
    }
}

#[cfg(feature = "profiler")]
impl<A: Aggregator> Drop for SegmentTree<A> {
    fn drop(&mut self) {
        self.print_stats();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MinIndexAggregator, SumAggregator, UpdateKind, XorAggregator};

    #[test]
    fn empty_input_test() {
        let tree = SegmentTree::<SumAggregator>::new(&[]);
        assert_eq!(tree.unwrap_err(), Error::InvalidInput);
    }

    #[test]
    fn assign_dominance_test() {
        let mut tree: SegmentTree<SumAggregator> = SegmentTree::new(&[1, 1, 1, 1]).unwrap();
        tree.add(0, 3, 5).unwrap();
        tree.assign(0, 3, 2).unwrap();
        assert_eq!(tree.query(0, 3), Ok(8));
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn add_accumulation_test() {
        let mut tree: SegmentTree<SumAggregator> = SegmentTree::new(&[0, 0, 0, 0]).unwrap();
        tree.add(1, 2, 3).unwrap();
        tree.add(1, 2, 4).unwrap();
        assert_eq!(tree.query(0, 3), Ok(14));
        assert_eq!(tree.query(0, 0), Ok(0));
        assert_eq!(tree.query(1, 1), Ok(7));
        assert_eq!(tree.query(1, 2), Ok(14));
        assert_eq!(tree.query(3, 3), Ok(0));
    }

    #[test]
    fn add_after_assign_test() {
        let mut tree: SegmentTree<SumAggregator> = SegmentTree::new(&[9, 9, 9, 9, 9]).unwrap();
        tree.assign(0, 4, 1).unwrap();
        tree.add(0, 4, 2).unwrap();
        tree.add(1, 3, 10).unwrap();
        assert_eq!(tree.values(), Ok(vec![3, 13, 13, 13, 3]));
        assert_eq!(tree.query(0, 4), Ok(45));
    }

    #[test]
    fn identity_update_test() {
        let mut tree: SegmentTree<SumAggregator> = SegmentTree::new(&[4, -2, 7]).unwrap();
        for i in 0..3 {
            tree.add(i, i, 0).unwrap();
        }
        assert_eq!(tree.query(0, 0), Ok(4));
        assert_eq!(tree.query(1, 1), Ok(-2));
        assert_eq!(tree.query(2, 2), Ok(7));
    }

    #[test]
    fn min_index_tie_break_test() {
        let mut tree: SegmentTree<MinIndexAggregator> = SegmentTree::new(&[5, 3, 3, 5]).unwrap();
        assert_eq!(tree.query(1, 2), Ok(2));
        assert_eq!(tree.query(0, 1), Ok(1));
        assert_eq!(tree.query(0, 3), Ok(2));
    }

    #[test]
    fn min_index_range_updates_test() {
        let mut tree: SegmentTree<MinIndexAggregator> =
            SegmentTree::new(&[4, 8, 1, 6, 2, 9]).unwrap();
        assert_eq!(tree.query(0, 5), Ok(2));
        tree.add(0, 2, 5).unwrap(); // [9, 13, 6, 6, 2, 9]
        assert_eq!(tree.query(0, 3), Ok(3));
        tree.assign(3, 5, 0).unwrap(); // [9, 13, 6, 0, 0, 0]
        assert_eq!(tree.query(0, 5), Ok(5));
        assert_eq!(tree.query(0, 3), Ok(3));
        tree.add(5, 5, 1).unwrap(); // [9, 13, 6, 0, 0, 1]
        assert_eq!(tree.query(2, 5), Ok(4));
        tree.point_update(1, -1).unwrap(); // [9, -1, 6, 0, 0, 1]
        assert_eq!(tree.query(0, 5), Ok(1));
        assert_eq!(tree.combine(0, 5).map(|s| s.value()), Ok(-1));
        assert_eq!(tree.values(), Ok(vec![9, -1, 6, 0, 0, 1]));
    }

    #[test]
    fn xor_self_cancellation_test() {
        let (a, b, c) = (0b1011, 0b0110, 0b1100);
        let mut tree: SegmentTree<XorAggregator> = SegmentTree::new(&[a, b, c]).unwrap();
        let before = tree.query(0, 2).unwrap();
        assert_eq!(before, a ^ b ^ c);
        tree.point_update(1, b).unwrap();
        assert_eq!(tree.query(0, 2), Ok(a ^ c));
        assert_eq!(tree.get(1), Ok(0));
        tree.point_update(1, b).unwrap();
        assert_eq!(tree.query(0, 2), Ok(before));
    }

    #[test]
    fn xor_range_assign_test() {
        let mut tree: SegmentTree<XorAggregator> = SegmentTree::new(&[1, 2, 3, 4, 5]).unwrap();
        tree.assign(0, 3, 7).unwrap();
        assert_eq!(tree.query(0, 3), Ok(0));
        assert_eq!(tree.query(0, 2), Ok(7));
        assert_eq!(tree.query(0, 4), Ok(5));
        tree.point_update(2, 7).unwrap();
        assert_eq!(tree.values(), Ok(vec![7, 7, 0, 7, 5]));
    }

    #[test]
    fn xor_rejects_range_add_test() {
        let mut tree: SegmentTree<XorAggregator> = SegmentTree::new(&[1, 2, 3]).unwrap();
        let err = tree.add(0, 2, 1).unwrap_err();
        assert_eq!(
            err,
            Error::Unsupported {
                aggregate: crate::AggregateKind::Xor,
                kind: UpdateKind::Add,
            }
        );
        // the tree is left untouched
        assert!(!tree.has_pending());
        assert_eq!(tree.query(0, 2), Ok(0));
    }

    #[test]
    fn extreme_values_test() {
        let mut tree: SegmentTree<SumAggregator> = SegmentTree::new(&[0, 0]).unwrap();
        tree.assign(0, 1, Value::MAX).unwrap();
        assert_eq!(tree.query(0, 0), Ok(Value::MAX));
        assert_eq!(tree.query(1, 1), Ok(Value::MAX));
        assert_eq!(tree.query(0, 1), Ok(Value::MAX.wrapping_mul(2)));

        // the pending delta overflows while both elements stay in range
        let mut tree: SegmentTree<SumAggregator> = SegmentTree::new(&[-10, -20]).unwrap();
        tree.add(0, 1, Value::MAX).unwrap();
        tree.add(0, 1, 5).unwrap();
        assert_eq!(tree.query(1, 1), Ok(Value::MAX - 15));
        assert_eq!(tree.values(), Ok(vec![Value::MAX - 5, Value::MAX - 15]));

        let mut tree: SegmentTree<MinIndexAggregator> =
            SegmentTree::new(&[-10, -20, -20, Value::MIN]).unwrap();
        tree.add(0, 2, Value::MAX).unwrap();
        tree.add(0, 2, 5).unwrap();
        assert_eq!(tree.query(0, 2), Ok(2));
        assert_eq!(tree.query(0, 0), Ok(0));
        assert_eq!(tree.query(0, 3), Ok(3));
        assert_eq!(tree.get(1), Ok(Value::MAX - 15));
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn range_errors_test() {
        let mut tree: SegmentTree<SumAggregator> = SegmentTree::new(&[1, 2, 3]).unwrap();
        assert_eq!(
            tree.query(2, 1),
            Err(Error::Range {
                left: 2,
                right: 1,
                len: 3
            })
        );
        assert!(tree.query(0, 3).unwrap_err().is_range());
        assert!(tree.add(3, 3, 1).unwrap_err().is_range());
        assert!(tree.point_update(5, 1).unwrap_err().is_range());
        assert!(tree.get(3).unwrap_err().is_range());
        // nothing was applied
        assert_eq!(tree.values(), Ok(vec![1, 2, 3]));
    }

    #[test]
    fn range_bounds_test() {
        let mut tree: SegmentTree<SumAggregator> = SegmentTree::new(&[1, 2, 3, 4]).unwrap();
        assert_eq!(tree.combine_range_and_lower(..), Ok(10));
        assert_eq!(tree.combine_range_and_lower(1..3), Ok(5));
        assert_eq!(tree.combine_range_and_lower(1..=3), Ok(9));
        assert_eq!(tree.combine_range_and_lower(2..), Ok(7));
        assert_eq!(tree.combine_range(..1), Ok(1));
        assert!(tree.combine_range(2..2).unwrap_err().is_range());
        assert!(tree.combine_range(..0).unwrap_err().is_range());
        assert!(tree.combine_range(0..5).unwrap_err().is_range());
    }

    #[test]
    fn boundary_single_index_test() {
        let mut tree: SegmentTree<SumAggregator> = SegmentTree::new(&[0; 8]).unwrap();
        tree.add(0, 7, 1).unwrap();
        tree.add(2, 5, 1).unwrap();
        tree.assign(3, 6, 10).unwrap();
        tree.add(0, 3, 2).unwrap();
        tree.add(3, 3, -4).unwrap();
        assert_eq!(tree.query(3, 3), Ok(8));
        assert_eq!(tree.get(3), Ok(8));
        assert_eq!(tree.query(2, 2), Ok(4));
        assert_eq!(tree.query(6, 6), Ok(10));
        assert_eq!(tree.query(7, 7), Ok(1));
    }

    #[test]
    fn flush_clears_pending_test() {
        let mut tree: SegmentTree<SumAggregator> = SegmentTree::new(&[1, 2, 3, 4, 5, 6]).unwrap();
        assert!(!tree.has_pending());
        tree.add(0, 5, 1).unwrap();
        tree.assign(1, 4, 0).unwrap();
        assert!(tree.has_pending());
        assert_eq!(tree.values(), Ok(vec![2, 0, 0, 0, 0, 7]));
        assert!(!tree.has_pending());
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn invariant_checks_conf_test() {
        let conf = Conf::default().with_invariant_checks(true);
        assert!(conf.invariant_checks());
        let mut tree: SegmentTree<MinIndexAggregator> =
            SegmentTree::with_conf(&[3, 1, 4, 1, 5, 9, 2, 6], conf).unwrap();
        assert_eq!(tree.conf(), conf);
        tree.add(0, 4, 2).unwrap();
        tree.assign(2, 7, 1).unwrap();
        tree.point_update(0, 0).unwrap();
        assert_eq!(tree.query(0, 7), Ok(0));
        assert_eq!(tree.query(1, 7), Ok(7));
    }

    #[test]
    fn invariant_checks_report_violation_test() {
        let values = [1, 2, 3, 4];
        let conf = Conf::default().with_invariant_checks(true);
        let mut checked: SegmentTree<SumAggregator> = SegmentTree::with_conf(&values, conf).unwrap();
        let mut unchecked: SegmentTree<SumAggregator> = SegmentTree::new(&values).unwrap();
        checked.root.set_summary(100);
        unchecked.root.set_summary(100);

        // a whole-range update folds into the corrupted root summary
        let err = checked.add(0, 3, 1).unwrap_err();
        assert!(err.is_invariant_violation());
        assert_eq!(unchecked.add(0, 3, 1), Ok(()));
        assert!(unchecked.validate().unwrap_err().is_invariant_violation());
    }

    #[test]
    fn root_span_mismatch_test() {
        let mut tree: SegmentTree<SumAggregator> = SegmentTree::new(&[1, 2, 3]).unwrap();
        assert!(tree.validate().is_ok());
        tree.len = 5;
        assert!(tree.validate().unwrap_err().is_invariant_violation());
        tree.len = 2;
        assert!(tree.validate().unwrap_err().is_invariant_violation());
    }

    #[test]
    fn single_element_test() {
        let mut tree: SegmentTree<SumAggregator> = SegmentTree::new(&[42]).unwrap();
        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        tree.add(0, 0, 1).unwrap();
        tree.assign(0, 0, 5).unwrap();
        tree.add(0, 0, 1).unwrap();
        assert_eq!(tree.query(0, 0), Ok(6));
        assert!(!tree.has_pending());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip_test() {
        let mut tree: SegmentTree<SumAggregator> = SegmentTree::new(&[1, 2, 3, 4, 5]).unwrap();
        tree.add(0, 4, 3).unwrap();
        tree.assign(1, 2, 0).unwrap();
        assert!(tree.has_pending());

        let bytes = postcard::to_allocvec(&tree).unwrap();
        let mut restored: SegmentTree<SumAggregator> = postcard::from_bytes(&bytes).unwrap();
        assert!(restored.has_pending());
        assert!(restored.validate().is_ok());
        assert_eq!(restored.query(0, 4), tree.query(0, 4));
        assert_eq!(restored.values(), Ok(vec![4, 0, 0, 7, 8]));
        assert_eq!(restored.len(), 5);
        assert_eq!(restored.conf(), tree.conf());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_rejects_inconsistent_tree_test() {
        // the root of a stored tree must start at index 0
        let detached = Node::<SumAggregator>::build(&[1, 2, 3, 4, 5], Span::new(2, 4));
        let bytes = postcard::to_allocvec(&(detached, Conf::default())).unwrap();
        assert!(postcard::from_bytes::<SegmentTree<SumAggregator>>(&bytes).is_err());

        // the length always follows the stored root
        let rooted = Node::<SumAggregator>::build(&[1, 2, 3], Span::new(0, 2));
        let bytes = postcard::to_allocvec(&(rooted, Conf::default())).unwrap();
        let restored: SegmentTree<SumAggregator> = postcard::from_bytes(&bytes).unwrap();
        assert_eq!(restored.len(), 3);

        let mut tree: SegmentTree<SumAggregator> = SegmentTree::new(&[1, 2, 3]).unwrap();
        tree.root.set_summary(100);
        let bytes = postcard::to_allocvec(&tree).unwrap();
        assert!(postcard::from_bytes::<SegmentTree<SumAggregator>>(&bytes).is_err());
    }
}
