use crate::{
    Aggregator,
    Error,
    Span,
    Value,
    update::{Update, compose},
};

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec::Vec};

/// A tree node owning a contiguous index range
///
/// Leaves never carry a pending update; only internal nodes defer work to their children.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(bound = "A: Default"))]
#[derive(Debug, Clone)]
pub(crate) enum Node<A: Aggregator> {
    Leaf { index: usize, summary: A::Summary },
    Internal(Internal<A>),
}

#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(bound = "A: Default"))]
#[derive(Debug, Clone)]
pub(crate) struct Internal<A: Aggregator> {
    span: Span,
    /// Correct for `span` even while `pending` has not reached the children
    summary: A::Summary,
    pending: Option<Update>,
    left: Box<Node<A>>,
    right: Box<Node<A>>,
}

impl<A: Aggregator> Node<A> {
    /// Builds the subtree covering `span` bottom-up
    ///
    /// `values` must hold at least `span.hi() + 1` elements.
    pub(crate) fn build(values: &[Value], span: Span) -> Self {
        if span.is_leaf() {
            let index = span.lo();
            return Node::Leaf {
                index,
                summary: A::lift(index, values[index]),
            };
        }
        let (left_span, right_span) = span.split();
        let left = Box::new(Self::build(values, left_span));
        let right = Box::new(Self::build(values, right_span));
        Node::Internal(Internal {
            span,
            summary: A::combine(left.summary(), right.summary()),
            pending: None,
            left,
            right,
        })
    }

    #[inline]
    pub(crate) fn span(&self) -> Span {
        match self {
            Node::Leaf { index, .. } => Span::leaf(*index),
            Node::Internal(node) => node.span,
        }
    }

    #[inline]
    pub(crate) fn summary(&self) -> A::Summary {
        match self {
            Node::Leaf { summary, .. } => *summary,
            Node::Internal(node) => node.summary,
        }
    }

    /// Folds an update into this subtree without visiting its children
    fn apply(&mut self, update: Update) -> Result<(), Error> {
        match self {
            Node::Leaf { index, summary } => {
                *summary = A::apply(*summary, update, Span::leaf(*index))
                    .ok_or_else(|| Error::invariant("leaf received an update it cannot express"))?;
                Ok(())
            }
            Node::Internal(node) => node.apply(update),
        }
    }

    /// Combines the summaries of this subtree that fall within `[left, right]`
    pub(crate) fn query(&mut self, left: usize, right: usize) -> Result<A::Summary, Error> {
        let span = self.span();
        if span.disjoint(left, right) {
            return Ok(A::IDENTITY);
        }
        if span.within(left, right) {
            return Ok(self.summary());
        }
        match self {
            Node::Leaf { .. } => Err(Error::invariant("leaf partially overlaps a range")),
            Node::Internal(node) => {
                node.propagate()?;
                let lhs = node.left.query(left, right)?;
                let rhs = node.right.query(left, right)?;
                Ok(A::combine(lhs, rhs))
            }
        }
    }

    /// Applies `update` to every element within `[left, right]`
    pub(crate) fn update(&mut self, left: usize, right: usize, update: Update) -> Result<(), Error> {
        let span = self.span();
        if span.disjoint(left, right) {
            return Ok(());
        }
        if span.within(left, right) {
            return self.apply(update);
        }
        match self {
            Node::Leaf { .. } => Err(Error::invariant("leaf partially overlaps a range")),
            Node::Internal(node) => {
                node.propagate()?;
                node.left.update(left, right, update)?;
                node.right.update(left, right, update)?;
                node.pull();
                Ok(())
            }
        }
    }

    /// Descends to the leaf at `index` and applies the aggregator's point update
    pub(crate) fn point_update(&mut self, index: usize, value: Value) -> Result<(), Error> {
        match self {
            Node::Leaf { index: at, summary } => {
                *summary = A::point(*summary, *at, value);
                Ok(())
            }
            Node::Internal(node) => {
                node.propagate()?;
                if index <= node.span.mid() {
                    node.left.point_update(index, value)?;
                } else {
                    node.right.point_update(index, value)?;
                }
                node.pull();
                Ok(())
            }
        }
    }

    /// Returns the leaf summary at `index`
    pub(crate) fn leaf(&mut self, index: usize) -> Result<A::Summary, Error> {
        match self {
            Node::Leaf { summary, .. } => Ok(*summary),
            Node::Internal(node) => {
                node.propagate()?;
                if index <= node.span.mid() {
                    node.left.leaf(index)
                } else {
                    node.right.leaf(index)
                }
            }
        }
    }

    /// Pushes every pending update in the subtree down to the leaves
    pub(crate) fn flush(&mut self) -> Result<(), Error> {
        if let Node::Internal(node) = self {
            node.propagate()?;
            node.left.flush()?;
            node.right.flush()?;
        }
        Ok(())
    }

    /// Appends the leaf values of the subtree in index order
    pub(crate) fn collect(&self, out: &mut Vec<Value>) {
        match self {
            Node::Leaf { summary, .. } => out.push(A::leaf_value(*summary)),
            Node::Internal(node) => {
                node.left.collect(out);
                node.right.collect(out);
            }
        }
    }

    /// Overwrites the summary of this node, bypassing every invariant
    #[cfg(test)]
    pub(crate) fn set_summary(&mut self, value: A::Summary) {
        match self {
            Node::Leaf { summary, .. } => *summary = value,
            Node::Internal(node) => node.summary = value,
        }
    }

    pub(crate) fn has_pending(&self) -> bool {
        match self {
            Node::Leaf { .. } => false,
            Node::Internal(node) => {
                node.pending.is_some() || node.left.has_pending() || node.right.has_pending()
            }
        }
    }

    /// Checks that every internal summary matches its children once the pending update is applied
    pub(crate) fn validate(&self) -> Result<(), Error> {
        let Node::Internal(node) = self else {
            return Ok(());
        };
        let (left_span, right_span) = node.span.split();
        if node.left.span() != left_span || node.right.span() != right_span {
            return Err(Error::invariant("children do not partition the parent span"));
        }
        let (lhs, rhs) = match node.pending {
            None => (node.left.summary(), node.right.summary()),
            Some(update) => (
                A::apply(node.left.summary(), update, left_span)
                    .ok_or_else(|| Error::invariant("pending update cannot be expressed"))?,
                A::apply(node.right.summary(), update, right_span)
                    .ok_or_else(|| Error::invariant("pending update cannot be expressed"))?,
            ),
        };
        if A::combine(lhs, rhs) != node.summary {
            return Err(Error::invariant("summary is inconsistent with its children"));
        }
        node.left.validate()?;
        node.right.validate()
    }
}

impl<A: Aggregator> Internal<A> {
    #[inline]
    fn apply(&mut self, update: Update) -> Result<(), Error> {
        self.summary = A::apply(self.summary, update, self.span)
            .ok_or_else(|| Error::invariant("node received an update it cannot express"))?;
        self.pending = Some(compose(self.pending, update));
        Ok(())
    }

    /// Hands the pending update over to both children and clears it
    #[inline]
    fn propagate(&mut self) -> Result<(), Error> {
        if let Some(update) = self.pending.take() {
            self.left.apply(update)?;
            self.right.apply(update)?;
        }
        Ok(())
    }

    /// Recomputes the summary from the children
    #[inline]
    fn pull(&mut self) {
        self.summary = A::combine(self.left.summary(), self.right.summary());
    }
}
