use crate::Value;
use core::fmt::{self, Display};

/// The kind of a range update, without its value
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateKind {
    /// Add a value to every element of the range
    Add,
    /// Overwrite every element of the range with a value
    Assign,
}

impl Display for UpdateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateKind::Add => f.write_str("add"),
            UpdateKind::Assign => f.write_str("assign"),
        }
    }
}

/// A range update
///
/// Nodes keep at most one outstanding update in an `Option<Update>`, so a node is either clean,
/// has a pending add or has a pending assign.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Update {
    /// Adds the value to every element
    Add(Value),
    /// Sets every element to the value
    Assign(Value),
}

impl Update {
    /// Creates an update from its kind and value
    #[inline]
    pub fn new(kind: UpdateKind, value: Value) -> Self {
        match kind {
            UpdateKind::Add => Update::Add(value),
            UpdateKind::Assign => Update::Assign(value),
        }
    }
    /// Returns the kind of the update
    #[inline]
    pub fn kind(&self) -> UpdateKind {
        match self {
            Update::Add(_) => UpdateKind::Add,
            Update::Assign(_) => UpdateKind::Assign,
        }
    }
    /// Returns the value carried by the update
    #[inline]
    pub fn value(&self) -> Value {
        match self {
            Update::Add(v) | Update::Assign(v) => *v,
        }
    }
    /// Composes `next` on top of this update, producing a single equivalent update
    ///
    /// | self      | next      | result        |
    /// |-----------|-----------|---------------|
    /// | add u     | add v     | add (u + v)   |
    /// | add u     | assign v  | assign v      |
    /// | assign u  | add v     | assign (u + v)|
    /// | assign u  | assign v  | assign v      |
    ///
    /// Deltas are summed with wrapping arithmetic: two adds may overflow together even though every
    /// element they are applied to stays in range, and the wrapped delta still lands those elements
    /// on their exact values.
    #[inline]
    pub fn then(self, next: Update) -> Update {
        match (self, next) {
            (_, Update::Assign(v)) => Update::Assign(v),
            (Update::Add(u), Update::Add(v)) => Update::Add(u.wrapping_add(v)),
            (Update::Assign(u), Update::Add(v)) => Update::Assign(u.wrapping_add(v)),
        }
    }
}

/// Merges an incoming update into a possibly empty pending slot
#[inline]
pub(crate) fn compose(pending: Option<Update>, next: Update) -> Update {
    match pending {
        Some(prev) => prev.then(next),
        None => next,
    }
}
