//! lazytree-stats profiles the operations of a lazytree instance
//!
//! Every recorded operation contributes two samples: how long it took and how many elements it
//! covered. Both are kept in [DDSketch](https://github.com/mheffner/rust-sketches-ddsketch) sketches
//! so percentiles can be reported without storing individual samples.
#![deny(missing_docs)]

use core::{cell::RefCell, fmt};
use minstant::Instant;
use sketches_ddsketch::{Config, DDSketch};

/// Starts profiling an operation for the rest of the enclosing scope
///
/// Expands to a [Measure] guard: `$profile.measure($operation, $span)`.
#[macro_export]
macro_rules! profile_scope {
    ($profile:expr, $operation:expr, $span:expr) => {
        let _measure = $profile.measure($operation, $span);
    };
}

/// Tree operations that are profiled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Building a tree from its initial values
    Build,
    /// Range query
    Query,
    /// Range add or range assign
    Update,
    /// Single element update
    PointUpdate,
    /// Pushing every pending update to the leaves
    Flush,
}

impl Operation {
    /// All operations in reporting order
    pub const ALL: [Operation; 5] = [
        Operation::Build,
        Operation::Query,
        Operation::Update,
        Operation::PointUpdate,
        Operation::Flush,
    ];

    /// Returns a short name for reports
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Build => "build",
            Operation::Query => "query",
            Operation::Update => "update",
            Operation::PointUpdate => "point update",
            Operation::Flush => "flush",
        }
    }
}

/// Summary of a sketch
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Percentiles {
    /// Number of samples
    pub count: usize,
    /// Smallest sample
    pub min: f64,
    /// Median
    pub p50: f64,
    /// 90th percentile
    pub p90: f64,
    /// 99th percentile
    pub p99: f64,
    /// Largest sample
    pub max: f64,
}

/// A sketch that can be recorded into through a shared reference
#[derive(Clone)]
pub struct Sketch(RefCell<DDSketch>);

impl Default for Sketch {
    fn default() -> Self {
        Self(RefCell::new(DDSketch::new(Config::defaults())))
    }
}

impl Sketch {
    /// Adds a sample
    #[inline]
    pub fn record(&self, sample: f64) {
        self.0.borrow_mut().add(sample);
    }

    /// Returns the number of recorded samples
    pub fn count(&self) -> usize {
        self.0.borrow().count()
    }

    /// Returns the percentiles of the recorded samples, all zero if nothing was recorded
    pub fn percentiles(&self) -> Percentiles {
        let sketch = self.0.borrow();
        let at = |q: f64| sketch.quantile(q).ok().flatten().unwrap_or(0.0);
        Percentiles {
            count: sketch.count(),
            min: sketch.min().unwrap_or(0.0),
            p50: at(0.5),
            p90: at(0.9),
            p99: at(0.99),
            max: sketch.max().unwrap_or(0.0),
        }
    }
}

/// Samples of a single [Operation]
#[derive(Clone, Default)]
pub struct OperationStats {
    latency: Sketch,
    span: Sketch,
}

impl OperationStats {
    /// Latencies in nanoseconds
    pub fn latency(&self) -> &Sketch {
        &self.latency
    }
    /// Number of elements covered by each call
    pub fn span(&self) -> &Sketch {
        &self.span
    }
}

/// Per-operation samples of one tree
#[derive(Clone, Default)]
pub struct Profile {
    operations: [OperationStats; 5],
}

impl Profile {
    /// Returns the samples of `operation`
    #[inline]
    pub fn operation(&self, operation: Operation) -> &OperationStats {
        &self.operations[operation as usize]
    }

    /// Iterates over every operation and its samples
    pub fn iter(&self) -> impl Iterator<Item = (Operation, &OperationStats)> {
        Operation::ALL
            .into_iter()
            .map(move |operation| (operation, self.operation(operation)))
    }

    /// Records that `operation` covers `span` elements and times it until the guard is dropped
    #[inline]
    pub fn measure(&self, operation: Operation, span: usize) -> Measure<'_> {
        let stats = self.operation(operation);
        stats.span.record(span as f64);
        Measure {
            start: Instant::now(),
            latency: &stats.latency,
        }
    }
}

impl fmt::Debug for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.iter()
                    .map(|(op, stats)| (op.name(), stats.latency().percentiles())),
            )
            .finish()
    }
}

/// Records the time between its creation and drop as a latency sample
pub struct Measure<'a> {
    start: Instant,
    latency: &'a Sketch,
}

impl Drop for Measure<'_> {
    #[inline]
    fn drop(&mut self) {
        self.latency.record(self.start.elapsed().as_nanos() as f64);
    }
}
