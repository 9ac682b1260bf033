//! Frontier disciplines: the ordering policy over nodes awaiting expansion.
//!
//! | Discipline | Pop order |
//! |---|---|
//! | [`Discipline::Fifo`] | insertion order |
//! | [`Discipline::Lifo`] | reverse insertion order |
//! | [`Discipline::DepthBounded`] | LIFO, refuses nodes deeper than the bound |
//! | [`Discipline::Priority`] | lowest evaluation first, ties by insertion order |
//!
//! Frontiers hold [`FrontierEntry`] handles; nodes themselves live in the
//! run's [`crate::node::SearchTree`].

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::node::NodeId;

/// A frontier handle: node id plus the keys disciplines order on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierEntry {
    pub node: NodeId,
    pub depth: u32,
    /// Evaluator score; `0` for methods without an evaluator.
    pub evaluation: i64,
}

/// Ordered collection of nodes awaiting expansion.
pub trait Frontier: fmt::Debug {
    /// Insert one entry.
    fn push(&mut self, entry: FrontierEntry);

    /// Remove the next entry. `None` means the frontier is exhausted.
    fn pop(&mut self) -> Option<FrontierEntry>;

    /// Insert one expansion's children, given in generation order.
    ///
    /// The default pushes them in order. Stack disciplines override it so the
    /// first generated child is the first popped.
    fn extend(&mut self, batch: Vec<FrontierEntry>) {
        for entry in batch {
            self.push(entry);
        }
    }

    /// Whether a node at `depth` may enter this frontier.
    fn admits(&self, _depth: u32) -> bool {
        true
    }

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest size reached so far.
    fn high_water(&self) -> usize;

    /// The discipline this frontier implements.
    fn discipline(&self) -> Discipline;
}

// ---------------------------------------------------------------------------
// Discipline
// ---------------------------------------------------------------------------

/// Frontier ordering policy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Discipline {
    /// Queue: breadth-first.
    Fifo,
    /// Stack: depth-first.
    Lifo,
    /// Stack that refuses nodes deeper than `limit`.
    DepthBounded { limit: u32 },
    /// Priority queue on evaluator score, minimum first.
    Priority,
}

impl Discipline {
    /// Build an empty frontier of this discipline.
    #[must_use]
    pub fn frontier(self) -> Box<dyn Frontier> {
        match self {
            Self::Fifo => Box::new(FifoFrontier::default()),
            Self::Lifo => Box::new(LifoFrontier::default()),
            Self::DepthBounded { limit } => Box::new(DepthBoundedFrontier::new(limit)),
            Self::Priority => Box::new(PriorityFrontier::default()),
        }
    }

    /// Canonical string for reports and traces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fifo => "fifo",
            Self::Lifo => "lifo",
            Self::DepthBounded { .. } => "depth_bounded",
            Self::Priority => "priority",
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DepthBounded { limit } => write!(f, "depth_bounded({limit})"),
            other => f.write_str(other.as_str()),
        }
    }
}

// ---------------------------------------------------------------------------
// FIFO
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct FifoFrontier {
    queue: VecDeque<FrontierEntry>,
    high_water: usize,
}

impl Frontier for FifoFrontier {
    fn push(&mut self, entry: FrontierEntry) {
        self.queue.push_back(entry);
        self.high_water = self.high_water.max(self.queue.len());
    }

    fn pop(&mut self) -> Option<FrontierEntry> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn high_water(&self) -> usize {
        self.high_water
    }

    fn discipline(&self) -> Discipline {
        Discipline::Fifo
    }
}

// ---------------------------------------------------------------------------
// LIFO
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct LifoFrontier {
    stack: Vec<FrontierEntry>,
    high_water: usize,
}

impl Frontier for LifoFrontier {
    fn push(&mut self, entry: FrontierEntry) {
        self.stack.push(entry);
        self.high_water = self.high_water.max(self.stack.len());
    }

    fn pop(&mut self) -> Option<FrontierEntry> {
        self.stack.pop()
    }

    fn extend(&mut self, batch: Vec<FrontierEntry>) {
        for entry in batch.into_iter().rev() {
            self.push(entry);
        }
    }

    fn len(&self) -> usize {
        self.stack.len()
    }

    fn high_water(&self) -> usize {
        self.high_water
    }

    fn discipline(&self) -> Discipline {
        Discipline::Lifo
    }
}

// ---------------------------------------------------------------------------
// Depth-bounded LIFO
// ---------------------------------------------------------------------------

/// LIFO frontier that admits only nodes with `depth <= limit`.
///
/// Callers consult [`Frontier::admits`] before pushing; the engine records
/// every refusal so an empty frontier can be reported as a cutoff rather
/// than an exhaustion.
#[derive(Debug)]
pub struct DepthBoundedFrontier {
    inner: LifoFrontier,
    limit: u32,
}

impl DepthBoundedFrontier {
    #[must_use]
    pub fn new(limit: u32) -> Self {
        Self {
            inner: LifoFrontier::default(),
            limit,
        }
    }

    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }
}

impl Frontier for DepthBoundedFrontier {
    fn push(&mut self, entry: FrontierEntry) {
        self.inner.push(entry);
    }

    fn pop(&mut self) -> Option<FrontierEntry> {
        self.inner.pop()
    }

    fn extend(&mut self, batch: Vec<FrontierEntry>) {
        self.inner.extend(batch);
    }

    fn admits(&self, depth: u32) -> bool {
        depth <= self.limit
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn high_water(&self) -> usize {
        self.inner.high_water()
    }

    fn discipline(&self) -> Discipline {
        Discipline::DepthBounded { limit: self.limit }
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Min-priority frontier keyed on `(evaluation, insertion sequence)`.
///
/// `BinaryHeap` is a max-heap, so keys are wrapped in `Reverse`. The
/// insertion sequence makes equal evaluations pop first-in-first-out.
#[derive(Debug, Default)]
pub struct PriorityFrontier {
    heap: BinaryHeap<Reverse<(i64, u64, NodeId, u32)>>,
    sequence: u64,
    high_water: usize,
}

impl Frontier for PriorityFrontier {
    fn push(&mut self, entry: FrontierEntry) {
        self.heap
            .push(Reverse((entry.evaluation, self.sequence, entry.node, entry.depth)));
        self.sequence += 1;
        self.high_water = self.high_water.max(self.heap.len());
    }

    fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap
            .pop()
            .map(|Reverse((evaluation, _, node, depth))| FrontierEntry {
                node,
                depth,
                evaluation,
            })
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn high_water(&self) -> usize {
        self.high_water
    }

    fn discipline(&self) -> Discipline {
        Discipline::Priority
    }
}
