//! `WaterBuckets`: measure an exact amount using buckets without markings.
//!
//! Each move fills a bucket from the well, drains it onto the ground, or
//! pours one bucket into another until the source is empty or the
//! destination is full. Contents repeat across different move sequences, so
//! the generator is inconsistent.

use std::fmt;

use statespace_kernel::generator::{GeneratorKind, Intrinsic, SelfGenerating};
use statespace_kernel::operators::operator::{Action, Operator};
use statespace_search::Problem;

use crate::contract::{World, WorldError};

/// Operator arguments: one bucket, or a source and destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pick {
    Bucket(usize),
    Pair { source: usize, destination: usize },
}

impl fmt::Display for Pick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bucket(i) => write!(f, "#{i}"),
            Self::Pair {
                source,
                destination,
            } => write!(f, "#{source} -> #{destination}"),
        }
    }
}

/// Current level of every bucket alongside its capacity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Buckets {
    capacities: Vec<u32>,
    levels: Vec<u32>,
}

impl Buckets {
    /// Empty buckets of the given capacities.
    #[must_use]
    pub fn empty(capacities: &[u32]) -> Self {
        Self {
            capacities: capacities.to_vec(),
            levels: vec![0; capacities.len()],
        }
    }

    #[must_use]
    pub fn levels(&self) -> &[u32] {
        &self.levels
    }

    /// Whether any bucket holds exactly `amount`.
    #[must_use]
    pub fn holds(&self, amount: u32) -> bool {
        self.levels.contains(&amount)
    }

    fn room(&self, i: usize) -> u32 {
        self.capacities[i] - self.levels[i]
    }

    fn in_range(&self, i: usize) -> bool {
        i < self.levels.len()
    }
}

impl fmt::Display for Buckets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (level, capacity)) in self.levels.iter().zip(&self.capacities).enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{level}/{capacity}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

fn fill_fits(state: &Buckets, pick: &Pick) -> bool {
    matches!(*pick, Pick::Bucket(i) if state.in_range(i) && state.room(i) > 0)
}

fn fill(state: &mut Buckets, pick: &Pick) {
    if let Pick::Bucket(i) = *pick {
        state.levels[i] = state.capacities[i];
    }
}

fn drain_fits(state: &Buckets, pick: &Pick) -> bool {
    matches!(*pick, Pick::Bucket(i) if state.in_range(i) && state.levels[i] > 0)
}

fn drain(state: &mut Buckets, pick: &Pick) {
    if let Pick::Bucket(i) = *pick {
        state.levels[i] = 0;
    }
}

fn pour_fits(state: &Buckets, pick: &Pick) -> bool {
    matches!(
        *pick,
        Pick::Pair { source, destination }
            if source != destination
                && state.in_range(source)
                && state.in_range(destination)
                && state.levels[source] > 0
                && state.room(destination) > 0
    )
}

fn pour(state: &mut Buckets, pick: &Pick) {
    if let Pick::Pair {
        source,
        destination,
    } = *pick
    {
        let transfer = state.levels[source].min(state.room(destination));
        state.levels[source] -= transfer;
        state.levels[destination] += transfer;
    }
}

pub const FILL: Operator<Buckets, Pick> = Operator::new("fill", fill_fits, fill);
pub const DRAIN: Operator<Buckets, Pick> = Operator::new("drain", drain_fits, drain);
pub const POUR: Operator<Buckets, Pick> = Operator::new("pour", pour_fits, pour);

impl SelfGenerating for Buckets {
    type Args = Pick;
    const KIND: GeneratorKind = GeneratorKind::Inconsistent;

    fn operators() -> Vec<Operator<Self, Pick>> {
        vec![FILL, DRAIN, POUR]
    }

    /// Fills first, then drains, then every ordered pair of pours.
    fn operations(&self) -> impl Iterator<Item = Action<Self, Pick>> {
        let n = self.levels.len();
        let singles = (0..n).map(Pick::Bucket);
        let fills = singles
            .clone()
            .filter(move |pick| fill_fits(self, pick))
            .map(|pick| FILL.action(pick));
        let drains = singles
            .filter(move |pick| drain_fits(self, pick))
            .map(|pick| DRAIN.action(pick));
        let pours = (0..n)
            .flat_map(move |source| {
                (0..n).map(move |destination| Pick::Pair {
                    source,
                    destination,
                })
            })
            .filter(move |pick| pour_fits(self, pick))
            .map(|pick| POUR.action(pick));
        fills.chain(drains).chain(pours)
    }
}

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

/// Buckets of fixed capacities and the amount to measure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaterBuckets {
    capacities: Vec<u32>,
    target: u32,
}

impl WaterBuckets {
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidInstance`] when there are no buckets, a
    /// bucket has zero capacity, or `target` exceeds every capacity.
    pub fn new(capacities: Vec<u32>, target: u32) -> Result<Self, WorldError> {
        let invalid = |detail: String| WorldError::InvalidInstance {
            world: "water_buckets",
            detail,
        };
        if capacities.is_empty() || capacities.contains(&0) {
            return Err(invalid(format!("capacities must be positive: {capacities:?}")));
        }
        if capacities.iter().all(|&c| c < target) {
            return Err(invalid(format!("target {target} fits in no bucket")));
        }
        Ok(Self { capacities, target })
    }

    /// The 7 and 11 litre buckets, measuring 2 litres.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            capacities: vec![7, 11],
            target: 2,
        }
    }
}

impl World for WaterBuckets {
    type Generator = Intrinsic<Buckets>;

    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "water_buckets"
    }

    fn generator(&self) -> Result<Intrinsic<Buckets>, WorldError> {
        Ok(Intrinsic::new()?)
    }

    fn problem(&self) -> Problem<Buckets> {
        let target = self.target;
        Problem::new(Buckets::empty(&self.capacities), move |state: &Buckets| {
            state.holds(target)
        })
    }
}
