//! World contract: the minimal trait a puzzle must implement to be run by
//! the harness runner.
//!
//! Worlds provide domain data only: a state type, a generator, a problem
//! instance and optionally a heuristic. Worlds may NOT implement search,
//! hashing or report assembly; those belong to `statespace_search` and the
//! runner.

use statespace_kernel::generator::Generator;
use statespace_kernel::operators::operator::Cost;
use statespace_kernel::operators::operator_registry::RegistryError;
use statespace_search::Problem;
use thiserror::Error;

/// State type of a world's generator.
pub type WorldState<W> = <<W as World>::Generator as Generator>::State;

/// Typed failure while building a world.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    /// The world's operator table was rejected.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// The instance parameters do not describe a well-formed puzzle.
    #[error("invalid {world} instance: {detail}")]
    InvalidInstance { world: &'static str, detail: String },
}

/// The contract a world must implement to be run by the harness runner.
///
/// A world provides:
/// - A unique identifier
/// - A generator for its state type (built fresh per run)
/// - The problem instance: initial state and goal
/// - An optional cost-to-go estimate for informed methods
///
/// A world does NOT provide:
/// - Search logic, duplicate handling or frontier ordering
/// - Report assembly or hashing (runner's job)
pub trait World {
    /// Generator used for every run of this world.
    type Generator: Generator;

    /// Unique world identifier (e.g., `"river_crossing"`).
    fn world_id(&self) -> &str;

    /// Build the generator.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] if the operator table is malformed.
    fn generator(&self) -> Result<Self::Generator, WorldError>;

    /// The problem instance.
    fn problem(&self) -> Problem<WorldState<Self>>;

    /// Lower bound on the remaining cost from `state` to a goal.
    ///
    /// Must never overestimate. The default carries no information.
    fn estimate(&self, _state: &WorldState<Self>) -> Cost {
        0
    }
}
