//! Generator: successor generation for a state type.
//!
//! A generator yields, for a given state, a lazy finite sequence of actions.
//! The engine consumes that sequence exactly once per expansion, in order;
//! the order is significant for depth-first methods.
//!
//! Two ways to supply one:
//!
//! - A standalone type implementing [`Generator`] directly. Several
//!   generators may exist for one state type (different operator orderings
//!   or pruning strategies).
//! - The state type itself implementing [`SelfGenerating`], wrapped in
//!   [`Intrinsic`] to obtain a [`Generator`].

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::operators::operator::{Action, Operator};
use crate::operators::operator_registry::{OperatorRegistry, RegistryError};
use crate::state::State;

/// Structural guarantee a generator makes about the space it induces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    /// No state is reachable by two distinct operator sequences: the space
    /// is a tree and duplicate detection is unnecessary.
    Consistent,
    /// No such guarantee. Duplicates and cycles are possible.
    Inconsistent,
}

impl GeneratorKind {
    /// Canonical string for reports and traces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Consistent => "consistent",
            Self::Inconsistent => "inconsistent",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Successor generation for states of type [`Generator::State`].
///
/// # Contract
///
/// - `operations` is finite and side-effect free; every action it yields
///   names an operator declared in `registry()` and is applicable to the
///   state it was generated for.
/// - `kind()` is honest: a `Consistent` generator never reaches one state by
///   two distinct sequences.
/// - `is_valid` is the successor filter. States it rejects are pruned after
///   application and never enter the frontier.
pub trait Generator {
    /// The state type this generator understands.
    type State: State;
    /// Argument type of its operators.
    type Args: Clone + fmt::Debug + fmt::Display;

    /// Structural guarantee of the induced space.
    fn kind(&self) -> GeneratorKind;

    /// Declared operator table.
    fn registry(&self) -> &OperatorRegistry<Self::State, Self::Args>;

    /// Actions applicable to `state`, in expansion order.
    fn operations(
        &self,
        state: &Self::State,
    ) -> impl Iterator<Item = Action<Self::State, Self::Args>>;

    /// Whether a generated successor is admissible into the search.
    fn is_valid(&self, _state: &Self::State) -> bool {
        true
    }

    /// Diagnostic name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<G: Generator> Generator for &G {
    type State = G::State;
    type Args = G::Args;

    fn kind(&self) -> GeneratorKind {
        (**self).kind()
    }

    fn registry(&self) -> &OperatorRegistry<Self::State, Self::Args> {
        (**self).registry()
    }

    fn operations(
        &self,
        state: &Self::State,
    ) -> impl Iterator<Item = Action<Self::State, Self::Args>> {
        (**self).operations(state)
    }

    fn is_valid(&self, state: &Self::State) -> bool {
        (**self).is_valid(state)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

// ---------------------------------------------------------------------------
// Self-generating states
// ---------------------------------------------------------------------------

/// A state type that knows its own successors.
pub trait SelfGenerating: State {
    /// Argument type of its operators.
    type Args: Clone + fmt::Debug + fmt::Display;

    /// Structural guarantee of the induced space.
    const KIND: GeneratorKind;

    /// The declared operators.
    fn operators() -> Vec<Operator<Self, Self::Args>>;

    /// Actions applicable to `self`, in expansion order.
    fn operations(&self) -> impl Iterator<Item = Action<Self, Self::Args>>;

    /// Whether `self` is admissible into the search.
    fn is_valid(&self) -> bool {
        true
    }
}

/// Adapts a [`SelfGenerating`] state type into a [`Generator`].
pub struct Intrinsic<S: SelfGenerating> {
    registry: OperatorRegistry<S, S::Args>,
    _state: PhantomData<fn() -> S>,
}

impl<S: SelfGenerating> Intrinsic<S> {
    /// Registry schema version used for intrinsic operator tables.
    pub const SCHEMA_VERSION: &'static str = "intrinsic_operators.v1";

    /// Build the adapter, validating the declared operators.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if `S::operators()` is empty or declares a
    /// name twice.
    pub fn new() -> Result<Self, RegistryError> {
        Ok(Self {
            registry: OperatorRegistry::new(Self::SCHEMA_VERSION, S::operators())?,
            _state: PhantomData,
        })
    }
}

impl<S: SelfGenerating> fmt::Debug for Intrinsic<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Intrinsic")
            .field("registry", &self.registry)
            .finish()
    }
}

impl<S: SelfGenerating> Generator for Intrinsic<S> {
    type State = S;
    type Args = S::Args;

    fn kind(&self) -> GeneratorKind {
        S::KIND
    }

    fn registry(&self) -> &OperatorRegistry<S, S::Args> {
        &self.registry
    }

    fn operations(&self, state: &S) -> impl Iterator<Item = Action<S, S::Args>> {
        state.operations()
    }

    fn is_valid(&self, state: &S) -> bool {
        state.is_valid()
    }

    fn name(&self) -> &str {
        std::any::type_name::<S>()
    }
}
