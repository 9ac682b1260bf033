//! Problem: an initial state plus a goal predicate.
//!
//! Immutable during a run. Besides handing itself to a [`Method`], a problem
//! offers three drivers: the first solution, every solution in discovery
//! order, and branch-and-bound cost minimisation.

use std::fmt;

use statespace_kernel::generator::Generator;
use statespace_kernel::state::State;

use crate::error::SearchError;
use crate::evaluator::Evaluator;
use crate::method::Method;
use crate::node::SolutionPath;
use crate::search::Search;

type Goal<S> = Box<dyn Fn(&S) -> bool + Send + Sync>;

/// A search problem over states of type `S`.
pub struct Problem<S> {
    initial: S,
    goal: Goal<S>,
}

impl<S: State> Problem<S> {
    #[must_use]
    pub fn new(initial: S, goal: impl Fn(&S) -> bool + Send + Sync + 'static) -> Self {
        Self {
            initial,
            goal: Box::new(goal),
        }
    }

    /// Goal is equality with `target`.
    #[must_use]
    pub fn reach(initial: S, target: S) -> Self
    where
        S: Send + Sync + 'static,
    {
        Self::new(initial, move |state| *state == target)
    }

    #[must_use]
    pub fn initial(&self) -> &S {
        &self.initial
    }

    #[must_use]
    pub fn is_goal(&self, state: &S) -> bool {
        (self.goal)(state)
    }

    /// First solution path found by `method`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the generator violates its contract.
    pub fn solve<G, E>(
        &self,
        method: &Method<G, E>,
    ) -> Result<Option<SolutionPath<S, G::Args>>, SearchError>
    where
        G: Generator<State = S>,
        E: Evaluator<S>,
    {
        Ok(method.search(self)?.into_path())
    }

    /// Every solution `method` reaches, in discovery order.
    ///
    /// The iterator resumes the same run after each goal. It ends when the
    /// run is exhausted or cut off, and after yielding an error.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the method policy is invalid.
    pub fn solutions<'a, G, E>(
        &'a self,
        method: &'a Method<G, E>,
    ) -> Result<Solutions<'a, G, E>, SearchError>
    where
        G: Generator<State = S>,
        E: Evaluator<S>,
    {
        Ok(Solutions {
            search: method.start(self)?,
        })
    }

    /// Cheapest solution `method` can reach, by branch-and-bound.
    ///
    /// Each solution found lowers the exclusive upper cost bound to its own
    /// cost, so later goals must be strictly cheaper. Stops early once a
    /// solution meets the policy's `lower_bound`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the generator violates its contract.
    pub fn optimize<G, E>(
        &self,
        method: &Method<G, E>,
    ) -> Result<Option<SolutionPath<S, G::Args>>, SearchError>
    where
        G: Generator<State = S>,
        E: Evaluator<S>,
    {
        let mut search = method.start(self)?;
        Ok(search.best_goal()?.map(|goal| search.path_to(goal)))
    }
}

impl<S: fmt::Debug> fmt::Debug for Problem<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Problem")
            .field("initial", &self.initial)
            .finish_non_exhaustive()
    }
}

/// Iterator over every solution of one run. See [`Problem::solutions`].
pub struct Solutions<'a, G: Generator, E> {
    search: Search<'a, G, E>,
}

impl<'a, G, E> Solutions<'a, G, E>
where
    G: Generator,
    E: Evaluator<G::State>,
{
    /// The underlying run, for counters and phase.
    #[must_use]
    pub fn search(&self) -> &Search<'a, G, E> {
        &self.search
    }
}

impl<G, E> Iterator for Solutions<'_, G, E>
where
    G: Generator,
    E: Evaluator<G::State>,
{
    type Item = Result<SolutionPath<G::State, G::Args>, SearchError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.search.next_goal() {
            Ok(Some(goal)) => Some(Ok(self.search.path_to(goal))),
            Ok(None) => None,
            Err(err) => Some(Err(err)),
        }
    }
}
