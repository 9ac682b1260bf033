//! Search nodes, the per-run node arena and solution paths.
//!
//! Nodes are created once and never re-parented. A cheaper route to an
//! already-known state creates a fresh node; the old one stays in the arena
//! so every parent chain remains a finite walk to the root.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};
use statespace_kernel::operators::operator::{Action, ApplyFailure, Cost};

/// Arena index of a node within one [`SearchTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// One node of the search tree.
///
/// Root: `parent == None`, `depth == 0`, `path_cost == 0`, `action == None`.
/// Child: `depth == parent.depth + 1`,
/// `path_cost == parent.path_cost + action.cost()`.
#[derive(Debug, Clone)]
pub struct Node<S, A> {
    /// Arena index.
    pub id: NodeId,
    /// Parent node (`None` for root).
    pub parent: Option<NodeId>,
    /// The state this node owns.
    pub state: S,
    /// Tree depth (root = 0).
    pub depth: u32,
    /// Cumulative path cost from the root.
    pub path_cost: Cost,
    /// The action that produced this node from its parent.
    pub action: Option<Action<S, A>>,
    /// Evaluator score, when the method carries an evaluator.
    pub evaluation: Option<i64>,
}

impl<S, A> Node<S, A> {
    /// Whether this is the root node.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

// ---------------------------------------------------------------------------
// SearchTree
// ---------------------------------------------------------------------------

/// Arena owning every node created during one run.
#[derive(Debug, Clone)]
pub struct SearchTree<S, A> {
    nodes: Vec<Node<S, A>>,
}

impl<S, A> SearchTree<S, A> {
    /// Start a tree holding only the root.
    #[must_use]
    pub fn with_root(state: S, evaluation: Option<i64>) -> Self {
        Self {
            nodes: vec![Node {
                id: NodeId::new(0),
                parent: None,
                state,
                depth: 0,
                path_cost: 0,
                action: None,
                evaluation,
            }],
        }
    }

    /// The root node id.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    /// Append a child of `parent` reached by `action`.
    ///
    /// Depth and path cost are derived from the parent; callers cannot
    /// supply them.
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not issued by this tree.
    pub fn child(
        &mut self,
        parent: NodeId,
        state: S,
        action: Action<S, A>,
        evaluation: Option<i64>,
    ) -> NodeId {
        let (depth, path_cost) = {
            let p = &self.nodes[parent.0];
            (p.depth + 1, p.path_cost.saturating_add(action.cost()))
        };
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node {
            id,
            parent: Some(parent),
            state,
            depth,
            path_cost,
            action: Some(action),
            evaluation,
        });
        id
    }

    /// The id the next call to [`Self::child`] will return.
    pub(crate) fn next_id(&self) -> NodeId {
        NodeId::new(self.nodes.len())
    }

    /// Look up a node.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node<S, A>> {
        self.nodes.get(id.0)
    }

    /// Number of nodes created so far, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a tree has at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Node<S, A>> {
        self.nodes.iter()
    }

    /// `id` followed by its parent, grandparent, and so on up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = &Node<S, A>> {
        std::iter::successors(self.get(id), move |node| {
            node.parent.and_then(|p| self.get(p))
        })
    }
}

impl<S: Clone, A: Clone> SearchTree<S, A> {
    /// Reconstruct the path from the root to `id`.
    ///
    /// Walks parent links to the root, then reverses the collected
    /// `(action, state)` pairs.
    #[must_use]
    pub fn path_to(&self, id: NodeId) -> SolutionPath<S, A> {
        let mut steps: Vec<PathStep<S, A>> = self
            .ancestors(id)
            .filter_map(|node| {
                node.action.as_ref().map(|action| PathStep {
                    action: action.clone(),
                    state: node.state.clone(),
                })
            })
            .collect();
        steps.reverse();
        SolutionPath {
            initial: self.nodes[0].state.clone(),
            steps,
        }
    }
}

impl<S, A> Index<NodeId> for SearchTree<S, A> {
    type Output = Node<S, A>;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.0]
    }
}

// ---------------------------------------------------------------------------
// SolutionPath
// ---------------------------------------------------------------------------

/// One step of a solution path: the action taken and the state it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep<S, A> {
    pub action: Action<S, A>,
    pub state: S,
}

/// Root-to-goal sequence of actions and the states they produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionPath<S, A> {
    /// The initial state of the problem.
    pub initial: S,
    /// Steps in application order.
    pub steps: Vec<PathStep<S, A>>,
}

impl<S, A> SolutionPath<S, A> {
    /// Number of actions on the path.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.steps.len()
    }

    /// Sum of action costs.
    #[must_use]
    pub fn cost(&self) -> Cost {
        self.steps
            .iter()
            .fold(0, |acc: Cost, step| acc.saturating_add(step.action.cost()))
    }

    /// The final state (the initial state for an empty path).
    #[must_use]
    pub fn goal_state(&self) -> &S {
        self.steps.last().map_or(&self.initial, |step| &step.state)
    }

    /// Actions in application order.
    pub fn actions(&self) -> impl Iterator<Item = &Action<S, A>> {
        self.steps.iter().map(|step| &step.action)
    }

    /// Every state on the path, initial state first.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        std::iter::once(&self.initial).chain(self.steps.iter().map(|step| &step.state))
    }
}

impl<S: Clone + fmt::Display, A> SolutionPath<S, A> {
    /// Re-apply every action to the initial state and return the result.
    ///
    /// For a path produced by the engine the result equals
    /// [`Self::goal_state`].
    ///
    /// # Errors
    ///
    /// Returns the first [`ApplyFailure`] encountered.
    pub fn replay(&self) -> Result<S, ApplyFailure> {
        self.actions()
            .try_fold(self.initial.clone(), |state, action| action.apply(&state))
    }
}

impl<S: fmt::Display, A: fmt::Display> fmt::Display for SolutionPath<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.initial)?;
        for step in &self.steps {
            write!(f, "\n  {} -> {}", step.action, step.state)?;
        }
        Ok(())
    }
}
