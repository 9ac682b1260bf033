//! Explicit weighted graphs over `char` states for unit tests.

use statespace_kernel::generator::{Generator, GeneratorKind};
use statespace_kernel::operators::operator::{always, Action, Cost, Operator};
use statespace_kernel::operators::operator_registry::OperatorRegistry;

fn go(state: &mut char, to: &char) {
    *state = *to;
}

fn never(_: &char, _: &char) -> bool {
    false
}

pub(crate) const GO: Operator<char, char> = Operator::new("go", always, go);
pub(crate) const JUMP: Operator<char, char> = Operator::new("jump", always, go);
pub(crate) const BLOCKED: Operator<char, char> = Operator::new("blocked", never, go);

/// Directed graph; edges are expanded in declaration order.
#[derive(Debug)]
pub(crate) struct Graph {
    edges: Vec<(char, char, Cost, Operator<char, char>)>,
    kind: GeneratorKind,
    registry: OperatorRegistry<char, char>,
    invalid: Vec<char>,
}

impl Graph {
    pub(crate) fn new(kind: GeneratorKind, edges: &[(char, char, Cost)]) -> Self {
        Self {
            edges: edges.iter().map(|&(f, t, c)| (f, t, c, GO)).collect(),
            kind,
            registry: OperatorRegistry::new("graph.v1", [GO, BLOCKED]).unwrap(),
            invalid: Vec::new(),
        }
    }

    /// Unit-cost chain `a → b → … → last`.
    pub(crate) fn line(last: char) -> Self {
        let edges: Vec<(char, char, Cost)> = ('a'..last)
            .zip('b'..=last)
            .map(|(f, t)| (f, t, 1))
            .collect();
        Self::new(GeneratorKind::Consistent, &edges)
    }

    pub(crate) fn with_edge(mut self, from: char, to: char, op: Operator<char, char>) -> Self {
        self.edges.push((from, to, 1, op));
        self
    }

    pub(crate) fn rejecting(mut self, state: char) -> Self {
        self.invalid.push(state);
        self
    }
}

impl Generator for Graph {
    type State = char;
    type Args = char;

    fn kind(&self) -> GeneratorKind {
        self.kind
    }

    fn registry(&self) -> &OperatorRegistry<char, char> {
        &self.registry
    }

    fn operations(&self, state: &char) -> impl Iterator<Item = Action<char, char>> {
        let from = *state;
        self.edges
            .iter()
            .filter(move |edge| edge.0 == from)
            .map(|&(_, to, cost, op)| op.action(to).with_cost(cost))
    }

    fn is_valid(&self, state: &char) -> bool {
        !self.invalid.contains(state)
    }
}
