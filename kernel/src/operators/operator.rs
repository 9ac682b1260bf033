//! `Operator` and `Action`: declared transformations and their bound form.
//!
//! An [`Operator`] is a stateless, `Copy` descriptor: a name, an
//! applicability predicate, a transform and a unit cost. Operators are
//! declared as `const` items next to the state type they act on; nothing is
//! discovered at runtime.
//!
//! An [`Action`] is an operator bound to concrete arguments and a cost
//! increment. Generators emit actions; the engine applies them.

use std::fmt;

use thiserror::Error;

/// Path cost unit. Non-negative by construction.
pub type Cost = u64;

/// Typed failure for operator application. Fail-closed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyFailure {
    /// The operator's applicability predicate rejected the state.
    #[error("operator `{operator}` is not applicable to state {state}")]
    PreconditionNotMet {
        /// Name of the rejected operator.
        operator: &'static str,
        /// Textual form of the state it was applied to.
        state: String,
    },
}

// ---------------------------------------------------------------------------
// Operator
// ---------------------------------------------------------------------------

/// A named state transformation over states `S` with arguments `A`.
pub struct Operator<S, A> {
    name: &'static str,
    applicable: fn(&S, &A) -> bool,
    transform: fn(&mut S, &A),
    unit_cost: Cost,
}

impl<S, A> Operator<S, A> {
    /// Declare an operator with unit cost 1.
    #[must_use]
    pub const fn new(
        name: &'static str,
        applicable: fn(&S, &A) -> bool,
        transform: fn(&mut S, &A),
    ) -> Self {
        Self {
            name,
            applicable,
            transform,
            unit_cost: 1,
        }
    }

    /// Replace the default cost increment.
    #[must_use]
    pub const fn with_cost(mut self, unit_cost: Cost) -> Self {
        self.unit_cost = unit_cost;
        self
    }

    /// Operator name. Unique within a registry.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Cost increment used by actions that do not override it.
    #[must_use]
    pub const fn unit_cost(&self) -> Cost {
        self.unit_cost
    }

    /// Whether the operator may be applied to `state` with `args`.
    #[must_use]
    pub fn is_applicable(&self, state: &S, args: &A) -> bool {
        (self.applicable)(state, args)
    }

    /// Bind arguments, producing an action with the operator's unit cost.
    #[must_use]
    pub fn action(self, args: A) -> Action<S, A> {
        Action {
            operator: self,
            cost: self.unit_cost,
            args,
        }
    }
}

impl<S, A> Clone for Operator<S, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, A> Copy for Operator<S, A> {}

impl<S, A> fmt::Debug for Operator<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator")
            .field("name", &self.name)
            .field("unit_cost", &self.unit_cost)
            .finish_non_exhaustive()
    }
}

/// Applicability predicate accepting every state.
#[must_use]
pub fn always<S, A>(_state: &S, _args: &A) -> bool {
    true
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// An operator bound to arguments and a cost increment.
pub struct Action<S, A> {
    operator: Operator<S, A>,
    args: A,
    cost: Cost,
}

impl<S, A> Action<S, A> {
    /// Override the cost increment of this single application.
    #[must_use]
    pub fn with_cost(mut self, cost: Cost) -> Self {
        self.cost = cost;
        self
    }

    /// The underlying operator.
    #[must_use]
    pub fn operator(&self) -> &Operator<S, A> {
        &self.operator
    }

    /// Name of the underlying operator.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.operator.name
    }

    /// Bound arguments.
    #[must_use]
    pub fn args(&self) -> &A {
        &self.args
    }

    /// Cost increment charged when this action is applied.
    #[must_use]
    pub fn cost(&self) -> Cost {
        self.cost
    }
}

impl<S: Clone + fmt::Display, A> Action<S, A> {
    /// Apply to a copy of `state`. The input is never mutated.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyFailure::PreconditionNotMet`] if the operator is not
    /// applicable to `state`.
    pub fn apply(&self, state: &S) -> Result<S, ApplyFailure> {
        if !self.operator.is_applicable(state, &self.args) {
            return Err(ApplyFailure::PreconditionNotMet {
                operator: self.operator.name,
                state: state.to_string(),
            });
        }
        let mut next = state.clone();
        (self.operator.transform)(&mut next, &self.args);
        Ok(next)
    }
}

impl<S, A: Clone> Clone for Action<S, A> {
    fn clone(&self) -> Self {
        Self {
            operator: self.operator,
            args: self.args.clone(),
            cost: self.cost,
        }
    }
}

impl<S, A: fmt::Debug> fmt::Debug for Action<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("operator", &self.operator.name)
            .field("args", &self.args)
            .field("cost", &self.cost)
            .finish()
    }
}

impl<S, A: PartialEq> PartialEq for Action<S, A> {
    fn eq(&self, other: &Self) -> bool {
        self.operator.name == other.operator.name
            && self.args == other.args
            && self.cost == other.cost
    }
}

impl<S, A: Eq> Eq for Action<S, A> {}

/// `name` when the arguments render empty, `name(args)` otherwise.
impl<S, A: fmt::Display> fmt::Display for Action<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args = self.args.to_string();
        if args.is_empty() {
            f.write_str(self.operator.name)
        } else {
            write!(f, "{}({args})", self.operator.name)
        }
    }
}

/// Argument type for operators that take none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NoArgs;

impl fmt::Display for NoArgs {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    struct Level(u32);

    impl fmt::Display for Level {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    fn below_ten(state: &Level, step: &u32) -> bool {
        state.0 + step <= 10
    }

    fn raise(state: &mut Level, step: &u32) {
        state.0 += step;
    }

    fn reset(state: &mut Level, _: &NoArgs) {
        state.0 = 0;
    }

    const RAISE: Operator<Level, u32> = Operator::new("raise", below_ten, raise);
    const RESET: Operator<Level, NoArgs> = Operator::new("reset", always, reset).with_cost(5);

    #[test]
    fn apply_transforms_a_copy() {
        let start = Level(3);
        let next = RAISE.action(4).apply(&start).unwrap();
        assert_eq!(next, Level(7));
        assert_eq!(start, Level(3));
    }

    #[test]
    fn inapplicable_operator_fails_closed() {
        let err = RAISE.action(9).apply(&Level(3)).unwrap_err();
        assert_eq!(
            err,
            ApplyFailure::PreconditionNotMet {
                operator: "raise",
                state: "3".into(),
            }
        );
    }

    #[test]
    fn action_cost_defaults_to_unit_cost_and_can_be_overridden() {
        assert_eq!(RAISE.action(1).cost(), 1);
        assert_eq!(RESET.action(NoArgs).cost(), 5);
        assert_eq!(RAISE.action(1).with_cost(12).cost(), 12);
    }

    #[test]
    fn display_omits_empty_arguments() {
        assert_eq!(RAISE.action(2).to_string(), "raise(2)");
        assert_eq!(RESET.action(NoArgs).to_string(), "reset");
    }

    #[test]
    fn actions_compare_by_name_args_and_cost() {
        assert_eq!(RAISE.action(2), RAISE.action(2));
        assert_ne!(RAISE.action(2), RAISE.action(3));
        assert_ne!(RAISE.action(2), RAISE.action(2).with_cost(4));
    }
}
