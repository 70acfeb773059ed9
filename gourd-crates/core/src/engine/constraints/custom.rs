use std::fmt::Debug;

use downcast_rs::impl_downcast;
use downcast_rs::Downcast;

use super::AssignmentView;
use super::PropagationContext;
use crate::engine::variables::Literal;

/// A constraint implemented outside of the solver.
///
/// The solver drives it through the same protocol as its own constraints:
/// - [`CustomConstraint::attach`] is called once, at the root, to set up watches and to propagate
///   what already follows at the root.
/// - [`CustomConstraint::propagate`] is called when a watched literal becomes true. The
///   constraint has to watch that literal again (through the context) if it still wants to hear
///   about it.
/// - [`CustomConstraint::calculate_reason`] has to explain every propagation with literals which
///   are false and were assigned before the propagated literal.
///
/// A constraint is cloned from the value that was originally added whenever the solver rebuilds
/// its constraint database, so the added value should be in its initial state.
pub trait CustomConstraint: Downcast + Debug + Send {
    /// Every literal the constraint is defined over.
    fn literals(&self) -> &[Literal];

    /// Returns false if the constraint is violated at the root.
    fn attach(&mut self, context: &mut PropagationContext<'_>) -> bool;

    /// Called when the watched literal `p` became true. Returns false on a conflict.
    fn propagate(&mut self, context: &mut PropagationContext<'_>, p: Literal) -> bool;

    /// Adds to `reason` the false literals which imply `p`, or which are in conflict when `p` is
    /// [`None`].
    fn calculate_reason(
        &self,
        assignments: AssignmentView<'_>,
        p: Option<Literal>,
        reason: &mut Vec<Literal>,
    );

    /// Called for every variable registered through [`PropagationContext::register_undo`] when it
    /// is unassigned; `p` is the literal which was true.
    fn undo(&mut self, _p: Literal) {}

    /// Whether every extension of the current assignment satisfies the constraint.
    fn is_satisfied(&self, assignments: AssignmentView<'_>) -> bool;

    fn boxed_clone(&self) -> Box<dyn CustomConstraint>;
}

impl_downcast!(CustomConstraint);
