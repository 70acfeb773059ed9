use super::ConstraintReference;
use crate::basic_types::Trail;
use crate::engine::variables::Literal;
use crate::engine::variables::Variable;
use crate::engine::vocabulary::Vocabulary;
use crate::engine::vocabulary::Watcher;

/// A read-only view of the current partial assignment.
#[derive(Clone, Copy, Debug)]
pub struct AssignmentView<'a> {
    vocabulary: &'a Vocabulary,
}

impl<'a> AssignmentView<'a> {
    pub(crate) fn new(vocabulary: &'a Vocabulary) -> Self {
        AssignmentView { vocabulary }
    }

    pub fn is_satisfied(&self, literal: Literal) -> bool {
        self.vocabulary.is_satisfied(literal)
    }

    pub fn is_falsified(&self, literal: Literal) -> bool {
        self.vocabulary.is_falsified(literal)
    }

    pub fn is_unassigned(&self, literal: Literal) -> bool {
        self.vocabulary.is_unassigned(literal)
    }

    /// The decision level at which the variable of `literal` was assigned.
    pub fn level(&self, literal: Literal) -> Option<usize> {
        (!self.is_unassigned(literal)).then(|| self.vocabulary.literal_level(literal))
    }

    /// The position of the variable of `literal` on the trail, if it is assigned.
    pub fn trail_position(&self, literal: Literal) -> Option<usize> {
        (!self.is_unassigned(literal))
            .then(|| self.vocabulary.trail_position(literal.get_variable()))
    }

    /// The literal of `variable` which is satisfied, if the variable is assigned.
    pub fn satisfied_literal(&self, variable: Variable) -> Option<Literal> {
        self.vocabulary.satisfied_literal(variable)
    }
}

/// What a constraint can do while it is being notified of a newly satisfied literal.
///
/// Every watch, undo and propagation made through the context is attributed to the constraint
/// which is being notified.
#[derive(Debug)]
pub struct PropagationContext<'a> {
    vocabulary: &'a mut Vocabulary,
    trail: &'a mut Trail<Literal>,
    constraint: ConstraintReference,
}

impl<'a> PropagationContext<'a> {
    pub(crate) fn new(
        vocabulary: &'a mut Vocabulary,
        trail: &'a mut Trail<Literal>,
        constraint: ConstraintReference,
    ) -> Self {
        PropagationContext {
            vocabulary,
            trail,
            constraint,
        }
    }

    pub fn assignments(&self) -> AssignmentView<'_> {
        AssignmentView::new(self.vocabulary)
    }

    pub fn is_satisfied(&self, literal: Literal) -> bool {
        self.vocabulary.is_satisfied(literal)
    }

    pub fn is_falsified(&self, literal: Literal) -> bool {
        self.vocabulary.is_falsified(literal)
    }

    pub fn is_unassigned(&self, literal: Literal) -> bool {
        self.vocabulary.is_unassigned(literal)
    }

    pub fn decision_level(&self) -> usize {
        self.trail.decision_level()
    }

    /// Asks to be notified when `literal` becomes satisfied.
    pub fn watch(&mut self, literal: Literal) {
        self.watch_with_blocker(literal, None);
    }

    pub(crate) fn watch_with_blocker(&mut self, literal: Literal, blocker: Option<Literal>) {
        self.vocabulary.watch(
            literal,
            Watcher {
                constraint: self.constraint,
                blocker,
            },
        );
    }

    /// Stops one of the notifications requested through [`PropagationContext::watch`] on
    /// `literal`.
    pub fn unwatch(&mut self, literal: Literal) {
        self.vocabulary.unwatch(literal, self.constraint);
    }

    /// Asks to be told through an undo call when `variable` is unassigned by backtracking.
    pub fn register_undo(&mut self, variable: Variable) {
        self.vocabulary.register_undo(variable, self.constraint);
    }

    /// Makes `literal` true with the notified constraint as its reason.
    ///
    /// Returns false if the literal is already false, which means the constraint is in conflict.
    pub fn enqueue(&mut self, literal: Literal) -> bool {
        enqueue(self.vocabulary, self.trail, literal, Some(self.constraint))
    }
}

/// Assigns `literal` at the current decision level unless it already has a value; returns false
/// if it is falsified.
pub(crate) fn enqueue(
    vocabulary: &mut Vocabulary,
    trail: &mut Trail<Literal>,
    literal: Literal,
    reason: Option<ConstraintReference>,
) -> bool {
    if vocabulary.is_satisfied(literal) {
        return true;
    }
    if vocabulary.is_falsified(literal) {
        return false;
    }
    vocabulary.assign(literal, trail.decision_level(), reason, trail.len());
    trail.push(literal);
    true
}
