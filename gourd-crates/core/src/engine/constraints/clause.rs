use super::AssignmentView;
use super::PropagationContext;
use crate::engine::variables::Literal;
use crate::engine::vocabulary::Vocabulary;
use crate::gourd_assert_moderate;

/// A disjunction of at least two literals, propagated with two watched literals.
///
/// The watched literals are always at positions 0 and 1. A clause watching `l` is registered on
/// the watch list of `!l`, so it is visited when `l` becomes false.
#[derive(Clone, Debug)]
pub(crate) struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub(crate) fn new(literals: Vec<Literal>) -> Clause {
        gourd_assert_moderate!(literals.len() >= 2);
        Clause { literals }
    }

    pub(crate) fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub(crate) fn attach(&self, context: &mut PropagationContext<'_>) {
        context.watch_with_blocker(!self.literals[0], Some(self.literals[1]));
        context.watch_with_blocker(!self.literals[1], Some(self.literals[0]));
    }

    /// Propagates the literal at position 0; used for a freshly learned clause whose other
    /// literals are all false.
    pub(crate) fn assert_constraint(&self, context: &mut PropagationContext<'_>) -> bool {
        context.enqueue(self.literals[0])
    }

    /// Called when `p` became true, i.e. the watched literal `!p` became false.
    pub(crate) fn propagate(&mut self, context: &mut PropagationContext<'_>, p: Literal) -> bool {
        let falsified = !p;
        if self.literals[0] == falsified {
            self.literals.swap(0, 1);
        }
        gourd_assert_moderate!(self.literals[1] == falsified);

        let other_watch = self.literals[0];
        if context.is_satisfied(other_watch) {
            context.watch_with_blocker(p, Some(other_watch));
            return true;
        }

        for index in 2..self.literals.len() {
            if !context.is_falsified(self.literals[index]) {
                self.literals.swap(1, index);
                context.watch_with_blocker(!self.literals[1], Some(other_watch));
                return true;
            }
        }

        // Every literal apart from the first is false.
        context.watch_with_blocker(p, Some(other_watch));
        context.enqueue(other_watch)
    }

    /// The false literals which explain `p`, or the whole clause when it is the conflict.
    pub(crate) fn calculate_reason(&self, p: Option<Literal>, reason: &mut Vec<Literal>) {
        match p {
            Some(propagated) => {
                gourd_assert_moderate!(propagated == self.literals[0]);
                reason.extend_from_slice(&self.literals[1..]);
            }
            None => reason.extend_from_slice(&self.literals),
        }
    }

    pub(crate) fn is_satisfied(&self, assignments: AssignmentView<'_>) -> bool {
        self.literals
            .iter()
            .any(|&literal| assignments.is_satisfied(literal))
    }

    /// The level to backjump to so that the clause becomes asserting: the highest level among
    /// the literals behind the first.
    pub(crate) fn assertion_level(&self, vocabulary: &Vocabulary) -> usize {
        self.literals[1..]
            .iter()
            .map(|&literal| vocabulary.literal_level(literal))
            .max()
            .unwrap_or(0)
    }
}
