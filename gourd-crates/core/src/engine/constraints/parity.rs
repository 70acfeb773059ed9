use super::AssignmentView;
use super::PropagationContext;
use crate::engine::variables::Literal;
use crate::engine::vocabulary::Vocabulary;
use crate::gourd_assert_moderate;

/// `x1 ⊕ x2 ⊕ ... ⊕ xn = odd` over distinct variables.
///
/// Negative literals are normalised away by flipping `odd`, so every literal stored here is
/// positive. Two variables are watched in both polarities; once every variable apart from the
/// first is assigned, the first one is implied.
#[derive(Clone, Debug)]
pub(crate) struct Parity {
    literals: Vec<Literal>,
    odd: bool,
}

impl Parity {
    pub(crate) fn new(literals: Vec<Literal>, odd: bool) -> Parity {
        gourd_assert_moderate!(literals.len() >= 2);
        gourd_assert_moderate!(literals.iter().all(|literal| literal.is_positive()));
        Parity { literals, odd }
    }

    pub(crate) fn literals(&self) -> &[Literal] {
        &self.literals
    }

    #[cfg(test)]
    pub(crate) fn is_odd(&self) -> bool {
        self.odd
    }

    pub(crate) fn attach(&self, context: &mut PropagationContext<'_>) {
        for &watched in &self.literals[..2] {
            context.watch(watched);
            context.watch(!watched);
        }
    }

    pub(crate) fn propagate(&mut self, context: &mut PropagationContext<'_>, p: Literal) -> bool {
        let variable = p.get_variable();
        if self.literals[0].get_variable() == variable {
            self.literals.swap(0, 1);
        }
        gourd_assert_moderate!(self.literals[1].get_variable() == variable);

        for index in 2..self.literals.len() {
            if context.is_unassigned(self.literals[index]) {
                self.literals.swap(1, index);
                // The list of `p` is being visited and drops this watcher by itself.
                context.unwatch(!p);
                context.watch(self.literals[1]);
                context.watch(!self.literals[1]);
                return true;
            }
        }

        context.watch(p);
        let num_true_after_first = self.literals[1..]
            .iter()
            .filter(|&&literal| context.is_satisfied(literal))
            .count();
        let first_is_true = self.odd != (num_true_after_first % 2 == 1);
        let implied = if first_is_true {
            self.literals[0]
        } else {
            !self.literals[0]
        };
        context.enqueue(implied)
    }

    /// The false literals of every variable other than the one of `p`.
    pub(crate) fn calculate_reason(
        &self,
        vocabulary: &Vocabulary,
        p: Option<Literal>,
        reason: &mut Vec<Literal>,
    ) {
        for literal in &self.literals {
            let variable = literal.get_variable();
            if p.is_some_and(|propagated| propagated.get_variable() == variable) {
                continue;
            }
            if let Some(satisfied) = vocabulary.satisfied_literal(variable) {
                reason.push(!satisfied);
            }
        }
    }

    pub(crate) fn is_satisfied(&self, assignments: AssignmentView<'_>) -> bool {
        let mut num_true = 0;
        for &literal in &self.literals {
            if assignments.is_unassigned(literal) {
                return false;
            }
            if assignments.is_satisfied(literal) {
                num_true += 1;
            }
        }
        (num_true % 2 == 1) == self.odd
    }
}
