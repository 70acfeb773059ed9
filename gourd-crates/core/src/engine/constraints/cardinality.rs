use super::AssignmentView;
use super::PropagationContext;
use crate::engine::variables::Literal;
use crate::engine::vocabulary::Vocabulary;
use crate::gourd_assert_moderate;

/// `sum(literals) >= degree`, propagated by counting false literals instead of watching.
///
/// At most `literals.len() - degree` literals may be false. Once that many are false every other
/// literal is implied; one more is a conflict. The counter is restored through undo calls when
/// backtracking.
#[derive(Clone, Debug)]
pub(crate) struct Cardinality {
    literals: Vec<Literal>,
    degree: u32,
    num_falsified: u32,
}

impl Cardinality {
    pub(crate) fn new(literals: Vec<Literal>, degree: u32) -> Cardinality {
        gourd_assert_moderate!(degree >= 1 && (degree as usize) < literals.len());
        Cardinality {
            literals,
            degree,
            num_falsified: 0,
        }
    }

    pub(crate) fn literals(&self) -> &[Literal] {
        &self.literals
    }

    fn max_falsified(&self) -> u32 {
        self.literals.len() as u32 - self.degree
    }

    /// Watches every literal; the literals are expected to be unassigned.
    pub(crate) fn attach(&self, context: &mut PropagationContext<'_>) {
        gourd_assert_moderate!(self
            .literals
            .iter()
            .all(|&literal| context.is_unassigned(literal)));
        for &literal in &self.literals {
            context.watch(!literal);
        }
    }

    pub(crate) fn propagate(&mut self, context: &mut PropagationContext<'_>, p: Literal) -> bool {
        context.watch(p);
        context.register_undo(p.get_variable());
        self.num_falsified += 1;

        if self.num_falsified > self.max_falsified() {
            return false;
        }
        if self.num_falsified == self.max_falsified() {
            for &literal in &self.literals {
                if context.is_unassigned(literal) {
                    let _ = context.enqueue(literal);
                }
            }
        }
        true
    }

    pub(crate) fn undo(&mut self) {
        gourd_assert_moderate!(self.num_falsified > 0);
        self.num_falsified -= 1;
    }

    /// The false literals assigned before `p`, or every false literal when the constraint is in
    /// conflict.
    pub(crate) fn calculate_reason(
        &self,
        vocabulary: &Vocabulary,
        p: Option<Literal>,
        reason: &mut Vec<Literal>,
    ) {
        let bound = p.map_or(usize::MAX, |propagated| {
            vocabulary.trail_position(propagated.get_variable())
        });
        reason.extend(self.literals.iter().copied().filter(|&literal| {
            vocabulary.is_falsified(literal)
                && vocabulary.trail_position(literal.get_variable()) < bound
        }));
    }

    pub(crate) fn is_satisfied(&self, assignments: AssignmentView<'_>) -> bool {
        self.literals
            .iter()
            .filter(|&&literal| assignments.is_satisfied(literal))
            .count()
            >= self.degree as usize
    }
}
