use super::delete_worst;
use super::DeletionStrategy;
use super::LbdCalculator;
use super::ReductionContext;
use crate::engine::constraints::Constraint;
use crate::engine::constraints::ConstraintReference;
use crate::engine::vocabulary::Vocabulary;

/// Scores learned clauses by their literal block distance (LBD), measured when they are learned.
///
/// Glue clauses, whose LBD is at most the threshold, are protected. Of the others, the worst half
/// of all learned clauses is forgotten, starting from the highest LBD. When `recompute` is set the
/// LBD is measured again every time a clause propagates and the lower value is kept.
///
/// # Bibliography
/// G. Audemard and L. Simon, ‘Predicting learnt clauses quality in modern SAT solvers’, in
/// Twenty-first international joint conference on artificial intelligence, 2009.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GlucoseDeletion {
    lbd_threshold: u32,
    recompute: bool,
}

impl GlucoseDeletion {
    pub(crate) fn new(lbd_threshold: u32, recompute: bool) -> Self {
        GlucoseDeletion {
            lbd_threshold,
            recompute,
        }
    }

    fn update_protection(&self, constraint: &mut Constraint) {
        if constraint.metadata.lbd <= self.lbd_threshold {
            constraint.metadata.protected = true;
        }
    }
}

impl DeletionStrategy for GlucoseDeletion {
    fn reduce(
        &mut self,
        learned: &mut Vec<ConstraintReference>,
        context: ReductionContext<'_>,
    ) -> Vec<ConstraintReference> {
        let half_of_learned = learned.len() / 2;
        delete_worst(
            learned,
            context,
            |first, second| {
                second.metadata.lbd.cmp(&first.metadata.lbd).then_with(|| {
                    first
                        .metadata
                        .activity
                        .total_cmp(&second.metadata.activity)
                })
            },
            |_| half_of_learned,
        )
    }

    fn on_clause_learning(&mut self, constraint: &mut Constraint) {
        self.update_protection(constraint);
    }

    fn on_propagation(
        &mut self,
        constraint: &mut Constraint,
        vocabulary: &Vocabulary,
        lbd: &mut LbdCalculator,
    ) {
        if !self.recompute || constraint.metadata.protected {
            return;
        }
        let measured = lbd.compute(constraint.literals(), vocabulary);
        if measured < constraint.metadata.lbd {
            constraint.metadata.lbd = measured;
            self.update_protection(constraint);
        }
    }
}
