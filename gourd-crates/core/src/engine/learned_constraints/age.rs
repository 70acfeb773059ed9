use super::delete_worst;
use super::DeletionStrategy;
use super::LearningOptions;
use super::ReductionContext;
use crate::engine::constraints::ConstraintReference;
use crate::engine::restarts::ConflictTimer;
use crate::engine::restarts::FixedConflictTimer;

/// Forgets the oldest half of the deletable constraints, regardless of how useful they were.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct AgeDeletion;

impl DeletionStrategy for AgeDeletion {
    fn reduce(
        &mut self,
        learned: &mut Vec<ConstraintReference>,
        context: ReductionContext<'_>,
    ) -> Vec<ConstraintReference> {
        delete_worst(
            learned,
            context,
            |first, second| first.metadata.age.cmp(&second.metadata.age),
            |num_deletable| num_deletable / 2,
        )
    }

    fn create_timer(&self, options: &LearningOptions) -> Box<dyn ConflictTimer> {
        Box::new(FixedConflictTimer::new(options.reduce_first_bound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::learned_constraints::test_helpers::learned_clauses;

    #[test]
    fn oldest_half_is_deleted() {
        let (constraints, vocabulary, mut learned) =
            learned_clauses(&[(3, 9.0, 0), (3, 9.0, 0), (3, 0.0, 0), (3, 0.0, 0)]);
        let all = learned.clone();

        let deleted = AgeDeletion.reduce(
            &mut learned,
            ReductionContext {
                constraints: &constraints,
                vocabulary: &vocabulary,
            },
        );

        assert_eq!(deleted, vec![all[0], all[1]]);
    }
}
