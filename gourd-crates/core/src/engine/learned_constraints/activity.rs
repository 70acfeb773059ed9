use super::delete_worst;
use super::DeletionStrategy;
use super::ReductionContext;
use crate::engine::constraints::ConstraintReference;

/// Forgets the half of the deletable constraints with the lowest activity.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ActivityDeletion;

impl DeletionStrategy for ActivityDeletion {
    fn reduce(
        &mut self,
        learned: &mut Vec<ConstraintReference>,
        context: ReductionContext<'_>,
    ) -> Vec<ConstraintReference> {
        delete_worst(
            learned,
            context,
            |first, second| first.metadata.activity.total_cmp(&second.metadata.activity),
            |num_deletable| num_deletable / 2,
        )
    }
}
