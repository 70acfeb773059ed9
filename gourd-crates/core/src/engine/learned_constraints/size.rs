use super::delete_worst;
use super::DeletionStrategy;
use super::ReductionContext;
use crate::engine::constraints::ConstraintReference;

/// Forgets the longest half of the deletable constraints; among equally long ones the least
/// active go first.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SizeDeletion;

impl DeletionStrategy for SizeDeletion {
    fn reduce(
        &mut self,
        learned: &mut Vec<ConstraintReference>,
        context: ReductionContext<'_>,
    ) -> Vec<ConstraintReference> {
        delete_worst(
            learned,
            context,
            |first, second| {
                second.size().cmp(&first.size()).then_with(|| {
                    first
                        .metadata
                        .activity
                        .total_cmp(&second.metadata.activity)
                })
            },
            |num_deletable| num_deletable / 2,
        )
    }
}
