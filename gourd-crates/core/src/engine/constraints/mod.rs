//! The constraints of the solver and the arena which owns them.
//!
//! Watch lists, reasons and the learned constraint database refer to constraints through
//! [`ConstraintReference`]s into the [`ConstraintAllocator`]; a slot which has been freed is
//! simply empty, which makes liveness checks trivial.
mod cardinality;
mod clause;
mod custom;
mod description;
pub(crate) mod factory;
mod parity;
mod propagation_context;

pub(crate) use cardinality::Cardinality;
pub(crate) use clause::Clause;
pub use custom::CustomConstraint;
pub(crate) use description::ConstraintDescription;
pub(crate) use parity::Parity;
pub(crate) use propagation_context::enqueue;
pub use propagation_context::AssignmentView;
pub use propagation_context::PropagationContext;

use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::engine::variables::Literal;
use crate::engine::vocabulary::Vocabulary;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct ConstraintReference(u32);

impl StorageKey for ConstraintReference {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        ConstraintReference(index as u32)
    }
}

/// An opaque reference to a constraint added through the public interface, used to remove it
/// later on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConstraintHandle(pub(crate) usize);

#[derive(Debug)]
pub(crate) enum ConstraintKind {
    Clause(Clause),
    Cardinality(Cardinality),
    Parity(Parity),
    Custom(Box<dyn CustomConstraint>),
}

/// Bookkeeping of a constraint which is not about its semantics.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ConstraintMetadata {
    pub(crate) learned: bool,
    pub(crate) activity: f64,
    pub(crate) lbd: u32,
    /// The number of constraints which were learned before this one.
    pub(crate) age: u64,
    /// Protected constraints survive every database reduction.
    pub(crate) protected: bool,
    /// Blocking constraints which only hold because branching is restricted.
    pub(crate) restricted: bool,
    /// The added constraint this one was created for, if it is not learned.
    pub(crate) handle: Option<ConstraintHandle>,
}

#[derive(Debug)]
pub(crate) struct Constraint {
    pub(crate) kind: ConstraintKind,
    pub(crate) metadata: ConstraintMetadata,
}

impl Constraint {
    pub(crate) fn original(kind: ConstraintKind) -> Constraint {
        Constraint {
            kind,
            metadata: ConstraintMetadata::default(),
        }
    }

    pub(crate) fn learned(clause: Clause, age: u64) -> Constraint {
        Constraint {
            kind: ConstraintKind::Clause(clause),
            metadata: ConstraintMetadata {
                learned: true,
                age,
                ..Default::default()
            },
        }
    }

    pub(crate) fn literals(&self) -> &[Literal] {
        match &self.kind {
            ConstraintKind::Clause(clause) => clause.literals(),
            ConstraintKind::Cardinality(cardinality) => cardinality.literals(),
            ConstraintKind::Parity(parity) => parity.literals(),
            ConstraintKind::Custom(custom) => custom.literals(),
        }
    }

    pub(crate) fn size(&self) -> usize {
        self.literals().len()
    }

    pub(crate) fn is_learned(&self) -> bool {
        self.metadata.learned
    }

    /// Registers the initial watches; returns false if the constraint is violated.
    pub(crate) fn attach(&mut self, context: &mut PropagationContext<'_>) -> bool {
        match &mut self.kind {
            ConstraintKind::Clause(clause) => {
                clause.attach(context);
                true
            }
            ConstraintKind::Cardinality(cardinality) => {
                cardinality.attach(context);
                true
            }
            ConstraintKind::Parity(parity) => {
                parity.attach(context);
                true
            }
            ConstraintKind::Custom(custom) => custom.attach(context),
        }
    }

    pub(crate) fn propagate(&mut self, context: &mut PropagationContext<'_>, p: Literal) -> bool {
        match &mut self.kind {
            ConstraintKind::Clause(clause) => clause.propagate(context, p),
            ConstraintKind::Cardinality(cardinality) => cardinality.propagate(context, p),
            ConstraintKind::Parity(parity) => parity.propagate(context, p),
            ConstraintKind::Custom(custom) => custom.propagate(context, p),
        }
    }

    pub(crate) fn calculate_reason(
        &self,
        vocabulary: &Vocabulary,
        p: Option<Literal>,
        reason: &mut Vec<Literal>,
    ) {
        match &self.kind {
            ConstraintKind::Clause(clause) => clause.calculate_reason(p, reason),
            ConstraintKind::Cardinality(cardinality) => {
                cardinality.calculate_reason(vocabulary, p, reason)
            }
            ConstraintKind::Parity(parity) => parity.calculate_reason(vocabulary, p, reason),
            ConstraintKind::Custom(custom) => {
                custom.calculate_reason(AssignmentView::new(vocabulary), p, reason)
            }
        }
    }

    pub(crate) fn undo(&mut self, p: Literal) {
        match &mut self.kind {
            ConstraintKind::Cardinality(cardinality) => cardinality.undo(),
            ConstraintKind::Custom(custom) => custom.undo(p),
            ConstraintKind::Clause(_) | ConstraintKind::Parity(_) => {}
        }
    }

    pub(crate) fn is_satisfied(&self, assignments: AssignmentView<'_>) -> bool {
        match &self.kind {
            ConstraintKind::Clause(clause) => clause.is_satisfied(assignments),
            ConstraintKind::Cardinality(cardinality) => cardinality.is_satisfied(assignments),
            ConstraintKind::Parity(parity) => parity.is_satisfied(assignments),
            ConstraintKind::Custom(custom) => custom.is_satisfied(assignments),
        }
    }

    /// Whether the constraint is the reason of one of the current assignments, in which case
    /// it cannot be deleted.
    pub(crate) fn is_locked(&self, vocabulary: &Vocabulary, reference: ConstraintReference) -> bool {
        let is_reason_of = |literal: Literal| {
            vocabulary.is_satisfied(literal)
                && vocabulary.reason(literal.get_variable()) == Some(reference)
        };
        match &self.kind {
            // Only the first literal of a clause is ever propagated.
            ConstraintKind::Clause(clause) => is_reason_of(clause.literals()[0]),
            ConstraintKind::Parity(parity) => parity
                .literals()
                .iter()
                .any(|&literal| is_reason_of(literal) || is_reason_of(!literal)),
            _ => self.literals().iter().any(|&literal| is_reason_of(literal)),
        }
    }

    pub(crate) fn bump_activity(&mut self, increment: f64) {
        self.metadata.activity += increment;
    }
}

/// The arena owning every attached constraint.
#[derive(Debug, Default)]
pub(crate) struct ConstraintAllocator {
    slots: KeyedVec<ConstraintReference, Option<Constraint>>,
    free_slots: Vec<ConstraintReference>,
}

impl ConstraintAllocator {
    pub(crate) fn allocate(&mut self, constraint: Constraint) -> ConstraintReference {
        match self.free_slots.pop() {
            Some(reference) => {
                self.slots[reference] = Some(constraint);
                reference
            }
            None => self.slots.push(Some(constraint)),
        }
    }

    pub(crate) fn is_alive(&self, reference: ConstraintReference) -> bool {
        reference.index() < self.slots.len() && self.slots[reference].is_some()
    }

    pub(crate) fn get(&self, reference: ConstraintReference) -> &Constraint {
        self.slots[reference]
            .as_ref()
            .unwrap_or_else(|| panic!("{reference:?} refers to a deleted constraint"))
    }

    pub(crate) fn get_mut(&mut self, reference: ConstraintReference) -> &mut Constraint {
        self.slots[reference]
            .as_mut()
            .unwrap_or_else(|| panic!("{reference:?} refers to a deleted constraint"))
    }

    /// Empties the slot of the constraint.
    ///
    /// The slot can only be handed out again after [`ConstraintAllocator::recycle`], which must
    /// not be called before every watch and undo entry of the constraint has been purged.
    pub(crate) fn free(&mut self, reference: ConstraintReference) -> Option<Constraint> {
        self.slots[reference].take()
    }

    pub(crate) fn recycle(&mut self, references: impl IntoIterator<Item = ConstraintReference>) {
        self.free_slots.extend(references);
    }

    #[cfg(test)]
    pub(crate) fn num_alive(&self) -> usize {
        self.iter().count()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (ConstraintReference, &Constraint)> {
        self.slots
            .keys()
            .zip(self.slots.iter())
            .filter_map(|(reference, slot)| slot.as_ref().map(|constraint| (reference, constraint)))
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_slots.clear();
    }
}
