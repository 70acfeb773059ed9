use itertools::Itertools;

use super::factory;
use super::factory::Normalised;
use super::AssignmentView;
use super::ConstraintKind;
use super::CustomConstraint;
use crate::engine::prime_implicants::Requirement;
use crate::engine::variables::Literal;
use crate::engine::vocabulary::Vocabulary;

/// A constraint as it was added, before any simplification.
///
/// Descriptions are kept for as long as the constraint is part of the problem; the attached
/// constraints are rebuilt from them whenever constraints are removed.
#[derive(Debug)]
pub(crate) enum ConstraintDescription {
    Clause(Vec<Literal>),
    /// `sum(literals) >= degree`.
    AtLeast(Vec<Literal>, u32),
    /// An even (`true`) or odd number of the literals is true.
    Parity(Vec<Literal>, bool),
    Custom(Box<dyn CustomConstraint>),
}

impl ConstraintDescription {
    /// `sum(literals) <= degree`, which is `sum(!literals) >= len - degree`.
    pub(crate) fn at_most(literals: &[Literal], degree: u32) -> ConstraintDescription {
        ConstraintDescription::AtLeast(
            literals.iter().map(|&literal| !literal).collect(),
            (literals.len() as u32).saturating_sub(degree),
        )
    }

    pub(crate) fn literals(&self) -> &[Literal] {
        match self {
            ConstraintDescription::Clause(literals)
            | ConstraintDescription::AtLeast(literals, _)
            | ConstraintDescription::Parity(literals, _) => literals,
            ConstraintDescription::Custom(custom) => custom.literals(),
        }
    }

    /// Simplifies the constraint against the root facts of `vocabulary`.
    pub(crate) fn normalise(&self, vocabulary: &Vocabulary) -> Normalised {
        match self {
            ConstraintDescription::Clause(literals) => factory::clause(literals, vocabulary),
            ConstraintDescription::AtLeast(literals, degree) => {
                factory::at_least(literals, *degree, vocabulary)
            }
            ConstraintDescription::Parity(literals, even) => {
                factory::parity(literals, *even, vocabulary)
            }
            ConstraintDescription::Custom(custom) => {
                Normalised::Constraint(ConstraintKind::Custom(custom.boxed_clone()))
            }
        }
    }

    /// Whether the constraint holds under the assignment, which has to be complete for parity
    /// constraints to hold.
    pub(crate) fn is_satisfied(&self, assignments: AssignmentView<'_>) -> bool {
        let num_true = |literals: &[Literal]| {
            literals
                .iter()
                .filter(|&&literal| assignments.is_satisfied(literal))
                .count()
        };
        match self {
            ConstraintDescription::Clause(literals) => num_true(literals) >= 1,
            ConstraintDescription::AtLeast(literals, degree) => {
                num_true(literals) >= *degree as usize
            }
            ConstraintDescription::Parity(literals, even) => {
                literals
                    .iter()
                    .all(|&literal| !assignments.is_unassigned(literal))
                    && (num_true(literals) % 2 == 0) == *even
            }
            ConstraintDescription::Custom(custom) => custom.is_satisfied(assignments),
        }
    }

    /// What a prime implicant has to contain for this constraint.
    pub(crate) fn requirement(&self) -> Option<Requirement> {
        match self {
            ConstraintDescription::Clause(literals) => {
                let is_tautology = literals
                    .iter()
                    .any(|&literal| literals.contains(&!literal));
                (!is_tautology).then(|| Requirement::clause(literals))
            }
            ConstraintDescription::AtLeast(literals, degree) => Some(Requirement::AtLeast {
                literals: literals.clone(),
                degree: *degree,
            }),
            ConstraintDescription::Parity(..) | ConstraintDescription::Custom(_) => {
                Some(Requirement::Mandatory(
                    self.literals()
                        .iter()
                        .map(|literal| literal.get_variable())
                        .unique()
                        .collect(),
                ))
            }
        }
    }
}
