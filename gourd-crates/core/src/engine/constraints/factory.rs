//! Builds constraints from the literals given through the public interface.
//!
//! Constraints are only created at the root, so every assigned literal is a root fact and can be
//! simplified away before anything is attached. The result tells the solver whether it has to
//! attach a constraint, assert units, or nothing at all.
use itertools::Itertools;

use super::Cardinality;
use super::Clause;
use super::ConstraintKind;
use super::Parity;
use crate::engine::variables::Literal;
use crate::engine::vocabulary::Vocabulary;

#[derive(Debug)]
pub(crate) enum Normalised {
    /// The constraint holds under the root assignment.
    Satisfied,
    /// The constraint is violated under the root assignment.
    Unsatisfiable,
    /// The constraint is equivalent to the conjunction of these literals.
    Units(Vec<Literal>),
    Constraint(ConstraintKind),
}

pub(crate) fn clause(literals: &[Literal], vocabulary: &Vocabulary) -> Normalised {
    if literals
        .iter()
        .any(|&literal| vocabulary.is_satisfied(literal))
    {
        return Normalised::Satisfied;
    }

    let mut literals = literals
        .iter()
        .copied()
        .filter(|&literal| !vocabulary.is_falsified(literal))
        .collect::<Vec<_>>();
    literals.sort_unstable();
    literals.dedup();

    // After sorting, the two literals of a variable are next to each other.
    if literals
        .iter()
        .tuple_windows()
        .any(|(&first, &second)| first == !second)
    {
        return Normalised::Satisfied;
    }

    match literals.len() {
        0 => Normalised::Unsatisfiable,
        1 => Normalised::Units(literals),
        _ => Normalised::Constraint(ConstraintKind::Clause(Clause::new(literals))),
    }
}

/// `sum(literals) >= degree`, where a literal occurring more than once counts every time.
pub(crate) fn at_least(literals: &[Literal], degree: u32, vocabulary: &Vocabulary) -> Normalised {
    let mut degree = i64::from(degree);
    let mut unassigned = Vec::with_capacity(literals.len());
    for &literal in literals {
        if vocabulary.is_satisfied(literal) {
            degree -= 1;
        } else if vocabulary.is_unassigned(literal) {
            unassigned.push(literal);
        }
    }
    unassigned.sort_unstable();

    // `x + !x` is always exactly one, so every such pair lowers the degree by one.
    let mut remaining = Vec::with_capacity(unassigned.len());
    for (_, group) in &unassigned
        .iter()
        .chunk_by(|literal| literal.get_variable())
    {
        let group = group.copied().collect::<Vec<_>>();
        let num_positive = group.iter().filter(|literal| literal.is_positive()).count();
        let num_negative = group.len() - num_positive;
        degree -= num_positive.min(num_negative) as i64;

        let majority = if num_positive >= num_negative {
            group[0]
        } else {
            group[group.len() - 1]
        };
        remaining.extend(std::iter::repeat(majority).take(num_positive.abs_diff(num_negative)));
    }

    if degree <= 0 {
        return Normalised::Satisfied;
    }
    if degree as usize > remaining.len() {
        return Normalised::Unsatisfiable;
    }
    if degree as usize == remaining.len() {
        remaining.dedup();
        return Normalised::Units(remaining);
    }
    if degree == 1 {
        return clause(&remaining, vocabulary);
    }
    Normalised::Constraint(ConstraintKind::Cardinality(Cardinality::new(
        remaining,
        degree as u32,
    )))
}

/// The exclusive or of `literals` is `!even`.
pub(crate) fn parity(literals: &[Literal], even: bool, vocabulary: &Vocabulary) -> Normalised {
    let mut odd = !even;
    let mut variables = Vec::with_capacity(literals.len());
    for &literal in literals {
        // `!x` is `x ⊕ true`
        if literal.is_negative() {
            odd = !odd;
        }
        let positive = Literal::new(literal.get_variable(), true);
        if vocabulary.is_satisfied(positive) {
            odd = !odd;
        } else if vocabulary.is_unassigned(positive) {
            variables.push(positive);
        }
    }
    variables.sort_unstable();

    // `x ⊕ x` is false, so only variables occurring an odd number of times remain.
    let remaining = variables
        .iter()
        .copied()
        .dedup_with_count()
        .filter(|(count, _)| count % 2 == 1)
        .map(|(_, literal)| literal)
        .collect::<Vec<_>>();

    match remaining.len() {
        0 if odd => Normalised::Unsatisfiable,
        0 => Normalised::Satisfied,
        1 if odd => Normalised::Units(remaining),
        1 => Normalised::Units(vec![!remaining[0]]),
        _ => Normalised::Constraint(ConstraintKind::Parity(Parity::new(remaining, odd))),
    }
}

/// A learned clause with the asserting literal at position 0 and a literal of the highest
/// remaining level at position 1.
pub(crate) fn learned_clause(literals: Vec<Literal>) -> Clause {
    Clause::new(literals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literals(dimacs: &[i32]) -> Vec<Literal> {
        dimacs.iter().map(|&literal| Literal::from_dimacs(literal)).collect()
    }

    fn vocabulary_with(num_variables: u32, facts: &[i32]) -> Vocabulary {
        let mut vocabulary = Vocabulary::default();
        vocabulary.ensure_pool(num_variables);
        for literal in literals(facts) {
            vocabulary.satisfies(literal);
        }
        vocabulary
    }

    fn units(normalised: Normalised) -> Vec<i32> {
        match normalised {
            Normalised::Units(units) => units.into_iter().map(Literal::to_dimacs).collect(),
            other => panic!("expected units, got {other:?}"),
        }
    }

    #[test]
    fn tautologies_are_satisfied() {
        let vocabulary = vocabulary_with(3, &[]);
        assert!(matches!(
            clause(&literals(&[1, 2, -1]), &vocabulary),
            Normalised::Satisfied
        ));
    }

    #[test]
    fn clause_with_root_facts_shrinks() {
        let vocabulary = vocabulary_with(3, &[-1, 3]);
        assert_eq!(units(clause(&literals(&[1, 2, 2]), &vocabulary)), vec![2]);
        assert!(matches!(
            clause(&literals(&[1, 3]), &vocabulary),
            Normalised::Satisfied
        ));
        assert!(matches!(
            clause(&literals(&[1]), &vocabulary),
            Normalised::Unsatisfiable
        ));
    }

    #[test]
    fn complementary_pairs_lower_the_degree() {
        let vocabulary = vocabulary_with(3, &[]);
        // x1 + !x1 + x2 + x3 >= 3 is x2 + x3 >= 2
        assert_eq!(
            units(at_least(&literals(&[1, -1, 2, 3]), 3, &vocabulary)),
            vec![2, 3]
        );
    }

    #[test]
    fn impossible_degree_is_unsatisfiable() {
        let vocabulary = vocabulary_with(3, &[-3]);
        assert!(matches!(
            at_least(&literals(&[1, 2, 3]), 3, &vocabulary),
            Normalised::Unsatisfiable
        ));
    }

    #[test]
    fn at_least_one_is_a_clause() {
        let vocabulary = vocabulary_with(3, &[]);
        assert!(matches!(
            at_least(&literals(&[1, 2, 3]), 1, &vocabulary),
            Normalised::Constraint(ConstraintKind::Clause(_))
        ));
    }

    #[test]
    fn parity_normalises_polarity_and_duplicates() {
        let vocabulary = vocabulary_with(4, &[4]);
        // x1 ⊕ !x2 ⊕ x2 ⊕ x3 ⊕ x3 ⊕ x4 even: !x2 ⊕ x2 is true and x4 is true, so x1 is even
        assert_eq!(
            units(parity(&literals(&[1, -2, 2, 3, 3, 4]), true, &vocabulary)),
            vec![-1]
        );
    }

    #[test]
    fn empty_parity_depends_on_the_target() {
        let vocabulary = vocabulary_with(1, &[]);
        assert!(matches!(
            parity(&literals(&[1, 1]), true, &vocabulary),
            Normalised::Satisfied
        ));
        assert!(matches!(
            parity(&literals(&[1, 1]), false, &vocabulary),
            Normalised::Unsatisfiable
        ));
    }

    #[test]
    fn parity_keeps_positive_literals() {
        let vocabulary = vocabulary_with(3, &[]);
        match parity(&literals(&[-1, 2, -3]), true, &vocabulary) {
            Normalised::Constraint(ConstraintKind::Parity(parity)) => {
                assert_eq!(parity.literals(), literals(&[1, 2, 3]).as_slice());
                // two negations keep the target even
                assert!(!parity.is_odd());
            }
            other => panic!("expected a parity constraint, got {other:?}"),
        }
    }
}
