use super::mandatory_variables;
use super::truth_table;
use super::PrimeImplicantStrategy;
use super::Requirement;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::engine::variables::Literal;

/// Counts the true literals of every requirement and drops a literal when every requirement it
/// occurs in has true literals to spare.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct CounterBasedPrimeImplicant;

impl PrimeImplicantStrategy for CounterBasedPrimeImplicant {
    fn compute(&mut self, model: &[Literal], requirements: &[Requirement]) -> Vec<Literal> {
        let mandatory = mandatory_variables(model, requirements);
        let is_true = truth_table(model);

        let mut counts = vec![0_usize; requirements.len()];
        let mut degrees = vec![0_usize; requirements.len()];
        // For every true literal, the requirements it occurs in, once per occurrence.
        let mut occurrences: KeyedVec<Literal, Vec<usize>> = KeyedVec::default();
        occurrences.grow_with(is_true.len(), Vec::new);

        for (index, requirement) in requirements.iter().enumerate() {
            if let Requirement::AtLeast { literals, degree } = requirement {
                degrees[index] = *degree as usize;
                for &literal in literals {
                    if literal.index() < is_true.len() && is_true[literal] {
                        counts[index] += 1;
                        occurrences[literal].push(index);
                    }
                }
            }
        }

        let mut implicant = Vec::new();
        for &literal in model {
            if mandatory[literal.get_variable()] {
                implicant.push(literal);
                continue;
            }

            let occurs_in = &occurrences[literal];
            occurs_in.iter().for_each(|&index| counts[index] -= 1);
            if occurs_in.iter().any(|&index| counts[index] < degrees[index]) {
                occurs_in.iter().for_each(|&index| counts[index] += 1);
                implicant.push(literal);
            }
        }
        implicant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::prime_implicants::test_helpers::check_strategy;
    use crate::engine::prime_implicants::test_helpers::literals;

    #[test]
    fn computes_a_prime_implicant() {
        check_strategy(&mut CounterBasedPrimeImplicant);
    }

    #[test]
    fn a_duplicated_literal_counts_twice() {
        let model = literals(&[1, 2]);
        let requirements = vec![Requirement::AtLeast {
            literals: literals(&[1, 1]),
            degree: 2,
        }];
        let implicant = CounterBasedPrimeImplicant.compute(&model, &requirements);
        assert_eq!(implicant, literals(&[1]));
    }
}
