use std::cmp::Ordering;

use super::mandatory_variables;
use super::truth_table;
use super::PrimeImplicantStrategy;
use super::Requirement;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::engine::variables::Literal;

/// Told about every literal which turns out to be part of the prime implicant.
pub trait MandatoryLiteralListener {
    fn is_mandatory(&mut self, literal: Literal);
}

impl MandatoryLiteralListener for Vec<Literal> {
    fn is_mandatory(&mut self, literal: Literal) {
        self.push(literal);
    }
}

/// A literal of the model together with its position in the model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Candidate {
    pub(crate) literal: Literal,
    pub(crate) position: usize,
}

/// Literals assigned last are tried first.
fn reverse_model_order(first: &Candidate, second: &Candidate) -> Ordering {
    second.position.cmp(&first.position)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Status {
    Candidate,
    Dropped,
    Mandatory,
}

/// Every requirement of degree `d` watches `d` occurrences of true literals. A literal can be
/// dropped if every requirement watching it finds another true literal which has not been
/// dropped; otherwise it is mandatory.
///
/// The order in which literals are tried decides which ones end up being dropped.
#[derive(Clone, Copy, Debug)]
pub(crate) struct WatcherBasedPrimeImplicant {
    order: fn(&Candidate, &Candidate) -> Ordering,
}

impl Default for WatcherBasedPrimeImplicant {
    fn default() -> Self {
        WatcherBasedPrimeImplicant {
            order: reverse_model_order,
        }
    }
}

impl WatcherBasedPrimeImplicant {
    #[cfg(test)]
    pub(crate) fn with_order(order: fn(&Candidate, &Candidate) -> Ordering) -> Self {
        WatcherBasedPrimeImplicant { order }
    }

    pub(crate) fn compute_with_listener(
        &self,
        model: &[Literal],
        requirements: &[Requirement],
        listener: &mut impl MandatoryLiteralListener,
    ) {
        let mandatory = mandatory_variables(model, requirements);
        let is_true = truth_table(model);

        let mut status: KeyedVec<Literal, Status> = KeyedVec::default();
        status.grow(is_true.len(), Status::Candidate);

        // Per requirement, whether the occurrence at each position is watched.
        let mut watched: Vec<Vec<bool>> = Vec::with_capacity(requirements.len());
        // Per literal, the requirements watching one of its occurrences, once per occurrence.
        let mut watchers: KeyedVec<Literal, Vec<usize>> = KeyedVec::default();
        watchers.grow_with(is_true.len(), Vec::new);

        for (index, requirement) in requirements.iter().enumerate() {
            let Requirement::AtLeast { literals, degree } = requirement else {
                watched.push(Vec::new());
                continue;
            };
            let mut watched_positions = vec![false; literals.len()];
            let mut num_watched = 0;
            for (position, &literal) in literals.iter().enumerate() {
                if num_watched == *degree {
                    break;
                }
                if literal.index() < is_true.len() && is_true[literal] {
                    watched_positions[position] = true;
                    watchers[literal].push(index);
                    num_watched += 1;
                }
            }
            watched.push(watched_positions);
        }

        let mut candidates = model
            .iter()
            .enumerate()
            .map(|(position, &literal)| Candidate { literal, position })
            .collect::<Vec<_>>();

        for candidate in &candidates {
            if mandatory[candidate.literal.get_variable()] {
                status[candidate.literal] = Status::Mandatory;
                listener.is_mandatory(candidate.literal);
            }
        }

        candidates.sort_by(self.order);

        for Candidate { literal, .. } in candidates {
            if status[literal] == Status::Mandatory {
                continue;
            }

            let mut remaining = std::mem::take(&mut watchers[literal]);
            remaining.retain(|&index| {
                let Requirement::AtLeast { literals, .. } = &requirements[index] else {
                    return false;
                };
                let replacement = literals.iter().enumerate().position(|(position, &other)| {
                    other != literal
                        && !watched[index][position]
                        && other.index() < is_true.len()
                        && is_true[other]
                        && status[other] != Status::Dropped
                });
                let Some(replacement) = replacement else {
                    return true;
                };

                let old_position = literals
                    .iter()
                    .enumerate()
                    .position(|(position, &other)| other == literal && watched[index][position]);
                if let Some(old_position) = old_position {
                    watched[index][old_position] = false;
                }
                watched[index][replacement] = true;
                watchers[literals[replacement]].push(index);
                false
            });

            if remaining.is_empty() {
                status[literal] = Status::Dropped;
            } else {
                status[literal] = Status::Mandatory;
                listener.is_mandatory(literal);
            }
            watchers[literal].extend(remaining);
        }
    }
}

impl PrimeImplicantStrategy for WatcherBasedPrimeImplicant {
    fn compute(&mut self, model: &[Literal], requirements: &[Requirement]) -> Vec<Literal> {
        let mut implicant = Vec::new();
        self.compute_with_listener(model, requirements, &mut implicant);
        implicant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::prime_implicants::test_helpers::assert_prime;
    use crate::engine::prime_implicants::test_helpers::check_strategy;
    use crate::engine::prime_implicants::test_helpers::literals;

    fn model_order(first: &Candidate, second: &Candidate) -> Ordering {
        first.position.cmp(&second.position)
    }

    #[test]
    fn computes_a_prime_implicant() {
        check_strategy(&mut WatcherBasedPrimeImplicant::default());
        check_strategy(&mut WatcherBasedPrimeImplicant::with_order(model_order));
    }

    #[test]
    fn the_order_decides_which_literal_is_dropped() {
        let model = literals(&[1, 2]);
        let requirements = vec![Requirement::clause(&literals(&[1, 2]))];

        let implicant = WatcherBasedPrimeImplicant::default().compute(&model, &requirements);
        assert_eq!(implicant, literals(&[1]));

        let implicant =
            WatcherBasedPrimeImplicant::with_order(model_order).compute(&model, &requirements);
        assert_eq!(implicant, literals(&[2]));
    }

    #[test]
    fn cardinality_keeps_as_many_literals_as_its_degree() {
        let model = literals(&[1, 2, 3, 4]);
        let requirements = vec![Requirement::AtLeast {
            literals: literals(&[1, 2, 3, 4]),
            degree: 3,
        }];
        let implicant = WatcherBasedPrimeImplicant::default().compute(&model, &requirements);
        assert_eq!(implicant.len(), 3);
        assert_prime(&model, &implicant, &requirements);
    }
}
