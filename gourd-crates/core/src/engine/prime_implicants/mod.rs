//! Shrinks a model to a prime implicant: a subset of its literals which satisfies every
//! constraint on its own, and from which no literal can be dropped without losing that property.
//!
//! The strategies work on a [`Requirement`] per added constraint instead of the attached
//! constraints, since those have been simplified against root facts which the implicant still
//! has to account for.
mod counter_based;
mod quadratic;
mod watcher_based;

use std::fmt::Debug;
use std::fmt::Display;

pub(crate) use counter_based::CounterBasedPrimeImplicant;
use enum_map::enum_map;
use enum_map::Enum;
use enum_map::EnumMap;
pub(crate) use quadratic::QuadraticPrimeImplicant;
pub use watcher_based::MandatoryLiteralListener;
pub(crate) use watcher_based::WatcherBasedPrimeImplicant;

use crate::containers::KeyedVec;
use crate::engine::variables::Literal;
use crate::engine::variables::Variable;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Enum)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum PrimeImplicantStrategyType {
    /// Tries to drop every literal in turn and re-checks all constraints each time.
    Quadratic,
    /// Keeps a count of true literals per constraint.
    CounterBased,
    /// Keeps one watched true literal per unit of degree of every constraint.
    #[default]
    WatcherBased,
}

impl Display for PrimeImplicantStrategyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrimeImplicantStrategyType::Quadratic => write!(f, "quadratic"),
            PrimeImplicantStrategyType::CounterBased => write!(f, "counter-based"),
            PrimeImplicantStrategyType::WatcherBased => write!(f, "watcher-based"),
        }
    }
}

/// What an implicant has to provide for a single constraint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Requirement {
    /// At least `degree` of the literals, counted with multiplicity, have to be in the implicant.
    AtLeast {
        literals: Vec<Literal>,
        degree: u32,
    },
    /// The values of these variables can never be dropped.
    Mandatory(Vec<Variable>),
}

impl Requirement {
    pub(crate) fn clause(literals: &[Literal]) -> Requirement {
        Requirement::AtLeast {
            literals: literals.to_vec(),
            degree: 1,
        }
    }

    /// The number of literals of an [`Requirement::AtLeast`] for which `is_true` holds.
    fn num_satisfied(literals: &[Literal], is_true: impl Fn(Literal) -> bool) -> usize {
        literals.iter().filter(|&&literal| is_true(literal)).count()
    }
}

pub(crate) trait PrimeImplicantStrategy: Debug + Send {
    /// Computes a prime implicant of the `requirements` contained in `model`, which has to assign
    /// every variable and satisfy every requirement.
    fn compute(&mut self, model: &[Literal], requirements: &[Requirement]) -> Vec<Literal>;
}

type PrimeImplicantConstructor = fn() -> Box<dyn PrimeImplicantStrategy>;

fn quadratic() -> Box<dyn PrimeImplicantStrategy> {
    Box::new(QuadraticPrimeImplicant)
}

fn counter_based() -> Box<dyn PrimeImplicantStrategy> {
    Box::new(CounterBasedPrimeImplicant)
}

fn watcher_based() -> Box<dyn PrimeImplicantStrategy> {
    Box::<WatcherBasedPrimeImplicant>::default()
}

pub(crate) fn create_prime_implicant_strategy(
    strategy: PrimeImplicantStrategyType,
) -> Box<dyn PrimeImplicantStrategy> {
    let constructors: EnumMap<PrimeImplicantStrategyType, PrimeImplicantConstructor> = enum_map! {
        PrimeImplicantStrategyType::Quadratic => quadratic,
        PrimeImplicantStrategyType::CounterBased => counter_based,
        PrimeImplicantStrategyType::WatcherBased => watcher_based,
    };
    constructors[strategy]()
}

/// Marks the variables of every [`Requirement::Mandatory`].
fn mandatory_variables(model: &[Literal], requirements: &[Requirement]) -> KeyedVec<Variable, bool> {
    let mut mandatory = KeyedVec::default();
    let num_slots = model
        .iter()
        .map(|literal| literal.get_variable().dimacs_id() as usize + 1)
        .max()
        .unwrap_or(1);
    mandatory.grow(num_slots, false);
    for requirement in requirements {
        if let Requirement::Mandatory(variables) = requirement {
            for &variable in variables {
                mandatory.grow(variable.dimacs_id() as usize + 1, false);
                mandatory[variable] = true;
            }
        }
    }
    mandatory
}

/// Whether `literal` is true in `model`, given as one literal per variable.
fn truth_table(model: &[Literal]) -> KeyedVec<Literal, bool> {
    let mut table = KeyedVec::default();
    for &literal in model {
        let variable = literal.get_variable();
        table.grow(2 * (variable.dimacs_id() as usize + 1), false);
        table[literal] = true;
    }
    table
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use super::*;

    pub(crate) fn literals(dimacs: &[i32]) -> Vec<Literal> {
        dimacs.iter().map(|&literal| Literal::from_dimacs(literal)).collect()
    }

    pub(crate) fn at_least(dimacs: &[i32], degree: u32) -> Requirement {
        Requirement::AtLeast {
            literals: literals(dimacs),
            degree,
        }
    }

    pub(crate) fn is_implicant(implicant: &[Literal], requirements: &[Requirement]) -> bool {
        requirements.iter().all(|requirement| match requirement {
            Requirement::AtLeast { literals, degree } => {
                Requirement::num_satisfied(literals, |literal| implicant.contains(&literal))
                    >= *degree as usize
            }
            Requirement::Mandatory(variables) => variables.iter().all(|&variable| {
                implicant
                    .iter()
                    .any(|literal| literal.get_variable() == variable)
            }),
        })
    }

    /// Checks that `implicant` is a prime implicant of `requirements` within `model`.
    pub(crate) fn assert_prime(model: &[Literal], implicant: &[Literal], requirements: &[Requirement]) {
        assert!(implicant.iter().all(|literal| model.contains(literal)));
        assert!(is_implicant(implicant, requirements));
        for index in 0..implicant.len() {
            let mut smaller = implicant.to_vec();
            let _ = smaller.remove(index);
            assert!(
                !is_implicant(&smaller, requirements),
                "{} can be dropped from {implicant:?}",
                implicant[index]
            );
        }
    }

    /// A formula where the model makes every literal of the first clause true.
    pub(crate) fn example() -> (Vec<Literal>, Vec<Requirement>) {
        let model = literals(&[1, 2, 3, -4, 5]);
        let requirements = vec![
            Requirement::clause(&literals(&[1, 2, 3])),
            Requirement::clause(&literals(&[-1, 2])),
            at_least(&[3, -4, 5, 1], 2),
            Requirement::clause(&literals(&[4, 5, -2])),
        ];
        (model, requirements)
    }

    pub(crate) fn check_strategy(strategy: &mut dyn PrimeImplicantStrategy) {
        let (model, requirements) = example();
        let implicant = strategy.compute(&model, &requirements);
        assert_prime(&model, &implicant, &requirements);

        let model = literals(&[1, -2, 3]);
        let requirements = vec![
            Requirement::clause(&literals(&[1, 2])),
            Requirement::Mandatory(vec![Literal::from_dimacs(3).get_variable()]),
            at_least(&[1, 1, -2], 2),
        ];
        let implicant = strategy.compute(&model, &requirements);
        assert_prime(&model, &implicant, &requirements);
        assert!(implicant.contains(&Literal::from_dimacs(3)));

        let implicant = strategy.compute(&model, &[]);
        assert!(implicant.is_empty());
    }
}
