//! Solving a single [`Formula`] with several solvers at once.
//!
//! Every solver runs in its own thread with its own [`SolverOptions`] and its own copy of the
//! constraints; nothing about the search is shared. The first solver to find an answer reports
//! it and stops all the others through their [`StopHandle`]s.
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::thread;
use std::time::Duration;

use gourd_core::options::PhaseSelection;
use gourd_core::options::SolverOptions;
use gourd_core::termination::StopHandle;
use gourd_core::termination::TerminationCondition;
use gourd_core::SearchError;
use gourd_core::Solver;
use log::debug;
use log::info;

use crate::Formula;

/// How often the thread overseeing the race checks whether it has been interrupted.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Answer {
    Satisfiable {
        model: Vec<i32>,
        prime_implicant: Option<Vec<i32>>,
    },
    Unsatisfiable,
    /// No solver found an answer before it was stopped.
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RaceResult {
    pub answer: Answer,
    /// The index of the configuration which found the answer.
    pub winner: Option<usize>,
}

#[derive(Debug)]
struct Podium {
    /// Set once nothing more is expected from the solvers, either because one of them answered
    /// or because the race was interrupted.
    is_finished: bool,
    winner: Option<(usize, Answer)>,
    stop_handles: Vec<StopHandle>,
}

impl Podium {
    fn finish(&mut self) {
        self.is_finished = true;
        self.stop_handles.iter().for_each(StopHandle::request_stop);
    }
}

#[derive(Debug)]
struct Race {
    num_running: AtomicUsize,
    podium: Mutex<Podium>,
}

impl Race {
    fn podium(&self) -> MutexGuard<'_, Podium> {
        self.podium.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Derives `num_solvers` configurations from `base` which differ in their random seed and, from
/// the second one onwards, in their value selection and how often they decide randomly.
pub fn diversify(base: SolverOptions, num_solvers: usize) -> Vec<SolverOptions> {
    (0..num_solvers)
        .map(|index| {
            if index == 0 {
                return base;
            }
            SolverOptions {
                random_seed: base.random_seed.wrapping_add(index as u64),
                phase_selection: match index % 3 {
                    0 => base.phase_selection,
                    1 => PhaseSelection::Negative,
                    _ => PhaseSelection::Random,
                },
                random_decision_frequency: base.random_decision_frequency.max(0.01),
                ..base
            }
        })
        .collect()
}

/// Solves `formula` with one solver per configuration and returns the first answer found.
///
/// `interrupt` is polled by the calling thread while the solvers run; once it says to stop, every
/// solver is stopped and, unless one of them answered already, the answer is [`Answer::Unknown`].
pub fn race(
    formula: &Formula,
    configurations: &[SolverOptions],
    compute_prime_implicant: bool,
    interrupt: &mut impl TerminationCondition,
) -> RaceResult {
    let shared = Race {
        num_running: AtomicUsize::new(configurations.len()),
        podium: Mutex::new(Podium {
            is_finished: false,
            winner: None,
            stop_handles: Vec::with_capacity(configurations.len()),
        }),
    };

    thread::scope(|scope| {
        for (index, &options) in configurations.iter().enumerate() {
            let shared = &shared;
            let _ = scope.spawn(move || {
                run_solver(index, options, formula, compute_prime_implicant, shared);
                let _ = shared.num_running.fetch_sub(1, Ordering::AcqRel);
            });
        }

        while shared.num_running.load(Ordering::Acquire) > 0 {
            if interrupt.should_stop() {
                let mut podium = shared.podium();
                if !podium.is_finished {
                    info!("Race interrupted, stopping {} solvers", podium.stop_handles.len());
                    podium.finish();
                }
            }
            thread::sleep(POLL_INTERVAL);
        }
    });

    let podium = shared
        .podium
        .into_inner()
        .unwrap_or_else(PoisonError::into_inner);
    match podium.winner {
        Some((index, answer)) => RaceResult {
            answer,
            winner: Some(index),
        },
        None => RaceResult {
            answer: Answer::Unknown,
            winner: None,
        },
    }
}

fn run_solver(
    index: usize,
    options: SolverOptions,
    formula: &Formula,
    compute_prime_implicant: bool,
    race: &Race,
) {
    let mut solver = Solver::with_options(options);
    {
        let mut podium = race.podium();
        if podium.is_finished {
            return;
        }
        podium.stop_handles.push(solver.stop_handle());
    }

    let outcome = match formula.add_to(&mut solver) {
        Ok(()) => solver.is_satisfiable(),
        Err(error) => {
            debug!("Solver {index} found a conflict while adding the formula: {error}");
            Ok(false)
        }
    };

    let answer = match outcome {
        Ok(true) => Answer::Satisfiable {
            model: solver.model(),
            prime_implicant: None,
        },
        Ok(false) => Answer::Unsatisfiable,
        Err(SearchError::BudgetExceeded | SearchError::Inconclusive) => {
            debug!("Solver {index} stopped without an answer");
            return;
        }
    };

    let mut podium = race.podium();
    if podium.winner.is_some() {
        return;
    }
    podium.finish();
    info!("Solver {index} answered first");

    let answer = match answer {
        Answer::Satisfiable { model, .. } if compute_prime_implicant => Answer::Satisfiable {
            model,
            prime_implicant: Some(solver.compute_prime_implicant()),
        },
        answer => answer,
    };
    solver.log_statistics();
    podium.winner = Some((index, answer));
}

#[cfg(test)]
mod tests {
    use gourd_core::termination::Indefinite;

    use super::*;

    fn pigeonhole(num_holes: i32) -> Formula {
        let mut formula = Formula::default();
        let variable = |pigeon: i32, hole: i32| pigeon * num_holes + hole + 1;
        for pigeon in 0..=num_holes {
            let holes = (0..num_holes)
                .map(|hole| variable(pigeon, hole))
                .collect::<Vec<_>>();
            formula.add_clause(&holes);
        }
        for hole in 0..num_holes {
            for first in 0..=num_holes {
                for second in first + 1..=num_holes {
                    formula.add_clause(&[-variable(first, hole), -variable(second, hole)]);
                }
            }
        }
        formula
    }

    #[test]
    fn all_configurations_agree_on_unsatisfiability() {
        let configurations = diversify(SolverOptions::default(), 4);
        let result = race(&pigeonhole(4), &configurations, false, &mut Indefinite);
        assert_eq!(result.answer, Answer::Unsatisfiable);
        assert!(result.winner.is_some_and(|winner| winner < 4));
    }

    #[test]
    fn the_winner_reports_a_model() {
        let mut formula = Formula::default();
        formula.add_clause(&[1, 2, 3]);
        formula.add_clause(&[-1, -2]);
        formula.add_parity(&[1, 2, 3, 4], true);

        let configurations = diversify(SolverOptions::default(), 3);
        let result = race(&formula, &configurations, true, &mut Indefinite);
        let Answer::Satisfiable {
            model,
            prime_implicant: Some(prime_implicant),
        } = result.answer
        else {
            panic!("expected a model with a prime implicant, got {:?}", result.answer);
        };
        assert!(formula.is_satisfied_by(&model));
        assert!(prime_implicant
            .iter()
            .all(|literal| model.contains(literal)));
    }

    #[test]
    fn conflicts_while_adding_are_unsatisfiable() {
        let mut formula = Formula::default();
        formula.add_clause(&[1]);
        formula.add_clause(&[]);

        let result = race(&formula, &[SolverOptions::default()], false, &mut Indefinite);
        assert_eq!(result.answer, Answer::Unsatisfiable);
        assert_eq!(result.winner, Some(0));
    }

    #[test]
    fn interrupted_races_are_unknown() {
        let configurations = diversify(SolverOptions::default(), 2);
        let interrupt = StopHandle::default();
        interrupt.request_stop();
        let result = race(&pigeonhole(11), &configurations, false, &mut interrupt.clone());
        assert_eq!(result.answer, Answer::Unknown);
        assert_eq!(result.winner, None);
    }

    #[test]
    fn configurations_differ_in_their_seed() {
        let configurations = diversify(SolverOptions::default(), 3);
        assert_eq!(configurations[0].random_seed, SolverOptions::default().random_seed);
        assert_eq!(configurations[1].phase_selection, PhaseSelection::Negative);
        assert_ne!(configurations[1].random_seed, configurations[2].random_seed);
    }
}
