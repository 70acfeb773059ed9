use gourd_core::constraints::AssignmentView;
use gourd_core::constraints::CustomConstraint;
use gourd_core::constraints::PropagationContext;
use gourd_core::options::PhaseSelection;
use gourd_core::options::PrimeImplicantStrategyType;
use gourd_core::options::SolverOptions;
use gourd_core::options::Timeout;
use gourd_core::ConstraintOperationError;
use gourd_core::SearchError;
use gourd_core::Solver;
use gourd_core::variables::Literal;

fn pigeonhole(solver: &mut Solver, num_holes: i32) {
    let num_pigeons = num_holes + 1;
    let variable = |pigeon: i32, hole: i32| pigeon * num_holes + hole + 1;
    for pigeon in 0..num_pigeons {
        let holes = (0..num_holes)
            .map(|hole| variable(pigeon, hole))
            .collect::<Vec<_>>();
        let _ = solver.add_clause(&holes).unwrap();
    }
    for hole in 0..num_holes {
        let pigeons = (0..num_pigeons)
            .map(|pigeon| variable(pigeon, hole))
            .collect::<Vec<_>>();
        let _ = solver.add_at_most(&pigeons, 1).unwrap();
    }
}

fn satisfies_clauses(model: &[i32], clauses: &[&[i32]]) -> bool {
    clauses
        .iter()
        .all(|clause| clause.iter().any(|literal| model.contains(literal)))
}

#[test]
fn three_clauses_over_two_variables_are_satisfiable() {
    let clauses: [&[i32]; 3] = [&[1, 2], &[-1, 2], &[1, -2]];
    let mut solver = Solver::default();
    for clause in clauses {
        let _ = solver.add_clause(clause).unwrap();
    }

    assert_eq!(solver.is_satisfiable(), Ok(true));
    let model = solver.model();
    assert!(satisfies_clauses(&model, &clauses));
    assert_eq!(model, vec![1, 2]);
}

#[test]
fn contradicting_units_are_detected_when_added() {
    let mut solver = Solver::default();
    let _ = solver.add_clause(&[1, 2]).unwrap();
    let _ = solver.add_clause(&[-1]).unwrap();
    assert_eq!(
        solver.add_clause(&[-2]),
        Err(ConstraintOperationError::TriviallyUnsatisfiable)
    );

    let _ = solver.add_clause(&[1]).unwrap_err();
    assert_eq!(solver.statistics().engine_statistics.num_decisions, 0);
}

#[test]
fn parity_forces_the_last_literal() {
    let mut solver = Solver::default();
    let _ = solver.add_parity(&[1, 2, 3], true).unwrap();
    let _ = solver.add_clause(&[1]).unwrap();
    let _ = solver.add_clause(&[2]).unwrap();

    assert_eq!(solver.is_satisfiable(), Ok(true));
    assert_eq!(solver.model(), vec![1, 2, -3]);
    assert_eq!(solver.statistics().engine_statistics.num_decisions, 0);

    let mut odd = Solver::default();
    let _ = odd.add_parity(&[1, 2, 3], false).unwrap();
    let _ = odd.add_clause(&[1]).unwrap();
    let _ = odd.add_clause(&[2]).unwrap();
    assert_eq!(odd.is_satisfiable(), Ok(true));
    assert_eq!(odd.model(), vec![1, 2, 3]);
}

#[test]
fn pigeonhole_is_refuted_with_cardinality_and_with_clauses() {
    let mut solver = Solver::default();
    pigeonhole(&mut solver, 5);
    assert_eq!(solver.is_satisfiable(), Ok(false));
    assert!(solver.statistics().engine_statistics.num_conflicts > 0);
    assert_eq!(solver.unsat_core(), Some(vec![]));

    let mut solver = Solver::default();
    let num_holes = 4;
    let variable = |pigeon: i32, hole: i32| pigeon * num_holes + hole + 1;
    for pigeon in 0..=num_holes {
        let holes = (0..num_holes)
            .map(|hole| variable(pigeon, hole))
            .collect::<Vec<_>>();
        let _ = solver.add_clause(&holes).unwrap();
    }
    for hole in 0..num_holes {
        for first in 0..=num_holes {
            for second in first + 1..=num_holes {
                let _ = solver
                    .add_clause(&[-variable(first, hole), -variable(second, hole)])
                    .unwrap();
            }
        }
    }
    assert_eq!(solver.is_satisfiable(), Ok(false));
}

#[test]
fn exactly_constraints_hold_in_the_model() {
    let mut solver = Solver::default();
    let _ = solver.add_exactly(&[1, 2, 3, 4, 5], 2).unwrap();
    let _ = solver.add_clause(&[1, 2]).unwrap();
    let _ = solver.add_clause(&[-1, -2]).unwrap();
    let _ = solver.add_at_least(&[3, 4, 5], 1).unwrap();

    assert_eq!(solver.is_satisfiable(), Ok(true));
    let model = solver.model();
    let num_true = model[..5].iter().filter(|&&literal| literal > 0).count();
    assert_eq!(num_true, 2);
    assert!(solver.check_model());
}

#[test]
fn impossible_cardinality_is_trivially_unsatisfiable() {
    let mut solver = Solver::default();
    assert_eq!(
        solver.add_at_least(&[1, 2], 3),
        Err(ConstraintOperationError::TriviallyUnsatisfiable)
    );
    let _ = solver.add_clause(&[-3]).unwrap();
    assert_eq!(
        solver.add_exactly(&[1, 2, 3], 3),
        Err(ConstraintOperationError::TriviallyUnsatisfiable)
    );
    assert_eq!(solver.num_constraints(), 1);
}

#[test]
fn unsatisfiable_cores_only_contain_assumptions() {
    let mut solver = Solver::default();
    let _ = solver.add_clause(&[-1, 2]).unwrap();
    let _ = solver.add_clause(&[-2, 3]).unwrap();
    let _ = solver.add_clause(&[-4, 5]).unwrap();

    assert_eq!(solver.is_satisfiable_with_assumptions(&[4, 1, -3]), Ok(false));
    let mut core = solver.unsat_core().unwrap();
    core.sort();
    assert_eq!(core, vec![-3, 1]);

    // The constraints themselves are still satisfiable.
    assert_eq!(solver.is_satisfiable(), Ok(true));
    assert_eq!(solver.is_satisfiable_with_assumptions(&[4, 1]), Ok(true));
    let model = solver.model();
    assert!(model.contains(&4) && model.contains(&1) && model.contains(&3));
}

#[test]
fn prime_implicants_are_subsets_of_the_model() {
    for strategy in [
        PrimeImplicantStrategyType::Quadratic,
        PrimeImplicantStrategyType::CounterBased,
        PrimeImplicantStrategyType::WatcherBased,
    ] {
        let options = SolverOptions {
            prime_implicant_strategy: strategy,
            phase_selection: PhaseSelection::Positive,
            ..Default::default()
        };
        let mut solver = Solver::with_options(options);
        let _ = solver.add_clause(&[1, 2, 3]).unwrap();
        let _ = solver.add_clause(&[-1, 4]).unwrap();
        let _ = solver.add_at_least(&[2, 3, 4, 5], 2).unwrap();
        let _ = solver.add_parity(&[5, 6], true).unwrap();

        assert_eq!(solver.is_satisfiable(), Ok(true));
        let model = solver.model();
        let implicant = solver.compute_prime_implicant();
        assert!(implicant.iter().all(|literal| model.contains(literal)));

        // Every constraint is satisfied by the implicant alone.
        let num_in_implicant = |literals: &[i32]| {
            literals
                .iter()
                .filter(|literal| implicant.contains(literal))
                .count()
        };
        assert!(num_in_implicant(&[1, 2, 3]) >= 1, "{strategy:?}");
        assert!(num_in_implicant(&[-1, 4]) >= 1, "{strategy:?}");
        assert!(num_in_implicant(&[2, 3, 4, 5]) >= 2, "{strategy:?}");
        // Parity needs all of its variables.
        assert_eq!(num_in_implicant(&[5, -5, 6, -6]), 2, "{strategy:?}");
    }
}

#[test]
fn reset_gives_the_same_answer() {
    let mut solver = Solver::default();
    pigeonhole(&mut solver, 3);
    let first = solver.is_satisfiable();

    solver.reset();
    assert_eq!(solver.num_variables(), 0);
    pigeonhole(&mut solver, 3);
    assert_eq!(solver.is_satisfiable(), first);
}

#[test]
fn global_timeout_spans_several_queries() {
    let options = SolverOptions {
        timeout: Timeout::Conflicts(10),
        ..Default::default()
    };
    let mut solver = Solver::with_options(options);
    pigeonhole(&mut solver, 7);

    assert_eq!(
        solver.is_satisfiable_with(&[], true),
        Err(SearchError::BudgetExceeded)
    );
    // The shared budget is spent already.
    assert_eq!(
        solver.is_satisfiable_with(&[], true),
        Err(SearchError::BudgetExceeded)
    );
    let conflicts = solver.statistics().engine_statistics.num_conflicts;
    assert_eq!(conflicts, 10);
}

#[test]
fn stop_handle_interrupts_from_another_thread() {
    let options = SolverOptions {
        timeout: Timeout::WallClock(std::time::Duration::from_secs(30)),
        ..Default::default()
    };
    let mut solver = Solver::with_options(options);
    pigeonhole(&mut solver, 11);

    let handle = solver.stop_handle();
    let stopper = std::thread::spawn(move || {
        std::thread::sleep(std::time::Duration::from_millis(50));
        handle.request_stop();
    });
    assert_eq!(solver.is_satisfiable(), Err(SearchError::BudgetExceeded));
    stopper.join().unwrap();
    assert!(!solver.stop_handle().is_stop_requested());
}

/// At most one of the literals is true, propagated by watching every literal.
#[derive(Clone, Debug)]
struct AtMostOne {
    literals: Vec<Literal>,
    /// How many of the literals are currently true, kept up to date through undo calls.
    num_true: usize,
}

impl AtMostOne {
    fn new(dimacs: &[i32]) -> Box<AtMostOne> {
        Box::new(AtMostOne {
            literals: dimacs.iter().map(|&literal| Literal::from_dimacs(literal)).collect(),
            num_true: 0,
        })
    }

    fn falsify_others(&self, context: &mut PropagationContext<'_>, p: Literal) -> bool {
        self.literals
            .iter()
            .filter(|&&literal| literal != p)
            .all(|&literal| context.enqueue(!literal))
    }
}

impl CustomConstraint for AtMostOne {
    fn literals(&self) -> &[Literal] {
        &self.literals
    }

    fn attach(&mut self, context: &mut PropagationContext<'_>) -> bool {
        for &literal in &self.literals {
            context.watch(literal);
        }
        let satisfied = self
            .literals
            .iter()
            .copied()
            .filter(|&literal| context.is_satisfied(literal))
            .collect::<Vec<_>>();
        match satisfied.as_slice() {
            [] => true,
            [p] => self.falsify_others(context, *p),
            _ => false,
        }
    }

    fn propagate(&mut self, context: &mut PropagationContext<'_>, p: Literal) -> bool {
        context.watch(p);
        context.register_undo(p.get_variable());
        self.num_true += 1;
        self.num_true == 1 && self.falsify_others(context, p)
    }

    fn calculate_reason(
        &self,
        assignments: AssignmentView<'_>,
        p: Option<Literal>,
        reason: &mut Vec<Literal>,
    ) {
        let mut satisfied = self
            .literals
            .iter()
            .copied()
            .filter(|&literal| assignments.is_satisfied(literal))
            .collect::<Vec<_>>();
        satisfied.sort_by_key(|&literal| assignments.trail_position(literal));
        match p {
            // The earliest true literal forced every other literal to false.
            Some(_) => reason.push(!satisfied[0]),
            None => reason.extend(satisfied.iter().take(2).map(|&literal| !literal)),
        }
    }

    fn undo(&mut self, _p: Literal) {
        self.num_true -= 1;
    }

    fn is_satisfied(&self, assignments: AssignmentView<'_>) -> bool {
        self.literals
            .iter()
            .filter(|&&literal| !assignments.is_falsified(literal))
            .count()
            <= 1
    }

    fn boxed_clone(&self) -> Box<dyn CustomConstraint> {
        Box::new(self.clone())
    }
}

#[test]
fn custom_constraint_propagates_in_a_model() {
    let mut solver = Solver::default();
    let handle = solver.add_constr(AtMostOne::new(&[1, 2, 3, 4, 5])).unwrap();
    let _ = solver.add_clause(&[1, 2, 3, 4, 5]).unwrap();
    let _ = solver.add_clause(&[-1]).unwrap();
    let _ = solver.add_clause(&[-2]).unwrap();

    assert_eq!(solver.is_satisfiable(), Ok(true));
    let model = solver.model();
    assert_eq!(model.iter().filter(|&&literal| literal > 0).count(), 1);
    assert!(model.contains(&-1) && model.contains(&-2));
    assert!(solver.check_model());

    let custom = solver
        .custom_constraint::<AtMostOne>(handle)
        .expect("the custom constraint is held by the solver");
    assert_eq!(custom.literals.len(), 5);
}

#[test]
fn custom_constraint_violated_at_the_root_is_rejected() {
    let mut solver = Solver::default();
    let _ = solver.add_clause(&[1]).unwrap();
    let _ = solver.add_clause(&[2]).unwrap();

    assert_eq!(
        solver.add_constr(AtMostOne::new(&[1, 2, 3])).unwrap_err(),
        ConstraintOperationError::TriviallyUnsatisfiable
    );
    assert_eq!(solver.is_satisfiable(), Ok(true));
}

#[test]
fn pigeonhole_with_custom_constraints_is_unsatisfiable() {
    for num_holes in [3, 5] {
        let num_pigeons = num_holes + 1;
        let variable = |pigeon: i32, hole: i32| pigeon * num_holes + hole + 1;

        let mut solver = Solver::default();
        for pigeon in 0..num_pigeons {
            let holes = (0..num_holes)
                .map(|hole| variable(pigeon, hole))
                .collect::<Vec<_>>();
            let _ = solver.add_clause(&holes).unwrap();
        }
        for hole in 0..num_holes {
            let pigeons = (0..num_pigeons)
                .map(|pigeon| variable(pigeon, hole))
                .collect::<Vec<_>>();
            let _ = solver.add_constr(AtMostOne::new(&pigeons)).unwrap();
        }

        assert_eq!(solver.is_satisfiable(), Ok(false), "{num_holes} holes");
        assert!(solver.statistics().engine_statistics.num_conflicts > 0);
    }
}

#[test]
fn removing_a_custom_constraint_rebuilds_the_others() {
    let mut solver = Solver::default();
    let removed = solver.add_constr(AtMostOne::new(&[1, 2, 3])).unwrap();
    let kept = solver.add_constr(AtMostOne::new(&[4, 5])).unwrap();
    let clause = solver.add_clause(&[1, 2]).unwrap();
    let _ = solver.add_clause(&[1, 3]).unwrap();
    let _ = solver.add_clause(&[2, 3]).unwrap();
    let _ = solver.add_clause(&[-1, 4]).unwrap();
    let _ = solver.add_clause(&[-2, 5]).unwrap();

    assert_eq!(solver.is_satisfiable(), Ok(false));

    solver.remove_constr(removed);
    assert!(solver.custom_constraint::<AtMostOne>(removed).is_none());
    assert!(solver.custom_constraint::<AtMostOne>(clause).is_none());
    assert!(solver.custom_constraint::<AtMostOne>(kept).is_some());

    // Two of 1, 2 and 3 are true, but 1 and 2 together would make both 4 and 5 true.
    assert_eq!(solver.is_satisfiable(), Ok(true));
    let model = solver.model();
    assert!(model.contains(&3));
    assert!(!(model.contains(&4) && model.contains(&5)));
    assert!(solver.check_model());
}
