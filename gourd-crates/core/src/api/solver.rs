use std::time::Instant;

use log::debug;

use super::solver_options::SolverOptions;
use super::solver_options::Timeout;
use crate::basic_types::ConstraintOperationError;
use crate::basic_types::SearchError;
use crate::engine::constraints::AssignmentView;
use crate::engine::constraints::ConstraintDescription;
use crate::engine::constraints::ConstraintHandle;
use crate::engine::constraints::ConstraintKind;
use crate::engine::constraints::ConstraintReference;
use crate::engine::constraints::CustomConstraint;
use crate::engine::prime_implicants::create_prime_implicant_strategy;
use crate::engine::prime_implicants::MandatoryLiteralListener;
use crate::engine::prime_implicants::PrimeImplicantStrategy;
use crate::engine::prime_implicants::Requirement;
use crate::engine::prime_implicants::WatcherBasedPrimeImplicant;
use crate::engine::satisfaction_solver::SatisfactionSolver;
use crate::engine::satisfaction_solver::SolveOutcome;
use crate::engine::solver_statistics::SolverStatistics;
use crate::engine::termination::Combinator;
use crate::engine::termination::ConflictBudget;
use crate::engine::termination::Indefinite;
use crate::engine::termination::StopHandle;
use crate::engine::termination::TerminationCondition;
use crate::engine::termination::WallClockTimeout;
use crate::engine::variables::Literal;
use crate::engine::variables::Variable;
use crate::engine::vocabulary::Vocabulary;
use crate::gourd_assert_advanced;
use crate::statistics::log_statistic_postfix;
use crate::statistics::should_log_statistics;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

/// The main interaction point: constraints over Dimacs numbered variables are added to it, after
/// which it answers satisfiability queries.
///
/// Literals are non-zero `i32`s; `-3` is the negation of variable 3.
///
/// ```rust
/// # use gourd_core::Solver;
/// let mut solver = Solver::default();
///
/// let _ = solver.add_clause(&[1, 2]).unwrap();
/// let _ = solver.add_clause(&[-1, 2]).unwrap();
/// let _ = solver.add_at_most(&[1, 2, 3], 1).unwrap();
///
/// assert_eq!(solver.is_satisfiable(), Ok(true));
/// assert_eq!(solver.model(), vec![-1, 2, -3]);
///
/// // Under the assumption that 3 holds, 2 cannot.
/// assert_eq!(solver.is_satisfiable_with_assumptions(&[3]), Ok(false));
/// assert!(solver.unsat_core().unwrap().contains(&3));
/// ```
///
/// # Removing constraints
/// [`Solver::remove_constr`] rebuilds the constraint database from the constraints that are still
/// present, which forgets everything that was learned. [`Solver::remove_subsumed_constr`] keeps
/// the learned constraints, which is only sound when the removed constraint is implied by the
/// others.
#[derive(Debug)]
pub struct Solver {
    engine: SatisfactionSolver,
    options: SolverOptions,
    /// Every constraint in the order it was added, indexed by its [`ConstraintHandle`].
    originals: Vec<OriginalConstraint>,
    /// The complete assignment found by the last satisfiable query, ordered by variable.
    model: Option<Vec<Literal>>,
    prime_implicant: Option<Vec<Literal>>,
    unsat_core: Option<Vec<Literal>>,
    prime_implicant_strategy: Box<dyn PrimeImplicantStrategy>,
    stop_handle: StopHandle,
    /// The budget shared by consecutive queries which ask for a global timeout.
    global_budget: Option<QueryBudget>,
}

#[derive(Debug)]
struct OriginalConstraint {
    descriptions: Vec<ConstraintDescription>,
    /// The attached constraints; slots may have been deleted by simplification since.
    references: Vec<ConstraintReference>,
    removed: bool,
}

/// The termination condition which implements a [`Timeout`].
#[derive(Debug)]
enum QueryBudget {
    Indefinite(Indefinite),
    WallClock(WallClockTimeout),
    Conflicts(ConflictBudget),
}

impl QueryBudget {
    fn new(timeout: Timeout) -> Self {
        match timeout {
            Timeout::None => QueryBudget::Indefinite(Indefinite),
            Timeout::WallClock(duration) => QueryBudget::WallClock(WallClockTimeout::new(duration)),
            Timeout::Conflicts(budget) => QueryBudget::Conflicts(ConflictBudget::new(budget)),
        }
    }
}

impl TerminationCondition for QueryBudget {
    fn should_stop(&mut self) -> bool {
        match self {
            QueryBudget::Indefinite(indefinite) => indefinite.should_stop(),
            QueryBudget::WallClock(timeout) => timeout.should_stop(),
            QueryBudget::Conflicts(budget) => budget.should_stop(),
        }
    }

    fn conflict_has_occurred(&mut self) {
        match self {
            QueryBudget::Indefinite(indefinite) => indefinite.conflict_has_occurred(),
            QueryBudget::WallClock(timeout) => timeout.conflict_has_occurred(),
            QueryBudget::Conflicts(budget) => budget.conflict_has_occurred(),
        }
    }
}

impl Default for Solver {
    fn default() -> Self {
        Solver::with_options(SolverOptions::default())
    }
}

impl Solver {
    /// Creates a solver with the provided [`SolverOptions`].
    pub fn with_options(options: SolverOptions) -> Self {
        Solver {
            engine: SatisfactionSolver::new(options),
            options,
            originals: Vec::new(),
            model: None,
            prime_implicant: None,
            unsat_core: None,
            prime_implicant_strategy: create_prime_implicant_strategy(
                options.prime_implicant_strategy,
            ),
            stop_handle: StopHandle::default(),
            global_budget: None,
        }
    }

    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// Logs the statistics accumulated over every query so far.
    pub fn log_statistics(&self) {
        if should_log_statistics() {
            self.statistics().log(StatisticLogger::default());
            log_statistic_postfix();
        }
    }

    pub fn statistics(&self) -> SolverStatistics {
        self.engine.statistics()
    }

    /// A handle through which other threads can stop a running query; the query then fails with
    /// [`SearchError::BudgetExceeded`].
    pub fn stop_handle(&self) -> StopHandle {
        self.stop_handle.clone()
    }

    /// Forgets every constraint and variable; the options and the stop handle are kept.
    pub fn reset(&mut self) {
        let stop_handle = self.stop_handle.clone();
        *self = Solver::with_options(self.options);
        self.stop_handle = stop_handle;
    }
}

/// Methods to create variables and add constraints.
impl Solver {
    /// Makes sure variables `1..=num_variables` exist, returning the number of variables.
    pub fn new_var(&mut self, num_variables: u32) -> u32 {
        self.engine.grow(num_variables);
        self.engine.num_variables()
    }

    pub fn num_variables(&self) -> u32 {
        self.engine.num_variables()
    }

    /// The number of added constraints which have not been removed.
    pub fn num_constraints(&self) -> usize {
        self.originals
            .iter()
            .filter(|original| !original.removed)
            .count()
    }

    /// Adds the disjunction of `literals`.
    ///
    /// # Panics
    /// If one of the literals is 0.
    pub fn add_clause(
        &mut self,
        literals: &[i32],
    ) -> Result<ConstraintHandle, ConstraintOperationError> {
        let literals = self.to_literals(literals);
        self.add(vec![ConstraintDescription::Clause(literals)])
    }

    /// Adds the constraint that at least `degree` of `literals` are true.
    pub fn add_at_least(
        &mut self,
        literals: &[i32],
        degree: u32,
    ) -> Result<ConstraintHandle, ConstraintOperationError> {
        let literals = self.to_literals(literals);
        self.add(vec![ConstraintDescription::AtLeast(literals, degree)])
    }

    /// Adds the constraint that at most `degree` of `literals` are true.
    pub fn add_at_most(
        &mut self,
        literals: &[i32],
        degree: u32,
    ) -> Result<ConstraintHandle, ConstraintOperationError> {
        let literals = self.to_literals(literals);
        self.add(vec![ConstraintDescription::at_most(&literals, degree)])
    }

    /// Adds the constraint that exactly `degree` of `literals` are true.
    pub fn add_exactly(
        &mut self,
        literals: &[i32],
        degree: u32,
    ) -> Result<ConstraintHandle, ConstraintOperationError> {
        let literals = self.to_literals(literals);
        self.add(vec![
            ConstraintDescription::AtLeast(literals.clone(), degree),
            ConstraintDescription::at_most(&literals, degree),
        ])
    }

    /// Adds the constraint that an even (if `even`) or odd number of `literals` is true.
    pub fn add_parity(
        &mut self,
        literals: &[i32],
        even: bool,
    ) -> Result<ConstraintHandle, ConstraintOperationError> {
        let literals = self.to_literals(literals);
        self.add(vec![ConstraintDescription::Parity(literals, even)])
    }

    /// Adds a constraint implemented outside of the solver; see [`CustomConstraint`].
    pub fn add_constr(
        &mut self,
        constraint: Box<dyn CustomConstraint>,
    ) -> Result<ConstraintHandle, ConstraintOperationError> {
        self.add(vec![ConstraintDescription::Custom(constraint)])
    }

    /// Converts Dimacs literals, creating their variables if needed and panicking on 0.
    fn to_literals(&mut self, dimacs: &[i32]) -> Vec<Literal> {
        dimacs
            .iter()
            .map(|&literal| self.engine.literal(literal))
            .collect()
    }

    fn add(
        &mut self,
        descriptions: Vec<ConstraintDescription>,
    ) -> Result<ConstraintHandle, ConstraintOperationError> {
        let handle = ConstraintHandle(self.originals.len());
        let references = self.engine.add_constraint(&descriptions, handle)?;
        self.originals.push(OriginalConstraint {
            descriptions,
            references,
            removed: false,
        });
        Ok(handle)
    }

    /// Removes a constraint and rebuilds the constraint database, dropping every learned
    /// constraint.
    ///
    /// # Panics
    /// If the constraint was removed already.
    pub fn remove_constr(&mut self, handle: ConstraintHandle) {
        self.mark_removed(handle);
        self.rebuild();
    }

    /// Removes the most recently added constraint without touching the learned constraints.
    ///
    /// This is only sound if the constraint is implied by the other constraints, as whatever was
    /// learned from it is kept.
    ///
    /// # Panics
    /// If `handle` is not the most recently added constraint, or was removed already.
    pub fn remove_subsumed_constr(&mut self, handle: ConstraintHandle) {
        assert_eq!(
            handle.0 + 1,
            self.originals.len(),
            "only the most recently added constraint can be removed as subsumed"
        );
        self.mark_removed(handle);
        let references = std::mem::take(&mut self.originals[handle.0].references);
        self.engine.remove_constraints(&references, handle);
    }

    fn mark_removed(&mut self, handle: ConstraintHandle) {
        let original = self
            .originals
            .get_mut(handle.0)
            .unwrap_or_else(|| panic!("{handle:?} does not belong to this solver"));
        assert!(!original.removed, "{handle:?} was removed already");
        original.removed = true;
    }

    /// The value of a custom constraint as the solver currently holds it, or [`None`] if it was
    /// removed, deleted because it was satisfied at the root, or is not of type `T`.
    pub fn custom_constraint<T: CustomConstraint>(&self, handle: ConstraintHandle) -> Option<&T> {
        let original = self.originals.get(handle.0)?;
        if original.removed {
            return None;
        }
        original.references.iter().find_map(|&reference| {
            let constraint = self.engine.constraint(reference)?;
            if constraint.metadata.handle != Some(handle) {
                return None;
            }
            match &constraint.kind {
                ConstraintKind::Custom(custom) => custom.downcast_ref::<T>(),
                _ => None,
            }
        })
    }

    /// Attaches every constraint which was not removed to a fresh constraint database.
    fn rebuild(&mut self) {
        self.engine.reset_search();
        let mut is_infeasible = false;
        for (index, original) in self.originals.iter_mut().enumerate() {
            if original.removed || is_infeasible {
                original.references.clear();
                continue;
            }
            match self
                .engine
                .add_constraint(&original.descriptions, ConstraintHandle(index))
            {
                Ok(references) => original.references = references,
                Err(error) => {
                    debug!("Rebuilding stopped at constraint {index}: {error}");
                    original.references.clear();
                    is_infeasible = true;
                }
            }
        }
        if is_infeasible {
            self.engine.declare_infeasible();
        }
    }
}

/// Methods to restrict the search.
impl Solver {
    /// Only decides the given variables; the other variables are only assigned by propagation.
    ///
    /// When the decided variables do not determine the others, a query may fail with
    /// [`SearchError::Inconclusive`].
    pub fn set_decision_variables(&mut self, variables: &[u32]) {
        let variables = variables
            .iter()
            .map(|&variable| {
                let dimacs = i32::try_from(variable).unwrap_or_else(|_| {
                    panic!("variable {variable} does not fit in a Dimacs literal")
                });
                self.engine.literal(dimacs).get_variable()
            })
            .collect::<Vec<Variable>>();
        self.restrict_decisions(Some(&variables));
    }

    /// Allows every variable to be decided again.
    pub fn clear_decision_variables(&mut self) {
        self.restrict_decisions(None);
    }

    fn restrict_decisions(&mut self, variables: Option<&[Variable]>) {
        self.engine.cancel_until(0);
        self.engine.restrict_decisions(variables);
        // Blocking constraints only hold for the restriction they were derived under.
        if self.engine.has_restricted_constraints() {
            self.rebuild();
        }
    }
}

/// Methods for querying satisfiability and retrieving answers.
impl Solver {
    pub fn is_satisfiable(&mut self) -> Result<bool, SearchError> {
        self.is_satisfiable_with(&[], false)
    }

    /// Decides satisfiability under the assumption that every literal of `assumptions` holds.
    ///
    /// If the answer is `false` because of the assumptions, [`Solver::unsat_core`] gives the
    /// assumptions responsible.
    pub fn is_satisfiable_with_assumptions(
        &mut self,
        assumptions: &[i32],
    ) -> Result<bool, SearchError> {
        self.is_satisfiable_with(assumptions, false)
    }

    /// Decides satisfiability under `assumptions`.
    ///
    /// With `global_timeout` the [`Timeout`] of the options is not restarted for this query but
    /// shared with every earlier query which also asked for it, which bounds a whole sequence of
    /// queries at once. Any query without it ends the shared timeout.
    pub fn is_satisfiable_with(
        &mut self,
        assumptions: &[i32],
        global_timeout: bool,
    ) -> Result<bool, SearchError> {
        let assumptions = self.to_literals(assumptions);
        self.model = None;
        self.prime_implicant = None;
        self.unsat_core = None;

        let mut budget = if global_timeout {
            self.global_budget
                .take()
                .unwrap_or_else(|| QueryBudget::new(self.options.timeout))
        } else {
            self.global_budget = None;
            QueryBudget::new(self.options.timeout)
        };

        let start = Instant::now();
        let outcome = self.engine.solve(
            &assumptions,
            &mut Combinator::new(self.stop_handle.clone(), &mut budget),
        );
        self.engine
            .record_solve_time(start.elapsed().as_millis() as u64);
        if global_timeout {
            self.global_budget = Some(budget);
        }

        match outcome {
            SolveOutcome::Satisfiable => {
                let mut model = self.engine.extract_model();
                model.sort_by_key(|literal| literal.get_variable());
                self.engine.cancel_until(0);
                self.model = Some(model);
                gourd_assert_advanced!(self.check_model());
                Ok(true)
            }
            SolveOutcome::Unsatisfiable => {
                self.unsat_core = Some(Vec::new());
                Ok(false)
            }
            SolveOutcome::UnsatisfiableUnderAssumptions(core) => {
                self.unsat_core = Some(core);
                Ok(false)
            }
            SolveOutcome::BudgetExceeded => {
                if self.stop_handle.is_stop_requested() {
                    self.stop_handle.clear();
                }
                Err(SearchError::BudgetExceeded)
            }
            SolveOutcome::Inconclusive => {
                self.rebuild();
                Err(SearchError::Inconclusive)
            }
        }
    }

    /// The model found by the last query, one literal per variable, ordered by variable.
    ///
    /// # Panics
    /// If the last query did not answer `true`.
    pub fn model(&self) -> Vec<i32> {
        self.model_literals()
            .iter()
            .map(|literal| literal.to_dimacs())
            .collect()
    }

    fn model_literals(&self) -> &[Literal] {
        self.model
            .as_deref()
            .unwrap_or_else(|| panic!("the model is only available after a satisfiable answer"))
    }

    /// The literals of the model which are needed to satisfy every constraint, minimised such
    /// that none of them can be dropped.
    ///
    /// # Panics
    /// If the last query did not answer `true`.
    pub fn compute_prime_implicant(&mut self) -> Vec<i32> {
        let requirements = self.requirements();
        let model = self.model_literals().to_vec();

        let mut implicant = self.prime_implicant_strategy.compute(&model, &requirements);
        implicant.sort_by_key(|literal| literal.get_variable());
        debug!(
            "Prime implicant of {} out of {} literals",
            implicant.len(),
            model.len()
        );

        let dimacs = implicant.iter().map(|literal| literal.to_dimacs()).collect();
        self.prime_implicant = Some(implicant);
        dimacs
    }

    /// Tells `listener` about every literal of a prime implicant as soon as it is known to be
    /// needed, which happens while the computation is still going on.
    ///
    /// The literals are found by the watcher based strategy, whatever the options say.
    ///
    /// # Panics
    /// If the last query did not answer `true`.
    pub fn compute_prime_implicant_with_listener(
        &self,
        listener: &mut impl MandatoryLiteralListener,
    ) {
        let requirements = self.requirements();
        WatcherBasedPrimeImplicant::default().compute_with_listener(
            self.model_literals(),
            &requirements,
            listener,
        );
    }

    fn requirements(&self) -> Vec<Requirement> {
        self.present_descriptions()
            .filter_map(ConstraintDescription::requirement)
            .collect()
    }

    /// The prime implicant computed by [`Solver::compute_prime_implicant`].
    ///
    /// # Panics
    /// If no prime implicant was computed since the last query.
    pub fn prime_implicant(&self) -> Vec<i32> {
        self.prime_implicant
            .as_ref()
            .unwrap_or_else(|| panic!("no prime implicant was computed for the current model"))
            .iter()
            .map(|literal| literal.to_dimacs())
            .collect()
    }

    /// After a query answered `false`: the assumptions which together are unsatisfiable. It is
    /// empty if the constraints are unsatisfiable on their own.
    pub fn unsat_core(&self) -> Option<Vec<i32>> {
        self.unsat_core
            .as_ref()
            .map(|core| core.iter().map(|literal| literal.to_dimacs()).collect())
    }

    /// Whether the model of the last query satisfies every constraint which is present.
    ///
    /// # Panics
    /// If the last query did not answer `true`.
    pub fn check_model(&self) -> bool {
        let model = self.model_literals();
        let mut vocabulary = Vocabulary::default();
        vocabulary.ensure_pool(self.engine.num_variables());
        for &literal in model {
            vocabulary.satisfies(literal);
        }
        let assignments = AssignmentView::new(&vocabulary);
        self.present_descriptions()
            .all(|description| description.is_satisfied(assignments))
    }

    fn present_descriptions(&self) -> impl Iterator<Item = &ConstraintDescription> {
        self.originals
            .iter()
            .filter(|original| !original.removed)
            .flat_map(|original| original.descriptions.iter())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trivially_unsatisfiable_constraints_are_not_added() {
        let mut solver = Solver::default();
        let _ = solver.add_clause(&[1]).unwrap();
        assert_eq!(
            solver.add_clause(&[-1]),
            Err(ConstraintOperationError::TriviallyUnsatisfiable)
        );
        assert_eq!(solver.num_constraints(), 1);
        assert_eq!(solver.is_satisfiable(), Ok(true));
    }

    #[test]
    fn removing_a_constraint_restores_satisfiability() {
        let mut solver = Solver::default();
        let _ = solver.add_clause(&[1, 2]).unwrap();
        let _ = solver.add_clause(&[-1, 2]).unwrap();
        let blocking = solver.add_clause(&[-2, 3]).unwrap();
        let _ = solver.add_clause(&[-3]).unwrap_err();
        let _ = solver.add_clause(&[-3, 1]).unwrap();
        let _ = solver.add_clause(&[-3, -1]).unwrap();
        assert_eq!(solver.is_satisfiable(), Ok(false));

        solver.remove_constr(blocking);
        assert_eq!(solver.is_satisfiable(), Ok(true));
        assert!(solver.check_model());
        assert_eq!(solver.statistics().engine_statistics.num_rebuilds, 1);
    }

    #[test]
    fn literals_of_unknown_variables_create_them() {
        let mut solver = Solver::default();
        let _ = solver.add_clause(&[5, -2]).unwrap();
        assert_eq!(solver.num_variables(), 5);

        assert_eq!(solver.is_satisfiable_with_assumptions(&[-5, 7]), Ok(true));
        assert_eq!(solver.num_variables(), 7);

        solver.set_decision_variables(&[9]);
        assert_eq!(solver.num_variables(), 9);
    }

    #[test]
    #[should_panic(expected = "does not fit in a Dimacs literal")]
    fn decision_variables_beyond_the_dimacs_range_panic() {
        let mut solver = Solver::default();
        solver.set_decision_variables(&[u32::MAX]);
    }

    #[test]
    #[should_panic(expected = "removed already")]
    fn removing_twice_panics() {
        let mut solver = Solver::default();
        let handle = solver.add_clause(&[1, 2]).unwrap();
        solver.remove_constr(handle);
        solver.remove_constr(handle);
    }

    #[test]
    fn subsumed_constraints_are_removed_in_place() {
        let mut solver = Solver::default();
        let _ = solver.add_clause(&[1, 2]).unwrap();
        let subsumed = solver.add_clause(&[1, 2, 3]).unwrap();
        solver.remove_subsumed_constr(subsumed);
        assert_eq!(solver.num_constraints(), 1);
        assert_eq!(solver.is_satisfiable_with_assumptions(&[-1, -2]), Ok(false));
        assert_eq!(solver.statistics().engine_statistics.num_rebuilds, 0);
    }

    #[test]
    fn conflict_timeout_leaves_the_solver_usable() {
        let options = SolverOptions {
            timeout: Timeout::Conflicts(0),
            ..Default::default()
        };
        let mut solver = Solver::with_options(options);
        let _ = solver.add_clause(&[1, 2]).unwrap();
        assert_eq!(solver.is_satisfiable(), Err(SearchError::BudgetExceeded));
    }

    #[test]
    fn stop_requests_are_consumed() {
        let mut solver = Solver::default();
        let _ = solver.add_clause(&[1, 2]).unwrap();
        solver.stop_handle().request_stop();
        assert_eq!(solver.is_satisfiable(), Err(SearchError::BudgetExceeded));
        assert_eq!(solver.is_satisfiable(), Ok(true));
    }

    #[test]
    fn restricted_decisions_find_models_through_propagation() {
        let mut solver = Solver::default();
        // 3 is the conjunction of 1 and 2, so deciding 1 and 2 determines everything.
        let _ = solver.add_clause(&[-3, 1]).unwrap();
        let _ = solver.add_clause(&[-3, 2]).unwrap();
        let _ = solver.add_clause(&[3, -1, -2]).unwrap();
        solver.set_decision_variables(&[1, 2]);
        assert_eq!(solver.is_satisfiable(), Ok(true));
        assert_eq!(solver.model(), vec![-1, -2, -3]);
        assert!(solver.check_model());
    }

    #[test]
    fn restricted_decisions_can_be_inconclusive() {
        let mut solver = Solver::default();
        let _ = solver.add_clause(&[2, 3]).unwrap();
        let _ = solver.add_clause(&[-2, -3]).unwrap();
        let _ = solver.add_clause(&[1, 2]).unwrap();
        let _ = solver.add_clause(&[-1, 2]).unwrap();
        let _ = solver.add_clause(&[-1, 3]).unwrap();
        let _ = solver.add_clause(&[1, 3]).unwrap();
        // 4 occurs in no constraint, so deciding it never settles the others.
        let _ = solver.new_var(4);
        solver.set_decision_variables(&[4]);
        assert_eq!(solver.is_satisfiable(), Err(SearchError::Inconclusive));

        solver.clear_decision_variables();
        assert_eq!(solver.is_satisfiable(), Ok(false));
    }

    #[test]
    fn prime_implicant_keeps_only_needed_literals() {
        let mut solver = Solver::default();
        let _ = solver.add_clause(&[1, 2, 3]).unwrap();
        let _ = solver.add_clause(&[1, -4]).unwrap();
        assert_eq!(solver.is_satisfiable_with_assumptions(&[1, -2, -3]), Ok(true));

        assert_eq!(solver.compute_prime_implicant(), vec![1]);
        assert_eq!(solver.prime_implicant(), vec![1]);

        let mut mandatory: Vec<Literal> = Vec::new();
        solver.compute_prime_implicant_with_listener(&mut mandatory);
        assert_eq!(mandatory, vec![Literal::from_dimacs(1)]);
    }
}
