//! The conflict driven clause learning search.
//!
//! [`SatisfactionSolver`] owns the complete search state: the [`Vocabulary`], the trail, the
//! constraint arena and all heuristics. Strategy objects only ever see the part of that state they
//! need, handed to them as explicit arguments.
use log::debug;
use log::trace;

use crate::basic_types::moving_averages::MovingAverage;
use crate::basic_types::ConstraintOperationError;
use crate::basic_types::Trail;
use crate::branching::create_phase_selector;
use crate::branching::VariableOrder;
use crate::engine::conflict_analysis::ConflictAnalyser;
use crate::engine::conflict_analysis::ConflictAnalysisContext;
use crate::engine::constraints::enqueue;
use crate::engine::constraints::factory;
use crate::engine::constraints::factory::Normalised;
use crate::engine::constraints::AssignmentView;
use crate::engine::constraints::Clause;
use crate::engine::constraints::Constraint;
use crate::engine::constraints::ConstraintAllocator;
use crate::engine::constraints::ConstraintDescription;
use crate::engine::constraints::ConstraintHandle;
use crate::engine::constraints::ConstraintKind;
use crate::engine::constraints::ConstraintMetadata;
use crate::engine::constraints::ConstraintReference;
use crate::engine::constraints::PropagationContext;
use crate::engine::learned_constraints::LearnedConstraints;
use crate::engine::restarts::create_restart_strategy;
use crate::engine::restarts::ConflictTimerContainer;
use crate::engine::restarts::RestartStrategy;
use crate::engine::restarts::TimerHandle;
use crate::engine::solver_statistics::SolverStatistics;
use crate::engine::termination::TerminationCondition;
use crate::engine::variables::Literal;
use crate::engine::variables::Variable;
use crate::engine::vocabulary::Vocabulary;
use crate::gourd_assert_moderate;
use crate::gourd_assert_simple;
use crate::options::SolverOptions;

/// How a query ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SolveOutcome {
    /// Every variable which can be decided is assigned and every constraint is satisfied; the
    /// assignment is left on the trail.
    Satisfiable,
    /// The constraints are unsatisfiable, whatever the assumptions.
    Unsatisfiable,
    /// The constraints are unsatisfiable together with the assumptions in the core.
    UnsatisfiableUnderAssumptions(Vec<Literal>),
    BudgetExceeded,
    /// Blocking clauses were needed because decisions are restricted, and a conflict at the root
    /// (or under the assumptions) followed. The constraint database has to be rebuilt.
    Inconclusive,
}

/// What the search does next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SearchState {
    Propagating,
    Deciding,
    ConflictAnalysis(ConstraintReference),
}

#[derive(Debug)]
pub(crate) struct SatisfactionSolver {
    options: SolverOptions,
    vocabulary: Vocabulary,
    trail: Trail<Literal>,
    /// The position of the next literal on the trail whose watchers have to be notified.
    propagation_head: usize,
    constraints: ConstraintAllocator,
    learned_constraints: LearnedConstraints,
    variable_order: VariableOrder,
    conflict_analyser: ConflictAnalyser,
    restart_strategy: Box<dyn RestartStrategy>,
    timers: ConflictTimerContainer,
    reduce_timer: TimerHandle,
    assumptions: Vec<Literal>,
    /// Set once the constraints have been shown to be unsatisfiable at the root.
    is_infeasible: bool,
    /// Whether a blocking constraint of restricted branching has been added since the last
    /// rebuild.
    has_restricted_constraints: bool,
    /// The trail length at the last root simplification.
    num_assigned_at_simplification: usize,
    statistics: SolverStatistics,
}

impl SatisfactionSolver {
    pub(crate) fn new(options: SolverOptions) -> Self {
        let learned_constraints = LearnedConstraints::new(options.learning_options);
        let mut timers = ConflictTimerContainer::default();
        let reduce_timer = timers.add(learned_constraints.create_timer());

        SatisfactionSolver {
            options,
            vocabulary: Vocabulary::default(),
            trail: Trail::default(),
            propagation_head: 0,
            constraints: ConstraintAllocator::default(),
            learned_constraints,
            variable_order: VariableOrder::new(
                options.vsids_decay,
                options.random_decision_frequency,
                options.random_seed,
                create_phase_selector(options.phase_selection, options.random_seed),
            ),
            conflict_analyser: ConflictAnalyser::new(options.learned_clause_minimisation),
            restart_strategy: create_restart_strategy(&options.restart_options),
            timers,
            reduce_timer,
            assumptions: Vec::new(),
            is_infeasible: false,
            has_restricted_constraints: false,
            num_assigned_at_simplification: 0,
            statistics: SolverStatistics::default(),
        }
    }

    /// Makes sure variables `1..=num_variables` exist.
    pub(crate) fn grow(&mut self, num_variables: u32) {
        if num_variables <= self.vocabulary.num_variables() {
            return;
        }
        self.vocabulary.ensure_pool(num_variables);
        self.variable_order.grow(num_variables);
        self.conflict_analyser.grow(num_variables);
        self.learned_constraints.init(num_variables);
    }

    /// The literal of the Dimacs literal `dimacs`, creating its variable if needed.
    pub(crate) fn literal(&mut self, dimacs: i32) -> Literal {
        self.grow(dimacs.unsigned_abs());
        self.vocabulary.get_from_pool(dimacs)
    }

    pub(crate) fn num_variables(&self) -> u32 {
        self.vocabulary.num_variables()
    }

    pub(crate) fn declare_infeasible(&mut self) {
        self.is_infeasible = true;
    }

    pub(crate) fn has_restricted_constraints(&self) -> bool {
        self.has_restricted_constraints
    }

    pub(crate) fn statistics(&self) -> SolverStatistics {
        let mut statistics = self.statistics;
        statistics.engine_statistics.num_blocked_restarts =
            self.restart_strategy.num_blocked_restarts();
        statistics
    }

    pub(crate) fn record_solve_time(&mut self, milliseconds: u64) {
        self.statistics.engine_statistics.time_spent_in_solver += milliseconds;
    }

    pub(crate) fn constraint(&self, reference: ConstraintReference) -> Option<&Constraint> {
        self.constraints
            .is_alive(reference)
            .then(|| self.constraints.get(reference))
    }

    /// Only allows `variables` to be decided, or every variable when [`None`].
    pub(crate) fn restrict_decisions(&mut self, variables: Option<&[Variable]>) {
        self.variable_order.restrict_to(variables);
    }

    /// Attaches the constraints described by `descriptions` at the root.
    ///
    /// Either all of them are added or, if one of them is violated at the root, none of them: the
    /// root assignment is rolled back to what it was before the call.
    pub(crate) fn add_constraint(
        &mut self,
        descriptions: &[ConstraintDescription],
        handle: ConstraintHandle,
    ) -> Result<Vec<ConstraintReference>, ConstraintOperationError> {
        if self.is_infeasible {
            return Err(ConstraintOperationError::InfeasibleState);
        }
        self.cancel_until(0);

        let checkpoint = self.trail.len();
        let mut added = Vec::new();
        for description in descriptions {
            if let Some(max_variable) = description
                .literals()
                .iter()
                .map(|literal| literal.get_variable().dimacs_id())
                .max()
            {
                self.grow(max_variable);
            }

            let normalised = description.normalise(&self.vocabulary);
            if let Err(error) = self.add_normalised(normalised, handle, &mut added) {
                self.roll_back_root(checkpoint, &added);
                return Err(error);
            }
        }
        Ok(added)
    }

    fn add_normalised(
        &mut self,
        normalised: Normalised,
        handle: ConstraintHandle,
        added: &mut Vec<ConstraintReference>,
    ) -> Result<(), ConstraintOperationError> {
        match normalised {
            Normalised::Satisfied => return Ok(()),
            Normalised::Unsatisfiable => {
                return Err(ConstraintOperationError::TriviallyUnsatisfiable)
            }
            Normalised::Units(literals) => {
                for literal in literals {
                    if !enqueue(&mut self.vocabulary, &mut self.trail, literal, None) {
                        return Err(ConstraintOperationError::TriviallyUnsatisfiable);
                    }
                }
            }
            Normalised::Constraint(kind) => {
                let mut constraint = Constraint::original(kind);
                constraint.metadata.handle = Some(handle);
                let reference = self.constraints.allocate(constraint);
                added.push(reference);

                let mut context =
                    PropagationContext::new(&mut self.vocabulary, &mut self.trail, reference);
                if !self.constraints.get_mut(reference).attach(&mut context) {
                    return Err(ConstraintOperationError::TriviallyUnsatisfiable);
                }
            }
        }

        match self.propagate() {
            Some(_) => Err(ConstraintOperationError::TriviallyUnsatisfiable),
            None => Ok(()),
        }
    }

    /// Undoes the root assignments made after `checkpoint` and deletes `added`.
    fn roll_back_root(&mut self, checkpoint: usize, added: &[ConstraintReference]) {
        gourd_assert_simple!(self.trail.decision_level() == 0);
        while self.trail.len() > checkpoint {
            let Some(literal) = self.trail.pop() else {
                break;
            };
            undo_assignment(
                &mut self.vocabulary,
                &mut self.constraints,
                &mut self.variable_order,
                literal,
            );
        }
        self.propagation_head = self.trail.len();
        self.delete_constraints(added);
    }

    /// Deletes the attached constraints among `references` which were created for `handle`.
    ///
    /// Whatever they propagated at the root stays a root fact.
    pub(crate) fn remove_constraints(
        &mut self,
        references: &[ConstraintReference],
        handle: ConstraintHandle,
    ) {
        self.cancel_until(0);
        self.forget_root_reasons();
        let owned = references
            .iter()
            .copied()
            .filter(|&reference| {
                self.constraints.is_alive(reference)
                    && self.constraints.get(reference).metadata.handle == Some(handle)
            })
            .collect::<Vec<_>>();
        self.delete_constraints(&owned);
    }

    /// Root facts are never explained, so no constraint is locked by them afterwards.
    fn forget_root_reasons(&mut self) {
        gourd_assert_simple!(self.trail.decision_level() == 0);
        for &literal in self.trail.iter() {
            self.vocabulary.clear_reason(literal.get_variable());
        }
    }

    /// Detaches the constraints, which must not be the reason of any assignment.
    pub(crate) fn delete_constraints(&mut self, references: &[ConstraintReference]) {
        if references.is_empty() {
            return;
        }
        for &reference in references {
            let _ = self.constraints.free(reference);
        }
        let constraints = &self.constraints;
        self.vocabulary
            .purge(|reference| constraints.is_alive(reference));
        self.learned_constraints
            .forget(|reference| !constraints.is_alive(reference));
        self.constraints.recycle(references.iter().copied());
    }

    /// Forgets every constraint, learned constraint and assignment, but keeps the variables and
    /// their heuristic scores.
    pub(crate) fn reset_search(&mut self) {
        self.vocabulary.reset_assignments_and_watches();
        self.trail.clear();
        self.propagation_head = 0;
        self.constraints.clear();
        self.learned_constraints.clear();
        self.learned_constraints.init(self.vocabulary.num_variables());
        self.timers.clear();
        self.reduce_timer = self.timers.add(self.learned_constraints.create_timer());
        self.restart_strategy = create_restart_strategy(&self.options.restart_options);
        self.variable_order.restore_all();
        self.is_infeasible = false;
        self.has_restricted_constraints = false;
        self.num_assigned_at_simplification = 0;
        self.statistics.engine_statistics.num_rebuilds += 1;
        debug!("Rebuilding the constraint database");
    }

    /// The current assignment completed with the preferred polarity of every unassigned variable,
    /// in trail order.
    pub(crate) fn extract_model(&mut self) -> Vec<Literal> {
        let mut model = self.trail.to_vec();
        for variable in self.vocabulary.variables().collect::<Vec<_>>() {
            if !self.vocabulary.is_variable_assigned(variable) {
                model.push(self.variable_order.preferred_literal(variable));
            }
        }
        model
    }

    /// Searches for an assignment satisfying every constraint and the `assumptions`.
    pub(crate) fn solve(
        &mut self,
        assumptions: &[Literal],
        termination: &mut impl TerminationCondition,
    ) -> SolveOutcome {
        if self.is_infeasible {
            return SolveOutcome::Unsatisfiable;
        }
        self.cancel_until(0);
        self.assumptions = assumptions.to_vec();
        if let Some(max_variable) = assumptions
            .iter()
            .map(|literal| literal.get_variable().dimacs_id())
            .max()
        {
            self.grow(max_variable);
        }

        let mut state = SearchState::Propagating;
        loop {
            if termination.should_stop() {
                debug!("Search stopped by the termination condition");
                self.cancel_until(0);
                return SolveOutcome::BudgetExceeded;
            }

            match state {
                SearchState::Propagating => {
                    state = match self.propagate() {
                        Some(conflict) => SearchState::ConflictAnalysis(conflict),
                        None => SearchState::Deciding,
                    };
                }

                SearchState::ConflictAnalysis(conflict) => {
                    self.statistics.engine_statistics.num_conflicts += 1;
                    termination.conflict_has_occurred();
                    self.timers.new_conflict();
                    let _ = self.restart_strategy.new_conflict();

                    if !self.resolve_conflict(conflict) {
                        return self.root_conflict();
                    }
                    state = SearchState::Propagating;
                }

                SearchState::Deciding => {
                    if self.trail.decision_level() == 0
                        && self.options.database_simplification
                        && self.trail.len() > self.num_assigned_at_simplification
                    {
                        self.simplify_root();
                    }

                    if self.timers.take_fired(self.reduce_timer) {
                        self.reduce_learned_constraints();
                    }

                    if self.restart_strategy.should_restart()
                        && self.trail.decision_level() > self.assumptions.len()
                    {
                        self.restart();
                    }

                    match self.decide() {
                        Ok(true) => state = SearchState::Propagating,
                        Ok(false) => return SolveOutcome::Satisfiable,
                        Err(outcome) => return outcome,
                    }
                }
            }
        }
    }

    /// The outcome of a conflict which cannot be resolved by backjumping.
    fn root_conflict(&mut self) -> SolveOutcome {
        self.cancel_until(0);
        if self.has_restricted_constraints {
            return SolveOutcome::Inconclusive;
        }
        debug!("Conflict at the root, the constraints are unsatisfiable");
        self.is_infeasible = true;
        SolveOutcome::Unsatisfiable
    }

    /// Makes the next decision, which is an assumption as long as there are assumptions left.
    ///
    /// Returns `Ok(false)` when every constraint is satisfied and nothing is left to decide.
    fn decide(&mut self) -> Result<bool, SolveOutcome> {
        while self.trail.decision_level() < self.assumptions.len() {
            let assumption = self.assumptions[self.trail.decision_level()];
            if self.vocabulary.is_satisfied(assumption) {
                // Every assumption gets its own level, even if it holds already.
                self.trail.new_decision_level();
            } else if self.vocabulary.is_falsified(assumption) {
                let context = ConflictAnalysisContext {
                    vocabulary: &self.vocabulary,
                    trail: &self.trail,
                    constraints: &mut self.constraints,
                    learned_constraints: &mut self.learned_constraints,
                    variable_order: &mut self.variable_order,
                    statistics: &mut self.statistics.learned_clause_statistics,
                };
                let core = self.conflict_analyser.analyse_final(assumption, &context);
                self.cancel_until(0);
                return Err(if self.has_restricted_constraints {
                    SolveOutcome::Inconclusive
                } else {
                    SolveOutcome::UnsatisfiableUnderAssumptions(core)
                });
            } else {
                self.trail.new_decision_level();
                let _ = enqueue(&mut self.vocabulary, &mut self.trail, assumption, None);
                return Ok(true);
            }
        }

        if let Some(decision) = self.variable_order.next_decision(&self.vocabulary) {
            self.statistics.engine_statistics.num_decisions += 1;
            self.trail.new_decision_level();
            let _ = enqueue(&mut self.vocabulary, &mut self.trail, decision, None);
            return Ok(true);
        }

        if self.trail.len() == self.vocabulary.num_variables() as usize
            || self.are_all_constraints_satisfied()
        {
            return Ok(false);
        }

        self.block_current_decisions()?;
        Ok(true)
    }

    fn are_all_constraints_satisfied(&self) -> bool {
        let assignments = AssignmentView::new(&self.vocabulary);
        self.constraints
            .iter()
            .filter(|(_, constraint)| !constraint.is_learned())
            .all(|(_, constraint)| constraint.is_satisfied(assignments))
    }

    /// Every decision variable is assigned but some constraint is not satisfied yet: forbids the
    /// current combination of decisions and backjumps one level.
    fn block_current_decisions(&mut self) -> Result<(), SolveOutcome> {
        let level = self.trail.decision_level();
        if level <= self.assumptions.len() {
            self.cancel_until(0);
            return Err(SolveOutcome::Inconclusive);
        }

        // The negated decisions, newest first; levels of assumptions which already held are empty.
        let blocking = (1..=level)
            .rev()
            .filter_map(|level| self.trail.values_on_decision_level(level).first())
            .map(|&decision| !decision)
            .collect::<Vec<_>>();
        trace!("Blocking decisions {blocking:?}");
        self.has_restricted_constraints = true;

        // A single decision means every level below it is empty.
        if blocking.len() == 1 {
            self.cancel_until(0);
            let _ = enqueue(&mut self.vocabulary, &mut self.trail, blocking[0], None);
            return Ok(());
        }
        self.cancel_until(level - 1);

        let lbd = blocking.len() as u32;
        let constraint = Constraint {
            kind: ConstraintKind::Clause(Clause::new(blocking)),
            metadata: ConstraintMetadata {
                learned: true,
                protected: true,
                restricted: true,
                age: self.learned_constraints.next_age(),
                ..Default::default()
            },
        };
        let reference = self.constraints.allocate(constraint);
        self.learned_constraints
            .add(reference, self.constraints.get_mut(reference), lbd);
        self.attach_and_assert(reference);
        Ok(())
    }

    /// Watches the clause at `reference` and propagates its first literal.
    fn attach_and_assert(&mut self, reference: ConstraintReference) {
        let mut context = PropagationContext::new(&mut self.vocabulary, &mut self.trail, reference);
        let constraint = self.constraints.get_mut(reference);
        let _ = constraint.attach(&mut context);
        if let ConstraintKind::Clause(clause) = &constraint.kind {
            let asserted = clause.assert_constraint(&mut context);
            gourd_assert_moderate!(asserted, "a learned clause has to be asserting");
        }
    }

    /// Learns a clause from the conflict and backjumps. Returns false if the conflict is at the
    /// root.
    fn resolve_conflict(&mut self, conflict: ConstraintReference) -> bool {
        let mut conflict_literals = Vec::new();
        self.constraints
            .get(conflict)
            .calculate_reason(&self.vocabulary, None, &mut conflict_literals);
        let conflict_level = conflict_literals
            .iter()
            .map(|&literal| self.vocabulary.literal_level(literal))
            .max()
            .unwrap_or(0);
        if conflict_level == 0 {
            return false;
        }
        // Custom constraints may report conflicts which only involve lower levels.
        if conflict_level < self.trail.decision_level() {
            self.cancel_until(conflict_level);
        }

        let mut context = ConflictAnalysisContext {
            vocabulary: &self.vocabulary,
            trail: &self.trail,
            constraints: &mut self.constraints,
            learned_constraints: &mut self.learned_constraints,
            variable_order: &mut self.variable_order,
            statistics: &mut self.statistics.learned_clause_statistics,
        };
        let learned = self.conflict_analyser.analyse(conflict, &mut context);

        let learned_clause_statistics = &mut self.statistics.learned_clause_statistics;
        learned_clause_statistics
            .average_learned_clause_length
            .add_term(learned.literals.len() as u64);
        learned_clause_statistics
            .average_backtrack_amount
            .add_term((self.trail.decision_level() - learned.backjump_level) as u64);

        let num_assigned = self.trail.len();
        trace!("Learned {:?}", learned.literals);

        if learned.literals.len() == 1 {
            self.statistics
                .learned_clause_statistics
                .num_unit_clauses_learned += 1;
            self.restart_strategy.new_learned_clause(1, num_assigned);
            self.cancel_until(0);
            self.restart_strategy.on_backjump_to_root_level();
            let _ = enqueue(
                &mut self.vocabulary,
                &mut self.trail,
                learned.literals[0],
                None,
            );
        } else {
            let clause = factory::learned_clause(learned.literals);
            gourd_assert_moderate!(
                clause.assertion_level(&self.vocabulary) == learned.backjump_level
            );
            let age = self.learned_constraints.next_age();
            let constraint = Constraint::learned(clause, age);
            let lbd = self
                .learned_constraints
                .compute_lbd(&constraint, &self.vocabulary);
            self.statistics
                .learned_clause_statistics
                .average_lbd
                .add_term(u64::from(lbd));
            self.restart_strategy.new_learned_clause(lbd, num_assigned);

            self.cancel_until(learned.backjump_level);
            if learned.backjump_level == 0 {
                self.restart_strategy.on_backjump_to_root_level();
            }

            let reference = self.constraints.allocate(constraint);
            self.learned_constraints
                .add(reference, self.constraints.get_mut(reference), lbd);
            self.attach_and_assert(reference);
        }

        self.variable_order.decay();
        self.learned_constraints.decay_activities();
        true
    }

    /// Notifies the watchers of every literal on the trail which has not been propagated yet.
    ///
    /// Returns the constraint in conflict, if any; the remaining literals are then left
    /// unpropagated.
    pub(crate) fn propagate(&mut self) -> Option<ConstraintReference> {
        let num_assigned_before = self.trail.len();
        let mut conflict = None;

        'trail: while self.propagation_head < self.trail.len() {
            let p = self.trail[self.propagation_head];
            self.propagation_head += 1;

            // Constraints which want to keep watching `p` register again while being notified.
            let watchers = self.vocabulary.take_watches(p);
            for (index, &watcher) in watchers.iter().enumerate() {
                if watcher
                    .blocker
                    .is_some_and(|blocker| self.vocabulary.is_satisfied(blocker))
                {
                    self.vocabulary.watch(p, watcher);
                    continue;
                }

                let num_assigned = self.trail.len();
                let constraint = self.constraints.get_mut(watcher.constraint);
                let mut context =
                    PropagationContext::new(&mut self.vocabulary, &mut self.trail, watcher.constraint);
                if !constraint.propagate(&mut context, p) {
                    self.vocabulary
                        .watches_mut(p)
                        .extend_from_slice(&watchers[index + 1..]);
                    conflict = Some(watcher.constraint);
                    break 'trail;
                }

                if self.trail.len() > num_assigned && constraint.is_learned() {
                    self.learned_constraints
                        .on_propagation(constraint, &self.vocabulary);
                }
            }
        }

        if conflict.is_some() {
            self.propagation_head = self.trail.len();
        }
        self.statistics.engine_statistics.num_propagations +=
            (self.trail.len() - num_assigned_before) as u64;
        conflict
    }

    /// Backtracks to `level`, unassigning everything above it.
    pub(crate) fn cancel_until(&mut self, level: usize) {
        if self.trail.decision_level() <= level {
            return;
        }
        for literal in self.trail.synchronise(level) {
            undo_assignment(
                &mut self.vocabulary,
                &mut self.constraints,
                &mut self.variable_order,
                literal,
            );
        }
        self.propagation_head = self.trail.len();
    }

    fn restart(&mut self) {
        self.statistics.engine_statistics.num_restarts += 1;
        debug!(
            "Restart after {} conflicts",
            self.statistics.engine_statistics.num_conflicts
        );
        self.cancel_until(0);
        self.restart_strategy.on_restart();
    }

    fn reduce_learned_constraints(&mut self) {
        let deleted = self
            .learned_constraints
            .reduce(&self.constraints, &self.vocabulary);
        self.statistics.engine_statistics.num_reductions += 1;
        self.statistics
            .learned_clause_statistics
            .num_deleted_clauses += deleted.len() as u64;
        debug!(
            "Reduced the learned constraints by {} to {}",
            deleted.len(),
            self.learned_constraints.len()
        );
        self.delete_constraints(&deleted);
    }

    /// Deletes every constraint which is satisfied by the root assignment.
    fn simplify_root(&mut self) {
        gourd_assert_simple!(self.trail.decision_level() == 0);

        self.forget_root_reasons();

        let assignments = AssignmentView::new(&self.vocabulary);
        let satisfied = self
            .constraints
            .iter()
            .filter(|(_, constraint)| constraint.is_satisfied(assignments))
            .map(|(reference, _)| reference)
            .collect::<Vec<_>>();

        self.statistics.engine_statistics.num_simplified_constraints += satisfied.len() as u64;
        self.delete_constraints(&satisfied);
        self.num_assigned_at_simplification = self.trail.len();
    }
}

/// Unassigns `literal`, which was true, and tells everyone interested.
fn undo_assignment(
    vocabulary: &mut Vocabulary,
    constraints: &mut ConstraintAllocator,
    variable_order: &mut VariableOrder,
    literal: Literal,
) {
    let variable = literal.get_variable();
    vocabulary.unassign(literal);
    for reference in vocabulary.take_undos(variable) {
        constraints.get_mut(reference).undo(literal);
    }
    variable_order.on_unassign(literal);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::termination::ConflictBudget;
    use crate::engine::termination::Indefinite;

    fn literals(dimacs: &[i32]) -> Vec<Literal> {
        dimacs.iter().map(|&literal| Literal::from_dimacs(literal)).collect()
    }

    fn solver_with(clauses: &[&[i32]]) -> SatisfactionSolver {
        let mut solver = SatisfactionSolver::new(SolverOptions::default());
        for (index, clause) in clauses.iter().enumerate() {
            solver
                .add_constraint(
                    &[ConstraintDescription::Clause(literals(clause))],
                    ConstraintHandle(index),
                )
                .expect("clause should not be trivially unsatisfiable");
        }
        solver
    }

    fn pigeonhole(num_holes: i32) -> Vec<Vec<i32>> {
        let num_pigeons = num_holes + 1;
        let variable = |pigeon: i32, hole: i32| pigeon * num_holes + hole + 1;
        let mut clauses = Vec::new();
        for pigeon in 0..num_pigeons {
            clauses.push((0..num_holes).map(|hole| variable(pigeon, hole)).collect());
        }
        for hole in 0..num_holes {
            for first in 0..num_pigeons {
                for second in first + 1..num_pigeons {
                    clauses.push(vec![-variable(first, hole), -variable(second, hole)]);
                }
            }
        }
        clauses
    }

    #[test]
    fn trail_levels_match_the_number_of_decisions() {
        let mut solver = solver_with(&[&[1, 2, 3], &[-1, 4], &[-4, 5]]);
        assert_eq!(solver.solve(&[], &mut Indefinite), SolveOutcome::Satisfiable);

        let mut num_decisions = 0;
        for (position, &literal) in solver.trail.iter().enumerate() {
            let variable = literal.get_variable();
            if solver.vocabulary.reason(variable).is_none()
                && solver.vocabulary.level(variable) > 0
                && solver.trail.start_of_level(solver.vocabulary.level(variable)) == position
            {
                num_decisions += 1;
            }
            assert_eq!(solver.vocabulary.level(variable), num_decisions);
            assert_eq!(solver.vocabulary.trail_position(variable), position);
        }
    }

    #[test]
    fn backtracking_keeps_lower_levels() {
        let mut solver = solver_with(&[&[1, 2], &[3, 4]]);
        solver.trail.new_decision_level();
        let _ = enqueue(&mut solver.vocabulary, &mut solver.trail, Literal::from_dimacs(-1), None);
        assert!(solver.propagate().is_none());
        solver.trail.new_decision_level();
        let _ = enqueue(&mut solver.vocabulary, &mut solver.trail, Literal::from_dimacs(-3), None);
        assert!(solver.propagate().is_none());
        assert_eq!(solver.trail.len(), 4);

        solver.cancel_until(1);
        assert_eq!(solver.trail.decision_level(), 1);
        assert_eq!(solver.trail.to_vec(), literals(&[-1, 2]));
        assert!(solver.vocabulary.is_unassigned(Literal::from_dimacs(4)));
    }

    #[test]
    fn clause_watches_stay_unfalsified() {
        let mut solver = solver_with(&[&[1, 2, 3, 4]]);
        for decision in [-1, -3] {
            solver.trail.new_decision_level();
            let _ = enqueue(
                &mut solver.vocabulary,
                &mut solver.trail,
                Literal::from_dimacs(decision),
                None,
            );
            assert!(solver.propagate().is_none());
        }

        let (_, constraint) = solver.constraints.iter().next().expect("one clause");
        let watched = &constraint.literals()[..2];
        assert!(watched
            .iter()
            .all(|&literal| !solver.vocabulary.is_falsified(literal)));
    }

    #[test]
    fn learning_refutes_the_pigeonhole_principle() {
        let clauses = pigeonhole(4);
        let clause_refs = clauses.iter().map(Vec::as_slice).collect::<Vec<_>>();
        let mut solver = solver_with(&clause_refs);
        assert_eq!(solver.solve(&[], &mut Indefinite), SolveOutcome::Unsatisfiable);
        assert!(solver.statistics.engine_statistics.num_conflicts > 0);
        assert!(solver.is_infeasible);
    }

    #[test]
    fn conflict_budget_interrupts_the_search() {
        let clauses = pigeonhole(6);
        let clause_refs = clauses.iter().map(Vec::as_slice).collect::<Vec<_>>();
        let mut solver = solver_with(&clause_refs);
        assert_eq!(
            solver.solve(&[], &mut ConflictBudget::new(3)),
            SolveOutcome::BudgetExceeded
        );
        assert_eq!(solver.trail.decision_level(), 0);
        assert!(!solver.is_infeasible);
    }

    #[test]
    fn failed_assumptions_are_reported() {
        let mut solver = solver_with(&[&[-1, 2], &[-2, 3]]);
        let outcome = solver.solve(&literals(&[4, 1, -3]), &mut Indefinite);
        let SolveOutcome::UnsatisfiableUnderAssumptions(mut core) = outcome else {
            panic!("expected a failure under assumptions, got {outcome:?}");
        };
        core.sort();
        let mut expected = literals(&[1, -3]);
        expected.sort();
        assert_eq!(core, expected);
        assert!(!solver.is_infeasible);
    }

    #[test]
    fn root_conflicts_roll_back_the_addition() {
        let mut solver = solver_with(&[&[-1, 2], &[-1, 3]]);
        let result = solver.add_constraint(
            &[
                ConstraintDescription::Clause(literals(&[1])),
                ConstraintDescription::Clause(literals(&[-2, -3])),
            ],
            ConstraintHandle(2),
        );
        assert_eq!(result, Err(ConstraintOperationError::TriviallyUnsatisfiable));
        assert!(solver.trail.is_empty());
        assert_eq!(solver.constraints.num_alive(), 2);
        assert_eq!(solver.solve(&[], &mut Indefinite), SolveOutcome::Satisfiable);
    }

    #[test]
    fn root_simplification_deletes_satisfied_constraints() {
        let mut solver = solver_with(&[&[1, 2, 3], &[4, 5]]);
        let _ = solver
            .add_constraint(
                &[ConstraintDescription::Clause(literals(&[1]))],
                ConstraintHandle(2),
            )
            .expect("unit is consistent");
        assert_eq!(solver.solve(&[], &mut Indefinite), SolveOutcome::Satisfiable);
        assert_eq!(solver.constraints.num_alive(), 1);
    }

    #[test]
    fn restricted_decisions_are_blocked() {
        // Deciding only x1 cannot satisfy the clause over x2 and x3 on its own.
        let mut solver = solver_with(&[&[1, 2, 3]]);
        let decisions = [Literal::from_dimacs(1).get_variable()];
        solver.restrict_decisions(Some(decisions.as_slice()));
        let outcome = solver.solve(&[], &mut Indefinite);
        assert_eq!(outcome, SolveOutcome::Satisfiable);
        assert!(solver.vocabulary.is_satisfied(Literal::from_dimacs(1)));
    }
}
