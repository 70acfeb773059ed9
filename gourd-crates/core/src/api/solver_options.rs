use std::time::Duration;

use crate::branching::PhaseSelection;
use crate::engine::conflict_analysis::LearnedClauseMinimisation;
use crate::engine::learned_constraints::LearningOptions;
use crate::engine::prime_implicants::PrimeImplicantStrategyType;
use crate::engine::restarts::RestartOptions;

/// Limits how long a single satisfiability query may search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Timeout {
    #[default]
    None,
    WallClock(Duration),
    /// The number of conflicts a query may run into.
    Conflicts(u64),
}

/// Every setting of the [`Solver`](crate::Solver).
#[derive(Clone, Copy, Debug)]
pub struct SolverOptions {
    pub restart_options: RestartOptions,
    pub learning_options: LearningOptions,
    pub learned_clause_minimisation: LearnedClauseMinimisation,
    pub phase_selection: PhaseSelection,
    pub prime_implicant_strategy: PrimeImplicantStrategyType,
    /// The factor by which variable activities decay after every conflict.
    pub vsids_decay: f64,
    /// The probability with which a random variable is decided instead of the most active one.
    pub random_decision_frequency: f64,
    pub random_seed: u64,
    /// Whether constraints satisfied at the root are deleted.
    pub database_simplification: bool,
    pub timeout: Timeout,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            restart_options: RestartOptions::default(),
            learning_options: LearningOptions::default(),
            learned_clause_minimisation: LearnedClauseMinimisation::default(),
            phase_selection: PhaseSelection::default(),
            prime_implicant_strategy: PrimeImplicantStrategyType::default(),
            vsids_decay: 0.95,
            random_decision_frequency: 0.0,
            random_seed: 42,
            database_simplification: true,
            timeout: Timeout::None,
        }
    }
}
