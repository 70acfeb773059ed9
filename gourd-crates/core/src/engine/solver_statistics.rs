use crate::basic_types::moving_averages::CumulativeMovingAverage;
use crate::create_statistics_struct;

create_statistics_struct!(
    /// Statistics of the solving process of the [`Solver`](crate::Solver), accumulated over
    /// every query.
    SolverStatistics {
        /// Core statistics of the search, such as the number of decisions
        engine_statistics: EngineStatistics,
        /// The statistics related to clause learning
        learned_clause_statistics: LearnedClauseStatistics,
    }
);

create_statistics_struct!(
    /// Core statistics of the search
    EngineStatistics {
        /// The number of decisions taken by the solver
        num_decisions: u64,
        /// The number of conflicts encountered by the solver
        num_conflicts: u64,
        /// The number of times the solver has restarted
        num_restarts: u64,
        /// The number of restarts which were postponed by the restart strategy
        num_blocked_restarts: u64,
        /// The number of literals assigned by propagation
        num_propagations: u64,
        /// The number of learned constraint database reductions
        num_reductions: u64,
        /// The number of constraints removed by root level simplification
        num_simplified_constraints: u64,
        /// The number of times the constraint database was rebuilt from the original constraints
        num_rebuilds: u64,
        /// The time spent in the solver, in milliseconds
        time_spent_in_solver: u64,
    }
);

create_statistics_struct!(
    /// The statistics related to clause learning
    LearnedClauseStatistics {
        /// The average number of literals removed by minimisation during conflict analysis
        average_number_of_removed_literals: CumulativeMovingAverage,
        /// The number of learned clauses which have a size of 1
        num_unit_clauses_learned: u64,
        /// The average length of the learned clauses
        average_learned_clause_length: CumulativeMovingAverage,
        /// The average number of levels which have been backtracked after a conflict
        average_backtrack_amount: CumulativeMovingAverage,
        /// The average literal block distance of the learned clauses
        average_lbd: CumulativeMovingAverage,
        /// The number of learned clauses deleted by database reductions
        num_deleted_clauses: u64,
    }
);
