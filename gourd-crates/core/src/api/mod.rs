pub(crate) mod solver;
mod solver_options;

pub mod options {
    //! Contains the options which can be passed to the [`Solver`].
    //!
    //! These influence the following aspects:
    //! - The restart strategy of the solver
    //! - The learned clause database management approach
    //! - How learned clauses are minimised
    //! - Which polarity is chosen for a decision
    //! - How prime implicants are computed
    pub use crate::api::solver_options::SolverOptions;
    pub use crate::api::solver_options::Timeout;
    pub use crate::basic_types::sequence_generators::SequenceGeneratorType;
    pub use crate::branching::PhaseSelection;
    pub use crate::engine::conflict_analysis::LearnedClauseMinimisation;
    pub use crate::engine::learned_constraints::DeletionStrategyType;
    pub use crate::engine::learned_constraints::LearningOptions;
    pub use crate::engine::prime_implicants::PrimeImplicantStrategyType;
    pub use crate::engine::restarts::RestartOptions;
    pub use crate::engine::restarts::RestartStrategyType;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod variables {
    //! Contains the variables which are used by the [`Solver`].
    //!
    //! The [`Solver`] itself takes literals as signed Dimacs integers; [`Literal`] and
    //! [`Variable`] are what constraints implemented outside of the solver work with.
    pub use crate::engine::variables::Literal;
    pub use crate::engine::variables::Variable;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod constraints {
    //! Contains what is needed to implement a constraint outside of the solver and add it with
    //! [`Solver::add_constr`].
    pub use crate::engine::constraints::AssignmentView;
    pub use crate::engine::constraints::ConstraintHandle;
    pub use crate::engine::constraints::CustomConstraint;
    pub use crate::engine::constraints::PropagationContext;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod termination {
    //! Contains the conditions which are used to determine when the [`Solver`] should stop
    //! searching even though the answer is unknown.
    //!
    //! The [`Solver`] builds them from the [`Timeout`](crate::options::Timeout) of its options
    //! and its [`StopHandle`]; they are public so that they can be reused by code driving
    //! several solvers.
    pub use crate::engine::termination::*;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod results {
    //! Contains the statistics collected while solving, and the listener through which prime
    //! implicants can be observed while they are computed.
    pub use crate::engine::prime_implicants::MandatoryLiteralListener;
    pub use crate::engine::solver_statistics::EngineStatistics;
    pub use crate::engine::solver_statistics::LearnedClauseStatistics;
    pub use crate::engine::solver_statistics::SolverStatistics;
}
