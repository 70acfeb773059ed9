pub(crate) mod conflict_analysis;
pub(crate) mod constraints;
pub(crate) mod learned_constraints;
pub(crate) mod prime_implicants;
pub(crate) mod restarts;
pub(crate) mod satisfaction_solver;
pub(crate) mod solver_statistics;
pub(crate) mod termination;
pub(crate) mod variables;
pub(crate) mod vocabulary;
