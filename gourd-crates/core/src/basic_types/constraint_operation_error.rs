use thiserror::Error;

/// Errors related to adding constraints to the solver.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConstraintOperationError {
    #[error("Adding the constraint makes the formula unsatisfiable at the root")]
    TriviallyUnsatisfiable,
    #[error("The solver is already in an infeasible state")]
    InfeasibleState,
}
