use thiserror::Error;

/// The ways in which a satisfiability query can end without an answer.
///
/// Neither leaves the solver in an unusable state; the query can be repeated, for example with a
/// larger budget.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The conflict budget or wall-clock timeout expired, or a stop was requested.
    #[error("The search budget was exceeded before an answer was found")]
    BudgetExceeded,
    /// Branching was restricted to a subset of the variables and the blocked partial
    /// assignments might still extend to a model.
    #[error("The search with restricted branching cannot decide satisfiability")]
    Inconclusive,
}
