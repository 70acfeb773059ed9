//! # Gourd
//! Gourd is a conflict driven clause learning (CDCL) satisfiability solver in the tradition of
//! MiniSAT. Next to clauses it natively supports cardinality constraints, parity (XOR)
//! constraints and constraints implemented by the user through [`CustomConstraint`].
//!
//! Besides deciding satisfiability, the solver can answer queries under assumptions (and explain
//! a negative answer with an unsatisfiable core), shrink a model to a prime implicant, and retract
//! constraints.
//!
//! # Using Gourd
//! Variables are Dimacs numbered and literals are non-zero `i32`s. Constraints are added to a
//! [`Solver`], after which it can be asked whether they are satisfiable:
//! ```rust
//! # use gourd_core::Solver;
//! let mut solver = Solver::default();
//!
//! // x1 ⊕ x2 ⊕ x3 is even
//! let _ = solver.add_parity(&[1, 2, 3], true).unwrap();
//! let _ = solver.add_clause(&[1]).unwrap();
//! let _ = solver.add_clause(&[2]).unwrap();
//!
//! assert_eq!(solver.is_satisfiable(), Ok(true));
//! assert_eq!(solver.model(), vec![1, 2, -3]);
//! ```
//!
//! A query can be bounded by a [`Timeout`](options::Timeout) in the [`SolverOptions`], or
//! stopped from another thread through a [`StopHandle`](termination::StopHandle):
//! ```rust
//! # use gourd_core::Solver;
//! # use gourd_core::SearchError;
//! # use gourd_core::options::SolverOptions;
//! # use gourd_core::options::Timeout;
//! let options = SolverOptions {
//!     timeout: Timeout::Conflicts(0),
//!     ..Default::default()
//! };
//! let mut solver = Solver::with_options(options);
//! let _ = solver.add_clause(&[1, 2]).unwrap();
//! let _ = solver.add_clause(&[-1, 2]).unwrap();
//!
//! assert_eq!(solver.is_satisfiable(), Err(SearchError::BudgetExceeded));
//! ```
pub(crate) mod basic_types;
pub(crate) mod branching;
pub mod containers;
pub(crate) mod engine;
pub mod statistics;

#[doc(hidden)]
pub mod asserts;

pub use convert_case;

// We declare a private module with public use, so that all exports from API are exports directly
// from the crate.
//
// Example:
// `use gourd_core::Solver;`
// vs.
// `use gourd_core::api::Solver;`
mod api;

pub use api::*;

pub use crate::api::solver::Solver;
pub use crate::basic_types::moving_averages;
pub use crate::basic_types::sequence_generators;
pub use crate::basic_types::ConstraintOperationError;
pub use crate::basic_types::SearchError;
#[cfg(doc)]
use crate::constraints::CustomConstraint;
pub use crate::options::SolverOptions;
