//! # Gourd
//! Gourd is a conflict-driven clause learning satisfiability solver. Besides clauses it reasons
//! natively over cardinality constraints and parity (XOR) constraints, and it accepts constraints
//! implemented outside of the solver.
//!
//! This crate re-exports the solver library and adds what is needed to solve instances read
//! from files: a [`Formula`] to collect them in, and a [race] in which several differently
//! configured solvers compete on the same formula.
//!
//! ```rust
//! # use gourd_solver::Formula;
//! # use gourd_solver::race::race;
//! # use gourd_solver::race::Answer;
//! # use gourd_solver::options::SolverOptions;
//! # use gourd_solver::termination::Indefinite;
//! let mut formula = Formula::default();
//! formula.add_clause(&[1, 2]);
//! formula.add_clause(&[-1]);
//! formula.add_parity(&[2, 3], false);
//!
//! let configurations = vec![SolverOptions::default(); 2];
//! let result = race(&formula, &configurations, false, &mut Indefinite);
//! assert_eq!(
//!     result.answer,
//!     Answer::Satisfiable {
//!         model: vec![-1, 2, -3],
//!         prime_implicant: None,
//!     }
//! );
//! ```

mod formula;
pub mod race;

pub use formula::Formula;
pub use formula::FormulaConstraint;
pub use gourd_core::*;
