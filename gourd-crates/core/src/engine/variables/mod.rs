//! The propositional vocabulary of the solver.
mod literal;
mod variable;

pub use literal::Literal;
pub use variable::Variable;
