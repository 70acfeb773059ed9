use gourd_core::ConstraintOperationError;
use gourd_core::Solver;

/// A constraint of a [`Formula`], over Dimacs literals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormulaConstraint {
    Clause(Vec<i32>),
    /// An even (if the flag is set) or odd number of the literals is true.
    Parity(Vec<i32>, bool),
}

/// The constraints of an instance, kept apart from any solver so that several solvers can be
/// given the same instance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Formula {
    num_variables: u32,
    constraints: Vec<FormulaConstraint>,
}

impl Formula {
    pub fn with_num_variables(num_variables: u32) -> Formula {
        Formula {
            num_variables,
            constraints: Vec::new(),
        }
    }

    pub fn num_variables(&self) -> u32 {
        self.num_variables
    }

    pub fn constraints(&self) -> &[FormulaConstraint] {
        &self.constraints
    }

    pub fn add_clause(&mut self, literals: &[i32]) {
        self.note_variables(literals);
        self.constraints
            .push(FormulaConstraint::Clause(literals.to_vec()));
    }

    pub fn add_parity(&mut self, literals: &[i32], even: bool) {
        self.note_variables(literals);
        self.constraints
            .push(FormulaConstraint::Parity(literals.to_vec(), even));
    }

    fn note_variables(&mut self, literals: &[i32]) {
        if let Some(max_variable) = literals.iter().map(|literal| literal.unsigned_abs()).max() {
            self.num_variables = self.num_variables.max(max_variable);
        }
    }

    /// Adds every constraint to `solver`, stopping at the first one that is violated at the root.
    pub fn add_to(&self, solver: &mut Solver) -> Result<(), ConstraintOperationError> {
        let _ = solver.new_var(self.num_variables);
        for constraint in &self.constraints {
            let _ = match constraint {
                FormulaConstraint::Clause(literals) => solver.add_clause(literals)?,
                FormulaConstraint::Parity(literals, even) => solver.add_parity(literals, *even)?,
            };
        }
        Ok(())
    }

    /// Whether `model`, which holds one literal per variable, satisfies every constraint.
    pub fn is_satisfied_by(&self, model: &[i32]) -> bool {
        let is_true = |literal: &i32| {
            model
                .get(literal.unsigned_abs() as usize - 1)
                .is_some_and(|&value| value == *literal)
        };
        self.constraints.iter().all(|constraint| match constraint {
            FormulaConstraint::Clause(literals) => literals.iter().any(is_true),
            FormulaConstraint::Parity(literals, even) => {
                (literals.iter().filter(|literal| is_true(literal)).count() % 2 == 0) == *even
            }
        })
    }
}
