use std::fmt::Display;
use std::fmt::Formatter;
use std::ops::Not;

use super::Variable;
use crate::containers::StorageKey;

/// A variable or its negation, packed as `2 * variable + polarity` where polarity 1 denotes the
/// negative literal.
///
/// Negation flips the lowest bit, and the packed code indexes per-literal storage directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    code: u32,
}

impl Literal {
    pub fn new(variable: Variable, is_positive: bool) -> Literal {
        Literal {
            code: variable.dimacs_id() * 2 + u32::from(!is_positive),
        }
    }

    pub fn get_variable(self) -> Variable {
        Variable::new(self.code >> 1)
    }

    pub fn is_positive(self) -> bool {
        self.code & 1 == 0
    }

    pub fn is_negative(self) -> bool {
        !self.is_positive()
    }

    /// Converts a signed Dimacs literal.
    ///
    /// # Panics
    /// If `dimacs` is 0, which does not denote a literal.
    pub fn from_dimacs(dimacs: i32) -> Literal {
        assert_ne!(dimacs, 0, "0 is not a valid Dimacs literal");
        Literal::new(Variable::new(dimacs.unsigned_abs()), dimacs > 0)
    }

    pub fn to_dimacs(self) -> i32 {
        let id = self.get_variable().dimacs_id() as i32;
        if self.is_positive() {
            id
        } else {
            -id
        }
    }
}

impl Not for Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        Literal {
            code: self.code ^ 1,
        }
    }
}

impl StorageKey for Literal {
    fn index(&self) -> usize {
        self.code as usize
    }

    fn create_from_index(index: usize) -> Self {
        Literal { code: index as u32 }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}
