use std::fmt::Display;
use std::fmt::Formatter;

use crate::containers::StorageKey;

/// A propositional variable, identified by its Dimacs id.
///
/// Id 0 is never handed out; it keeps the Dimacs id and the index into per-variable storage the
/// same.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    id: u32,
}

impl Variable {
    pub(crate) const fn new(id: u32) -> Self {
        Variable { id }
    }

    pub fn dimacs_id(self) -> u32 {
        self.id
    }
}

impl StorageKey for Variable {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        Variable::new(index as u32)
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.id)
    }
}
