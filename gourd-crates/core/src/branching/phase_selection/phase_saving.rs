use super::PhaseSelector;
use crate::containers::KeyedVec;
use crate::engine::variables::Literal;
use crate::engine::variables::Variable;

/// Remembers the polarity of every variable when it is unassigned and reuses it for the next
/// decision.
#[derive(Clone, Debug, Default)]
pub(crate) struct PhaseSaving {
    saved: KeyedVec<Variable, bool>,
}

impl PhaseSelector for PhaseSaving {
    fn select(&mut self, variable: Variable) -> Literal {
        Literal::new(variable, self.saved[variable])
    }

    fn on_unassign(&mut self, literal: Literal) {
        self.saved[literal.get_variable()] = literal.is_positive();
    }

    fn grow(&mut self, num_variables: u32) {
        self.saved.grow(num_variables as usize + 1, false);
    }
}
