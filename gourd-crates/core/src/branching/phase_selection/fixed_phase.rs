use super::PhaseSelector;
use crate::engine::variables::Literal;
use crate::engine::variables::Variable;

/// Always assigns the same polarity.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FixedPhase {
    positive: bool,
}

impl FixedPhase {
    pub(crate) fn new(positive: bool) -> Self {
        FixedPhase { positive }
    }
}

impl PhaseSelector for FixedPhase {
    fn select(&mut self, variable: Variable) -> Literal {
        Literal::new(variable, self.positive)
    }
}
