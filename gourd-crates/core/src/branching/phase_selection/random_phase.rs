use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;

use super::PhaseSelector;
use crate::engine::variables::Literal;
use crate::engine::variables::Variable;

#[derive(Clone, Debug)]
pub(crate) struct RandomPhase {
    rng: SmallRng,
}

impl RandomPhase {
    pub(crate) fn new(seed: u64) -> Self {
        RandomPhase {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl PhaseSelector for RandomPhase {
    fn select(&mut self, variable: Variable) -> Literal {
        Literal::new(variable, self.rng.gen_bool(0.5))
    }
}
