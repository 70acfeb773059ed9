use log::debug;
use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;

use super::PhaseSelector;
use crate::containers::KeyValueHeap;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::engine::variables::Literal;
use crate::engine::variables::Variable;
use crate::engine::vocabulary::Vocabulary;

const MAX_ACTIVITY: f64 = 1e100;

/// VSIDS: variables which recently took part in conflicts are decided first.
///
/// A variable leaves the heap when it is picked and comes back when it is unassigned, so the heap
/// holds (at least) every unassigned decision variable.
#[derive(Debug)]
pub(crate) struct VariableOrder {
    heap: KeyValueHeap<Variable, f64>,
    increment: f64,
    decay_factor: f64,
    /// The probability with which a random variable is decided instead of the most active one.
    random_frequency: f64,
    rng: SmallRng,
    /// Which variables may be decided; all of them when [`None`].
    decision_variables: Option<KeyedVec<Variable, bool>>,
    phase: Box<dyn PhaseSelector>,
}

impl VariableOrder {
    pub(crate) fn new(
        decay_factor: f64,
        random_frequency: f64,
        seed: u64,
        phase: Box<dyn PhaseSelector>,
    ) -> Self {
        VariableOrder {
            heap: KeyValueHeap::default(),
            increment: 1.0,
            decay_factor,
            random_frequency,
            rng: SmallRng::seed_from_u64(seed),
            decision_variables: None,
            phase,
        }
    }

    /// Makes room for variables `1..=num_variables`.
    pub(crate) fn grow(&mut self, num_variables: u32) {
        while self.heap.len() <= num_variables as usize {
            let variable = Variable::create_from_index(self.heap.len());
            self.heap.grow(variable, 0.0);
            if variable.index() == 0 || !self.is_decision_variable(variable) {
                self.heap.delete_key(variable);
            }
        }
        if let Some(decision_variables) = &mut self.decision_variables {
            decision_variables.grow(num_variables as usize + 1, false);
        }
        self.phase.grow(num_variables);
    }

    pub(crate) fn is_decision_variable(&self, variable: Variable) -> bool {
        if variable.index() == 0 {
            return false;
        }
        match &self.decision_variables {
            None => true,
            Some(allowed) => variable.index() < allowed.len() && allowed[variable],
        }
    }

    /// Only allows `variables` to be decided from now on, or every variable when [`None`].
    pub(crate) fn restrict_to(&mut self, variables: Option<&[Variable]>) {
        self.decision_variables = variables.map(|variables| {
            let mut allowed = KeyedVec::default();
            allowed.grow(self.heap.len(), false);
            for &variable in variables {
                allowed.grow(variable.index() + 1, false);
                allowed[variable] = true;
            }
            allowed
        });
        debug!(
            "Decisions restricted to {} variables",
            variables.map_or(self.heap.len().saturating_sub(1), <[Variable]>::len)
        );
        self.restore_all();
    }

    /// Puts every decision variable back into the heap and takes the others out.
    pub(crate) fn restore_all(&mut self) {
        for index in 1..self.heap.len() {
            let variable = Variable::create_from_index(index);
            if self.is_decision_variable(variable) {
                self.heap.restore_key(variable);
            } else {
                self.heap.delete_key(variable);
            }
        }
    }

    pub(crate) fn bump(&mut self, variable: Variable) {
        if self.heap.get_value(variable) + self.increment >= MAX_ACTIVITY {
            self.heap.divide_values(MAX_ACTIVITY);
            self.increment /= MAX_ACTIVITY;
        }
        self.heap.increment(variable, self.increment);
    }

    pub(crate) fn decay(&mut self) {
        self.increment /= self.decay_factor;
    }

    /// The next decision, or [`None`] if every decision variable is assigned.
    pub(crate) fn next_decision(&mut self, vocabulary: &Vocabulary) -> Option<Literal> {
        if self.random_frequency > 0.0
            && self.heap.len() > 1
            && self.rng.gen_bool(self.random_frequency.min(1.0))
        {
            let variable = Variable::create_from_index(self.rng.gen_range(1..self.heap.len()));
            if !vocabulary.is_variable_assigned(variable) && self.is_decision_variable(variable) {
                return Some(self.phase.select(variable));
            }
        }

        while let Some(variable) = self.heap.pop_max() {
            if !vocabulary.is_variable_assigned(variable) {
                return Some(self.phase.select(variable));
            }
        }
        None
    }

    /// The literal the variable would be decided to.
    pub(crate) fn preferred_literal(&mut self, variable: Variable) -> Literal {
        self.phase.select(variable)
    }

    /// Called for every variable unassigned by backtracking; `literal` is the literal which was
    /// true.
    pub(crate) fn on_unassign(&mut self, literal: Literal) {
        let variable = literal.get_variable();
        if self.is_decision_variable(variable) {
            self.heap.restore_key(variable);
        }
        self.phase.on_unassign(literal);
    }

    #[cfg(test)]
    pub(crate) fn activity(&self, variable: Variable) -> f64 {
        self.heap.get_value(variable)
    }
}
