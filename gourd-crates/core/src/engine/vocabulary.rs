use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::engine::constraints::ConstraintReference;
use crate::engine::variables::Literal;
use crate::engine::variables::Variable;
use crate::gourd_assert_moderate;

/// The truth value of a literal under the current partial assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub(crate) enum Truth {
    #[default]
    Unassigned,
    Satisfied,
    Falsified,
}

/// An entry of a watch list.
///
/// If the `blocker` is satisfied the constraint cannot propagate anything and is skipped
/// without being visited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Watcher {
    pub(crate) constraint: ConstraintReference,
    pub(crate) blocker: Option<Literal>,
}

/// Owns everything the solver knows per literal and per variable: truth values, the decision
/// level and reason of every assigned variable, and the watch and undo lists.
///
/// Variable 0 is reserved, so the Dimacs id of a variable is also its index.
#[derive(Debug, Default)]
pub(crate) struct Vocabulary {
    truth: KeyedVec<Literal, Truth>,
    watches: KeyedVec<Literal, Vec<Watcher>>,
    levels: KeyedVec<Variable, usize>,
    reasons: KeyedVec<Variable, Option<ConstraintReference>>,
    trail_positions: KeyedVec<Variable, usize>,
    /// Constraints which have to be told when the variable is unassigned.
    undos: KeyedVec<Variable, Vec<ConstraintReference>>,
}

impl Vocabulary {
    /// Grows every structure so that variables `1..=num_variables` exist.
    pub(crate) fn ensure_pool(&mut self, num_variables: u32) {
        let num_slots = num_variables as usize + 1;
        self.levels.grow(num_slots, 0);
        self.reasons.grow(num_slots, None);
        self.trail_positions.grow(num_slots, 0);
        self.undos.grow_with(num_slots, Vec::new);
        self.truth.grow(2 * num_slots, Truth::Unassigned);
        self.watches.grow_with(2 * num_slots, Vec::new);
    }

    /// The literal corresponding to the Dimacs literal `dimacs`, creating its variable (and all
    /// variables with smaller ids) if needed.
    pub(crate) fn get_from_pool(&mut self, dimacs: i32) -> Literal {
        let literal = Literal::from_dimacs(dimacs);
        if !self.belongs_to_pool(dimacs.unsigned_abs()) {
            self.ensure_pool(dimacs.unsigned_abs());
        }
        literal
    }

    pub(crate) fn belongs_to_pool(&self, dimacs_variable: u32) -> bool {
        dimacs_variable > 0 && (dimacs_variable as usize) < self.levels.len()
    }

    pub(crate) fn num_variables(&self) -> u32 {
        self.levels.len().saturating_sub(1) as u32
    }

    pub(crate) fn variables(&self) -> impl Iterator<Item = Variable> {
        (1..=self.num_variables()).map(|id| Variable::create_from_index(id as usize))
    }

    pub(crate) fn truth(&self, literal: Literal) -> Truth {
        self.truth[literal]
    }

    pub(crate) fn is_satisfied(&self, literal: Literal) -> bool {
        self.truth(literal) == Truth::Satisfied
    }

    pub(crate) fn is_falsified(&self, literal: Literal) -> bool {
        self.truth(literal) == Truth::Falsified
    }

    pub(crate) fn is_unassigned(&self, literal: Literal) -> bool {
        self.truth(literal) == Truth::Unassigned
    }

    pub(crate) fn is_variable_assigned(&self, variable: Variable) -> bool {
        !self.is_unassigned(Literal::new(variable, true))
    }

    /// The literal of `variable` which is currently satisfied, if the variable is assigned.
    pub(crate) fn satisfied_literal(&self, variable: Variable) -> Option<Literal> {
        let positive = Literal::new(variable, true);
        match self.truth(positive) {
            Truth::Unassigned => None,
            Truth::Satisfied => Some(positive),
            Truth::Falsified => Some(!positive),
        }
    }

    pub(crate) fn satisfies(&mut self, literal: Literal) {
        gourd_assert_moderate!(self.is_unassigned(literal));
        self.truth[literal] = Truth::Satisfied;
        self.truth[!literal] = Truth::Falsified;
    }

    /// Hides a variable by making both of its literals false, so that neither can be used to
    /// satisfy a constraint.
    pub(crate) fn forgets(&mut self, variable: Variable) {
        let positive = Literal::new(variable, true);
        self.truth[positive] = Truth::Falsified;
        self.truth[!positive] = Truth::Falsified;
    }

    pub(crate) fn unassign(&mut self, literal: Literal) {
        self.truth[literal] = Truth::Unassigned;
        self.truth[!literal] = Truth::Unassigned;
    }

    pub(crate) fn level(&self, variable: Variable) -> usize {
        gourd_assert_moderate!(self.is_variable_assigned(variable));
        self.levels[variable]
    }

    pub(crate) fn literal_level(&self, literal: Literal) -> usize {
        self.level(literal.get_variable())
    }

    pub(crate) fn reason(&self, variable: Variable) -> Option<ConstraintReference> {
        self.reasons[variable]
    }

    /// Turns the assignment of `variable` into a fact without an explanation.
    pub(crate) fn clear_reason(&mut self, variable: Variable) {
        self.reasons[variable] = None;
    }

    pub(crate) fn trail_position(&self, variable: Variable) -> usize {
        self.trail_positions[variable]
    }

    /// Records everything about the assignment of `literal` at once.
    pub(crate) fn assign(
        &mut self,
        literal: Literal,
        level: usize,
        reason: Option<ConstraintReference>,
        trail_position: usize,
    ) {
        self.satisfies(literal);
        let variable = literal.get_variable();
        self.levels[variable] = level;
        self.reasons[variable] = reason;
        self.trail_positions[variable] = trail_position;
    }

    pub(crate) fn watch(&mut self, literal: Literal, watcher: Watcher) {
        self.watches[literal].push(watcher);
    }

    /// Removes the first watcher of `constraint` from the watch list of `literal`, keeping the
    /// order of the others.
    pub(crate) fn unwatch(&mut self, literal: Literal, constraint: ConstraintReference) {
        let watchers = &mut self.watches[literal];
        if let Some(position) = watchers
            .iter()
            .position(|watcher| watcher.constraint == constraint)
        {
            let _ = watchers.remove(position);
        }
    }

    #[cfg(test)]
    pub(crate) fn watches(&self, literal: Literal) -> &[Watcher] {
        &self.watches[literal]
    }

    pub(crate) fn watches_mut(&mut self, literal: Literal) -> &mut Vec<Watcher> {
        &mut self.watches[literal]
    }

    pub(crate) fn take_watches(&mut self, literal: Literal) -> Vec<Watcher> {
        std::mem::take(&mut self.watches[literal])
    }

    pub(crate) fn register_undo(&mut self, variable: Variable, constraint: ConstraintReference) {
        self.undos[variable].push(constraint);
    }

    pub(crate) fn take_undos(&mut self, variable: Variable) -> Vec<ConstraintReference> {
        std::mem::take(&mut self.undos[variable])
    }

    /// Drops every watcher and undo entry of constraints for which `is_alive` is false.
    pub(crate) fn purge(&mut self, is_alive: impl Fn(ConstraintReference) -> bool) {
        self.watches
            .iter_mut()
            .for_each(|watchers| watchers.retain(|watcher| is_alive(watcher.constraint)));
        self.undos
            .iter_mut()
            .for_each(|undos| undos.retain(|&constraint| is_alive(constraint)));
    }

    /// Forgets every assignment and every watch, keeping the variables.
    pub(crate) fn reset_assignments_and_watches(&mut self) {
        self.truth.fill(Truth::Unassigned);
        self.reasons.fill(None);
        self.levels.fill(0);
        self.watches.iter_mut().for_each(Vec::clear);
        self.undos.iter_mut().for_each(Vec::clear);
    }
}
