use crate::containers::HashMap;
use crate::containers::HashSet;
use crate::engine::conflict_analysis::ConflictAnalysisContext;
use crate::engine::variables::Literal;
use crate::engine::variables::Variable;
use crate::gourd_assert_moderate;
use crate::gourd_assert_simple;

/// Recursion is cut off at this depth; the literal at the cut-off is kept.
const MAX_DEPTH: usize = 500;

#[derive(Debug, Clone, Default)]
pub(crate) struct RecursiveMinimiser {
    current_depth: usize,
    allowed_decision_levels: HashSet<usize>,
    labels: HashMap<Variable, Label>,
}

impl RecursiveMinimiser {
    /// Removes the literals of the learned clause which are implied by the others.
    ///
    /// A literal is redundant if its reason, followed back through the implication graph, only
    /// ends up in literals of the learned clause (or root facts). The asserting literal at
    /// position 0 is never removed.
    ///
    /// The implementation is based on:
    ///
    /// \[1\] A. Van Gelder, ‘Improved conflict-clause minimization leads
    /// to improved propositional proof traces’. SAT'09.
    ///
    /// \[2\] N. Sörensson and A. Biere, ‘Minimizing learned clauses’. SAT'09
    pub(crate) fn remove_dominated_literals(
        &mut self,
        learned: &mut Vec<Literal>,
        context: &ConflictAnalysisContext<'_>,
    ) {
        self.initialise_minimisation_data_structures(learned, context);

        let mut end_position: usize = 0;
        for index in 0..learned.len() {
            let literal = learned[index];
            let variable = literal.get_variable();
            self.compute_label(variable, context);

            // Literals which are not removable are kept, the others are overwritten.
            let label = self.get_label(variable);
            if label == Label::Poison || label == Label::Keep {
                learned[end_position] = literal;
                end_position += 1;
            }
        }
        learned.truncate(end_position);

        self.clean_up_minimisation();
    }

    fn compute_label(&mut self, variable: Variable, context: &ConflictAnalysisContext<'_>) {
        gourd_assert_moderate!(context.vocabulary.is_variable_assigned(variable));

        if self.is_label_already_computed(variable) {
            return;
        }

        self.current_depth += 1;
        let label = self.label_from_antecedents(variable, context);
        self.assign_label(variable, label);
        self.current_depth -= 1;
    }

    fn label_from_antecedents(
        &mut self,
        variable: Variable,
        context: &ConflictAnalysisContext<'_>,
    ) -> Label {
        if self.current_depth > MAX_DEPTH {
            return Label::Poison;
        }

        // Decisions which are not part of the learned clause cannot be explained by it; those in
        // the clause were labelled as kept during initialisation.
        let mut reason = Vec::new();
        if !context.reason_of(variable, &mut reason) {
            return Label::Poison;
        }

        // A literal can only be implied by the clause if its level occurs in the clause.
        if !self
            .allowed_decision_levels
            .contains(&context.vocabulary.level(variable))
        {
            return Label::Poison;
        }

        for antecedent in reason {
            let antecedent_variable = antecedent.get_variable();
            if context.vocabulary.level(antecedent_variable) == 0 {
                continue;
            }

            self.compute_label(antecedent_variable, context);

            if self.get_label(antecedent_variable) == Label::Poison {
                return if self.is_seen(variable) {
                    Label::Keep
                } else {
                    Label::Poison
                };
            }
        }

        Label::Removable
    }

    fn is_seen(&self, variable: Variable) -> bool {
        self.labels.get(&variable) == Some(&Label::Seen)
    }

    fn get_label(&self, variable: Variable) -> Label {
        self.labels
            .get(&variable)
            .copied()
            .unwrap_or_else(|| panic!("{variable} has not been labelled"))
    }

    fn assign_label(&mut self, variable: Variable, label: Label) {
        gourd_assert_moderate!(
            !self.labels.contains_key(&variable) || self.is_seen(variable),
            "Cannot assign the label of an already labelled variable"
        );
        let _ = self.labels.insert(variable, label);
    }

    fn is_label_already_computed(&self, variable: Variable) -> bool {
        self.labels
            .get(&variable)
            .is_some_and(|&label| label != Label::Seen)
    }

    fn initialise_minimisation_data_structures(
        &mut self,
        learned: &[Literal],
        context: &ConflictAnalysisContext<'_>,
    ) {
        gourd_assert_simple!(self.current_depth == 0);
        let current_level = context.trail.decision_level();

        for &literal in learned {
            let variable = literal.get_variable();
            let level = context.vocabulary.level(variable);

            // The asserting literal is the only one of the current level.
            if level == current_level || context.vocabulary.reason(variable).is_none() {
                let _ = self.labels.insert(variable, Label::Keep);
            } else {
                let _ = self.labels.insert(variable, Label::Seen);
            }
            let _ = self.allowed_decision_levels.insert(level);
        }
    }

    fn clean_up_minimisation(&mut self) {
        self.labels.clear();
        self.allowed_decision_levels.clear();
        self.current_depth = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    /// Part of the learned clause, label not computed yet.
    Seen,
    Poison,
    Removable,
    Keep,
}
