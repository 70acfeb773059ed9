//! First unique implication point learning.
//!
//! [`ConflictAnalyser::analyse`] resolves the conflict against the reasons of the literals of the
//! current decision level until a single one of them is left. The negation of that literal,
//! together with the false literals from lower levels, is the learned clause.
mod minimisers;

use std::fmt::Display;

use enum_map::enum_map;
use enum_map::Enum;
use enum_map::EnumMap;
pub(crate) use minimisers::RecursiveMinimiser;

use crate::basic_types::moving_averages::MovingAverage;
use crate::basic_types::Trail;
use crate::branching::VariableOrder;
use crate::containers::KeyedVec;
use crate::engine::constraints::ConstraintAllocator;
use crate::engine::constraints::ConstraintReference;
use crate::engine::learned_constraints::LearnedConstraints;
use crate::engine::solver_statistics::LearnedClauseStatistics;
use crate::engine::variables::Literal;
use crate::engine::variables::Variable;
use crate::engine::vocabulary::Vocabulary;
use crate::gourd_assert_moderate;
use crate::gourd_assert_simple;

/// How hard the learned clause is shrunk after analysis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Enum)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum LearnedClauseMinimisation {
    None,
    /// Drops literals whose reason only consists of literals seen during analysis.
    Simple,
    /// Drops literals which are implied by the other literals of the learned clause.
    #[default]
    Expensive,
}

impl Display for LearnedClauseMinimisation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LearnedClauseMinimisation::None => write!(f, "none"),
            LearnedClauseMinimisation::Simple => write!(f, "simple"),
            LearnedClauseMinimisation::Expensive => write!(f, "expensive"),
        }
    }
}

/// Everything conflict analysis reads or updates.
#[derive(Debug)]
pub(crate) struct ConflictAnalysisContext<'a> {
    pub(crate) vocabulary: &'a Vocabulary,
    pub(crate) trail: &'a Trail<Literal>,
    pub(crate) constraints: &'a mut ConstraintAllocator,
    pub(crate) learned_constraints: &'a mut LearnedConstraints,
    pub(crate) variable_order: &'a mut VariableOrder,
    pub(crate) statistics: &'a mut LearnedClauseStatistics,
}

impl ConflictAnalysisContext<'_> {
    /// Writes the reason of the assignment of `variable` into `reason`; returns false if the
    /// variable is a decision (or a root fact without a reason).
    pub(crate) fn reason_of(&self, variable: Variable, reason: &mut Vec<Literal>) -> bool {
        let (Some(constraint), Some(propagated)) = (
            self.vocabulary.reason(variable),
            self.vocabulary.satisfied_literal(variable),
        ) else {
            return false;
        };
        self.constraints
            .get(constraint)
            .calculate_reason(self.vocabulary, Some(propagated), reason);
        true
    }
}

#[derive(Clone, Debug)]
pub(crate) struct LearnedClause {
    /// The asserting literal is at position 0 and a literal of the backjump level at position 1.
    pub(crate) literals: Vec<Literal>,
    pub(crate) backjump_level: usize,
}

type Minimiser = fn(&mut ConflictAnalyser, &mut Vec<Literal>, &ConflictAnalysisContext<'_>);

#[derive(Debug)]
pub(crate) struct ConflictAnalyser {
    seen: KeyedVec<Variable, bool>,
    /// The variables marked in `seen`, so they can be unmarked without a full sweep.
    marked: Vec<Variable>,
    reason_buffer: Vec<Literal>,
    minimisers: EnumMap<LearnedClauseMinimisation, Minimiser>,
    minimisation: LearnedClauseMinimisation,
    recursive_minimiser: RecursiveMinimiser,
}

impl ConflictAnalyser {
    pub(crate) fn new(minimisation: LearnedClauseMinimisation) -> Self {
        let minimisers: EnumMap<LearnedClauseMinimisation, Minimiser> = enum_map! {
            LearnedClauseMinimisation::None => no_minimisation,
            LearnedClauseMinimisation::Simple => simple_minimisation,
            LearnedClauseMinimisation::Expensive => recursive_minimisation,
        };
        ConflictAnalyser {
            seen: KeyedVec::default(),
            marked: Vec::new(),
            reason_buffer: Vec::new(),
            minimisers,
            minimisation,
            recursive_minimiser: RecursiveMinimiser::default(),
        }
    }

    pub(crate) fn grow(&mut self, num_variables: u32) {
        self.seen.grow(num_variables as usize + 1, false);
    }

    /// Derives the first-UIP clause of `conflict`.
    ///
    /// The conflict has to contain at least one literal of the current decision level, which
    /// must be above the root.
    pub(crate) fn analyse(
        &mut self,
        conflict: ConstraintReference,
        context: &mut ConflictAnalysisContext<'_>,
    ) -> LearnedClause {
        let current_level = context.trail.decision_level();
        gourd_assert_simple!(current_level > 0);

        // Position 0 is filled with the asserting literal at the end.
        let mut learned = vec![Literal::from_dimacs(1)];
        let mut num_open_at_current_level = 0;
        let mut propagated: Option<Literal> = None;
        let mut constraint = conflict;
        let mut trail_index = context.trail.len();
        let mut needs_rescale = false;

        loop {
            needs_rescale |= context
                .learned_constraints
                .on_conflict_analysis(context.constraints.get_mut(constraint));

            self.reason_buffer.clear();
            context.constraints.get(constraint).calculate_reason(
                context.vocabulary,
                propagated,
                &mut self.reason_buffer,
            );

            for &literal in &self.reason_buffer {
                gourd_assert_moderate!(context.vocabulary.is_falsified(literal));
                let variable = literal.get_variable();
                let level = context.vocabulary.level(variable);
                if self.seen[variable] || level == 0 {
                    continue;
                }
                self.seen[variable] = true;
                self.marked.push(variable);
                context.variable_order.bump(variable);
                if level == current_level {
                    num_open_at_current_level += 1;
                } else {
                    learned.push(literal);
                }
            }
            gourd_assert_simple!(num_open_at_current_level > 0);

            // The next literal to resolve on is the newest one that was seen.
            loop {
                trail_index -= 1;
                if self.seen[context.trail[trail_index].get_variable()] {
                    break;
                }
            }
            let next = context.trail[trail_index];
            propagated = Some(next);
            num_open_at_current_level -= 1;
            if num_open_at_current_level == 0 {
                learned[0] = !next;
                break;
            }

            constraint = context
                .vocabulary
                .reason(next.get_variable())
                .unwrap_or_else(|| panic!("{next} is not the only decision of its level"));
        }

        if needs_rescale {
            context
                .learned_constraints
                .rescale_activities(context.constraints);
        }

        let size_before_minimisation = learned.len();
        (self.minimisers[self.minimisation])(self, &mut learned, context);
        context
            .statistics
            .average_number_of_removed_literals
            .add_term((size_before_minimisation - learned.len()) as u64);

        for variable in self.marked.drain(..) {
            self.seen[variable] = false;
        }

        let backjump_level = if learned.len() == 1 {
            0
        } else {
            let (position, level) = learned[1..]
                .iter()
                .enumerate()
                .map(|(index, &literal)| (index + 1, context.vocabulary.literal_level(literal)))
                .max_by_key(|&(_, level)| level)
                .unwrap_or((1, 0));
            learned.swap(1, position);
            level
        };

        LearnedClause {
            literals: learned,
            backjump_level,
        }
    }

    /// Computes which assumptions are responsible for `failed` being false.
    ///
    /// `failed` is an assumption which is falsified; the result contains it together with every
    /// other assumption (a decision on the trail) which took part in falsifying it.
    pub(crate) fn analyse_final(
        &mut self,
        failed: Literal,
        context: &ConflictAnalysisContext<'_>,
    ) -> Vec<Literal> {
        let mut core = vec![failed];
        if context.trail.decision_level() == 0 {
            return core;
        }

        self.seen[failed.get_variable()] = true;
        let first_decision = context.trail.start_of_level(1);
        for index in (first_decision..context.trail.len()).rev() {
            let literal = context.trail[index];
            let variable = literal.get_variable();
            if !self.seen[variable] {
                continue;
            }
            self.seen[variable] = false;

            self.reason_buffer.clear();
            if context.reason_of(variable, &mut self.reason_buffer) {
                for &antecedent in &self.reason_buffer {
                    let antecedent_variable = antecedent.get_variable();
                    if context.vocabulary.level(antecedent_variable) > 0 {
                        self.seen[antecedent_variable] = true;
                    }
                }
            } else if literal != failed {
                core.push(literal);
            }
        }
        self.seen[failed.get_variable()] = false;
        core
    }
}

fn no_minimisation(_: &mut ConflictAnalyser, _: &mut Vec<Literal>, _: &ConflictAnalysisContext<'_>) {}

fn simple_minimisation(
    analyser: &mut ConflictAnalyser,
    learned: &mut Vec<Literal>,
    context: &ConflictAnalysisContext<'_>,
) {
    let mut reason = std::mem::take(&mut analyser.reason_buffer);
    // The asserting literal at position 0 is never removed.
    let mut end_position = 1;
    for index in 1..learned.len() {
        let literal = learned[index];
        reason.clear();
        let is_redundant = context.reason_of(literal.get_variable(), &mut reason)
            && reason.iter().all(|&antecedent| {
                let variable = antecedent.get_variable();
                analyser.seen[variable] || context.vocabulary.level(variable) == 0
            });
        if !is_redundant {
            learned[end_position] = literal;
            end_position += 1;
        }
    }
    learned.truncate(end_position);
    analyser.reason_buffer = reason;
}

fn recursive_minimisation(
    analyser: &mut ConflictAnalyser,
    learned: &mut Vec<Literal>,
    context: &ConflictAnalysisContext<'_>,
) {
    analyser
        .recursive_minimiser
        .remove_dominated_literals(learned, context);
}
