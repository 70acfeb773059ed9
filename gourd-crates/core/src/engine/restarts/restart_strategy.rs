use std::fmt::Debug;

use enum_map::enum_map;
use enum_map::Enum;
use enum_map::EnumMap;

use super::ConflictTimer;
use super::GlucoseRestarts;
use super::SequenceRestarts;
use crate::basic_types::sequence_generators::SequenceGeneratorType;

/// Decides when the search abandons its partial assignment and starts again from the root.
///
/// Every conflict is first registered through [`ConflictTimer::new_conflict`]; the learned
/// clause it produced is reported afterwards through [`RestartStrategy::new_learned_clause`].
pub(crate) trait RestartStrategy: ConflictTimer {
    fn should_restart(&self) -> bool;

    fn on_restart(&mut self);

    /// Called when a conflict made the search jump back to the root without a restart.
    fn on_backjump_to_root_level(&mut self) {}

    /// `lbd` is the literal block distance of the learned clause and `num_assigned` the number
    /// of variables which were assigned when the conflict happened.
    fn new_learned_clause(&mut self, _lbd: u32, _num_assigned: usize) {}

    fn num_blocked_restarts(&self) -> u64 {
        0
    }
}

/// Never restarts.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct NoRestarts;

impl ConflictTimer for NoRestarts {
    fn reset(&mut self) {}

    fn new_conflict(&mut self) -> bool {
        false
    }
}

impl RestartStrategy for NoRestarts {
    fn should_restart(&self) -> bool {
        false
    }

    fn on_restart(&mut self) {}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Enum)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum RestartStrategyType {
    /// Never restart.
    None,
    /// Restart after a number of conflicts given by the restart sequence.
    Sequence,
    /// Restart when recently learned clauses are of poor quality compared to the long-term
    /// average, unless the search seems close to a solution.
    #[default]
    Glucose,
}

impl std::fmt::Display for RestartStrategyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RestartStrategyType::None => write!(f, "none"),
            RestartStrategyType::Sequence => write!(f, "sequence"),
            RestartStrategyType::Glucose => write!(f, "glucose"),
        }
    }
}

/// The options which determine when the solver restarts.
///
/// The dynamic strategy follows Glucose: a restart is triggered when the short-term average LBD
/// (the number of distinct decision levels in a learned clause, lower is better) exceeds the
/// long-term average by a factor, and it is postponed when the number of assigned variables is
/// much larger than usual, since the search might then be close to a solution.
///
/// # Bibliography
/// \[1\] A. Biere and A. Fröhlich, ‘Evaluating CDCL restart schemes’, Proceedings of Pragmatics of
/// SAT, pp. 1–17, 2015.
///
/// \[2\] G. Audemard and L. Simon, ‘Refining restarts strategies for SAT and UNSAT’, in Principles
/// and Practice of Constraint Programming, CP 2012, pp. 118–126.
///
/// \[3\] M. Luby, A. Sinclair, and D. Zuckerman, ‘Optimal speedup of Las Vegas algorithms’,
/// Information Processing Letters, vol. 47, no. 4, pp. 173–180, 1993.
#[derive(Debug, Clone, Copy)]
pub struct RestartOptions {
    pub strategy: RestartStrategyType,
    /// The shape of the sequence of minimum restart intervals.
    pub sequence_generator_type: SequenceGeneratorType,
    /// Multiplier of the restart sequence; constant restarts with base interval 100 restart every
    /// 100 conflicts.
    pub base_interval: u64,
    /// The dynamic strategy does not restart before this many conflicts.
    pub min_num_conflicts_before_first_restart: u64,
    /// A restart is forced when the short-term average LBD exceeds the long-term average times
    /// this coefficient; larger values mean fewer restarts.
    pub lbd_coef: f64,
    /// A restart is blocked when the number of assigned variables exceeds its recent average
    /// times this coefficient; larger values mean fewer blocked restarts.
    pub num_assigned_coef: f64,
    /// The number of conflicts over which the recent average of assigned variables is taken.
    pub num_assigned_window: u64,
    /// The factor of the geometric sequence.
    pub geometric_coef: f64,
}

impl Default for RestartOptions {
    fn default() -> Self {
        Self {
            strategy: RestartStrategyType::Glucose,
            sequence_generator_type: SequenceGeneratorType::Constant,
            base_interval: 50,
            min_num_conflicts_before_first_restart: 10000,
            lbd_coef: 1.25,
            num_assigned_coef: 1.4,
            num_assigned_window: 5000,
            geometric_coef: 1.5,
        }
    }
}

type RestartStrategyConstructor = fn(&RestartOptions) -> Box<dyn RestartStrategy>;

fn no_restarts(_: &RestartOptions) -> Box<dyn RestartStrategy> {
    Box::new(NoRestarts)
}

fn sequence_restarts(options: &RestartOptions) -> Box<dyn RestartStrategy> {
    Box::new(SequenceRestarts::new(options))
}

fn glucose_restarts(options: &RestartOptions) -> Box<dyn RestartStrategy> {
    Box::new(GlucoseRestarts::new(options))
}

pub(crate) fn create_restart_strategy(options: &RestartOptions) -> Box<dyn RestartStrategy> {
    let constructors: EnumMap<RestartStrategyType, RestartStrategyConstructor> = enum_map! {
        RestartStrategyType::None => no_restarts,
        RestartStrategyType::Sequence => sequence_restarts,
        RestartStrategyType::Glucose => glucose_restarts,
    };
    constructors[options.strategy](options)
}
