mod fixed_phase;
mod phase_saving;
mod random_phase;

use std::fmt::Debug;
use std::fmt::Display;

use enum_map::enum_map;
use enum_map::Enum;
use enum_map::EnumMap;
pub(crate) use fixed_phase::FixedPhase;
pub(crate) use phase_saving::PhaseSaving;
pub(crate) use random_phase::RandomPhase;

use crate::engine::variables::Literal;
use crate::engine::variables::Variable;

/// Chooses the polarity in which a decision variable is assigned.
pub(crate) trait PhaseSelector: Debug + Send {
    fn select(&mut self, variable: Variable) -> Literal;

    /// Called when backtracking unassigns a variable; `literal` is the literal which was true.
    fn on_unassign(&mut self, _literal: Literal) {}

    /// Makes room for variables `1..=num_variables`.
    fn grow(&mut self, _num_variables: u32) {}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Enum)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum PhaseSelection {
    /// Assign a variable the value it had the last time it was assigned, false initially.
    #[default]
    PhaseSaving,
    Positive,
    Negative,
    Random,
}

impl Display for PhaseSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhaseSelection::PhaseSaving => write!(f, "phase-saving"),
            PhaseSelection::Positive => write!(f, "positive"),
            PhaseSelection::Negative => write!(f, "negative"),
            PhaseSelection::Random => write!(f, "random"),
        }
    }
}

type PhaseSelectorConstructor = fn(u64) -> Box<dyn PhaseSelector>;

fn phase_saving(_seed: u64) -> Box<dyn PhaseSelector> {
    Box::<PhaseSaving>::default()
}

fn positive(_seed: u64) -> Box<dyn PhaseSelector> {
    Box::new(FixedPhase::new(true))
}

fn negative(_seed: u64) -> Box<dyn PhaseSelector> {
    Box::new(FixedPhase::new(false))
}

fn random(seed: u64) -> Box<dyn PhaseSelector> {
    Box::new(RandomPhase::new(seed))
}

pub(crate) fn create_phase_selector(selection: PhaseSelection, seed: u64) -> Box<dyn PhaseSelector> {
    let constructors: EnumMap<PhaseSelection, PhaseSelectorConstructor> = enum_map! {
        PhaseSelection::PhaseSaving => phase_saving,
        PhaseSelection::Positive => positive,
        PhaseSelection::Negative => negative,
        PhaseSelection::Random => random,
    };
    constructors[selection](seed)
}
