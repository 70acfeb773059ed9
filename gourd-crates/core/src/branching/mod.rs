//! Decides which literal the search assigns next: [`VariableOrder`] picks the variable and a
//! [`PhaseSelector`] its polarity.
mod phase_selection;
mod variable_order;

pub(crate) use phase_selection::create_phase_selector;
pub use phase_selection::PhaseSelection;
pub(crate) use phase_selection::PhaseSelector;
pub(crate) use variable_order::VariableOrder;
