//! A [`TerminationCondition`] is polled by the solver during search and tells it to give up
//! before an answer has been found. Giving up never corrupts the solver; the query simply ends
//! without an answer.

mod combinator;
mod conflict_budget;
mod indefinite;
mod stop_flag;
mod wall_clock_timeout;

pub use combinator::Combinator;
pub use conflict_budget::ConflictBudget;
pub use indefinite::Indefinite;
pub use stop_flag::StopHandle;
pub use wall_clock_timeout::WallClockTimeout;

/// Decides when the solver should stop searching.
pub trait TerminationCondition: Send {
    /// Returns `true` when the solver should stop, `false` otherwise.
    fn should_stop(&mut self) -> bool;

    fn conflict_has_occurred(&mut self) {}
}

impl<T: TerminationCondition> TerminationCondition for Option<T> {
    fn should_stop(&mut self) -> bool {
        match self {
            Some(t) => t.should_stop(),
            None => false,
        }
    }

    fn conflict_has_occurred(&mut self) {
        if let Some(t) = self {
            t.conflict_has_occurred()
        }
    }
}

impl<T: TerminationCondition + ?Sized> TerminationCondition for &mut T {
    fn should_stop(&mut self) -> bool {
        (**self).should_stop()
    }

    fn conflict_has_occurred(&mut self) {
        (**self).conflict_has_occurred()
    }
}

impl<T: TerminationCondition + ?Sized> TerminationCondition for Box<T> {
    fn should_stop(&mut self) -> bool {
        self.as_mut().should_stop()
    }

    fn conflict_has_occurred(&mut self) {
        self.as_mut().conflict_has_occurred()
    }
}
