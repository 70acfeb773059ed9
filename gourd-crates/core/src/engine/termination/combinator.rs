use super::TerminationCondition;

/// Joins two [`TerminationCondition`]s into one which stops when either of them does.
///
/// A query polls the solver's [`StopHandle`](super::StopHandle) together with its own budget,
/// which limits the conflicts or the wall-clock time of the query. Conflicts are reported to
/// both halves, so a budget keeps counting even while the other half never asks to stop.
#[derive(Clone, Copy, Debug)]
pub struct Combinator<T1, T2> {
    t1: T1,
    t2: T2,
}

impl<T1, T2> Combinator<T1, T2> {
    pub fn new(t1: T1, t2: T2) -> Self {
        Combinator { t1, t2 }
    }
}

impl<T1: TerminationCondition, T2: TerminationCondition> TerminationCondition
    for Combinator<T1, T2>
{
    fn should_stop(&mut self) -> bool {
        self.t1.should_stop() || self.t2.should_stop()
    }

    fn conflict_has_occurred(&mut self) {
        self.t1.conflict_has_occurred();
        self.t2.conflict_has_occurred();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::termination::ConflictBudget;
    use crate::engine::termination::StopHandle;

    #[test]
    fn stops_once_the_budget_is_spent() {
        let mut budget = ConflictBudget::new(2);
        let mut combined = Combinator::new(StopHandle::default(), &mut budget);

        combined.conflict_has_occurred();
        assert!(!combined.should_stop());
        combined.conflict_has_occurred();
        assert!(combined.should_stop());
    }

    #[test]
    fn stops_on_request_with_budget_left() {
        let handle = StopHandle::default();
        let mut combined = Combinator::new(handle.clone(), ConflictBudget::new(100));
        assert!(!combined.should_stop());

        handle.request_stop();
        assert!(combined.should_stop());
    }
}
