use super::sequence_restarts::create_sequence;
use super::ConflictTimer;
use super::RestartOptions;
use super::RestartStrategy;
use crate::basic_types::moving_averages::CumulativeMovingAverage;
use crate::basic_types::moving_averages::MovingAverage;
use crate::basic_types::moving_averages::WindowedMovingAverage;
use crate::basic_types::sequence_generators::SequenceGenerator;

/// Restarts when the recently learned clauses are worse than usual.
///
/// A restart is only considered once the minimum interval given by the restart sequence has
/// passed (and, before the first restart, once enough conflicts were seen to have meaningful
/// averages). It then happens if the short-term average LBD is at least the long-term average
/// times the LBD coefficient. A pending restart is blocked when the number of assigned variables
/// is far above its recent average.
#[derive(Debug)]
pub(crate) struct GlucoseRestarts {
    sequence: Box<dyn SequenceGenerator>,
    conflicts_since_restart: u64,
    /// The minimum number of conflicts between two restarts.
    conflicts_until_restart: u64,
    min_conflicts_before_first_restart: u64,
    lbd_short_term: WindowedMovingAverage,
    lbd_long_term: CumulativeMovingAverage,
    lbd_coef: f64,
    num_assigned_recent: WindowedMovingAverage,
    num_assigned_coef: f64,
    num_restarts: u64,
    num_blocked_restarts: u64,
}

impl GlucoseRestarts {
    pub(crate) fn new(options: &RestartOptions) -> Self {
        let mut sequence = create_sequence(options);
        let conflicts_until_restart = sequence.next().max(1);
        GlucoseRestarts {
            sequence,
            conflicts_since_restart: 0,
            conflicts_until_restart,
            min_conflicts_before_first_restart: options.min_num_conflicts_before_first_restart,
            lbd_short_term: WindowedMovingAverage::new(options.base_interval.max(1)),
            lbd_long_term: CumulativeMovingAverage::default(),
            lbd_coef: options.lbd_coef,
            num_assigned_recent: WindowedMovingAverage::new(options.num_assigned_window.max(1)),
            num_assigned_coef: options.num_assigned_coef,
            num_restarts: 0,
            num_blocked_restarts: 0,
        }
    }

    fn is_before_first_restart(&self) -> bool {
        self.num_restarts == 0
            && self.conflicts_since_restart < self.min_conflicts_before_first_restart
    }

    fn has_minimum_interval_passed(&self) -> bool {
        self.conflicts_since_restart >= self.conflicts_until_restart
    }

    fn should_block_restart(&self, num_assigned: usize) -> bool {
        if self.is_before_first_restart() || !self.has_minimum_interval_passed() {
            return false;
        }
        num_assigned as f64 > self.num_assigned_recent.value() * self.num_assigned_coef
    }
}

impl ConflictTimer for GlucoseRestarts {
    fn reset(&mut self) {
        self.conflicts_since_restart = 0;
        self.lbd_short_term.clear();
    }

    fn new_conflict(&mut self) -> bool {
        self.conflicts_since_restart += 1;
        false
    }
}

impl RestartStrategy for GlucoseRestarts {
    fn should_restart(&self) -> bool {
        if self.is_before_first_restart() || !self.has_minimum_interval_passed() {
            return false;
        }
        self.lbd_long_term.value() * self.lbd_coef <= self.lbd_short_term.value()
    }

    fn on_restart(&mut self) {
        self.num_restarts += 1;
        self.conflicts_until_restart = self.sequence.next().max(1);
        self.reset();
    }

    fn new_learned_clause(&mut self, lbd: u32, num_assigned: usize) {
        self.num_assigned_recent.add_term(num_assigned as u64);
        self.lbd_short_term.add_term(u64::from(lbd));
        self.lbd_long_term.add_term(u64::from(lbd));

        if self.should_block_restart(num_assigned) {
            self.num_blocked_restarts += 1;
            self.reset();
        }
    }

    fn num_blocked_restarts(&self) -> u64 {
        self.num_blocked_restarts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::sequence_generators::SequenceGeneratorType;

    fn options() -> RestartOptions {
        RestartOptions {
            sequence_generator_type: SequenceGeneratorType::Constant,
            base_interval: 2,
            min_num_conflicts_before_first_restart: 4,
            num_assigned_window: 10,
            ..Default::default()
        }
    }

    fn conflict(restarts: &mut GlucoseRestarts, lbd: u32, num_assigned: usize) {
        let _ = restarts.new_conflict();
        restarts.new_learned_clause(lbd, num_assigned);
    }

    #[test]
    fn no_restart_before_the_minimum_number_of_conflicts() {
        let mut restarts = GlucoseRestarts::new(&RestartOptions {
            lbd_coef: 1.0,
            ..options()
        });
        for _ in 0..3 {
            conflict(&mut restarts, 10, 5);
        }
        assert!(!restarts.should_restart());

        conflict(&mut restarts, 10, 5);
        assert!(restarts.should_restart());
    }

    #[test]
    fn worsening_lbd_triggers_a_restart() {
        let mut restarts = GlucoseRestarts::new(&options());
        for _ in 0..4 {
            conflict(&mut restarts, 2, 5);
        }
        restarts.on_restart();

        conflict(&mut restarts, 2, 5);
        conflict(&mut restarts, 2, 5);
        assert!(!restarts.should_restart());

        conflict(&mut restarts, 20, 5);
        conflict(&mut restarts, 20, 5);
        assert!(restarts.should_restart());
    }

    #[test]
    fn many_assigned_variables_block_a_restart() {
        let mut restarts = GlucoseRestarts::new(&options());
        for _ in 0..4 {
            conflict(&mut restarts, 2, 5);
        }
        restarts.on_restart();

        conflict(&mut restarts, 20, 5);
        conflict(&mut restarts, 20, 100);

        assert_eq!(restarts.num_blocked_restarts(), 1);
        assert!(!restarts.should_restart());
    }
}
