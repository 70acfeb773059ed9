use super::ConflictTimer;
use super::RestartOptions;
use super::RestartStrategy;
use crate::basic_types::sequence_generators::SequenceGenerator;
use crate::basic_types::sequence_generators::SequenceGeneratorType;
use crate::basic_types::sequence_generators::ConstantSequence;
use crate::basic_types::sequence_generators::GeometricSequence;
use crate::basic_types::sequence_generators::LubySequence;

/// Creates the generator of restart intervals described by `options`.
pub(crate) fn create_sequence(options: &RestartOptions) -> Box<dyn SequenceGenerator> {
    match options.sequence_generator_type {
        SequenceGeneratorType::Constant => Box::new(ConstantSequence::new(options.base_interval)),
        SequenceGeneratorType::Geometric => Box::new(GeometricSequence::new(
            options.base_interval,
            options.geometric_coef,
        )),
        SequenceGeneratorType::Luby => Box::new(LubySequence::new(options.base_interval)),
    }
}

/// Restarts as soon as the number of conflicts since the last restart reaches the next element
/// of a sequence.
#[derive(Debug)]
pub(crate) struct SequenceRestarts {
    sequence: Box<dyn SequenceGenerator>,
    conflicts_since_restart: u64,
    conflicts_until_restart: u64,
}

impl SequenceRestarts {
    pub(crate) fn new(options: &RestartOptions) -> Self {
        let mut sequence = create_sequence(options);
        let conflicts_until_restart = sequence.next().max(1);
        SequenceRestarts {
            sequence,
            conflicts_since_restart: 0,
            conflicts_until_restart,
        }
    }
}

impl ConflictTimer for SequenceRestarts {
    fn reset(&mut self) {
        self.conflicts_since_restart = 0;
    }

    fn new_conflict(&mut self) -> bool {
        self.conflicts_since_restart += 1;
        self.should_restart()
    }
}

impl RestartStrategy for SequenceRestarts {
    fn should_restart(&self) -> bool {
        self.conflicts_since_restart >= self.conflicts_until_restart
    }

    fn on_restart(&mut self) {
        self.conflicts_since_restart = 0;
        self.conflicts_until_restart = self.sequence.next().max(1);
    }
}
