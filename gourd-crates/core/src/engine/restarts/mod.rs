//! Conflict counting policies: timers deciding when periodic work is due, and the restart
//! strategies built on top of them.
mod conflict_timer;
mod glucose_restarts;
mod restart_strategy;
mod sequence_restarts;

pub(crate) use conflict_timer::ConflictTimer;
pub(crate) use conflict_timer::ConflictTimerContainer;
pub(crate) use conflict_timer::FixedConflictTimer;
pub(crate) use conflict_timer::IncreasingConflictTimer;
pub(crate) use conflict_timer::TimerHandle;
pub(crate) use glucose_restarts::GlucoseRestarts;
pub use restart_strategy::RestartOptions;
pub(crate) use restart_strategy::create_restart_strategy;
pub(crate) use restart_strategy::RestartStrategy;
pub use restart_strategy::RestartStrategyType;
pub(crate) use sequence_restarts::SequenceRestarts;
