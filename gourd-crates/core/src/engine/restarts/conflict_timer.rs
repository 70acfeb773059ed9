use std::fmt::Debug;

use crate::containers::KeyedVec;
use crate::containers::StorageKey;

/// Counts conflicts and fires once a bound is reached.
pub(crate) trait ConflictTimer: Debug + Send {
    /// Starts counting from zero again.
    fn reset(&mut self);

    /// Registers a conflict; returns true when the timer fires.
    fn new_conflict(&mut self) -> bool;
}

/// Fires every `bound` conflicts.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedConflictTimer {
    bound: u64,
    counter: u64,
}

impl FixedConflictTimer {
    pub(crate) fn new(bound: u64) -> Self {
        FixedConflictTimer {
            bound: bound.max(1),
            counter: 0,
        }
    }
}

impl ConflictTimer for FixedConflictTimer {
    fn reset(&mut self) {
        self.counter = 0;
    }

    fn new_conflict(&mut self) -> bool {
        self.counter += 1;
        if self.counter >= self.bound {
            self.counter = 0;
            return true;
        }
        false
    }
}

/// Fires after `first_bound` conflicts; afterwards the bound grows by `increment` every time the
/// timer fires.
#[derive(Debug, Clone, Copy)]
pub(crate) struct IncreasingConflictTimer {
    first_bound: u64,
    bound: u64,
    increment: u64,
    counter: u64,
}

impl IncreasingConflictTimer {
    pub(crate) fn new(first_bound: u64, increment: u64) -> Self {
        IncreasingConflictTimer {
            first_bound: first_bound.max(1),
            bound: first_bound.max(1),
            increment,
            counter: 0,
        }
    }
}

impl ConflictTimer for IncreasingConflictTimer {
    fn reset(&mut self) {
        self.counter = 0;
        self.bound = self.first_bound;
    }

    fn new_conflict(&mut self) -> bool {
        self.counter += 1;
        if self.counter >= self.bound {
            self.counter = 0;
            self.bound += self.increment;
            return true;
        }
        false
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TimerHandle(usize);

impl StorageKey for TimerHandle {
    fn index(&self) -> usize {
        self.0
    }

    fn create_from_index(index: usize) -> Self {
        TimerHandle(index)
    }
}

/// Fans conflicts out to a number of independent timers and remembers which of them fired, so
/// that their owners can pick up the work at a convenient moment.
#[derive(Debug, Default)]
pub(crate) struct ConflictTimerContainer {
    timers: KeyedVec<TimerHandle, Box<dyn ConflictTimer>>,
    fired: KeyedVec<TimerHandle, bool>,
}

impl ConflictTimerContainer {
    pub(crate) fn add(&mut self, timer: Box<dyn ConflictTimer>) -> TimerHandle {
        let _ = self.fired.push(false);
        self.timers.push(timer)
    }

    pub(crate) fn new_conflict(&mut self) {
        for handle in self.timers.keys().collect::<Vec<_>>() {
            if self.timers[handle].new_conflict() {
                self.fired[handle] = true;
            }
        }
    }

    /// Whether the timer fired since the last call, clearing the flag.
    pub(crate) fn take_fired(&mut self, handle: TimerHandle) -> bool {
        std::mem::take(&mut self.fired[handle])
    }

    pub(crate) fn clear(&mut self) {
        self.timers.clear();
        self.fired.clear();
    }
}
