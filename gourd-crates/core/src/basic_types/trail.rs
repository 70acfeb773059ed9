use std::iter::Rev;
use std::ops::Deref;
use std::vec::Drain;

use crate::gourd_assert_simple;

/// A stack of values partitioned into decision levels.
///
/// Values pushed after the `i`-th call to [`Trail::new_decision_level`] belong to level `i`;
/// backtracking drops whole levels at once.
#[derive(Clone, Debug)]
pub(crate) struct Trail<T> {
    /// `level_starts[i]` is the length of the trail at the moment level `i + 1` was opened.
    level_starts: Vec<usize>,
    values: Vec<T>,
}

impl<T> Default for Trail<T> {
    fn default() -> Self {
        Trail {
            level_starts: Vec::new(),
            values: Vec::new(),
        }
    }
}

impl<T> Trail<T> {
    pub(crate) fn new_decision_level(&mut self) {
        self.level_starts.push(self.values.len());
    }

    pub(crate) fn decision_level(&self) -> usize {
        self.level_starts.len()
    }

    /// The position on the trail where `level` starts; level 0 always starts at 0.
    pub(crate) fn start_of_level(&self, level: usize) -> usize {
        if level == 0 {
            0
        } else {
            self.level_starts[level - 1]
        }
    }

    pub(crate) fn values_on_decision_level(&self, level: usize) -> &[T] {
        gourd_assert_simple!(level <= self.decision_level());
        let end = if level == self.decision_level() {
            self.values.len()
        } else {
            self.level_starts[level]
        };
        &self.values[self.start_of_level(level)..end]
    }

    /// Drops every level above `level`, yielding the removed values newest first.
    pub(crate) fn synchronise(&mut self, level: usize) -> Rev<Drain<'_, T>> {
        gourd_assert_simple!(level < self.decision_level());
        let new_len = self.level_starts[level];
        self.level_starts.truncate(level);
        self.values.drain(new_len..).rev()
    }

    pub(crate) fn push(&mut self, value: T) {
        self.values.push(value);
    }

    /// Removes the newest value of the current level, if the level has any.
    pub(crate) fn pop(&mut self) -> Option<T> {
        if self.values.len() > self.start_of_level(self.decision_level()) {
            self.values.pop()
        } else {
            None
        }
    }

    /// Removes everything, including the root level.
    pub(crate) fn clear(&mut self) {
        self.level_starts.clear();
        self.values.clear();
    }
}

impl<T> Deref for Trail<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.values
    }
}
