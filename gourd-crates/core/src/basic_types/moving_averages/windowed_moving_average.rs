use std::collections::VecDeque;

use super::MovingAverage;
use crate::gourd_assert_simple;

/// The average over the most recent `window_size` terms.
#[derive(Debug, Clone)]
pub struct WindowedMovingAverage {
    window_size: usize,
    sum: u64,
    window: VecDeque<u64>,
}

impl WindowedMovingAverage {
    pub fn new(window_size: u64) -> WindowedMovingAverage {
        gourd_assert_simple!(window_size > 0, "a moving window cannot be empty");
        WindowedMovingAverage {
            window_size: window_size as usize,
            sum: 0,
            window: VecDeque::with_capacity(window_size as usize),
        }
    }

    /// Whether the window has seen at least `window_size` terms.
    pub fn is_full(&self) -> bool {
        self.window.len() == self.window_size
    }

    pub fn clear(&mut self) {
        self.window.clear();
        self.sum = 0;
    }
}

impl MovingAverage for WindowedMovingAverage {
    fn add_term(&mut self, term: u64) {
        if self.is_full() {
            if let Some(oldest) = self.window.pop_front() {
                self.sum -= oldest;
            }
        }
        self.sum += term;
        self.window.push_back(term);
    }

    fn value(&self) -> f64 {
        if self.window.is_empty() {
            0.0
        } else {
            self.sum as f64 / self.window.len() as f64
        }
    }
}
