use std::fmt::Display;

use super::MovingAverage;

/// The average over every term added so far.
#[derive(Debug, Default, Clone, Copy)]
pub struct CumulativeMovingAverage {
    sum: u64,
    num_terms: u64,
}

impl MovingAverage for CumulativeMovingAverage {
    fn add_term(&mut self, term: u64) {
        self.sum += term;
        self.num_terms += 1;
    }

    fn value(&self) -> f64 {
        if self.num_terms == 0 {
            0.0
        } else {
            self.sum as f64 / self.num_terms as f64
        }
    }
}

impl Display for CumulativeMovingAverage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}
