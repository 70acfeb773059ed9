//! Averages over a stream of non-negative integer observations, used by the dynamic restart
//! strategy to compare short-term and long-term behaviour of the search.
mod cumulative_moving_average;
mod windowed_moving_average;

pub use cumulative_moving_average::CumulativeMovingAverage;
pub use windowed_moving_average::WindowedMovingAverage;

pub trait MovingAverage: std::fmt::Debug {
    fn add_term(&mut self, term: u64);

    /// The current average; 0 when no term has been added yet.
    fn value(&self) -> f64;
}
