use super::SequenceGenerator;

/// `f(0) = base` and `f(i) = floor(f(i - 1) * factor)`.
///
/// Rounding happens at every step, so for a non-integer factor this differs from
/// `base * factor^i`. The sequence saturates instead of overflowing.
#[derive(Debug, Copy, Clone)]
pub struct GeometricSequence {
    current: u64,
    factor: f64,
}

impl GeometricSequence {
    pub fn new(base: u64, factor: f64) -> GeometricSequence {
        GeometricSequence {
            current: base,
            factor,
        }
    }
}

impl SequenceGenerator for GeometricSequence {
    fn next(&mut self) -> u64 {
        let value = self.current;
        // `as` saturates for floats which do not fit
        self.current = (self.current as f64 * self.factor) as u64;
        value
    }
}
