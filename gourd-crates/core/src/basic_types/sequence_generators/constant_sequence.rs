use super::SequenceGenerator;

/// Yields the same value forever.
#[derive(Debug, Copy, Clone)]
pub struct ConstantSequence {
    value: u64,
}

impl ConstantSequence {
    pub fn new(value: u64) -> ConstantSequence {
        ConstantSequence { value }
    }
}

impl SequenceGenerator for ConstantSequence {
    fn next(&mut self) -> u64 {
        self.value
    }
}
