use super::SequenceGenerator;

/// The Luby sequence `1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, ...` scaled by a base value.
///
/// Elements are generated in constant time with Knuth's reluctant doubling.
#[derive(Debug, Copy, Clone)]
pub struct LubySequence {
    u: i64,
    v: u64,
    base: u64,
}

impl LubySequence {
    pub fn new(base: u64) -> LubySequence {
        LubySequence { u: 1, v: 1, base }
    }
}

impl SequenceGenerator for LubySequence {
    fn next(&mut self) -> u64 {
        let value = self.v;
        if (self.u & -self.u) as u64 == self.v {
            self.u += 1;
            self.v = 1;
        } else {
            self.v *= 2;
        }
        value.saturating_mul(self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn luby(i: u64) -> u64 {
        let k = (i + 1).ilog2();
        if (i + 1).is_power_of_two() {
            1 << (k - 1)
        } else {
            luby(i + 1 - (1 << k))
        }
    }

    #[test]
    fn first_elements() {
        let mut sequence = LubySequence::new(1);
        let values = (0..15).map(|_| sequence.next()).collect::<Vec<_>>();
        assert_eq!(values, vec![1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8]);
    }

    #[test]
    fn matches_the_recursive_definition_when_scaled() {
        let mut sequence = LubySequence::new(50);
        for i in 1..10_000 {
            assert_eq!(sequence.next(), luby(i) * 50);
        }
    }
}
