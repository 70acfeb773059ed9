use crate::engine::variables::Literal;
use crate::engine::vocabulary::Vocabulary;

/// Computes the literal block distance: the number of distinct decision levels among a set of
/// assigned literals.
///
/// Levels are marked with a stamp which is incremented on every computation, so nothing has to be
/// cleared in between.
#[derive(Debug, Default, Clone)]
pub(crate) struct LbdCalculator {
    stamps: Vec<u64>,
    current_stamp: u64,
}

impl LbdCalculator {
    pub(crate) fn compute(&mut self, literals: &[Literal], vocabulary: &Vocabulary) -> u32 {
        self.current_stamp += 1;
        let mut num_levels = 0;
        for &literal in literals {
            if vocabulary.is_unassigned(literal) {
                continue;
            }
            let level = vocabulary.literal_level(literal);
            if level >= self.stamps.len() {
                self.stamps.resize(level + 1, 0);
            }
            if self.stamps[level] != self.current_stamp {
                self.stamps[level] = self.current_stamp;
                num_levels += 1;
            }
        }
        num_levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_distinct_levels() {
        let mut vocabulary = Vocabulary::default();
        vocabulary.ensure_pool(4);
        let literals = [1, -2, 3, 4].map(Literal::from_dimacs);
        vocabulary.assign(literals[0], 1, None, 0);
        vocabulary.assign(literals[1], 3, None, 1);
        vocabulary.assign(literals[2], 3, None, 2);

        let mut calculator = LbdCalculator::default();
        assert_eq!(calculator.compute(&literals, &vocabulary), 2);
        assert_eq!(calculator.compute(&literals[1..], &vocabulary), 1);
    }
}
