use super::TerminationCondition;

/// Never stops.
#[derive(Clone, Copy, Debug)]
pub struct Indefinite;

impl TerminationCondition for Indefinite {
    fn should_stop(&mut self) -> bool {
        false
    }
}
