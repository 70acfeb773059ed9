//! Integer sequences which drive the length of restart intervals.
mod constant_sequence;
mod geometric_sequence;
mod luby_sequence;

use std::fmt::Debug;

pub use constant_sequence::ConstantSequence;
pub use geometric_sequence::GeometricSequence;
pub use luby_sequence::LubySequence;

pub trait SequenceGenerator: Debug + Send {
    fn next(&mut self) -> u64;
}

/// The shape of the sequence; every element is multiplied by a base interval.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, enum_map::Enum)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SequenceGeneratorType {
    #[default]
    Constant,
    Geometric,
    Luby,
}

impl std::fmt::Display for SequenceGeneratorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SequenceGeneratorType::Constant => write!(f, "constant"),
            SequenceGeneratorType::Geometric => write!(f, "geometric"),
            SequenceGeneratorType::Luby => write!(f, "luby"),
        }
    }
}
