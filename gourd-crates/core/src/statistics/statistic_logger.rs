use std::fmt::Display;

use itertools::Itertools;

use super::statistic_logging::log_statistic;

/// Logs statistics under a name built from a chain of prefixes joined by `_`.
#[derive(Debug, Default, Clone)]
pub struct StatisticLogger {
    name: String,
}

impl StatisticLogger {
    pub fn new<Input: IntoIterator<Item = impl Display>>(name_prefix: Input) -> Self {
        Self {
            name: name_prefix.into_iter().join("_"),
        }
    }

    /// A logger whose name is the current name extended with `addition`.
    pub fn attach_to_prefix(&self, addition: impl Display) -> Self {
        let name = if self.name.is_empty() {
            addition.to_string()
        } else {
            format!("{}_{}", self.name, addition)
        };
        Self { name }
    }

    pub fn log_statistic(&self, value: impl Display) {
        log_statistic(&self.name, value);
    }
}
