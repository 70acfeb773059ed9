//! Printing of solver statistics in a configurable `{prefix} {name}={value}` line format.
mod statistic_logger;
mod statistic_logging;

use std::fmt::Display;

pub use statistic_logger::StatisticLogger;
pub use statistic_logging::configure_statistic_logging;
pub use statistic_logging::log_statistic;
pub use statistic_logging::log_statistic_postfix;
pub use statistic_logging::should_log_statistics;

/// Something which can be written out through a [`StatisticLogger`].
///
/// Structs of counters are best generated with [`create_statistics_struct!`](crate::create_statistics_struct).
pub trait Statistic {
    fn log(&self, statistic_logger: StatisticLogger);
}

impl<Value: Display> Statistic for Value {
    fn log(&self, statistic_logger: StatisticLogger) {
        statistic_logger.log_statistic(self);
    }
}

/// Generates a struct of statistics which implements [`Statistic`] by logging every field under
/// its own name.
///
/// ```rust
/// # use gourd_core::create_statistics_struct;
/// create_statistics_struct!(
///     /// Counters of a single component.
///     Counters {
///         num_calls: u64,
///         average_size: f64,
///     }
/// );
///
/// let counters = Counters::default();
/// assert_eq!(counters.num_calls, 0);
/// ```
#[macro_export]
macro_rules! create_statistics_struct {
    ($(#[$struct_doc:meta])* $name:ident { $($(#[$field_doc:meta])* $field:ident : $type:ty),+ $(,)? }) => {
        $(#[$struct_doc])*
        #[derive(Default, Debug, Copy, Clone)]
        pub struct $name {
            $($(#[$field_doc])* pub $field: $type),+
        }

        impl $crate::statistics::Statistic for $name {
            fn log(&self, statistic_logger: $crate::statistics::StatisticLogger) {
                $($crate::statistics::Statistic::log(
                    &self.$field,
                    statistic_logger.attach_to_prefix(stringify!($field)),
                );)+
            }
        }
    };
}
