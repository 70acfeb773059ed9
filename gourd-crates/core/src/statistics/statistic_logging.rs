//! The process wide sink for statistics.

use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::io::stdout;
use std::io::Write;
use std::sync::OnceLock;
use std::sync::RwLock;

use convert_case::Case;
use convert_case::Casing;

struct StatisticOptions {
    prefix: &'static str,
    /// A line written after a block of statistics, if any.
    postfix: Option<&'static str>,
    casing: Option<Case>,
    writer: Box<dyn Write + Send + Sync>,
}

impl Debug for StatisticOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatisticOptions")
            .field("prefix", &self.prefix)
            .field("postfix", &self.postfix)
            .field("casing", &self.casing)
            .field("writer", &"<Writer>")
            .finish()
    }
}

static STATISTIC_OPTIONS: OnceLock<RwLock<StatisticOptions>> = OnceLock::new();

/// Turns on statistic logging.
///
/// Only the first call has an effect. Until it is made, nothing is logged. Statistics are
/// written to `writer`, or to stdout if it is [`None`].
pub fn configure_statistic_logging(
    prefix: &'static str,
    postfix: Option<&'static str>,
    casing: Option<Case>,
    writer: Option<Box<dyn Write + Send + Sync>>,
) {
    let _ = STATISTIC_OPTIONS.get_or_init(|| {
        RwLock::new(StatisticOptions {
            prefix,
            postfix,
            casing,
            writer: writer.unwrap_or_else(|| Box::new(stdout())),
        })
    });
}

/// Writes `{prefix} {name}={value}` if statistic logging has been configured.
pub fn log_statistic(name: impl Display, value: impl Display) {
    let Some(lock) = STATISTIC_OPTIONS.get() else {
        return;
    };
    if let Ok(mut options) = lock.write() {
        let name = match options.casing {
            Some(casing) => name.to_string().to_case(casing),
            None => name.to_string(),
        };
        let prefix = options.prefix;
        let _ = writeln!(options.writer, "{prefix} {name}={value}");
    }
}

/// Writes the closing line of a block of statistics, if one was configured.
pub fn log_statistic_postfix() {
    let Some(lock) = STATISTIC_OPTIONS.get() else {
        return;
    };
    if let Ok(mut options) = lock.write() {
        if let Some(postfix) = options.postfix {
            let _ = writeln!(options.writer, "{postfix}");
        }
    }
}

pub fn should_log_statistics() -> bool {
    STATISTIC_OPTIONS.get().is_some()
}
