//! Forwards records from the `log` facade into the process-wide logger.
//!
//! Directives use the `env_logger` syntax (`"info"`, `"warn,my_crate=info"`).
//! `Debug` and `Trace` records come out as `INFO` lines.

use env_logger::{Builder, Env};
use log::{Log, Metadata, Record, SetLoggerError};

use crate::global;

pub const DEFAULT_DIRECTIVES: &str = "info";

pub struct Bridge {
    // Only its filter is consulted; output goes through `global`.
    filter: env_logger::Logger,
}

impl Bridge {
    pub fn new(directives: &str) -> Self {
        Self::from_builder(Builder::new().parse_filters(directives))
    }

    /// Reads directives from `var`, falling back to [`DEFAULT_DIRECTIVES`].
    pub fn from_env(var: &str) -> Self {
        let env = Env::new().filter_or(var, DEFAULT_DIRECTIVES);
        Self::from_builder(&mut Builder::from_env(env))
    }

    fn from_builder(builder: &mut Builder) -> Self {
        Self {
            filter: builder.build(),
        }
    }

    /// Registers the bridge as the `log` crate's logger. Fails if another
    /// logger was installed first.
    pub fn install(self) -> Result<(), SetLoggerError> {
        let max_level = self.filter.filter();
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }
}

impl Log for Bridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.filter.enabled(metadata)
    }

    fn log(&self, record: &Record<'_>) {
        if self.filter.matches(record) {
            let _ = global::log(record.level().into(), *record.args());
        }
    }

    fn flush(&self) {}
}
