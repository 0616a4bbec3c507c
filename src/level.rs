use std::fmt;

use crate::error::Error;

/// Expands to one string per level, in `Level` order, with the level word
/// between `$prefix` and `$suffix`.
macro_rules! per_level {
    ($prefix:literal, $suffix:literal) => {
        [
            concat!($prefix, "INFO", $suffix),
            concat!($prefix, "WARNING", $suffix),
            concat!($prefix, "ERROR", $suffix),
            concat!($prefix, "FATAL", $suffix),
        ]
    };
}
pub(crate) use per_level;

const WORDS: [&str; 4] = per_level!("", "");
const FILE_PREFIXES: [&str; 4] = per_level!("[", "] ");

/// Severity of a debug message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    Info = 0,
    Warn = 1,
    Error = 2,
    Fatal = 3,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Info, Level::Warn, Level::Error, Level::Fatal];

    /// Word written between the brackets of a label. `Warn` is spelled out
    /// as `WARNING` in both sinks.
    pub fn word(self) -> &'static str {
        WORDS[self.index()]
    }

    /// Plain `[WORD] ` prefix used by the file sink.
    pub(crate) fn file_prefix(self) -> &'static str {
        FILE_PREFIXES[self.index()]
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for Level {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Error> {
        match value {
            0 => Ok(Level::Info),
            1 => Ok(Level::Warn),
            2 => Ok(Level::Error),
            3 => Ok(Level::Fatal),
            other => Err(Error::InvalidLevel(other)),
        }
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warn,
            log::Level::Info | log::Level::Debug | log::Level::Trace => Level::Info,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.word())
    }
}
