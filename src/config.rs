use std::io::Write;
use std::path::PathBuf;

use crate::color::{Color, ColorConfig};
use crate::file_sink::DEFAULT_PATH;
use crate::level::Level;
use crate::logger::Logger;
use crate::terminal::Terminal;

/// Terminator appended to every line, in both sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `"\n\r"`, byte-compatible with existing log consumers.
    #[default]
    Legacy,
    /// Plain `"\n"`.
    Newline,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Legacy => "\n\r",
            LineEnding::Newline => "\n",
        }
    }
}

/// Initial state of a [`Logger`].
#[derive(Debug, Clone)]
pub struct Config {
    pub colors: ColorConfig,
    pub file_path: PathBuf,
    pub file_enabled: bool,
    pub line_ending: LineEnding,
    /// Render messages longer than the fixed buffer on the heap. Defaults to
    /// whether the `dynamic-alloc` feature is compiled in.
    pub dynamic_allocation: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            colors: ColorConfig::default(),
            file_path: PathBuf::from(DEFAULT_PATH),
            file_enabled: false,
            line_ending: LineEnding::default(),
            dynamic_allocation: cfg!(feature = "dynamic-alloc"),
        }
    }
}

/// Builds a [`Logger`] from a [`Config`] and an optional terminal writer.
#[derive(Default)]
pub struct Builder {
    config: Config,
    terminal: Option<Terminal>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(&mut self, level: Level, color: Color) -> &mut Self {
        self.config.colors.set(level, color);
        self
    }

    pub fn colors_enabled(&mut self, enabled: bool) -> &mut Self {
        self.config.colors.enabled = enabled;
        self
    }

    /// Path the file sink opens on its first write. Length is checked when
    /// the logger is built.
    pub fn file_path(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.config.file_path = path.into();
        self
    }

    pub fn file_enabled(&mut self, enabled: bool) -> &mut Self {
        self.config.file_enabled = enabled;
        self
    }

    pub fn line_ending(&mut self, ending: LineEnding) -> &mut Self {
        self.config.line_ending = ending;
        self
    }

    pub fn dynamic_allocation(&mut self, allowed: bool) -> &mut Self {
        self.config.dynamic_allocation = allowed;
        self
    }

    /// Sends terminal output to `target` instead of standard output.
    pub fn terminal(&mut self, target: impl Write + Send + 'static) -> &mut Self {
        self.terminal = Some(Terminal::with_writer(target));
        self
    }

    pub fn build(&mut self) -> Logger {
        let config = std::mem::take(&mut self.config);
        let terminal = self.terminal.take().unwrap_or_default();
        Logger::from_parts(config, terminal)
    }
}
