use std::fmt;
use std::path::Path;

use crate::color::{Color, ColorConfig};
use crate::config::{Builder, Config, LineEnding};
use crate::error::{Error, Result};
use crate::file_sink::FileSink;
use crate::format::{self, RenderReport, Rendered};
use crate::level::Level;
use crate::terminal::Terminal;

/// A debug logger: color settings, a terminal sink and an optional file sink.
///
/// Failures are returned to the caller and also reported through the logger
/// itself as a `WARNING` line. A failure raised while such a report is being
/// written is returned but not reported again.
pub struct Logger {
    colors: ColorConfig,
    file: FileSink,
    terminal: Terminal,
    line_ending: LineEnding,
    dynamic_allocation: bool,
    reporting: bool,
}

impl Default for Logger {
    fn default() -> Self {
        Self::from_parts(Config::default(), Terminal::stdout())
    }
}

impl Logger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> Builder {
        Builder::new()
    }

    pub(crate) fn from_parts(config: Config, terminal: Terminal) -> Self {
        let mut logger = Self {
            colors: config.colors,
            file: FileSink::default(),
            terminal,
            line_ending: config.line_ending,
            dynamic_allocation: config.dynamic_allocation,
            reporting: false,
        };
        // Rejected paths keep the default and are reported like any other.
        let _ = logger.set_file_path(&config.file_path);
        if config.file_enabled {
            logger.enable_file();
        }
        logger
    }

    /// Snapshot of the current settings.
    pub fn config(&self) -> Config {
        Config {
            colors: self.colors.clone(),
            file_path: self.file.path().to_path_buf(),
            file_enabled: self.file.is_enabled(),
            line_ending: self.line_ending,
            dynamic_allocation: self.dynamic_allocation,
        }
    }

    /// Formats `args` and writes it to the terminal, and to the file when the
    /// file sink is enabled. Both sinks are always attempted; the first
    /// failure is returned.
    pub fn log(&mut self, level: Level, args: fmt::Arguments<'_>) -> Result<()> {
        let (rendered, report) = format::render(args, self.dynamic_allocation);
        self.write_rendered(level, rendered, report)
    }

    /// Dispatches a message rendered by [`format::render`], reporting what
    /// the render ran into.
    pub(crate) fn write_rendered(
        &mut self,
        level: Level,
        rendered: Rendered,
        report: RenderReport,
    ) -> Result<()> {
        if report.allocation_failed {
            self.report(&Error::Allocation {
                requested: report.required,
            });
        }

        let result = self.dispatch(level, rendered.as_str());
        drop(rendered);

        // A failed allocation already explains the cut.
        if report.truncated && !report.allocation_failed {
            self.report(&truncation(report));
        }
        result
    }

    pub fn dynamic_allocation(&self) -> bool {
        self.dynamic_allocation
    }

    fn dispatch(&mut self, level: Level, message: &str) -> Result<()> {
        let terminal = self
            .terminal
            .write(&self.colors, self.line_ending, level, message);

        let file = if self.file.is_enabled() {
            self.file.write(self.line_ending, level, message)
        } else {
            Ok(())
        };

        if let Err(err) = &terminal {
            self.report(err);
        }
        if let Err(err) = &file {
            self.report(err);
        }
        terminal.and(file)
    }

    fn report(&mut self, err: &Error) {
        if self.reporting {
            return;
        }
        self.reporting = true;
        let (message, _) = format::render(format_args!("Internal debug error: {}", err), false);
        match err {
            // The file cannot take the report, so it goes straight to the
            // terminal.
            Error::Open { .. } => {
                let _ = self.terminal.write(
                    &self.colors,
                    self.line_ending,
                    Level::Error,
                    message.as_str(),
                );
            }
            _ => {
                let _ = self.dispatch(Level::Warn, message.as_str());
            }
        }
        self.reporting = false;
    }

    pub fn set_color(&mut self, level: Level, color: Color) {
        self.colors.set(level, color);
    }

    /// Like [`Logger::set_color`] for integer levels and colors coming from
    /// outside the type system.
    pub fn set_color_raw(&mut self, level: u8, color: u8) -> Result<()> {
        let parsed =
            Level::try_from(level).and_then(|level| Ok((level, Color::try_from(color)?)));
        match parsed {
            Ok((level, color)) => {
                self.set_color(level, color);
                Ok(())
            }
            Err(err) => {
                self.report(&err);
                Err(err)
            }
        }
    }

    pub fn enable_colors(&mut self) {
        self.colors.enabled = true;
    }

    pub fn disable_colors(&mut self) {
        self.colors.enabled = false;
    }

    pub fn colors(&self) -> &ColorConfig {
        &self.colors
    }

    pub fn set_file_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.file.set_path(path).inspect_err(|err| self.report(err))
    }

    pub fn file_path(&self) -> &Path {
        self.file.path()
    }

    pub fn enable_file(&mut self) {
        self.file.enable();
    }

    pub fn disable_file(&mut self) -> Result<()> {
        self.file.disable().inspect_err(|err| self.report(err))
    }

    pub fn is_file_enabled(&self) -> bool {
        self.file.is_enabled()
    }

    pub fn is_file_open(&self) -> bool {
        self.file.is_open()
    }
}

fn truncation(report: RenderReport) -> Error {
    Error::Truncated {
        len: report.required,
        capacity: format::fixed_capacity(),
    }
}
