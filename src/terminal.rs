use std::io::{self, Write};

use crate::color::ColorConfig;
use crate::config::LineEnding;
use crate::error::Result;
use crate::level::Level;

pub struct Terminal {
    target: Box<dyn Write + Send>,
}

impl Terminal {
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    pub fn with_writer(target: impl Write + Send + 'static) -> Self {
        Self {
            target: Box::new(target),
        }
    }

    /// Writes `<label> <message><line ending>` straight into the target.
    pub fn write(
        &mut self,
        colors: &ColorConfig,
        ending: LineEnding,
        level: Level,
        message: &str,
    ) -> Result<()> {
        write!(
            self.target,
            "{} {}{}",
            colors.resolve_label(level),
            message,
            ending.as_str()
        )?;
        self.target.flush()?;
        Ok(())
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::stdout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::SharedBuffer;

    #[test]
    fn writes_label_message_and_ending() {
        let buffer = SharedBuffer::default();
        let mut terminal = Terminal::with_writer(buffer.clone());
        let mut colors = ColorConfig::default();
        colors.enabled = false;

        terminal
            .write(&colors, LineEnding::Legacy, Level::Error, "disk full")
            .unwrap();
        terminal
            .write(&colors, LineEnding::Newline, Level::Info, "ok")
            .unwrap();

        assert_eq!(buffer.contents(), "[ERROR] disk full\n\r[INFO] ok\n");
    }

    #[test]
    fn failing_stream_is_reported() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut terminal = Terminal::with_writer(Broken);
        let result = terminal.write(
            &ColorConfig::default(),
            LineEnding::Newline,
            Level::Warn,
            "lost",
        );
        assert!(matches!(result, Err(crate::Error::Write(_))));
    }
}
