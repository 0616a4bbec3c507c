//! Process-wide logger behind a mutex, with free functions for every
//! operation of [`Logger`].

use std::fmt;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use crate::color::Color;
use crate::error::Result;
use crate::format;
use crate::level::Level;
use crate::logger::Logger;

static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

/// Locks the process-wide logger, creating it with default settings on first
/// use. A panic while the lock was held does not disable logging.
///
/// Calling [`Logger::log`] on the guard runs the arguments' `Display` impls
/// under the lock; use [`log`] when those may log themselves.
pub fn logger() -> MutexGuard<'static, Logger> {
    LOGGER
        .get_or_init(|| Mutex::new(Logger::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Swaps in a new process-wide logger and returns the old one.
pub fn replace(next: Logger) -> Logger {
    std::mem::replace(&mut *logger(), next)
}

/// Formats `args` without holding the lock, so a `Display` impl that logs
/// through this module (or the `log` bridge) does not deadlock.
pub fn log(level: Level, args: fmt::Arguments<'_>) -> Result<()> {
    let allow_heap = logger().dynamic_allocation();
    let (rendered, report) = format::render(args, allow_heap);
    logger().write_rendered(level, rendered, report)
}

pub fn set_color(level: Level, color: Color) {
    logger().set_color(level, color);
}

pub fn set_color_raw(level: u8, color: u8) -> Result<()> {
    logger().set_color_raw(level, color)
}

pub fn enable_colors() {
    logger().enable_colors();
}

pub fn disable_colors() {
    logger().disable_colors();
}

pub fn set_file_path(path: impl AsRef<Path>) -> Result<()> {
    logger().set_file_path(path)
}

pub fn enable_file() {
    logger().enable_file();
}

pub fn disable_file() -> Result<()> {
    logger().disable_file()
}

/// Closes the log file. Hosts call this before exiting since the
/// process-wide logger is never dropped.
pub fn shutdown() -> Result<()> {
    logger().disable_file()
}
