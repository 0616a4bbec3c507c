#![doc = include_str!("../README.md")]

mod macros;

pub mod bridge;
pub mod color;
pub mod config;
pub mod error;
pub mod file_sink;
pub mod format;
pub mod global;
pub mod level;
pub mod logger;
pub mod terminal;

#[cfg(test)]
mod testing;

pub use bridge::Bridge;
pub use color::{Color, ColorConfig};
pub use config::{Builder, Config, LineEnding};
pub use error::{Error, Result};
pub use file_sink::PATH_MAX;
pub use format::MESSAGE_SIZE;
pub use level::Level;
pub use logger::Logger;

/// Interface revision of this library.
pub const VERSION: i32 = 1;

pub fn compiled_version() -> i32 {
    VERSION
}
