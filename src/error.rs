use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid debug level {0} specified for operation")]
    InvalidLevel(u8),

    #[error("invalid debug color {0}")]
    InvalidColor(u8),

    #[error("debug file path is {len} bytes, limit is {max}")]
    PathTooLong { len: usize, max: usize },

    #[error("failed to open debug file '{}' for writing: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to allocate {requested} bytes to format output")]
    Allocation { requested: usize },

    #[error("previous message was truncated from {len} to {capacity} bytes")]
    Truncated { len: usize, capacity: usize },

    #[error("failed to write debug output: {0}")]
    Write(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
