use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::LineEnding;
use crate::error::{Error, Result};
use crate::level::Level;

pub const DEFAULT_PATH: &str = "/var/log/NOT_SPECIFIED.log";

/// Longest path the sink accepts, exclusive.
#[cfg(unix)]
pub const PATH_MAX: usize = libc::PATH_MAX as usize;
#[cfg(not(unix))]
pub const PATH_MAX: usize = 260;

/// Append-only log file, opened on the first write after it is enabled.
///
/// A failed open stores nothing, so the next write tries again.
#[derive(Debug)]
pub struct FileSink {
    enabled: bool,
    path: PathBuf,
    file: Option<File>,
}

impl Default for FileSink {
    fn default() -> Self {
        Self {
            enabled: false,
            path: PathBuf::from(DEFAULT_PATH),
            file: None,
        }
    }
}

impl FileSink {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stores a new path. An open handle on the old path is closed so the
    /// next write lands in the new file; a failure closing it is returned
    /// after the new path is stored.
    pub fn set_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let len = path.as_os_str().len();
        if len >= PATH_MAX {
            return Err(Error::PathTooLong { len, max: PATH_MAX });
        }
        let closed = self.close();
        self.path = path.to_path_buf();
        closed
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) -> Result<()> {
        self.enabled = false;
        self.close()
    }

    /// Syncs and drops the handle. The handle is gone even when the sync
    /// fails.
    fn close(&mut self) -> Result<()> {
        if let Some(file) = self.file.take() {
            file.sync_all()?;
        }
        Ok(())
    }

    /// Appends `[WORD] message<ending>` in three writes, opening the file
    /// first if needed.
    pub fn write(&mut self, ending: LineEnding, level: Level, message: &str) -> Result<()> {
        let file = match self.file.take() {
            Some(file) => file,
            None => open_append(&self.path)?,
        };
        let file = self.file.insert(file);

        file.write_all(level.file_prefix().as_bytes())?;
        file.write_all(message.as_bytes())?;
        file.write_all(ending.as_str().as_bytes())?;
        Ok(())
    }
}

fn open_append(path: &Path) -> Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    options.open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn enabling_does_not_open() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("debug.log");
        let mut sink = FileSink::default();
        sink.set_path(&path).unwrap();
        sink.enable();

        assert!(sink.is_enabled());
        assert!(!sink.is_open());
        assert!(!path.exists());
    }

    #[test]
    fn first_write_creates_and_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("debug.log");
        fs::write(&path, "existing\n").unwrap();

        let mut sink = FileSink::default();
        sink.set_path(&path).unwrap();
        sink.write(LineEnding::Legacy, Level::Warn, "low memory").unwrap();
        assert!(sink.is_open());

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "existing\n[WARNING] low memory\n\r");
    }

    #[cfg(unix)]
    #[test]
    fn created_file_is_0644() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("perm.log");
        let mut sink = FileSink::default();
        sink.set_path(&path).unwrap();
        sink.write(LineEnding::Newline, Level::Info, "x").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        // umask can only clear bits.
        assert_eq!(mode & !0o644, 0);
    }

    #[test]
    fn failed_open_leaves_handle_unopened_for_retry() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("debug.log");
        let mut sink = FileSink::default();
        sink.set_path(&path).unwrap();

        let err = sink
            .write(LineEnding::Newline, Level::Error, "boom")
            .unwrap_err();
        assert!(matches!(err, Error::Open { .. }));
        assert!(!sink.is_open());

        fs::create_dir(dir.path().join("missing")).unwrap();
        sink.write(LineEnding::Newline, Level::Error, "boom").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[ERROR] boom\n");
    }

    #[test]
    fn overlong_path_keeps_previous() {
        let mut sink = FileSink::default();
        let long = "a".repeat(PATH_MAX);
        match sink.set_path(&long) {
            Err(Error::PathTooLong { len, max }) => {
                assert_eq!(len, PATH_MAX);
                assert_eq!(max, PATH_MAX);
            }
            other => panic!("expected PathTooLong, got {:?}", other),
        }
        assert_eq!(sink.path(), Path::new(DEFAULT_PATH));
    }

    #[test]
    fn changing_path_moves_output_to_new_file() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("first.log");
        let second = dir.path().join("second.log");
        let mut sink = FileSink::default();

        sink.set_path(&first).unwrap();
        sink.write(LineEnding::Newline, Level::Info, "one").unwrap();
        sink.set_path(&second).unwrap();
        assert!(!sink.is_open());
        sink.write(LineEnding::Newline, Level::Info, "two").unwrap();

        assert_eq!(fs::read_to_string(&first).unwrap(), "[INFO] one\n");
        assert_eq!(fs::read_to_string(&second).unwrap(), "[INFO] two\n");
    }

    #[test]
    fn disable_closes_handle() {
        let dir = tempdir().unwrap();
        let mut sink = FileSink::default();
        sink.set_path(dir.path().join("debug.log")).unwrap();
        sink.enable();
        sink.write(LineEnding::Newline, Level::Fatal, "bye").unwrap();

        sink.disable().unwrap();
        assert!(!sink.is_enabled());
        assert!(!sink.is_open());
    }

    // Character devices cannot be synced, so closing one fails.
    #[cfg(target_os = "linux")]
    #[test]
    fn close_failure_fails_disable() {
        let mut sink = FileSink::default();
        sink.set_path("/dev/null").unwrap();
        sink.enable();
        sink.write(LineEnding::Newline, Level::Info, "discarded").unwrap();

        let result = sink.disable();

        assert!(matches!(result, Err(Error::Write(_))));
        assert!(!sink.is_enabled());
        assert!(!sink.is_open());
        assert!(sink.disable().is_ok());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn close_failure_on_path_change_still_switches() {
        let dir = tempdir().unwrap();
        let next = dir.path().join("next.log");
        let mut sink = FileSink::default();
        sink.set_path("/dev/null").unwrap();
        sink.write(LineEnding::Newline, Level::Info, "discarded").unwrap();

        assert!(sink.set_path(&next).is_err());
        assert_eq!(sink.path(), next.as_path());
        assert!(!sink.is_open());
    }
}
