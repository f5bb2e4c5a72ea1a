//! Sequential writer for the temp download file.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// The `.tmp` staging file. Written front to back, then renamed into place.
pub struct TempFile {
    file: File,
    temp_path: PathBuf,
}

impl TempFile {
    /// Create (or truncate) the temp file for `final_path`.
    pub fn create(final_path: &Path) -> io::Result<Self> {
        let temp_path = super::temp_path(final_path);
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        Ok(TempFile { file, temp_path })
    }

    /// Path to the current temp file.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Flush to disk.
    pub fn sync(&self) -> io::Result<()> {
        self.file.sync_all()
    }

    /// Close the file and atomically rename it to `final_path`, replacing any file there.
    /// Fails if `final_path` is on a different filesystem.
    pub fn finalize(self, final_path: &Path) -> io::Result<()> {
        let TempFile { file, temp_path } = self;
        drop(file);
        std::fs::rename(&temp_path, final_path)
    }
}

impl Write for TempFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}
