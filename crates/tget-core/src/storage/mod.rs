//! Disk side of a download: the temp file and its atomic finalize.
//!
//! Bytes land in `<destination>.tmp`; only a fully successful transfer renames
//! it over the destination. Failed transfers leave the temp file in place.

mod writer;

pub use writer::TempFile;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".tmp";

/// Path for the temp file: appends `.tmp` to the final path (e.g. `file.iso` → `file.iso.tmp`).
pub fn temp_path(final_path: &std::path::Path) -> std::path::PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    std::path::PathBuf::from(o)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::Path;

    #[test]
    fn temp_path_appends_tmp() {
        let p = temp_path(Path::new("file.iso"));
        assert_eq!(p.to_string_lossy(), "file.iso.tmp");
        let p2 = temp_path(Path::new("/tmp/archive.zip"));
        assert_eq!(p2.to_string_lossy(), "/tmp/archive.zip.tmp");
    }

    #[test]
    fn create_write_finalize() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("output.bin");
        let tp = temp_path(&final_path);

        let mut file = TempFile::create(&final_path).unwrap();
        assert_eq!(file.path(), tp.as_path());
        file.write_all(b"hello ").unwrap();
        file.write_all(b"world").unwrap();
        assert!(tp.exists());
        assert!(!final_path.exists());

        file.finalize(&final_path).unwrap();
        assert!(!tp.exists());
        assert_eq!(std::fs::read(&final_path).unwrap(), b"hello world");
    }

    #[test]
    fn finalize_replaces_existing_destination() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("old.bin");
        std::fs::write(&final_path, b"stale contents").unwrap();

        let mut file = TempFile::create(&final_path).unwrap();
        file.write_all(b"new").unwrap();
        file.finalize(&final_path).unwrap();
        assert_eq!(std::fs::read(&final_path).unwrap(), b"new");
    }

    #[test]
    fn create_truncates_leftover_temp() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("x.bin");
        std::fs::write(temp_path(&final_path), b"leftover from a failed run").unwrap();

        let mut file = TempFile::create(&final_path).unwrap();
        file.write_all(b"ok").unwrap();
        file.finalize(&final_path).unwrap();
        assert_eq!(std::fs::read(&final_path).unwrap(), b"ok");
    }

    #[test]
    fn create_fails_in_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("no/such/dir/file.bin");
        assert!(TempFile::create(&final_path).is_err());
    }
}
