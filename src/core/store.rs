//! # Store
//!
//! Load/save the news collection from a single JSON file.
//!
//! The file is a top-level array, pretty-printed with two-space indentation
//! and non-ASCII written literally, so the website and humans can both read it.
//! Writes go to a unique temp file in the same directory and are renamed over
//! the target, so a failed save never leaves a half-written file behind.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use tempfile::NamedTempFile;

use crate::core::record::NewsRecord;

pub const DATA_FILE_NAME: &str = "news.json";

const BOM: char = '\u{feff}';

/// Why a read failed.
#[derive(Debug)]
pub enum ReadCause {
    Io(io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ReadCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadCause::Io(e) => write!(f, "{e}"),
            ReadCause::Parse(e) => write!(f, "invalid JSON: {e}"),
        }
    }
}

#[derive(Debug)]
pub enum StoreError {
    Read { path: PathBuf, cause: ReadCause },
    Write { path: PathBuf, source: io::Error },
}

impl StoreError {
    pub fn path(&self) -> &Path {
        match self {
            StoreError::Read { path, .. } | StoreError::Write { path, .. } => path,
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Read { path, cause } => {
                write!(f, "failed to read {}: {cause}", path.display())
            }
            StoreError::Write { path, source } => {
                write!(f, "failed to save to {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Read { cause: ReadCause::Io(e), .. } => Some(e),
            StoreError::Read { cause: ReadCause::Parse(e), .. } => Some(e),
            StoreError::Write { source, .. } => Some(source),
        }
    }
}

/// Directory of the running program. The data file lives beside it.
pub fn program_dir() -> io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "executable has no parent directory"))
}

/// The JSON file backing one collection.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the collection in file order. A missing file is an empty collection.
    pub fn load(&self) -> Result<Vec<NewsRecord>, StoreError> {
        if !self.exists() {
            debug!("No data file at {}", self.path.display());
            return Ok(Vec::new());
        }

        let read_error = |cause| StoreError::Read {
            path: self.path.clone(),
            cause,
        };

        let json = fs::read_to_string(&self.path).map_err(|e| read_error(ReadCause::Io(e)))?;
        let records: Vec<NewsRecord> = serde_json::from_str(json.trim_start_matches(BOM))
            .map_err(|e| read_error(ReadCause::Parse(e)))?;

        info!("Loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    /// Overwrite the file with the given records.
    pub fn save<'a, I>(&self, records: I) -> Result<(), StoreError>
    where
        I: IntoIterator<Item = &'a NewsRecord>,
    {
        let records: Vec<&NewsRecord> = records.into_iter().collect();
        atomic_write_json(&self.path, &records).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        info!("Saved {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}

/// Atomically write `records` as JSON to `path`.
///
/// The JSON goes to a uniquely named temp file beside the real target, which is
/// then renamed over it. Symlinks are followed so the link itself survives.
/// A read-only target is refused; otherwise its permissions carry over.
fn atomic_write_json(path: &Path, records: &[&NewsRecord]) -> io::Result<()> {
    let json = serde_json::to_string_pretty(records)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let (target, permissions) = match fs::metadata(path) {
        Ok(metadata) => {
            if metadata.permissions().readonly() {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "file is read-only",
                ));
            }
            (fs::canonicalize(path)?, Some(metadata.permissions()))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => (path.to_path_buf(), None),
        Err(e) => return Err(e),
    };

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // Dropping an unpersisted temp file deletes it
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(json.as_bytes())?;
    tmp.as_file().sync_all()?;
    if let Some(permissions) = permissions {
        tmp.as_file().set_permissions(permissions)?;
    }
    tmp.persist(&target).map_err(|e| e.error)?;
    debug!("Wrote {} bytes to {}", json.len(), target.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::FormInput;

    fn record(title: &str) -> NewsRecord {
        FormInput {
            date: "2025.09.30".to_string(),
            category: "新メニュー".to_string(),
            title: title.to_string(),
            content: "本文".to_string(),
            ..Default::default()
        }
        .into_record()
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("news.json"));
        assert!(!store.exists());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("news.json"));
        let records = vec![record("first"), record("second"), record("third")];

        store.save(&records).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_save_is_pretty_and_keeps_non_ascii() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("news.json"));
        store.save(&[record("栗")]).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.starts_with("[\n  {\n    \"date\": \"2025.09.30\","));
        assert!(text.contains("\"title\": \"栗\""));
        assert!(text.contains("\"image\": null"));
        assert!(!text.contains("\\u"));
    }

    #[test]
    fn test_save_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("news.json"));
        store.save(&Vec::<NewsRecord>::new()).unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "[]");
    }

    #[test]
    fn test_save_leaves_sibling_files_alone() {
        let dir = tempfile::tempdir().unwrap();
        let notes = dir.path().join("news.tmp");
        fs::write(&notes, "user notes").unwrap();

        let store = Store::new(dir.path().join("news.json"));
        store.save(&[record("a")]).unwrap();

        assert_eq!(fs::read_to_string(&notes).unwrap(), "user notes");
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_read_only_target_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news.json");
        fs::write(&path, "[]").unwrap();
        let mut permissions = fs::metadata(&path).unwrap().permissions();
        permissions.set_readonly(true);
        fs::set_permissions(&path, permissions).unwrap();

        let err = Store::new(&path).save(&[record("a")]).unwrap_err();
        match err {
            StoreError::Write { source, .. } => {
                assert_eq!(source.kind(), io::ErrorKind::PermissionDenied)
            }
            other => panic!("expected a write error, got {other:?}"),
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
        assert!(fs::metadata(&path).unwrap().permissions().readonly());
    }

    #[cfg(unix)]
    #[test]
    fn test_save_through_symlink_updates_real_file() {
        let dir = tempfile::tempdir().unwrap();
        let site = dir.path().join("site");
        fs::create_dir(&site).unwrap();
        let real = site.join("news.json");
        fs::write(&real, "[]").unwrap();
        let link = dir.path().join("news.json");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        Store::new(&link).save(&[record("linked")]).unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        let loaded = Store::new(&real).load().unwrap();
        assert_eq!(loaded[0].title, "linked");
    }

    #[cfg(unix)]
    #[test]
    fn test_save_keeps_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news.json");
        fs::write(&path, "[]").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        Store::new(&path).save(&[record("a")]).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[test]
    fn test_malformed_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news.json");
        fs::write(&path, "this is not json").unwrap();

        let err = Store::new(&path).load().unwrap_err();
        assert!(matches!(
            err,
            StoreError::Read { cause: ReadCause::Parse(_), .. }
        ));
        assert_eq!(err.path(), path.as_path());
        assert!(err.to_string().contains("news.json"));
    }

    #[test]
    fn test_top_level_object_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news.json");
        fs::write(&path, r#"{"date":"2025.09.30"}"#).unwrap();
        assert!(Store::new(&path).load().is_err());
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news.json");
        fs::write(&path, "\u{feff}[{\"title\":\"T\"}]").unwrap();
        let loaded = Store::new(&path).load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "T");
    }

    #[test]
    fn test_unwritable_target_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("news.json");
        let err = Store::new(&path).save(&[record("a")]).unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
        assert!(err.to_string().contains("missing-dir"));
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("news.json"));
        store.save(&[record("a"), record("b")]).unwrap();
        store.save(&[record("c")]).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "c");
    }
}
