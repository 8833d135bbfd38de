use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;
use crate::store::{KeyValueStore, StoreError};

/// One file per key under a directory: `<dir>/<key>.json`.
///
/// Writes go to a uniquely named temp file in the same directory and are
/// renamed into place, so a crash mid-write leaves the previous value intact
/// and two processes saving at once never share a temp file.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key != "."
            && key != ".."
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        if !path.exists() {
            debug!(key = %key, "Store miss (file does not exist)");
            return Ok(None);
        }
        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| io_error(&path, e))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir).map_err(|e| io_error(&self.dir, e))?;

        let mut temp = NamedTempFile::new_in(&self.dir).map_err(|e| io_error(&self.dir, e))?;
        temp.write_all(value.as_bytes())
            .and_then(|()| temp.flush())
            .map_err(|e| io_error(temp.path(), e))?;
        temp.persist(&path).map_err(|e| io_error(&path, e.error))?;

        debug!(key = %key, bytes = value.len(), "Store saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert_eq!(store.load("watched").unwrap(), None);
    }

    #[test]
    fn test_save_then_load_from_new_instance() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");

        FileStore::new(&data_dir).save("watched", r#"[{"a":1}]"#).unwrap();

        let reopened = FileStore::new(&data_dir);
        assert_eq!(reopened.load("watched").unwrap().as_deref(), Some(r#"[{"a":1}]"#));
        let files: Vec<_> = std::fs::read_dir(&data_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(files, vec![std::ffi::OsString::from("watched.json")]);
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.save("watched", "first").unwrap();
        store.save("watched", "second").unwrap();

        assert_eq!(store.load("watched").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_concurrent_saves_from_separate_handles() {
        let dir = tempfile::tempdir().unwrap();
        let first = "a".repeat(64 * 1024);
        let second = "b".repeat(64 * 1024);

        let handles: Vec<_> = [first.clone(), second.clone()]
            .into_iter()
            .map(|value| {
                let store = FileStore::new(dir.path());
                std::thread::spawn(move || {
                    for _ in 0..20 {
                        store.save("watched", &value).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let stored = FileStore::new(dir.path()).load("watched").unwrap().unwrap();
        assert!(stored == first || stored == second);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let store = FileStore::new("/tmp/lovie-test");

        for key in ["", "..", "../escape", "a/b", "a\\b"] {
            assert!(matches!(store.path_for(key), Err(StoreError::InvalidKey(_))), "key {:?}", key);
        }
        assert!(store.path_for("watched.bak").is_ok());
    }
}
