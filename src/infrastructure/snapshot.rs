use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::domain::errors::DomainError;
use crate::domain::ports::SnapshotStore;

/// File-backed snapshot store: one `<key>.json` per key under a state
/// directory. The directory is created on the first write.
pub struct JsonFileSnapshots {
    dir: PathBuf,
}

impl JsonFileSnapshots {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SnapshotStore for JsonFileSnapshots {
    fn load(&self, key: &str) -> Result<Option<String>, DomainError> {
        match fs::read_to_string(self.path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DomainError::Storage(format!(
                "reading snapshot '{key}': {e}"
            ))),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), DomainError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| DomainError::Storage(format!("creating state dir: {e}")))?;
        fs::write(self.path(key), value)
            .map_err(|e| DomainError::Storage(format!("writing snapshot '{key}': {e}")))
    }

    fn delete(&self, key: &str) -> Result<(), DomainError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::Storage(format!(
                "deleting snapshot '{key}': {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSnapshots::new(dir.path());
        assert_eq!(store.load("cart").unwrap(), None);
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSnapshots::new(dir.path());
        store.save("cart", "[]").unwrap();
        assert_eq!(store.load("cart").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn save_creates_state_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSnapshots::new(dir.path().join("nested/state"));
        store.save("user", "{}").unwrap();
        assert_eq!(store.load("user").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSnapshots::new(dir.path());
        store.save("user", "{}").unwrap();
        store.delete("user").unwrap();
        store.delete("user").unwrap();
        assert_eq!(store.load("user").unwrap(), None);
    }
}
