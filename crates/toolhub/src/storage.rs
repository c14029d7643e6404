//! Durable key-value slots
//!
//! A slot holds one whole serialized collection under a fixed name. Writes
//! replace the previous value entirely.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};

pub const BLOG_POSTS_SLOT: &str = "blog_posts";
pub const USERS_SLOT: &str = "users";

/// Key-value storage for collection snapshots
pub trait Slots: Send + Sync + std::fmt::Debug {
    /// Read the value stored under `key`, `Ok(None)` if nothing was stored
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

impl<S: Slots + ?Sized> Slots for Arc<S> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }
}

/// Slot names must be non-empty and only use alphanumerics, `-` and `_`
fn validate_slot_name(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::InvalidSlot("slot name cannot be empty".to_string()));
    }

    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(Error::InvalidSlot(key.to_string()));
    }

    Ok(())
}

/// Slots stored as `<key>.json` files inside a data directory
#[derive(Debug, Clone)]
pub struct FileSlots {
    dir: PathBuf,
}

impl FileSlots {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Platform data directory for toolhub (e.g. `~/.local/share/toolhub`)
    pub fn default_dir() -> Result<PathBuf> {
        dirs_next::data_dir()
            .map(|dir| dir.join("toolhub"))
            .ok_or_else(|| Error::Persistence("Unable to determine data directory".to_string()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Slots for FileSlots {
    fn read(&self, key: &str) -> Result<Option<String>> {
        validate_slot_name(key)?;

        let path = self.slot_path(key);
        if !path.exists() {
            return Ok(None);
        }

        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| Error::Persistence(format!("Failed to read {}: {}", path.display(), e)))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        validate_slot_name(key)?;

        fs::create_dir_all(&self.dir).map_err(|e| {
            Error::Persistence(format!(
                "Failed to create data directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        // Write next to the target and rename so readers never see a partial file
        let path = self.slot_path(key);
        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        fs::write(&tmp, value)
            .map_err(|e| Error::Persistence(format!("Failed to write {}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &path).map_err(|e| {
            Error::Persistence(format!("Failed to replace {}: {}", path.display(), e))
        })?;

        log::debug!("wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

/// Process-local slots, lost when the process exits
#[derive(Debug, Default)]
pub struct MemorySlots {
    values: Mutex<HashMap<String, String>>,
    writes: AtomicUsize,
}

impl MemorySlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a slot, e.g. with a snapshot from an earlier run
    pub fn with(self, key: &str, value: impl Into<String>) -> Self {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.into());
        }
        self
    }

    /// Number of successful writes since creation
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl Slots for MemorySlots {
    fn read(&self, key: &str) -> Result<Option<String>> {
        validate_slot_name(key)?;

        let values = self
            .values
            .lock()
            .map_err(|e| Error::Persistence(format!("Slot lock poisoned: {}", e)))?;
        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        validate_slot_name(key)?;

        let mut values = self
            .values
            .lock()
            .map_err(|e| Error::Persistence(format!("Slot lock poisoned: {}", e)))?;
        values.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_slots_read_missing() {
        let temp_dir = TempDir::new().unwrap();
        let slots = FileSlots::new(temp_dir.path());

        assert_eq!(slots.read(BLOG_POSTS_SLOT).unwrap(), None);
    }

    #[test]
    fn test_file_slots_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let slots = FileSlots::new(temp_dir.path());

        slots.write(USERS_SLOT, "[1, 2]").unwrap();
        assert_eq!(slots.read(USERS_SLOT).unwrap().as_deref(), Some("[1, 2]"));
        assert!(temp_dir.path().join("users.json").exists());
    }

    #[test]
    fn test_file_slots_write_replaces_wholesale() {
        let temp_dir = TempDir::new().unwrap();
        let slots = FileSlots::new(temp_dir.path());

        slots.write(USERS_SLOT, "a much longer first value").unwrap();
        slots.write(USERS_SLOT, "short").unwrap();

        assert_eq!(slots.read(USERS_SLOT).unwrap().as_deref(), Some("short"));
        assert!(!temp_dir.path().join(".users.json.tmp").exists());
    }

    #[test]
    fn test_file_slots_create_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let slots = FileSlots::new(temp_dir.path().join("nested").join("data"));

        slots.write(BLOG_POSTS_SLOT, "[]").unwrap();
        assert_eq!(slots.read(BLOG_POSTS_SLOT).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_slot_names_are_validated() {
        let temp_dir = TempDir::new().unwrap();
        let slots = FileSlots::new(temp_dir.path());

        assert!(slots.write("../escape", "x").is_err());
        assert!(slots.read("").is_err());
        assert!(MemorySlots::new().write("bad name", "x").is_err());
    }

    #[test]
    fn test_memory_slots_counts_writes() {
        let slots = MemorySlots::new().with(USERS_SLOT, "[]");

        assert_eq!(slots.read(USERS_SLOT).unwrap().as_deref(), Some("[]"));
        assert_eq!(slots.write_count(), 0);

        slots.write(USERS_SLOT, "[1]").unwrap();
        slots.write(BLOG_POSTS_SLOT, "[2]").unwrap();

        assert_eq!(slots.write_count(), 2);
        assert_eq!(slots.read(USERS_SLOT).unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_arc_slots_share_state() {
        let shared = Arc::new(MemorySlots::new());
        let handle = Arc::clone(&shared);

        handle.write(USERS_SLOT, "[]").unwrap();
        assert_eq!(shared.write_count(), 1);
    }
}
