//! Key-value slot backends.
//!
//! A slot is a named value that survives restarts. The note collection lives
//! in one slot; backends know nothing about notes.
//!
//! ## Example
//!
//! ```rust,ignore
//! use jotter_db::slots::FilesystemSlots;
//!
//! let slots = FilesystemSlots::new("/var/lib/jotter");
//! slots.write("notes", b"[]").await?;
//! assert_eq!(slots.read("notes").await?, Some(b"[]".to_vec()));
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use jotter_core::defaults::SLOT_FILE_EXTENSION;
use jotter_core::{Error, Result, SlotBackend};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Check that `key` is usable as a slot name.
///
/// Keys must be non-empty, made of ASCII letters, digits, `.`, `_` or `-`,
/// and must not start with a dot.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::InvalidInput("storage key is empty".to_string()));
    }
    if key.starts_with('.') {
        return Err(Error::InvalidInput(format!(
            "storage key {key:?} must not start with '.'"
        )));
    }
    if let Some(bad) = key
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
    {
        return Err(Error::InvalidInput(format!(
            "storage key {key:?} contains invalid character {bad:?}"
        )));
    }
    Ok(())
}

// =============================================================================
// FILESYSTEM
// =============================================================================

/// Filesystem slot backend.
///
/// Each slot is one file: `{base_path}/{key}.json`.
#[derive(Debug, Clone)]
pub struct FilesystemSlots {
    base_path: PathBuf,
}

impl FilesystemSlots {
    /// Create a backend rooted at `base_path`. The directory is created on
    /// first write.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Path of the file backing `key`.
    pub fn slot_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self
            .base_path
            .join(format!("{key}.{SLOT_FILE_EXTENSION}")))
    }

    /// Validate that the backend can write, read, and delete a file.
    ///
    /// Performs a full round-trip at startup to catch permission errors and
    /// unwritable directories early. The check file starts with a dot, so no
    /// valid key can name it and a real slot is never touched.
    pub async fn validate(&self) -> std::result::Result<(), String> {
        let path = self.base_path.join(HEALTH_CHECK_FILE);
        let data = b"slot-health-check";

        write_atomic(&self.base_path, &path, data)
            .await
            .map_err(|e| format!("write({:?}): {}", path, e))?;

        let read_back = read_file(&path)
            .await
            .map_err(|e| format!("read({:?}): {}", path, e))?;
        if read_back.as_deref() != Some(&data[..]) {
            return Err("read-back mismatch".to_string());
        }

        remove_file(&path)
            .await
            .map_err(|e| format!("remove({:?}): {}", path, e))?;

        Ok(())
    }
}

/// Startup check file; the leading dot keeps it outside the key namespace.
const HEALTH_CHECK_FILE: &str = ".health-check.json";

async fn read_file(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path).await {
        Ok(data) => Ok(Some(data)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Atomic write: temp file + `sync_all` + rename.
async fn write_atomic(dir: &Path, path: &Path, data: &[u8]) -> Result<()> {
    fs::create_dir_all(dir).await.map_err(|e| {
        warn!(dir = %dir.display(), error = %e, "fs_slots: create_dir_all failed");
        e
    })?;

    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path).await.map_err(|e| {
        warn!(temp_path = %temp_path.display(), error = %e, "fs_slots: File::create failed");
        e
    })?;
    file.write_all(data).await.map_err(|e| {
        warn!(error = %e, "fs_slots: write_all failed");
        e
    })?;
    file.sync_all().await?;
    drop(file);

    fs::rename(&temp_path, path).await.map_err(|e| {
        warn!(from = %temp_path.display(), to = %path.display(), error = %e, "fs_slots: rename failed");
        e
    })?;

    Ok(())
}

async fn remove_file(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl SlotBackend for FilesystemSlots {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        read_file(&self.slot_path(key)?).await
    }

    async fn write(&self, key: &str, data: &[u8]) -> Result<()> {
        let path = self.slot_path(key)?;
        debug!(storage_key = %key, path = %path.display(), bytes = data.len(), "fs_slots: write");
        write_atomic(&self.base_path, &path, data).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        remove_file(&self.slot_path(key)?).await
    }
}

// =============================================================================
// MEMORY
// =============================================================================

#[derive(Debug, Default)]
struct MemoryInner {
    slots: Mutex<HashMap<String, Vec<u8>>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

/// In-process slot backend.
///
/// Clones share the same slots, so a test can keep a handle while a
/// `NoteStorage` owns another. Reads and writes can be switched to fail.
#[derive(Debug, Clone, Default)]
pub struct MemorySlots {
    inner: Arc<MemoryInner>,
}

impl MemorySlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent read fail (or succeed again).
    pub fn set_fail_reads(&self, fail: bool) {
        self.inner.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent write fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Store raw bytes under `key`, bypassing the failure switches.
    pub fn seed(&self, key: &str, data: impl Into<Vec<u8>>) {
        self.lock().insert(key.to_string(), data.into());
    }

    /// Raw bytes under `key`, bypassing the failure switches.
    pub fn peek(&self, key: &str) -> Option<Vec<u8>> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.inner.slots.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl SlotBackend for MemorySlots {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        validate_key(key)?;
        if self.inner.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "memory slot read disabled",
            )));
        }
        Ok(self.lock().get(key).cloned())
    }

    async fn write(&self, key: &str, data: &[u8]) -> Result<()> {
        validate_key(key)?;
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "memory slot write disabled",
            )));
        }
        self.lock().insert(key.to_string(), data.to_vec());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        self.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key_accepts_plain_names() {
        assert!(validate_key("notes").is_ok());
        assert!(validate_key("notes-v2.backup_1").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_paths() {
        assert!(validate_key("").is_err());
        assert!(validate_key("../notes").is_err());
        assert!(validate_key("a/b").is_err());
        assert!(validate_key(".hidden").is_err());
        assert!(validate_key("with space").is_err());
    }

    #[test]
    fn test_slot_path_uses_json_extension() {
        let slots = FilesystemSlots::new("/data");
        assert_eq!(
            slots.slot_path("notes").unwrap(),
            PathBuf::from("/data/notes.json")
        );
        assert!(slots.slot_path("../etc/passwd").is_err());
    }

    #[tokio::test]
    async fn test_memory_slots_roundtrip() {
        let slots = MemorySlots::new();
        assert_eq!(slots.read("notes").await.unwrap(), None);

        slots.write("notes", b"[]").await.unwrap();
        assert_eq!(slots.read("notes").await.unwrap(), Some(b"[]".to_vec()));

        slots.remove("notes").await.unwrap();
        assert_eq!(slots.read("notes").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_slots_clones_share_state() {
        let slots = MemorySlots::new();
        let handle = slots.clone();
        slots.write("notes", b"x").await.unwrap();
        assert_eq!(handle.peek("notes"), Some(b"x".to_vec()));
    }

    #[tokio::test]
    async fn test_memory_slots_failure_switches() {
        let slots = MemorySlots::new();
        slots.seed("notes", "[]");

        slots.set_fail_reads(true);
        assert!(slots.read("notes").await.is_err());
        slots.set_fail_reads(false);
        assert!(slots.read("notes").await.is_ok());

        slots.set_fail_writes(true);
        assert!(slots.write("notes", b"[1]").await.is_err());
        assert_eq!(slots.peek("notes"), Some(b"[]".to_vec()));
    }

    #[tokio::test]
    async fn test_filesystem_missing_slot_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let slots = FilesystemSlots::new(dir.path());
        assert_eq!(slots.read("notes").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_filesystem_roundtrip_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let slots = FilesystemSlots::new(dir.path().join("nested").join("jotter"));

        slots.write("notes", b"[1,2]").await.unwrap();
        assert_eq!(slots.read("notes").await.unwrap(), Some(b"[1,2]".to_vec()));
        assert!(!slots.slot_path("notes").unwrap().with_extension("tmp").exists());

        slots.write("notes", b"[]").await.unwrap();
        assert_eq!(slots.read("notes").await.unwrap(), Some(b"[]".to_vec()));
    }

    #[tokio::test]
    async fn test_filesystem_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let slots = FilesystemSlots::new(dir.path());
        slots.remove("notes").await.unwrap();
        slots.write("notes", b"[]").await.unwrap();
        slots.remove("notes").await.unwrap();
        slots.remove("notes").await.unwrap();
        assert_eq!(slots.read("notes").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_filesystem_validate() {
        let dir = tempfile::tempdir().unwrap();
        let slots = FilesystemSlots::new(dir.path());
        assert!(slots.validate().await.is_ok());
        assert!(!dir.path().join(HEALTH_CHECK_FILE).exists());
        assert!(validate_key(HEALTH_CHECK_FILE.trim_end_matches(".json")).is_err());
    }
}
