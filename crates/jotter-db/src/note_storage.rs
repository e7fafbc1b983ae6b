//! Note storage adapter.
//!
//! Loads and saves the whole note collection as one JSON array under a single
//! slot key. Failures never reach the caller of [`NoteStorage::load`] or
//! [`NoteStorage::save`]: a failed read yields an empty collection and a failed
//! write is dropped, both logged at WARN. The in-memory collection stays the
//! source of truth for the session.

use std::collections::HashSet;

use jotter_core::{Error, Note, Result, SlotBackend};
use tracing::{debug, info, instrument, warn};

/// Loads and saves the note collection through a [`SlotBackend`].
#[derive(Debug, Clone)]
pub struct NoteStorage<B> {
    backend: B,
    key: String,
}

impl<B: SlotBackend> NoteStorage<B> {
    pub fn new(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Load the stored collection.
    ///
    /// Returns an empty collection when nothing was stored yet or when the
    /// stored value cannot be read or parsed.
    #[instrument(skip(self), fields(subsystem = "db", component = "note_storage", op = "load", storage_key = %self.key))]
    pub async fn load(&self) -> Vec<Note> {
        match self.try_load().await {
            Ok(notes) => {
                info!(note_count = notes.len(), "Loaded notes");
                notes
            }
            Err(e) => {
                warn!(error = %e, "Could not load stored notes, starting with an empty collection");
                Vec::new()
            }
        }
    }

    /// Load the stored collection, reporting read and parse failures as
    /// [`Error::StorageRead`].
    ///
    /// Records sharing an id are dropped after the first, and records whose
    /// `updatedAt` precedes `createdAt` are clamped.
    pub async fn try_load(&self) -> Result<Vec<Note>> {
        let Some(data) = self
            .backend
            .read(&self.key)
            .await
            .map_err(|e| Error::StorageRead(e.to_string()))?
        else {
            debug!("No stored notes");
            return Ok(Vec::new());
        };

        let notes: Vec<Note> =
            serde_json::from_slice(&data).map_err(|e| Error::StorageRead(e.to_string()))?;

        Ok(sanitize(notes))
    }

    /// Persist the whole collection. A failed write is logged and dropped.
    #[instrument(skip(self, notes), fields(subsystem = "db", component = "note_storage", op = "save", storage_key = %self.key, note_count = notes.len()))]
    pub async fn save(&self, notes: &[Note]) {
        match self.try_save(notes).await {
            Ok(()) => debug!("Saved notes"),
            Err(e) => warn!(error = %e, "Could not save notes, keeping in-memory state only"),
        }
    }

    /// Persist the whole collection, reporting failures as
    /// [`Error::StorageWrite`].
    pub async fn try_save(&self, notes: &[Note]) -> Result<()> {
        let data = serde_json::to_vec(notes).map_err(|e| Error::StorageWrite(e.to_string()))?;
        self.backend
            .write(&self.key, &data)
            .await
            .map_err(|e| Error::StorageWrite(e.to_string()))
    }
}

fn sanitize(notes: Vec<Note>) -> Vec<Note> {
    let mut seen = HashSet::with_capacity(notes.len());
    let mut kept = Vec::with_capacity(notes.len());

    for mut note in notes {
        if !seen.insert(note.id) {
            warn!(note_id = %note.id, "Dropping stored note with duplicate id");
            continue;
        }
        if note.repair_timestamps() {
            warn!(note_id = %note.id, "Stored note updated before it was created, clamping updatedAt");
        }
        kept.push(note);
    }

    kept
}
