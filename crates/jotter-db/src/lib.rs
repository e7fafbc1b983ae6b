//! # jotter-db
//!
//! Persistence layer for jotter.
//!
//! This crate provides:
//! - Key-value slot backends (filesystem, in-memory)
//! - The note storage adapter that loads and saves the whole collection
//!
//! ## Example
//!
//! ```rust,ignore
//! use jotter_db::{FilesystemSlots, NoteStorage};
//!
//! let storage = NoteStorage::new(FilesystemSlots::new("/home/me/.local/share/jotter"), "notes");
//!
//! let mut notes = storage.load().await;
//! notes.insert(0, Note::new("Hello", "", Utc::now()));
//! storage.save(&notes).await;
//! ```
pub mod note_storage;
pub mod slots;

// Re-export core types
pub use jotter_core::*;

pub use note_storage::NoteStorage;
pub use slots::{validate_key, FilesystemSlots, MemorySlots};
