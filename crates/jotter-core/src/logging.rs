//! Structured logging schema and field name constants for jotter.
//!
//! All crates use these names for structured logging fields so log output
//! can be filtered by the same keys across every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Unrecoverable startup failure |
//! | WARN  | Recoverable issue, automatic fallback applied (storage read/write) |
//! | INFO  | Lifecycle events (startup, load, shutdown) |
//! | DEBUG | Mutations, persistence, applied search queries |
//! | TRACE | Per-note filter decisions |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "app", "search", "db"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "note_storage", "fs_slots", "controller", "filter"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "load", "save", "add", "save_edit", "delete", "filter"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Note UUID being operated on.
pub const NOTE_ID: &str = "note_id";

/// Search query text.
pub const QUERY: &str = "query";

/// Storage slot key.
pub const STORAGE_KEY: &str = "storage_key";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Number of notes in the collection being loaded or saved.
pub const NOTE_COUNT: &str = "note_count";

/// Number of notes returned by a filter pass.
pub const RESULT_COUNT: &str = "result_count";

/// Serialized payload length in bytes.
pub const BYTES: &str = "bytes";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
