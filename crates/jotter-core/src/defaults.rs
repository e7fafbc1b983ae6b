//! Centralized default constants for jotter.
//!
//! **This module is the single source of truth** for shared default values.
//! Crates and the binary reference these constants instead of defining their
//! own magic numbers.

// =============================================================================
// NOTES
// =============================================================================

/// Title given to a note saved with an empty or whitespace-only title.
pub const UNTITLED: &str = "Untitled";

/// Number of characters of stripped body text shown in list previews.
pub const PREVIEW_LENGTH: usize = 80;

// =============================================================================
// STORAGE
// =============================================================================

/// Key of the single slot holding the whole note collection.
pub const STORAGE_KEY: &str = "notes";

/// File extension used by the filesystem slot backend.
pub const SLOT_FILE_EXTENSION: &str = "json";

/// Directory name used under the platform data directory.
pub const DATA_DIR_NAME: &str = "jotter";

/// Fallback data directory when no home or XDG data directory is known.
pub const FALLBACK_DATA_DIR: &str = ".jotter";

// =============================================================================
// SEARCH
// =============================================================================

/// Quiet period before a typed search query is applied, in milliseconds.
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Environment variable for the data directory.
pub const ENV_DATA_DIR: &str = "JOTTER_DATA_DIR";

/// Environment variable for the storage key.
pub const ENV_STORAGE_KEY: &str = "JOTTER_STORAGE_KEY";

/// Environment variable for the search debounce delay.
pub const ENV_SEARCH_DEBOUNCE_MS: &str = "JOTTER_SEARCH_DEBOUNCE_MS";

/// Environment variable selecting the in-memory slot backend.
pub const ENV_MEMORY: &str = "JOTTER_MEMORY";
