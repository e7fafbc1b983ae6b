//! # jotter-search
//!
//! Search over the in-memory note collection.
//!
//! This crate provides:
//! - The search filter: case-insensitive substring matching on titles and
//!   markup-stripped bodies, most recently updated first
//! - A debounce policy that collapses rapid query edits into one filter pass
//!
//! ## Example
//!
//! ```
//! use chrono::Utc;
//! use jotter_search::{filter_notes, Note};
//!
//! let notes = vec![Note::new("Shopping", "<p>milk eggs</p>", Utc::now())];
//! let hits = filter_notes(&notes, "EGGS");
//! assert_eq!(hits.len(), 1);
//! ```

pub mod debounce;
pub mod filter;

// Re-export core types
pub use jotter_core::*;

pub use debounce::Debouncer;
pub use filter::{filter_notes, matches_query, normalize_query, sort_by_recency};
