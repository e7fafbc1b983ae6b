//! # jotter-core
//!
//! Core types, traits, and abstractions for the jotter note-taking app.
//!
//! This crate provides the foundational data structures and trait definitions
//! that the other jotter crates depend on.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod markup;
pub mod models;
pub mod traits;
pub mod uuid_utils;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use markup::{is_blank_markup, preview, strip_markup};
pub use models::*;
pub use traits::*;
pub use uuid_utils::{new_v7, short_id};
