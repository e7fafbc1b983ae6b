//! Data models for jotter.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::defaults::UNTITLED;
use crate::markup::is_blank_markup;
use crate::uuid_utils::new_v7;

// =============================================================================
// NOTE TYPES
// =============================================================================

/// A user-authored note.
///
/// Serialized with camelCase field names and integer millisecond timestamps:
///
/// ```json
/// {"id":"0190…","title":"Shopping","body":"<p>milk</p>","createdAt":1706000000000,"updatedAt":1706000000000}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    /// Rich-text markup as produced by the editor.
    pub body: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Create a note stamped at `now` with a fresh UUIDv7 id.
    ///
    /// The title is coerced through [`effective_title`].
    pub fn new(title: &str, body: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: new_v7(),
            title: effective_title(title),
            body: body.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace title and body, advancing `updated_at`.
    ///
    /// `id` and `created_at` are never touched. The new `updated_at` is
    /// strictly greater than the previous one even when `now` falls in the
    /// same millisecond (or the clock went backwards).
    pub fn apply_edit(&mut self, title: &str, body: impl Into<String>, now: DateTime<Utc>) {
        self.title = effective_title(title);
        self.body = body.into();
        self.updated_at = next_update_stamp(self.updated_at, now);
    }

    /// Clamp `updated_at` up to `created_at` if a stored record violates
    /// the ordering. Returns `true` if the note was changed.
    pub fn repair_timestamps(&mut self) -> bool {
        if self.updated_at < self.created_at {
            self.updated_at = self.created_at;
            true
        } else {
            false
        }
    }
}

/// Title stored for user input: trimmed, or [`UNTITLED`] when blank.
pub fn effective_title(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        UNTITLED.to_string()
    } else {
        trimmed.to_string()
    }
}

fn next_update_stamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    let floor = previous + Duration::milliseconds(1);
    if now >= floor {
        now
    } else {
        floor
    }
}

// =============================================================================
// EDIT FORM TYPES
// =============================================================================

/// Contents of the title/body edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub body: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Copy of an existing note's title and body.
    pub fn from_note(note: &Note) -> Self {
        Self::new(note.title.clone(), note.body.clone())
    }

    /// Both the title and the stripped body are blank.
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && is_blank_markup(&self.body)
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.body.clear();
    }
}

/// Which note, if any, is loaded into the edit form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditSession {
    /// The form holds a draft for a new note.
    #[default]
    Idle,
    /// The form holds a copy of an existing note.
    Editing(Uuid),
}

impl EditSession {
    pub fn editing_id(&self) -> Option<Uuid> {
        match self {
            EditSession::Idle => None,
            EditSession::Editing(id) => Some(*id),
        }
    }

    pub fn is_editing(&self, id: Uuid) -> bool {
        self.editing_id() == Some(id)
    }
}

// =============================================================================
// CONFIRMATION
// =============================================================================

/// Result of asking the user to confirm a destructive action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Cancelled,
}

impl Confirmation {
    pub fn is_confirmed(self) -> bool {
        self == Confirmation::Confirmed
    }

    /// Interpret a typed answer. Only `y` / `yes` (any case) confirm;
    /// anything else, including an empty line, cancels.
    pub fn from_answer(answer: &str) -> Self {
        match answer.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Confirmation::Confirmed,
            _ => Confirmation::Cancelled,
        }
    }
}

impl From<Option<bool>> for Confirmation {
    /// A missing or failed prompt result cancels.
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Confirmation::Confirmed,
            _ => Confirmation::Cancelled,
        }
    }
}
