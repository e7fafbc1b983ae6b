//! Application state and its update functions.
//!
//! [`AppState`] holds the note collection, the edit form and the edit
//! session. Updates are plain synchronous functions over that state, stamped
//! with a caller-supplied `now`; they never touch storage. The caller owns
//! persistence and uses the returned [`Outcome`] to decide when to save.

use chrono::{DateTime, Utc};
use jotter_core::uuid_utils::short_id;
use jotter_core::{Confirmation, EditSession, Note, NoteDraft};
use tracing::debug;
use uuid::Uuid;

/// A user intent dispatched from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Replace the title field of the form.
    SetTitle(String),
    /// Replace the body field of the form with editor markup.
    SetBody(String),
    /// Create a note from the form. Only meaningful while idle.
    Add,
    /// Load an existing note into the form.
    SelectForEdit(Uuid),
    /// Write the form back to the note being edited.
    SaveEdit,
    /// Empty the form and leave the edit session.
    Clear,
    /// Remove a note. The confirmation has already been asked for.
    Delete { id: Uuid, confirmation: Confirmation },
}

/// What an update did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The collection is unchanged (the form or session may have changed).
    Unchanged,
    Added(Uuid),
    Updated(Uuid),
    Deleted(Uuid),
}

impl Outcome {
    /// Whether the collection changed and must be persisted.
    pub fn is_changed(self) -> bool {
        !matches!(self, Outcome::Unchanged)
    }
}

/// The whole session state of the app.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    notes: Vec<Note>,
    draft: NoteDraft,
    session: EditSession,
}

impl AppState {
    /// Start a session over a loaded collection, idle with an empty form.
    pub fn new(notes: Vec<Note>) -> Self {
        Self {
            notes,
            draft: NoteDraft::default(),
            session: EditSession::Idle,
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn draft(&self) -> &NoteDraft {
        &self.draft
    }

    pub fn session(&self) -> EditSession {
        self.session
    }

    pub fn note(&self, id: Uuid) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Find the single note referenced by `prefix`: a prefix of its full id
    /// (hex digits, hyphens optional) or of its [`short_id`] handle.
    /// A complete handle wins over prefix matches on other notes. Ambiguous
    /// or unknown references resolve to `None`.
    pub fn resolve_prefix(&self, prefix: &str) -> Option<Uuid> {
        let wanted: String = prefix
            .trim()
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        if wanted.is_empty() {
            return None;
        }

        let mut handles = self.notes.iter().filter(|n| short_id(&n.id) == wanted);
        if let (Some(note), None) = (handles.next(), handles.next()) {
            return Some(note.id);
        }

        let mut found = None;
        for note in &self.notes {
            let hex = note.id.simple().to_string();
            if hex.starts_with(&wanted) || short_id(&note.id).starts_with(&wanted) {
                if found.is_some() {
                    return None;
                }
                found = Some(note.id);
            }
        }
        found
    }

    /// Apply one intent at time `now`.
    pub fn apply(&mut self, intent: Intent, now: DateTime<Utc>) -> Outcome {
        match intent {
            Intent::SetTitle(title) => {
                self.draft.title = title;
                Outcome::Unchanged
            }
            Intent::SetBody(body) => {
                self.draft.body = body;
                Outcome::Unchanged
            }
            Intent::Add => {
                if self.session != EditSession::Idle {
                    debug!("Add ignored while editing");
                    return Outcome::Unchanged;
                }
                let NoteDraft { title, body } = self.draft.clone();
                self.add(&title, &body, now)
            }
            Intent::SelectForEdit(id) => {
                self.select_for_edit(id);
                Outcome::Unchanged
            }
            Intent::SaveEdit => match self.session {
                EditSession::Idle => Outcome::Unchanged,
                EditSession::Editing(id) => {
                    let NoteDraft { title, body } = self.draft.clone();
                    self.save_edit(id, &title, &body, now)
                }
            },
            Intent::Clear => {
                self.clear_form();
                Outcome::Unchanged
            }
            Intent::Delete { id, confirmation } => self.delete(id, confirmation),
        }
    }

    /// Prepend a new note unless both `title` and the stripped `body` are
    /// blank. Clears the form on success.
    pub fn add(&mut self, title: &str, body: &str, now: DateTime<Utc>) -> Outcome {
        if NoteDraft::new(title, body).is_blank() {
            debug!("Add ignored, title and body are blank");
            return Outcome::Unchanged;
        }

        let note = Note::new(title, body, now);
        let id = note.id;
        self.notes.insert(0, note);
        self.clear_form();
        debug!(note_id = %id, note_count = self.notes.len(), "Added note");
        Outcome::Added(id)
    }

    /// Load note `id` into the form and enter the edit session.
    /// Returns `false` (and changes nothing) if there is no such note.
    pub fn select_for_edit(&mut self, id: Uuid) -> bool {
        let Some(draft) = self.note(id).map(NoteDraft::from_note) else {
            debug!(note_id = %id, "Select ignored, no such note");
            return false;
        };
        self.draft = draft;
        self.session = EditSession::Editing(id);
        true
    }

    /// Replace title, body and `updated_at` of the note being edited.
    ///
    /// A no-op unless the session is editing `id`. Leaves the session idle
    /// with an empty form.
    pub fn save_edit(&mut self, id: Uuid, title: &str, body: &str, now: DateTime<Utc>) -> Outcome {
        if !self.session.is_editing(id) {
            debug!(note_id = %id, "Save ignored, note is not being edited");
            return Outcome::Unchanged;
        }

        let outcome = match self.notes.iter_mut().find(|n| n.id == id) {
            Some(note) => {
                note.apply_edit(title, body, now);
                debug!(note_id = %id, "Updated note");
                Outcome::Updated(id)
            }
            None => Outcome::Unchanged,
        };
        self.clear_form();
        outcome
    }

    /// Remove note `id` if the user confirmed. Deleting the note being edited
    /// also leaves the edit session.
    pub fn delete(&mut self, id: Uuid, confirmation: Confirmation) -> Outcome {
        if !confirmation.is_confirmed() {
            debug!(note_id = %id, "Delete cancelled");
            return Outcome::Unchanged;
        }

        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        if self.notes.len() == before {
            return Outcome::Unchanged;
        }

        if self.session.is_editing(id) {
            self.clear_form();
        }
        debug!(note_id = %id, note_count = self.notes.len(), "Deleted note");
        Outcome::Deleted(id)
    }

    /// Empty the form and return to idle.
    pub fn clear_form(&mut self) {
        self.draft.clear();
        self.session = EditSession::Idle;
    }
}
