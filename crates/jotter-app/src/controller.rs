//! The controller owns the session state and its side effects.
//!
//! It is the only place that persists: every intent is applied to
//! [`AppState`] and, if the collection changed, the whole collection is
//! saved before the next intent is handled. A failed save leaves the
//! in-memory change in place.
//!
//! Search input goes through a [`Debouncer`]; the applied query only changes
//! once typing has paused for the configured delay.

use std::time::Duration;

use jotter_core::{Clock, Note, SlotBackend};
use jotter_db::NoteStorage;
use jotter_search::{filter_notes, normalize_query, Debouncer};
use tokio::time::Instant;
use tracing::{debug, info, instrument};

use crate::state::{AppState, Intent, Outcome};

pub struct Controller<B, C> {
    state: AppState,
    storage: NoteStorage<B>,
    clock: C,
    query: String,
    debouncer: Debouncer<String>,
}

impl<B: SlotBackend, C: Clock> Controller<B, C> {
    /// Seed the session from storage. A missing or unreadable collection
    /// starts the session empty.
    pub async fn open(storage: NoteStorage<B>, clock: C, debounce: Duration) -> Self {
        let notes = storage.load().await;
        info!(note_count = notes.len(), storage_key = %storage.key(), "Session opened");
        Self {
            state: AppState::new(notes),
            storage,
            clock,
            query: String::new(),
            debouncer: Debouncer::new(debounce),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn storage(&self) -> &NoteStorage<B> {
        &self.storage
    }

    /// Apply `intent` and persist the collection if it changed.
    #[instrument(skip(self), fields(subsystem = "app", component = "controller", op = "dispatch"))]
    pub async fn dispatch(&mut self, intent: Intent) -> Outcome {
        let outcome = self.state.apply(intent, self.clock.now());
        if outcome.is_changed() {
            self.storage.save(self.state.notes()).await;
        }
        outcome
    }

    /// The query currently applied to the note list.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Record a keystroke-level query update. The filter does not change
    /// until [`Controller::poll_search`] releases it.
    pub fn type_query(&mut self, raw: impl Into<String>, now: Instant) {
        self.debouncer.push(raw.into(), now);
    }

    /// When a typed query becomes due, if one is pending.
    pub fn search_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Apply the pending query if its quiet period has elapsed by `now`.
    /// Returns `true` when the applied query changed.
    pub fn poll_search(&mut self, now: Instant) -> bool {
        match self.debouncer.poll(now) {
            Some(query) => self.apply_query(query),
            None => false,
        }
    }

    /// Apply the pending query immediately.
    pub fn flush_search(&mut self) -> bool {
        match self.debouncer.flush() {
            Some(query) => self.apply_query(query),
            None => false,
        }
    }

    /// Notes matching the applied query, most recently updated first.
    pub fn visible_notes(&self) -> Vec<&Note> {
        filter_notes(self.state.notes(), &self.query)
    }

    fn apply_query(&mut self, query: String) -> bool {
        if normalize_query(&query) == normalize_query(&self.query) {
            self.query = query;
            return false;
        }
        debug!(query = %query, "Applying search query");
        self.query = query;
        true
    }
}
