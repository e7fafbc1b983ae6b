//! Search filter over the note collection.
//!
//! A query is trimmed and lower-cased. An empty query keeps every note;
//! otherwise a note is kept when its lower-cased title or lower-cased stripped
//! body contains the query. This is plain substring containment: no
//! tokenizing, ranking or stemming. The result is always ordered most
//! recently updated first.

use std::cmp::Ordering;

use jotter_core::{strip_markup, Note};
use tracing::{debug, instrument, trace};

/// Trim and lower-case a raw query.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Whether `note` matches an already normalized query.
///
/// Markup is stripped before matching, so tag names and attribute values
/// never match.
pub fn matches_query(note: &Note, normalized: &str) -> bool {
    if normalized.is_empty() {
        return true;
    }
    if note.title.to_lowercase().contains(normalized) {
        return true;
    }
    strip_markup(&note.body).to_lowercase().contains(normalized)
}

/// Filter `notes` by `query` and sort the matches by recency.
#[instrument(level = "debug", skip(notes), fields(subsystem = "search", component = "filter", op = "filter", note_count = notes.len()))]
pub fn filter_notes<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    let normalized = normalize_query(query);

    let mut hits: Vec<&Note> = notes
        .iter()
        .filter(|note| {
            let hit = matches_query(note, &normalized);
            trace!(note_id = %note.id, hit, "filter decision");
            hit
        })
        .collect();

    sort_by_recency(&mut hits);
    debug!(result_count = hits.len(), "Filtered notes");
    hits
}

/// Sort by `updated_at` descending.
///
/// Ties fall back to `created_at` descending and then id, so the view never
/// depends on storage order.
pub fn sort_by_recency(notes: &mut [&Note]) {
    notes.sort_by(|a, b| recency(a, b));
}

fn recency(a: &Note, b: &Note) -> Ordering {
    b.updated_at
        .cmp(&a.updated_at)
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| b.id.cmp(&a.id))
}
