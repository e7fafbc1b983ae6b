//! Markup stripping for note bodies.
//!
//! Note bodies are rich-text markup produced by an external editor. Search
//! matching, blank checks and list previews all operate on the text content
//! only, so every tag is removed and the common character entities are decoded.
//!
//! Adjacent block elements are not separated by whitespace: `<p>a</p><p>b</p>`
//! strips to `ab`, the same text content a browser reports for that markup.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::defaults::PREVIEW_LENGTH;

/// `<script>` and `<style>` elements whose contents are not visible text.
static HIDDEN_ELEMENTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>")
        .expect("hidden element pattern is valid")
});

static COMMENTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern is valid"));

static TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

static ENTITIES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]{2,8});")
        .expect("entity pattern is valid")
});

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Remove all markup from `markup`, leaving only its text content.
///
/// ```
/// use jotter_core::strip_markup;
///
/// assert_eq!(strip_markup("<p>milk <b>eggs</b></p>"), "milk eggs");
/// assert_eq!(strip_markup("fish &amp; chips"), "fish & chips");
/// ```
pub fn strip_markup(markup: &str) -> String {
    if !markup.contains('<') && !markup.contains('&') {
        return markup.to_string();
    }

    let text = HIDDEN_ELEMENTS.replace_all(markup, "");
    let text = COMMENTS.replace_all(&text, "");
    let text = TAGS.replace_all(&text, "");
    ENTITIES
        .replace_all(&text, |caps: &Captures| decode_entity(&caps[0], &caps[1]))
        .into_owned()
}

/// Whether `markup` has no visible text once stripped and trimmed.
///
/// An editor typically emits `<p><br></p>` for an empty document; that counts
/// as blank.
pub fn is_blank_markup(markup: &str) -> bool {
    strip_markup(markup).trim().is_empty()
}

/// Single-line preview of a note body for list rendering.
///
/// Whitespace runs collapse to one space and the text is cut at
/// [`PREVIEW_LENGTH`] characters with a trailing ellipsis.
pub fn preview(markup: &str) -> String {
    let text = strip_markup(markup);
    let collapsed = WHITESPACE.replace_all(text.trim(), " ");

    if collapsed.chars().count() <= PREVIEW_LENGTH {
        return collapsed.into_owned();
    }

    let mut cut: String = collapsed.chars().take(PREVIEW_LENGTH).collect();
    cut.truncate(cut.trim_end().len());
    cut.push('…');
    cut
}

fn decode_entity(raw: &str, name: &str) -> String {
    let decoded = if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => num.parse::<u32>().ok(),
        };
        code.and_then(char::from_u32)
    } else {
        match name {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            // Non-breaking spaces are searched as ordinary spaces.
            "nbsp" => Some(' '),
            "ndash" => Some('–'),
            "mdash" => Some('—'),
            "hellip" => Some('…'),
            "copy" => Some('©'),
            _ => None,
        }
    };

    match decoded {
        Some('\u{a0}') => " ".to_string(),
        Some(c) => c.to_string(),
        None => raw.to_string(),
    }
}
