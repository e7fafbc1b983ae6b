//! UUID v7 utilities for note identifiers.
//!
//! Note ids are UUIDv7, which embed a millisecond Unix timestamp in the first
//! 48 bits and sort by creation time.

use uuid::Uuid;

/// Generate a new UUIDv7 identifier.
///
/// # Example
///
/// ```
/// use jotter_core::uuid_utils::new_v7;
///
/// let id = new_v7();
/// assert_eq!(id.get_version_num(), 7);
/// ```
#[inline]
pub fn new_v7() -> Uuid {
    Uuid::now_v7()
}

/// Short display handle for an id: the last eight hex digits.
///
/// The leading digits of a UUIDv7 are its timestamp and repeat across notes
/// created close together; the tail is random.
pub fn short_id(uuid: &Uuid) -> String {
    let hex = uuid.simple().to_string();
    hex[hex.len() - 8..].to_string()
}
