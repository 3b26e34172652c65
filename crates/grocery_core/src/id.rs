//! List and item identifiers.
//!
//! Identifiers are UUID strings in the canonical 8-4-4-4-12 hex grouping.
//! Matching is case-insensitive. Braced, URN and unhyphenated forms are
//! rejected so that storage keys stay in one shape.

use uuid::Uuid;

/// Is the given text a valid list identifier?
pub fn is_list_id(value: &str) -> bool {
    // At 36 characters only the hyphenated form parses
    value.len() == 36 && Uuid::try_parse(value).is_ok()
}

/// Generate a fresh random identifier.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
