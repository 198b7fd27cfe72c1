//! Shared test helpers for integration tests

use recast::{record_from_pairs, Record};

/// The canonical six-field programmer record used across the suites
pub fn programmer_record() -> Record {
    record_from_pairs([
        ("FirstName", "A"),
        ("MiddleName", "B"),
        ("LastName", "C"),
        ("FavoriteLanguage", "D"),
        ("Gender", "E"),
        ("Archetype", "F"),
    ])
}
