//! Lookup-table driven repair of mojibake in port names
//!
//! The export's corruption pattern is fixed and narrow: Norwegian vowels
//! replaced by the Unicode replacement glyph. Known full names are corrected
//! first, then every remaining glyph becomes `ø`, the letter it stands for in
//! almost every affected name.

use crate::constants::{
    LATIN1_REPLACEMENT_GLYPH, PORT_NAME_REPAIRS, REPAIRED_GLYPH, REPLACEMENT_GLYPH,
};

/// Check whether text carries a corrupted glyph
pub fn needs_repair(text: &str) -> bool {
    text.contains(REPLACEMENT_GLYPH) || text.contains(LATIN1_REPLACEMENT_GLYPH)
}

/// Repair known encoding corruption in a text value
pub fn repair_encoding(text: &str) -> String {
    if !needs_repair(text) {
        return text.to_string();
    }

    // Bring the Latin-1 read of the glyph back to the glyph itself so the
    // full-name table matches both forms
    let mut repaired = text.replace(LATIN1_REPLACEMENT_GLYPH, REPLACEMENT_GLYPH);

    for (corrupted, correct) in PORT_NAME_REPAIRS {
        if repaired.contains(corrupted) {
            repaired = repaired.replace(corrupted, correct);
        }
    }

    repaired.replace(REPLACEMENT_GLYPH, REPAIRED_GLYPH)
}

/// Repair an optional text value, reporting whether anything changed
pub fn repair_optional(value: Option<String>) -> (Option<String>, bool) {
    match value {
        Some(text) if needs_repair(&text) => (Some(repair_encoding(&text)), true),
        other => (other, false),
    }
}
