//! Text edits and their application.
//!
//! Fixes never pretty-print: every change is a byte-range splice of the
//! original text. Edits of one pass are collected, checked for conflicts
//! and applied in a single sweep.

use nestlint_common::TextRange;
use serde::Serialize;

/// The kind of edit operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EditKind {
    /// Insert text at `range.pos` (the range is empty).
    Insert,
    /// Delete the bytes in `range`.
    Delete,
    /// Replace the bytes in `range` with new text.
    Replace,
}

/// A single text change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    pub kind: EditKind,
    pub range: TextRange,
    /// The new text (empty for `Delete`).
    pub text: String,
}

impl TextEdit {
    pub fn insert(offset: u32, text: impl Into<String>) -> Self {
        TextEdit {
            kind: EditKind::Insert,
            range: TextRange::empty(offset),
            text: text.into(),
        }
    }

    pub fn delete(range: TextRange) -> Self {
        TextEdit {
            kind: EditKind::Delete,
            range,
            text: String::new(),
        }
    }

    pub fn replace(range: TextRange, text: impl Into<String>) -> Self {
        TextEdit {
            kind: EditKind::Replace,
            range,
            text: text.into(),
        }
    }

    /// Two edits conflict when their ranges overlap, or when one is an
    /// insertion at or inside the other's range. Two insertions at the same
    /// offset conflict (their relative order would be arbitrary).
    pub fn conflicts_with(&self, other: &TextEdit) -> bool {
        if self.range.overlaps(&other.range) {
            return true;
        }
        let touches = |insert: &TextRange, range: &TextRange| {
            insert.is_empty() && range.pos <= insert.pos && insert.pos <= range.end
        };
        touches(&self.range, &other.range) || touches(&other.range, &self.range)
    }
}

/// True if any edit of `candidate` conflicts with any edit of `accepted`.
pub fn conflicts_with_any(candidate: &[TextEdit], accepted: &[TextEdit]) -> bool {
    candidate
        .iter()
        .any(|edit| accepted.iter().any(|other| edit.conflicts_with(other)))
}

/// True if no two edits of `edits` conflict with each other.
pub fn is_disjoint(edits: &[TextEdit]) -> bool {
    edits
        .iter()
        .enumerate()
        .all(|(i, edit)| edits[i + 1..].iter().all(|other| !edit.conflicts_with(other)))
}

/// Apply non-conflicting edits to `source`.
///
/// Edits are applied in offset order. An edit starting before the end of a
/// previously applied one is dropped, so a conflicting set degrades to a
/// partial application instead of corrupting the text.
pub fn apply_edits(source: &str, edits: &[TextEdit]) -> String {
    let mut ordered: Vec<&TextEdit> = edits.iter().collect();
    ordered.sort_by_key(|edit| (edit.range.pos, edit.range.end));

    let added: usize = edits.iter().map(|edit| edit.text.len()).sum();
    let mut output = String::with_capacity(source.len() + added);
    let mut cursor = 0usize;
    for edit in ordered {
        let start = edit.range.pos as usize;
        let end = edit.range.end as usize;
        if start < cursor || end > source.len() {
            continue;
        }
        let (Some(kept), true) = (source.get(cursor..start), source.is_char_boundary(end)) else {
            continue;
        };
        output.push_str(kept);
        output.push_str(&edit.text);
        cursor = end;
    }
    output.push_str(source.get(cursor..).unwrap_or(""));
    output
}
