//! Half-open byte ranges over source text.

use serde::Serialize;

/// A half-open `[pos, end)` byte range into a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct TextRange {
    pub pos: u32,
    pub end: u32,
}

impl TextRange {
    pub fn new(pos: u32, end: u32) -> Self {
        debug_assert!(pos <= end, "inverted range {pos}..{end}");
        TextRange { pos, end }
    }

    /// An empty range at `offset`, used for insertions.
    pub fn empty(offset: u32) -> Self {
        TextRange {
            pos: offset,
            end: offset,
        }
    }

    pub fn len(&self) -> u32 {
        self.end - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos == self.end
    }

    /// True if `offset` lies inside the range (end exclusive).
    pub fn contains(&self, offset: u32) -> bool {
        self.pos <= offset && offset < self.end
    }

    /// True if both ranges share at least one byte.
    pub fn overlaps(&self, other: &TextRange) -> bool {
        self.pos < other.end && other.pos < self.end
    }

    /// Smallest range covering both.
    pub fn cover(&self, other: &TextRange) -> TextRange {
        TextRange {
            pos: self.pos.min(other.pos),
            end: self.end.max(other.end),
        }
    }

    /// Slice the covered text out of `source`, or `""` when out of bounds.
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        source
            .get(self.pos as usize..self.end as usize)
            .unwrap_or("")
    }
}
