//! Line/column positions.
//!
//! The syntax tree stores byte offsets; diagnostics are shown with lines
//! and columns. `LineMap` converts between the two.

use serde::Serialize;

/// Zero-based line and UTF-16 column, the way editors count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Position { line, character }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Range { start, end }
    }
}

/// Byte offset of every line start. `\n`, `\r\n` and a lone `\r` each end
/// a line.
#[derive(Debug, Clone)]
pub struct LineMap {
    starts: Vec<u32>,
}

impl LineMap {
    pub fn build(source: &str) -> Self {
        let bytes = source.as_bytes();
        let mut starts = vec![0];
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                    i += 1;
                    starts.push(i as u32 + 1);
                }
                b'\r' | b'\n' => starts.push(i as u32 + 1),
                _ => {}
            }
            i += 1;
        }
        LineMap { starts }
    }

    /// Line containing `offset`; offsets past the end land on the last line.
    pub fn line_of(&self, offset: u32) -> usize {
        self.starts.partition_point(|&start| start <= offset) - 1
    }

    pub fn offset_to_position(&self, offset: u32, source: &str) -> Position {
        let line = self.line_of(offset);
        let start = self.starts[line] as usize;
        let end = (offset as usize).clamp(start, source.len().max(start));
        let character = source
            .get(start..end)
            .map_or(0, |prefix| prefix.encode_utf16().count() as u32);
        Position::new(line as u32, character)
    }

    /// Inverse of [`LineMap::offset_to_position`]. Columns past the end of
    /// the line clamp to the line terminator. `None` for a line that does
    /// not exist.
    pub fn position_to_offset(&self, position: Position, source: &str) -> Option<u32> {
        let line = position.line as usize;
        let text = self.line_text(line, source)?;
        let start = self.line_start(line)?;
        let mut column = 0;
        for (index, ch) in text.char_indices() {
            if column >= position.character {
                return Some(start + index as u32);
            }
            column += ch.len_utf16() as u32;
        }
        Some(start + text.len() as u32)
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    pub fn line_start(&self, line: usize) -> Option<u32> {
        self.starts.get(line).copied()
    }

    /// Text of a line without its terminator.
    pub fn line_text<'a>(&self, line: usize, source: &'a str) -> Option<&'a str> {
        let start = *self.starts.get(line)? as usize;
        let end = self
            .starts
            .get(line + 1)
            .map_or(source.len(), |&next| next as usize);
        let text = source.get(start..end)?;
        Some(text.trim_end_matches(['\n', '\r']))
    }

    pub fn range_of(&self, pos: u32, end: u32, source: &str) -> Range {
        Range::new(
            self.offset_to_position(pos, source),
            self.offset_to_position(end, source),
        )
    }
}
