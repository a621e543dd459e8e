//! Source location tracking
//!
//! Spans are byte offsets into the source fragment: the lexer hands them
//! out, `merge` widens them as the parser builds interior nodes, and the
//! error reporter consumes the offsets directly. Byte offsets are kept as
//! the stored form for exactly those reasons; the human-readable surface
//! wants 1-based line/column ranges instead, so a span is resolved against
//! its source text into a [`SourceRange`] at the point it is shown.

use serde::{Deserialize, Serialize};

/// Byte range of a node in the source fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both operands; how a parent expression node
    /// derives its range from its children.
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Resolve to 1-based line/column positions within `source`. Offsets
    /// past the end of the source clamp to its final position, so the end
    /// of a span covering the whole input still renders.
    pub fn resolve(self, source: &str) -> SourceRange {
        let (start_line, start_col) = line_col(source, self.start);
        let (end_line, end_col) = line_col(source, self.end);
        SourceRange {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }
}

/// A span resolved to human-readable positions. Displays in the
/// `L1-C1..L2-C2` form the diagnostic channel prints after the file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRange {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

impl std::fmt::Display for SourceRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}..{}-{}",
            self.start_line, self.start_col, self.end_line, self.end_col
        )
    }
}

fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let mut line = 1;
    let mut col = 1;
    for (i, ch) in source.char_indices() {
        if i >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}
