//! Where on a line a keyword name may be completed.
//!
//! All offsets here are relative to the start of the line, while cells carry
//! absolute offsets; the conversion happens at this boundary only.

use std::ops::Range;

use crate::syntax::{Line, skip_minimum_separator};

/// The keyword column of a step row, line-relative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordRegion {
    /// First offset at which the cursor counts as "in the keyword".
    pub left: usize,
    /// Last such offset, also the end of the replaced text.
    pub right: usize,
    /// Where the replaced text begins.
    pub replace_start: usize,
}

impl KeywordRegion {
    pub fn contains(
        &self,
        cursor: usize,
    ) -> bool {
        self.left <= cursor && cursor <= self.right
    }

    pub fn is_strictly_inside(
        &self,
        cursor: usize,
    ) -> bool {
        self.left < cursor && cursor < self.right
    }

    /// Absolute replacement range for a line starting at `line_start`.
    pub fn to_absolute(
        &self,
        line_start: usize,
    ) -> Range<usize> {
        line_start + self.replace_start..line_start + self.right
    }
}

fn relative(
    line: &Line,
    absolute: usize,
) -> usize {
    absolute.saturating_sub(line.start())
}

/// Start of the keyword column: the first non-separator position after the
/// name cell. The name cell's content does not matter, only where it ends.
pub fn leftmost_keyword_position(
    text: &str,
    line: &Line,
) -> usize {
    let from = line.cell(0).map(|cell| relative(line, cell.end())).unwrap_or(0);
    skip_minimum_separator(text, from)
}

/// End of the keyword column: the keyword cell's end when arguments follow
/// it, otherwise the end of the line. A trailing comment ends the column at
/// the last cell before it.
pub fn rightmost_keyword_position(
    text: &str,
    line: &Line,
) -> usize {
    match (line.cells().len() >= 3, line.cell(1)) {
        (true, Some(keyword)) => relative(line, keyword.end()),
        _ if line.comment().is_some() => line.cells().last().map_or(0, |cell| relative(line, cell.end())),
        _ => text.len(),
    }
}

pub fn replacement_start(
    text: &str,
    line: &Line,
) -> usize {
    match line.cell(1) {
        Some(keyword) => relative(line, keyword.start()),
        None => leftmost_keyword_position(text, line),
    }
}

/// The keyword region of `line`, or `None` when the line is not a test case
/// or keyword step.
pub fn resolve_keyword_region(
    text: &str,
    line: &Line,
) -> Option<KeywordRegion> {
    if !line.kind().is_keyword_call_row() {
        return None;
    }
    Some(KeywordRegion {
        left: leftmost_keyword_position(text, line),
        right: rightmost_keyword_position(text, line),
        replace_start: replacement_start(text, line),
    })
}

#[cfg(test)]
#[path = "../../tests/src/completion/position_tests.rs"]
mod tests;
