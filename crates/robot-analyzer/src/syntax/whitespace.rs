//! Column separators of the plain-text test data format.
//!
//! Cells are separated by two or more spaces, or by any whitespace run that
//! contains a tab. A single space is ordinary cell content (`Log Many` is one
//! cell, `Log  Many` is two).

/// Length in bytes of the separator starting at `from`, if there is one.
///
/// Returns `None` for a lone space, for non-whitespace, for offsets past the
/// end and for offsets that do not fall on a char boundary.
pub fn separator_at(
    text: &str,
    from: usize,
) -> Option<usize> {
    let rest = text.get(from..)?;
    let run = rest.bytes().take_while(|b| is_blank(*b)).count();
    if run == 0 {
        return None;
    }
    let has_tab = rest.as_bytes()[..run].contains(&b'\t');
    (run >= 2 || has_tab).then_some(run)
}

/// Skip the separator starting at `from` and return the offset of the first
/// character after it.
///
/// When `from` is not at a separator it is returned unchanged. Offsets at or
/// past the end of `text` yield `text.len()`.
pub fn skip_minimum_separator(
    text: &str,
    from: usize,
) -> usize {
    if from >= text.len() {
        return text.len();
    }
    match separator_at(text, from) {
        Some(len) => from + len,
        None => from,
    }
}

pub(crate) fn is_blank(byte: u8) -> bool {
    byte == b' ' || byte == b'\t'
}

#[cfg(test)]
#[path = "../../tests/src/syntax/whitespace_tests.rs"]
mod tests;
