//! LSP positions (UTF-16 columns) to byte offsets and back.

use tower_lsp::lsp_types::Position;

use crate::document::DocumentView;

/// Byte offset of an LSP position. Columns past the end of the line clamp to
/// the line end; a line past the end of the document gives `None`.
pub fn byte_offset_at<D: DocumentView + ?Sized>(
    view: &D,
    position: Position,
) -> Option<usize> {
    let range = view.line_range(position.line as usize)?;
    let line = view.text(range.clone())?;

    let mut utf16_offset = 0u32;
    let mut byte_offset = 0usize;
    for ch in line.chars() {
        if utf16_offset >= position.character {
            break;
        }
        utf16_offset += ch.len_utf16() as u32;
        byte_offset += ch.len_utf8();
    }
    Some(range.start + byte_offset)
}

/// LSP position of a byte offset. Offsets inside a line terminator clamp to
/// the end of that line.
pub fn position_at<D: DocumentView + ?Sized>(
    view: &D,
    offset: usize,
) -> Option<Position> {
    let line = view.line_of_offset(offset)?;
    let range = view.line_range(line)?;
    let end = offset.clamp(range.start, range.end);
    let prefix = view.text(range.start..end)?;
    Some(Position::new(line as u32, utf16_len(prefix)))
}

pub fn utf16_len(text: &str) -> u32 {
    text.encode_utf16().count() as u32
}
