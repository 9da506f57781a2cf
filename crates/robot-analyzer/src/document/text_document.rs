use std::ops::Range;

use tower_lsp::lsp_types::*;

use super::DocumentView;
use crate::text_pos::byte_offset_at;

/// Snapshot of a single open text document.
#[derive(Debug, Clone)]
pub struct Document {
    /// The document URI.
    pub uri: Url,
    /// Full source text (always kept up-to-date).
    pub text: String,
    /// Document version as reported by the client.
    pub version: i32,
    /// Line start byte offsets, rebuilt on every mutation.
    line_offsets: Vec<usize>,
}

impl Document {
    pub fn new(
        uri: Url,
        text: String,
        version: i32,
    ) -> Self {
        let line_offsets = compute_line_offsets(&text);
        Self {
            uri,
            text,
            version,
            line_offsets,
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_offsets.len()
    }

    /// Text of a 0-based line without its terminator.
    pub fn line_text(
        &self,
        line: usize,
    ) -> Option<&str> {
        let range = self.line_range(line)?;
        self.text.get(range)
    }

    /// Convert an LSP `Position` (UTF-16 based) to a byte offset.
    pub fn offset_of(
        &self,
        pos: Position,
    ) -> Option<usize> {
        byte_offset_at(self, pos)
    }

    /// Replace the full content and bump version.
    pub fn set_content(
        &mut self,
        text: String,
        version: i32,
    ) {
        self.text = text;
        self.version = version;
        self.line_offsets = compute_line_offsets(&self.text);
    }

    /// Apply a list of incremental or full-content changes and bump version.
    ///
    /// Changes whose range does not resolve are dropped.
    pub fn apply_changes(
        &mut self,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
    ) {
        for change in changes {
            match change.range {
                Some(range) => {
                    if let (Some(start), Some(end)) = (self.offset_of(range.start), self.offset_of(range.end))
                        && start <= end
                    {
                        self.text.replace_range(start..end, &change.text);
                    }
                },
                None => self.text = change.text,
            }
            self.line_offsets = compute_line_offsets(&self.text);
        }
        self.version = version;
    }
}

impl DocumentView for Document {
    fn line_of_offset(
        &self,
        offset: usize,
    ) -> Option<usize> {
        if offset > self.text.len() {
            return None;
        }
        self.line_offsets.partition_point(|start| *start <= offset).checked_sub(1)
    }

    fn line_range(
        &self,
        line: usize,
    ) -> Option<Range<usize>> {
        let start = *self.line_offsets.get(line)?;
        let end = self.line_offsets.get(line + 1).map(|next| next - 1).unwrap_or(self.text.len());
        let end = if self.text[start..end].ends_with('\r') {
            end - 1
        } else {
            end
        };
        Some(start..end)
    }

    fn text(
        &self,
        range: Range<usize>,
    ) -> Option<&str> {
        self.text.get(range)
    }
}

fn compute_line_offsets(text: &str) -> Vec<usize> {
    let mut offsets = vec![0usize];
    for (i, byte) in text.bytes().enumerate() {
        if byte == b'\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

#[cfg(test)]
#[path = "../../tests/src/document/text_document_tests.rs"]
mod tests;
