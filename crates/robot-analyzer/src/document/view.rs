use std::ops::Range;

/// Read-only view of a document's text, addressed by byte offsets.
///
/// This is the narrow port the completion engine needs from an editor
/// buffer. Line ranges exclude the line terminator.
pub trait DocumentView {
    /// 0-based line index containing `offset`, or `None` when the offset is
    /// past the end of the document.
    fn line_of_offset(
        &self,
        offset: usize,
    ) -> Option<usize>;

    fn line_range(
        &self,
        line: usize,
    ) -> Option<Range<usize>>;

    fn text(
        &self,
        range: Range<usize>,
    ) -> Option<&str>;

    fn line_start(
        &self,
        line: usize,
    ) -> Option<usize> {
        self.line_range(line).map(|range| range.start)
    }

    fn line_slice(
        &self,
        line: usize,
    ) -> Option<&str> {
        self.text(self.line_range(line)?)
    }
}
