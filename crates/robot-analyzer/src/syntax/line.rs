use crate::syntax::kind::LineKind;

/// One cell of a line. Offsets are absolute byte offsets into the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentCell {
    value: String,
    start: usize,
    end: usize,
}

impl ArgumentCell {
    pub fn new(
        value: impl Into<String>,
        start: usize,
        end: usize,
    ) -> Self {
        debug_assert!(start <= end, "cell start {start} is after its end {end}");
        Self {
            value: value.into(),
            start,
            end,
        }
    }

    /// Raw cell text, escapes included, so that `start + i` addresses the
    /// `i`-th byte of the value.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// One parsed source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    start: usize,
    len: usize,
    cells: Vec<ArgumentCell>,
    comment: Option<ArgumentCell>,
    kind: LineKind,
}

impl Line {
    pub(crate) fn new(
        start: usize,
        len: usize,
        cells: Vec<ArgumentCell>,
        comment: Option<ArgumentCell>,
        kind: LineKind,
    ) -> Self {
        Self {
            start,
            len,
            cells,
            comment,
            kind,
        }
    }

    /// Absolute offset of the first byte of the line.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Absolute offset just past the last byte, line terminator excluded.
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn kind(&self) -> LineKind {
        self.kind
    }

    pub fn cells(&self) -> &[ArgumentCell] {
        &self.cells
    }

    pub fn cell(
        &self,
        index: usize,
    ) -> Option<&ArgumentCell> {
        self.cells.get(index)
    }

    /// The trailing `#` comment, if the line has one.
    pub fn comment(&self) -> Option<&ArgumentCell> {
        self.comment.as_ref()
    }

    pub fn first_non_empty_cell(&self) -> Option<&ArgumentCell> {
        self.cells.iter().find(|cell| !cell.is_empty())
    }
}
