use tracing::trace;

use crate::syntax::{
    kind::{LineKind, Table, TokenKind},
    lexer::Lexer,
    line::{ArgumentCell, Line},
    whitespace::separator_at,
};

/// Parse a whole document into lines.
///
/// Lines are split on `\n`; a trailing `\r` belongs to the terminator. The
/// table context is threaded through a single forward pass, so a malformed
/// line only affects its own classification.
pub fn parse_lines(source: &str) -> Vec<Line> {
    let mut classifier = Classifier::default();
    let mut lines = Vec::new();
    let mut line_start = 0usize;

    for raw in source.split('\n') {
        let text = raw.strip_suffix('\r').unwrap_or(raw);
        let (cells, comment) = split_cells(text, line_start);
        let kind = classifier.classify(&cells, comment.as_ref());
        lines.push(Line::new(line_start, text.len(), cells, comment, kind));
        line_start += raw.len() + 1;
    }

    trace!("parsed {} line(s)", lines.len());
    lines
}

/// Split one line into argument cells and an optional trailing comment.
///
/// `line_start` is the absolute offset of the line; returned cells carry
/// absolute offsets.
pub fn split_cells(
    text: &str,
    line_start: usize,
) -> (Vec<ArgumentCell>, Option<ArgumentCell>) {
    let mut cells = Vec::new();
    let mut open: Option<usize> = None;
    let mut content_end = 0usize;

    for (kind, token, span) in Lexer::new(text) {
        match kind {
            TokenKind::Blank => {
                if separator_at(text, span.start).is_none() {
                    continue;
                }
                if let Some(start) = open.take() {
                    cells.push(cell(text, line_start, start, content_end));
                } else if span.start == 0 {
                    // Leading separator: the name column is empty.
                    cells.push(cell(text, line_start, 0, 0));
                }
            },
            TokenKind::Escape | TokenKind::Text => {
                if open.is_none() {
                    if kind == TokenKind::Text && token.starts_with('#') {
                        let end = text.trim_end_matches([' ', '\t']).len();
                        let comment = cell(text, line_start, span.start, end.max(span.end));
                        return (cells, Some(comment));
                    }
                    open = Some(span.start);
                }
                content_end = span.end;
            },
        }
    }

    if let Some(start) = open {
        cells.push(cell(text, line_start, start, content_end));
    }

    (cells, None)
}

fn cell(
    text: &str,
    line_start: usize,
    start: usize,
    end: usize,
) -> ArgumentCell {
    ArgumentCell::new(&text[start..end], line_start + start, line_start + end)
}

/// Line classifier carrying the current table from one line to the next.
#[derive(Debug, Default)]
pub(crate) struct Classifier {
    table: Option<Table>,
}

impl Classifier {
    pub(crate) fn classify(
        &mut self,
        cells: &[ArgumentCell],
        comment: Option<&ArgumentCell>,
    ) -> LineKind {
        let Some(first) = cells.first() else {
            return if comment.is_some() {
                LineKind::Comment
            } else {
                LineKind::Ignore
            };
        };

        if first.value().starts_with('*') {
            let header = cells.iter().map(ArgumentCell::value).collect::<Vec<_>>().join(" ");
            let table = Table::from_header(&header);
            self.table = Some(table);
            return LineKind::TableHeader(table);
        }

        let first_non_empty = cells.iter().find(|cell| !cell.is_empty());
        if first_non_empty.is_none() && comment.is_some() {
            return LineKind::Comment;
        }

        let Some(table) = self.table else {
            return LineKind::Ignore;
        };
        if matches!(table, Table::Comments | Table::Unknown) {
            return LineKind::Ignore;
        }

        if first_non_empty.is_some_and(|cell| cell.value() == "...") {
            return LineKind::Continuation;
        }

        let named = !first.is_empty();
        match table {
            Table::Settings => LineKind::Setting,
            Table::Variables => LineKind::Variable,
            Table::TestCases if named => LineKind::TestCaseBegin,
            Table::TestCases => LineKind::TestCaseStep,
            Table::Keywords if named => LineKind::KeywordBegin,
            Table::Keywords => LineKind::KeywordStep,
            Table::Comments | Table::Unknown => LineKind::Ignore,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src/syntax/parser_tests.rs"]
mod tests;
